use serde::Serialize;

use super::Language;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactTranslations {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub company_name: &'static str,
    pub address_title: &'static str,
    pub address: &'static str,
    pub email_title: &'static str,
    pub email: &'static str,
    pub phone_title: &'static str,
    pub phone: &'static str,
    pub social_title: &'static str,
    pub form_title: &'static str,
    pub name_label: &'static str,
    pub name_placeholder: &'static str,
    pub email_label: &'static str,
    pub email_placeholder: &'static str,
    pub message_label: &'static str,
    pub message_placeholder: &'static str,
    pub submit_button: &'static str,
    pub success_message: &'static str,
    pub error_message: &'static str,
}

static CONTACT_LV: ContactTranslations = ContactTranslations {
    title: "Kontaktinformācija",
    subtitle: "Sazinieties ar mums, ja jums ir jautājumi vai nepieciešama palīdzība",
    company_name: "SIA \"Par to tiek domāts\"",
    address_title: "Mūsu birojs",
    address: "Rīga, Latvija",
    email_title: "E-pasts",
    email: "info@netieku.es",
    phone_title: "Tālrunis",
    phone: "+371 20 000 000",
    social_title: "Sociālie tīkli",
    form_title: "Sazināties ar mums",
    name_label: "Vārds",
    name_placeholder: "Jūsu vārds",
    email_label: "E-pasts",
    email_placeholder: "Jūsu e-pasta adrese",
    message_label: "Ziņojums",
    message_placeholder: "Jūsu ziņojums...",
    submit_button: "Nosūtīt ziņojumu",
    success_message: "Paldies! Jūsu ziņojums ir nosūtīts. Mēs ar jums sazināsimies tuvākajā laikā.",
    error_message: "Kļūda! Neizdevās nosūtīt ziņojumu. Lūdzu, mēģiniet vēlreiz.",
};

static CONTACT_EN: ContactTranslations = ContactTranslations {
    title: "Contact Information",
    subtitle: "Get in touch with us if you have any questions or need assistance",
    company_name: "SIA \"Par to tiek domāts\"",
    address_title: "Our Office",
    address: "Riga, Latvia",
    email_title: "Email",
    email: "info@netieku.es",
    phone_title: "Phone",
    phone: "+371 20 000 000",
    social_title: "Social Media",
    form_title: "Contact Us",
    name_label: "Name",
    name_placeholder: "Your name",
    email_label: "Email",
    email_placeholder: "Your email address",
    message_label: "Message",
    message_placeholder: "Your message...",
    submit_button: "Send Message",
    success_message: "Thank you! Your message has been sent. We will contact you soon.",
    error_message: "Error! Failed to send message. Please try again.",
};

static CONTACT_RU: ContactTranslations = ContactTranslations {
    title: "Контактная информация",
    subtitle: "Свяжитесь с нами, если у вас есть вопросы или нужна помощь",
    company_name: "SIA \"Par to tiek domāts\"",
    address_title: "Наш офис",
    address: "Рига, Латвия",
    email_title: "Эл. почта",
    email: "info@netieku.es",
    phone_title: "Телефон",
    phone: "+371 20 000 000",
    social_title: "Социальные сети",
    form_title: "Связаться с нами",
    name_label: "Имя",
    name_placeholder: "Ваше имя",
    email_label: "Эл. почта",
    email_placeholder: "Ваш адрес эл. почты",
    message_label: "Сообщение",
    message_placeholder: "Ваше сообщение...",
    submit_button: "Отправить сообщение",
    success_message: "Спасибо! Ваше сообщение отправлено. Мы свяжемся с вами в ближайшее время.",
    error_message: "Ошибка! Не удалось отправить сообщение. Пожалуйста, попробуйте еще раз.",
};

pub fn contact_translations(lang: Language) -> &'static ContactTranslations {
    match lang {
        Language::Lv => &CONTACT_LV,
        Language::En => &CONTACT_EN,
        Language::Ru => &CONTACT_RU,
    }
}
