use serde::Serialize;

use super::Language;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTranslations {
    pub login: &'static str,
    pub logout: &'static str,
    pub email_label: &'static str,
    pub password_label: &'static str,
    pub my_profile: &'static str,
    pub admin_panel: &'static str,
    pub invalid_credentials: &'static str,
    pub not_admin: &'static str,
}

static AUTH_LV: AuthTranslations = AuthTranslations {
    login: "Pieslēgties",
    logout: "Iziet",
    email_label: "E-pasts",
    password_label: "Parole",
    my_profile: "Mans profils",
    admin_panel: "Administrēšana",
    invalid_credentials: "Nepareizs e-pasts vai parole",
    not_admin: "Šim kontam nav administratora piekļuves",
};

static AUTH_EN: AuthTranslations = AuthTranslations {
    login: "Log in",
    logout: "Log out",
    email_label: "Email",
    password_label: "Password",
    my_profile: "My profile",
    admin_panel: "Administration",
    invalid_credentials: "Invalid email or password",
    not_admin: "This account has no administrator access",
};

static AUTH_RU: AuthTranslations = AuthTranslations {
    login: "Войти",
    logout: "Выйти",
    email_label: "Эл. почта",
    password_label: "Пароль",
    my_profile: "Мой профиль",
    admin_panel: "Администрирование",
    invalid_credentials: "Неверный адрес эл. почты или пароль",
    not_admin: "У этой учетной записи нет прав администратора",
};

pub fn auth_translations(lang: Language) -> &'static AuthTranslations {
    match lang {
        Language::Lv => &AUTH_LV,
        Language::En => &AUTH_EN,
        Language::Ru => &AUTH_RU,
    }
}
