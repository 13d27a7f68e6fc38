use serde::Serialize;

use super::Language;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileTranslations {
    pub upload_label: &'static str,
    pub uploading: &'static str,
    pub upload_failed: &'static str,
    pub avatar_alt: &'static str,
    pub error_title: &'static str,
}

static PROFILE_LV: ProfileTranslations = ProfileTranslations {
    upload_label: "Augšupielādēt attēlu",
    uploading: "Augšupielādē...",
    upload_failed: "Neizdevās augšupielādēt attēlu. Lūdzu, mēģiniet vēlreiz.",
    avatar_alt: "Lietotāja attēls",
    error_title: "Kļūda",
};

static PROFILE_EN: ProfileTranslations = ProfileTranslations {
    upload_label: "Upload Image",
    uploading: "Uploading...",
    upload_failed: "Failed to upload image. Please try again.",
    avatar_alt: "User avatar",
    error_title: "Error",
};

static PROFILE_RU: ProfileTranslations = ProfileTranslations {
    upload_label: "Загрузить изображение",
    uploading: "Загрузка...",
    upload_failed: "Не удалось загрузить изображение. Пожалуйста, попробуйте еще раз.",
    avatar_alt: "Изображение пользователя",
    error_title: "Ошибка",
};

pub fn profile_translations(lang: Language) -> &'static ProfileTranslations {
    match lang {
        Language::Lv => &PROFILE_LV,
        Language::En => &PROFILE_EN,
        Language::Ru => &PROFILE_RU,
    }
}
