use serde::Serialize;

use super::Language;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersTranslations {
    pub delete_title: &'static str,
    /// Template; the SPA substitutes {name}.
    pub delete_confirm: &'static str,
    pub delete_button: &'static str,
    pub deleting: &'static str,
    pub cancel: &'static str,
    pub delete_success: &'static str,
    pub delete_failed: &'static str,
    pub update_success: &'static str,
    pub update_failed: &'static str,
    pub not_specified: &'static str,
    pub error_title: &'static str,
}

static USERS_LV: UsersTranslations = UsersTranslations {
    delete_title: "Dzēst lietotāju",
    delete_confirm: "Vai tiešām vēlaties dzēst {name}? Šī darbība ir neatgriezeniska.",
    delete_button: "Dzēst",
    deleting: "Dzēš...",
    cancel: "Atcelt",
    delete_success: "Lietotājs veiksmīgi dzēsts",
    delete_failed: "Neizdevās dzēst lietotāju",
    update_success: "Lietotājs veiksmīgi atjaunināts",
    update_failed: "Neizdevās atjaunināt lietotāju",
    not_specified: "Nav norādīts",
    error_title: "Kļūda",
};

static USERS_EN: UsersTranslations = UsersTranslations {
    delete_title: "Delete User",
    delete_confirm: "Are you sure you want to delete {name}? This action is irreversible.",
    delete_button: "Delete",
    deleting: "Deleting...",
    cancel: "Cancel",
    delete_success: "User successfully deleted",
    delete_failed: "Failed to delete user",
    update_success: "User successfully updated",
    update_failed: "Failed to update user",
    not_specified: "Not specified",
    error_title: "Error",
};

// The admin dialogs never had Russian copy; they fall back to English.
static USERS_RU: UsersTranslations = UsersTranslations {
    delete_title: "Delete User",
    delete_confirm: "Are you sure you want to delete {name}? This action is irreversible.",
    delete_button: "Delete",
    deleting: "Deleting...",
    cancel: "Cancel",
    delete_success: "User successfully deleted",
    delete_failed: "Failed to delete user",
    update_success: "User successfully updated",
    update_failed: "Failed to update user",
    not_specified: "Not specified",
    error_title: "Ошибка",
};

pub fn users_translations(lang: Language) -> &'static UsersTranslations {
    match lang {
        Language::Lv => &USERS_LV,
        Language::En => &USERS_EN,
        Language::Ru => &USERS_RU,
    }
}
