mod auth;
mod contact;
mod profile;
mod users;

pub use auth::{auth_translations, AuthTranslations};
pub use contact::{contact_translations, ContactTranslations};
pub use profile::{profile_translations, ProfileTranslations};
pub use users::{users_translations, UsersTranslations};

use serde::Serialize;

/// Languages the panel ships with. Latvian is the site default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Lv,
    En,
    Ru,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Lv, Language::En, Language::Ru];

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "lv" => Some(Language::Lv),
            "en" => Some(Language::En),
            "ru" => Some(Language::Ru),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::Lv => "lv",
            Language::En => "en",
            Language::Ru => "ru",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::Lv => "Latviešu",
            Language::En => "English",
            Language::Ru => "Русский",
        }
    }

    /// Picks the string for this language; handlers use it for one-off
    /// messages that never made it into the tables.
    pub fn pick<'a>(self, lv: &'a str, en: &'a str, ru: &'a str) -> &'a str {
        match self {
            Language::Lv => lv,
            Language::En => en,
            Language::Ru => ru,
        }
    }
}

/// Everything the panel needs in one language, served to the SPA in one call.
#[derive(Debug, Serialize)]
pub struct TranslationPack {
    pub contact: &'static ContactTranslations,
    pub auth: &'static AuthTranslations,
    pub profile: &'static ProfileTranslations,
    pub users: &'static UsersTranslations,
}

pub fn pack(lang: Language) -> TranslationPack {
    TranslationPack {
        contact: contact_translations(lang),
        auth: auth_translations(lang),
        profile: profile_translations(lang),
        users: users_translations(lang),
    }
}
