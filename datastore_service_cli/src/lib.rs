pub mod client;
pub mod operations;
pub mod utils;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Collections the admin panel is allowed to touch. Anything else is not a
/// valid mutation target, no matter what the caller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    RegisteredUsers,
    AdminUser,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::RegisteredUsers => "registered_users",
            Collection::AdminUser => "admin_user",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered_users" => Ok(Collection::RegisteredUsers),
            "admin_user" => Ok(Collection::AdminUser),
            other => Err(format!(
                "unknown collection '{other}' (expected registered_users or admin_user)"
            )),
        }
    }
}

/// Outcome of a single mutation against the data service.
///
/// `error` is set exactly when `success` is false; use the constructors
/// instead of building the struct by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl RegisteredUser {
    /// Initials for the avatar fallback: first letters of the names, then the
    /// first two letters of the email, then "?".
    pub fn initials(&self) -> String {
        let first = self
            .first_name
            .as_deref()
            .and_then(|n| n.chars().next())
            .map(|c| c.to_uppercase().to_string());
        let last = self
            .last_name
            .as_deref()
            .and_then(|n| n.chars().next())
            .map(|c| c.to_uppercase().to_string());

        match (first, last) {
            (None, None) => match self.email.as_deref() {
                Some(email) if !email.is_empty() => {
                    email.chars().take(2).collect::<String>().to_uppercase()
                }
                _ => "?".to_string(),
            },
            (first, last) => format!(
                "{}{}",
                first.unwrap_or_default(),
                last.unwrap_or_default()
            ),
        }
    }

    /// Full name with a localized placeholder for whichever part is missing.
    pub fn display_name(&self, fallback: &str) -> String {
        let first = self.first_name.as_deref().filter(|s| !s.is_empty());
        let last = self.last_name.as_deref().filter(|s| !s.is_empty());
        format!(
            "{} {}",
            first.unwrap_or(fallback),
            last.unwrap_or(fallback)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
}

/// Appends a timestamp query so browsers re-fetch a freshly replaced image.
pub fn cache_busted_url(url: &str, stamp: i64) -> String {
    format!("{url}?t={stamp}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: Option<&str>, last: Option<&str>, email: Option<&str>) -> RegisteredUser {
        RegisteredUser {
            id: "u1".to_string(),
            email: email.map(str::to_string),
            first_name: first.map(str::to_string),
            last_name: last.map(str::to_string),
            phone: None,
            role: None,
            status: None,
            avatar_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn operation_result_invariant() {
        let ok = OperationResult::ok();
        assert!(ok.success);
        assert!(ok.error.is_none());

        let failed = OperationResult::failed("row not found");
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("row not found"));
    }

    #[test]
    fn collection_names_are_closed() {
        assert_eq!(Collection::RegisteredUsers.as_str(), "registered_users");
        assert_eq!(Collection::AdminUser.as_str(), "admin_user");
        assert!("workspaces".parse::<Collection>().is_err());
        assert_eq!(
            "registered_users".parse::<Collection>(),
            Ok(Collection::RegisteredUsers)
        );
    }

    #[test]
    fn initials_prefer_names_over_email() {
        assert_eq!(user(Some("anna"), Some("berzina"), None).initials(), "AB");
        assert_eq!(user(Some("Anna"), None, None).initials(), "A");
        assert_eq!(user(None, None, Some("zz@netieku.es")).initials(), "ZZ");
        assert_eq!(user(None, None, None).initials(), "?");
    }

    #[test]
    fn display_name_fills_missing_parts() {
        let u = user(Some("Anna"), None, None);
        assert_eq!(u.display_name("Nav norādīts"), "Anna Nav norādīts");
        let u = user(Some("Anna"), Some("Bērziņa"), None);
        assert_eq!(u.display_name("Nav norādīts"), "Anna Bērziņa");
    }

    #[test]
    fn cache_buster_appends_stamp() {
        assert_eq!(
            cache_busted_url("https://x/storage/v1/object/public/avatars/a.png", 17),
            "https://x/storage/v1/object/public/avatars/a.png?t=17"
        );
    }
}
