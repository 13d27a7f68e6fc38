use chrono::{DateTime, Utc};
use datastore_service_cli::RegisteredUser;
use serde::Serialize;

/// Row shape the user list renders: the stored fields plus the display name
/// and avatar-fallback initials the list computes per row.
#[derive(Clone, Debug, Serialize)]
pub struct UserSummary {
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
    pub display_name: String,
    pub initials: String,
}

impl UserSummary {
    pub fn from_user(user: RegisteredUser, name_fallback: &str) -> Self {
        let display_name = user.display_name(name_fallback);
        let initials = user.initials();
        UserSummary {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            role: user.role,
            status: user.status,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
            updated_at: user.updated_at,
            display_name,
            initials,
        }
    }
}
