//! User profile domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    /// Always stored trimmed and lowercased.
    pub email_id: String,
    pub password_hash: String,
    pub course: Option<String>,
    pub location: Option<String>,
    pub citizenship: Option<String>,
    pub degree_level: Option<String>,
    pub start_date: Option<String>,
    pub income_status: Option<String>,
    pub current_status: Option<String>,
    pub categories: Vec<String>,
    pub interests: Vec<String>,
    /// Scholarship ids. Weak references: the targets may be gone.
    pub recommended_scholarships: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-facing projection of a [`UserProfile`] without the password
/// hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicProfile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email_id: String,
    pub course: Option<String>,
    pub location: Option<String>,
    pub citizenship: Option<String>,
    pub degree_level: Option<String>,
    pub start_date: Option<String>,
    pub income_status: Option<String>,
    pub current_status: Option<String>,
    pub categories: Vec<String>,
    pub interests: Vec<String>,
    pub recommended_scholarships: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<UserProfile> for PublicProfile {
    fn from(p: UserProfile) -> Self {
        Self {
            id: p.id,
            name: p.name,
            email_id: p.email_id,
            course: p.course,
            location: p.location,
            citizenship: p.citizenship,
            degree_level: p.degree_level,
            start_date: p.start_date,
            income_status: p.income_status,
            current_status: p.current_status,
            categories: p.categories,
            interests: p.interests,
            recommended_scholarships: p.recommended_scholarships,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserProfile {
    pub name: String,
    pub email_id: String,
    /// Already hashed by the auth layer.
    pub password_hash: String,
}

/// Academic profile completion.
///
/// Replace semantics: every field below is written as given, so an
/// absent value clears what was stored. `name` is the exception, it is
/// required by the store and only overwritten when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompleteProfile {
    pub name: Option<String>,
    pub course: Option<String>,
    pub location: Option<String>,
    pub citizenship: Option<String>,
    pub degree_level: Option<String>,
    pub start_date: Option<String>,
    pub income_status: Option<String>,
    pub current_status: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Normalize an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
