//! Query parameters and request/response bodies.

use scholara_catalog::{CriteriaFilter, EducationLevel, SortSpec};
use scholara_core::error::{ScholaraError, ScholaraResult};
use scholara_core::models::scholarship::Scholarship;
use scholara_core::models::user_profile::{CompleteProfile, PublicProfile};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Empty strings count as absent; clients send them for unset filters.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Query string shared by listing and search.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub query: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
    /// Comma-separated; any one matching is enough.
    pub tags: Option<String>,
    pub state: Option<String>,
    pub religion: Option<String>,
    pub country: Option<String>,
    pub education: Option<String>,
}

impl CatalogQuery {
    pub fn sort(&self) -> Option<SortSpec> {
        SortSpec::from_params(non_empty(&self.sort_by), non_empty(&self.order))
    }

    pub fn criteria(&self) -> ScholaraResult<CriteriaFilter> {
        let tags = non_empty(&self.tags)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(CriteriaFilter {
            tags,
            state: non_empty(&self.state).map(String::from),
            religion: non_empty(&self.religion).map(String::from),
            country: non_empty(&self.country).map(String::from),
            education: non_empty(&self.education)
                .map(str::parse::<EducationLevel>)
                .transpose()?,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResponse {
    pub message: &'static str,
    pub deleted_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email_id: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub email_id: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SigninUser {
    pub name: String,
    pub email_id: String,
    #[serde(rename = "_id")]
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub token: String,
    pub user: SigninUser,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CompleteProfileRequest {
    #[serde(rename = "userId", default)]
    pub user_id: String,
    #[serde(flatten)]
    pub profile: CompleteProfile,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ProfileUpdatedResponse {
    pub message: &'static str,
    pub user: PublicProfile,
}

#[derive(Debug, Serialize)]
pub struct RecommendedResponse {
    pub recommended_scholarships: Vec<Scholarship>,
}

/// Parse a user id from a path or body. Malformed ids are a client
/// error, never a lookup.
pub fn parse_user_id(raw: &str) -> ScholaraResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| ScholaraError::Validation {
        message: format!("invalid userId: {raw}"),
    })
}
