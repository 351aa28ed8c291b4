//! Scholarship domain model.
//!
//! Scholarship documents are written by an external ingestion job, so
//! every descriptive field is optional. The `id` is opaque and
//! serialized as `_id` to stay compatible with existing clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Eligibility block nested in every scholarship document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    /// Raw deadline text as scraped. Expected to parse as a calendar
    /// date, but nothing guarantees it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility_summary: Option<String>,
    /// Free-text clauses used for keyword refinement.
    #[serde(default)]
    pub criteria: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HowToApply {
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportantLink {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scholarship {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: Option<String>,
    pub amount: Option<String>,
    pub link: Option<String>,
    pub eligibility: Option<Eligibility>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    pub how_to_apply: Option<HowToApply>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    pub important_dates: Option<String>,
    #[serde(default)]
    pub important_links: Vec<ImportantLink>,
    pub last_updated: Option<String>,
    pub selection_criteria: Option<String>,
    pub contact_details: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Scholarship {
    pub fn deadline_date(&self) -> Option<&str> {
        self.eligibility.as_ref()?.deadline_date.as_deref()
    }

    pub fn eligibility_summary(&self) -> Option<&str> {
        self.eligibility.as_ref()?.eligibility_summary.as_deref()
    }

    /// Eligibility criteria clauses, empty when the block is missing.
    pub fn criteria(&self) -> &[String] {
        self.eligibility
            .as_ref()
            .map(|e| e.criteria.as_slice())
            .unwrap_or_default()
    }
}

/// Input for inserting a scholarship document.
///
/// Only ingestion tooling and tests write scholarships; the HTTP
/// surface is read-only apart from the cleanup trigger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateScholarship {
    pub title: Option<String>,
    pub amount: Option<String>,
    pub link: Option<String>,
    pub eligibility: Option<Eligibility>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    pub how_to_apply: Option<HowToApply>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    pub important_dates: Option<String>,
    #[serde(default)]
    pub important_links: Vec<ImportantLink>,
    pub last_updated: Option<String>,
    pub selection_criteria: Option<String>,
    pub contact_details: Option<String>,
    pub image_url: Option<String>,
}
