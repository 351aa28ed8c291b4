//! SurrealDB implementation of [`ScholarshipRepository`].
//!
//! The `scholarship` table is SCHEMALESS, so apart from the id and
//! `created_at` every field travels as raw JSON and is decoded on its
//! own. A field that does not decode is dropped with a warning instead
//! of failing the whole read; a scholarship that loses its eligibility
//! block that way is simply treated as expired downstream.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use scholara_core::error::ScholaraResult;
use scholara_core::models::scholarship::{CreateScholarship, Scholarship};
use scholara_core::repository::ScholarshipRepository;
use serde::Serialize;
use serde::de::DeserializeOwned;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::warn;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct ScholarshipRow {
    record_id: String,
    title: Option<serde_json::Value>,
    amount: Option<serde_json::Value>,
    link: Option<serde_json::Value>,
    eligibility: Option<serde_json::Value>,
    faqs: Option<serde_json::Value>,
    how_to_apply: Option<serde_json::Value>,
    benefits: Option<serde_json::Value>,
    documents: Option<serde_json::Value>,
    important_dates: Option<serde_json::Value>,
    important_links: Option<serde_json::Value>,
    last_updated: Option<serde_json::Value>,
    selection_criteria: Option<serde_json::Value>,
    contact_details: Option<serde_json::Value>,
    image_url: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
}

fn decode_nested<T: DeserializeOwned>(
    record_id: &str,
    field: &str,
    value: Option<serde_json::Value>,
) -> Option<T> {
    match value {
        None | Some(serde_json::Value::Null) => None,
        Some(v) => match serde_json::from_value(v) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(record_id, field, error = %e, "Dropping malformed scholarship field");
                None
            }
        },
    }
}

/// Text fields also accept scraped numbers and booleans verbatim.
fn decode_text(record_id: &str, field: &str, value: Option<serde_json::Value>) -> Option<String> {
    match value {
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        other => decode_nested(record_id, field, other),
    }
}

fn encode_nested<T: Serialize>(value: &T) -> Result<serde_json::Value, DbError> {
    serde_json::to_value(value).map_err(|e| DbError::Encoding(e.to_string()))
}

impl ScholarshipRow {
    fn into_scholarship(self) -> Scholarship {
        let id = self.record_id;
        Scholarship {
            title: decode_text(&id, "title", self.title),
            amount: decode_text(&id, "amount", self.amount),
            link: decode_text(&id, "link", self.link),
            eligibility: decode_nested(&id, "eligibility", self.eligibility),
            faqs: decode_nested(&id, "faqs", self.faqs).unwrap_or_default(),
            how_to_apply: decode_nested(&id, "how_to_apply", self.how_to_apply),
            benefits: decode_nested(&id, "benefits", self.benefits).unwrap_or_default(),
            documents: decode_nested(&id, "documents", self.documents).unwrap_or_default(),
            important_dates: decode_text(&id, "important_dates", self.important_dates),
            important_links: decode_nested(&id, "important_links", self.important_links)
                .unwrap_or_default(),
            last_updated: decode_text(&id, "last_updated", self.last_updated),
            selection_criteria: decode_text(&id, "selection_criteria", self.selection_criteria),
            contact_details: decode_text(&id, "contact_details", self.contact_details),
            image_url: decode_text(&id, "image_url", self.image_url),
            created_at: self.created_at,
            id,
        }
    }
}

/// SurrealDB implementation of the Scholarship repository.
#[derive(Clone)]
pub struct SurrealScholarshipRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealScholarshipRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ScholarshipRepository for SurrealScholarshipRepository<C> {
    async fn create(&self, input: CreateScholarship) -> ScholaraResult<Scholarship> {
        let id_str = Uuid::new_v4().simple().to_string();

        let eligibility = input.eligibility.as_ref().map(encode_nested).transpose()?;
        let how_to_apply = input.how_to_apply.as_ref().map(encode_nested).transpose()?;
        let faqs = encode_nested(&input.faqs)?;
        let important_links = encode_nested(&input.important_links)?;

        let result = self
            .db
            .query(
                "CREATE type::record('scholarship', $id) SET \
                 title = $title, amount = $amount, link = $link, \
                 eligibility = $eligibility, faqs = $faqs, \
                 how_to_apply = $how_to_apply, \
                 benefits = $benefits, documents = $documents, \
                 important_dates = $important_dates, \
                 important_links = $important_links, \
                 last_updated = $last_updated, \
                 selection_criteria = $selection_criteria, \
                 contact_details = $contact_details, \
                 image_url = $image_url; \
                 SELECT meta::id(id) AS record_id, * \
                 FROM type::record('scholarship', $id);",
            )
            .bind(("id", id_str.clone()))
            .bind(("title", input.title))
            .bind(("amount", input.amount))
            .bind(("link", input.link))
            .bind(("eligibility", eligibility))
            .bind(("faqs", faqs))
            .bind(("how_to_apply", how_to_apply))
            .bind(("benefits", input.benefits))
            .bind(("documents", input.documents))
            .bind(("important_dates", input.important_dates))
            .bind(("important_links", important_links))
            .bind(("last_updated", input.last_updated))
            .bind(("selection_criteria", input.selection_criteria))
            .bind(("contact_details", input.contact_details))
            .bind(("image_url", input.image_url))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<ScholarshipRow> = result.take(1).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "scholarship".into(),
            id: id_str,
        })?;

        Ok(row.into_scholarship())
    }

    async fn get_by_id(&self, id: &str) -> ScholaraResult<Scholarship> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM type::record('scholarship', $id)",
            )
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ScholarshipRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "scholarship".into(),
            id: id.to_string(),
        })?;

        Ok(row.into_scholarship())
    }

    async fn list_all(&self) -> ScholaraResult<Vec<Scholarship>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM scholarship \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ScholarshipRow> = result.take(0).map_err(DbError::from)?;

        Ok(rows.into_iter().map(ScholarshipRow::into_scholarship).collect())
    }

    async fn get_many(&self, ids: &[String]) -> ScholaraResult<Vec<Scholarship>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM scholarship \
                 WHERE meta::id(id) INSIDE $ids",
            )
            .bind(("ids", ids.to_vec()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ScholarshipRow> = result.take(0).map_err(DbError::from)?;
        let by_id: HashMap<String, Scholarship> = rows
            .into_iter()
            .map(|row| {
                let s = row.into_scholarship();
                (s.id.clone(), s)
            })
            .collect();

        Ok(ids.iter().filter_map(|id| by_id.get(id).cloned()).collect())
    }

    async fn delete_many(&self, ids: &[String]) -> ScholaraResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = self
            .db
            .query(
                "DELETE scholarship WHERE meta::id(id) INSIDE $ids \
                 RETURN BEFORE",
            )
            .bind(("ids", ids.to_vec()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        // Only records that still existed come back.
        let removed: Vec<surrealdb_types::Value> = result.take(0).map_err(DbError::from)?;

        Ok(removed.len() as u64)
    }
}
