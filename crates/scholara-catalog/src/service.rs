//! Catalog service: listing, search and detail lookups.
//!
//! Every read path goes through the same pipeline: expiration filter,
//! then criteria refinement, then the optional sort. Filtering always
//! happens before sorting.

use scholara_core::error::{ScholaraError, ScholaraResult};
use scholara_core::models::scholarship::Scholarship;
use scholara_core::repository::ScholarshipRepository;
use tracing::debug;

use crate::expiration::{is_expired, is_expired_now, today};
use crate::filter::{CriteriaFilter, criteria_tags, matches_query};
use crate::sort::{SortSpec, sort_scholarships};

/// Read-side scholarship service.
///
/// Generic over the repository so that the catalog carries no
/// dependency on the database crate.
pub struct CatalogService<R: ScholarshipRepository> {
    repo: R,
}

impl<R: ScholarshipRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// All active scholarships, refined by `criteria` and optionally
    /// sorted. Store failures propagate; there is no partial result.
    pub async fn list_active(
        &self,
        sort: Option<SortSpec>,
        criteria: &CriteriaFilter,
    ) -> ScholaraResult<Vec<Scholarship>> {
        let all = self.repo.list_all().await?;
        let total = all.len();
        let active = refine(all, criteria, sort);

        debug!(total, active = active.len(), "Listed scholarships");
        Ok(active)
    }

    /// Literal substring search over title, eligibility summary and
    /// amount. A missing or empty query matches every document.
    pub async fn search(
        &self,
        query: Option<&str>,
        sort: Option<SortSpec>,
        criteria: &CriteriaFilter,
    ) -> ScholaraResult<Vec<Scholarship>> {
        let query = query.unwrap_or_default();
        let matched: Vec<Scholarship> = self
            .repo
            .list_all()
            .await?
            .into_iter()
            .filter(|s| matches_query(s, query))
            .collect();
        let matched_count = matched.len();
        let active = refine(matched, criteria, sort);

        debug!(
            query,
            matched = matched_count,
            active = active.len(),
            "Searched scholarships"
        );
        Ok(active)
    }

    /// A single scholarship, provided it has not expired.
    pub async fn get_active(&self, id: &str) -> ScholaraResult<Scholarship> {
        let scholarship = self.repo.get_by_id(id).await?;
        if is_expired_now(&scholarship) {
            return Err(ScholaraError::Expired { id: id.to_string() });
        }
        Ok(scholarship)
    }

    /// Criteria keyword vocabulary over the active scholarships.
    pub async fn tags(&self) -> ScholaraResult<Vec<String>> {
        let active = self
            .list_active(None, &CriteriaFilter::default())
            .await?;
        Ok(criteria_tags(&active))
    }
}

fn refine(
    items: Vec<Scholarship>,
    criteria: &CriteriaFilter,
    sort: Option<SortSpec>,
) -> Vec<Scholarship> {
    let today = today();
    let mut active: Vec<Scholarship> = items
        .into_iter()
        .filter(|s| !is_expired(s, today))
        .filter(|s| criteria.matches(s))
        .collect();

    if let Some(spec) = sort {
        sort_scholarships(&mut active, spec);
    }
    active
}
