//! Scholara Catalog: the read side of the scholarship store.
//!
//! - [`expiration`]: decides whether a scholarship may still be shown
//! - [`sort`]: optional deadline/amount ordering
//! - [`filter`]: text search and eligibility-criteria refinement
//! - [`service`]: listing, search and detail lookups over a repository
//! - [`cleanup`]: on-demand and daily deletion of expired scholarships

pub mod cleanup;
pub mod expiration;
pub mod filter;
pub mod service;
pub mod sort;

pub use cleanup::{CleanupReport, spawn_cleanup_schedule, spawn_daily_cleanup};
pub use filter::{CriteriaFilter, EducationLevel};
pub use service::CatalogService;
pub use sort::{SortKey, SortOrder, SortSpec};
