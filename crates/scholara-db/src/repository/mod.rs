//! SurrealDB repository implementations.

mod scholarship;
mod user_profile;

pub use scholarship::SurrealScholarshipRepository;
pub use user_profile::SurrealUserProfileRepository;
