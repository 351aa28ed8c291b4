//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Services are generic over
//! these traits so that they carry no dependency on the database crate.

use uuid::Uuid;

use crate::error::ScholaraResult;
use crate::models::{
    scholarship::{CreateScholarship, Scholarship},
    user_profile::{CompleteProfile, CreateUserProfile, UserProfile},
};

pub trait ScholarshipRepository: Send + Sync {
    fn create(
        &self,
        input: CreateScholarship,
    ) -> impl Future<Output = ScholaraResult<Scholarship>> + Send;
    fn get_by_id(&self, id: &str) -> impl Future<Output = ScholaraResult<Scholarship>> + Send;

    /// Every document, in store (insertion) order. No filtering.
    fn list_all(&self) -> impl Future<Output = ScholaraResult<Vec<Scholarship>>> + Send;

    /// Resolve a list of ids, keeping the order of `ids`. Ids with no
    /// matching document are skipped.
    fn get_many(
        &self,
        ids: &[String],
    ) -> impl Future<Output = ScholaraResult<Vec<Scholarship>>> + Send;

    /// Bulk delete. Returns how many documents were actually removed;
    /// ids that no longer exist are ignored.
    fn delete_many(&self, ids: &[String]) -> impl Future<Output = ScholaraResult<u64>> + Send;
}

pub trait UserProfileRepository: Send + Sync {
    /// Fails with `AlreadyExists` when the normalized email is taken.
    fn create(
        &self,
        input: CreateUserProfile,
    ) -> impl Future<Output = ScholaraResult<UserProfile>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = ScholaraResult<UserProfile>> + Send;
    fn get_by_email(&self, email: &str)
    -> impl Future<Output = ScholaraResult<UserProfile>> + Send;
    fn complete_profile(
        &self,
        id: Uuid,
        input: CompleteProfile,
    ) -> impl Future<Output = ScholaraResult<UserProfile>> + Send;

    /// Replace the recommendation list. Written by the recommendation
    /// pipeline, never by the HTTP surface.
    fn set_recommendations(
        &self,
        id: Uuid,
        scholarship_ids: Vec<String>,
    ) -> impl Future<Output = ScholaraResult<UserProfile>> + Send;
}
