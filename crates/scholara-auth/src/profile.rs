//! Student profile operations: completion, read, and resolution of the
//! stored recommendation list.

use scholara_core::error::ScholaraResult;
use scholara_core::models::scholarship::Scholarship;
use scholara_core::models::user_profile::{CompleteProfile, PublicProfile};
use scholara_core::repository::{ScholarshipRepository, UserProfileRepository};
use tracing::debug;
use uuid::Uuid;

pub struct ProfileService<U: UserProfileRepository, S: ScholarshipRepository> {
    user_repo: U,
    scholarship_repo: S,
}

impl<U: UserProfileRepository, S: ScholarshipRepository> ProfileService<U, S> {
    pub fn new(user_repo: U, scholarship_repo: S) -> Self {
        Self {
            user_repo,
            scholarship_repo,
        }
    }

    /// Replace the academic profile. Absent fields are cleared; `name`
    /// is only changed when supplied.
    pub async fn complete_profile(
        &self,
        user_id: Uuid,
        input: CompleteProfile,
    ) -> ScholaraResult<PublicProfile> {
        let profile = self.user_repo.complete_profile(user_id, input).await?;
        debug!(%user_id, "Profile completed");
        Ok(profile.into())
    }

    pub async fn get_profile(&self, user_id: Uuid) -> ScholaraResult<PublicProfile> {
        Ok(self.user_repo.get_by_id(user_id).await?.into())
    }

    /// Resolve the stored recommendation ids in stored order. Ids whose
    /// scholarship no longer exists are dropped.
    pub async fn get_recommended(&self, user_id: Uuid) -> ScholaraResult<Vec<Scholarship>> {
        let user = self.user_repo.get_by_id(user_id).await?;
        let resolved = self
            .scholarship_repo
            .get_many(&user.recommended_scholarships)
            .await?;

        debug!(
            %user_id,
            stored = user.recommended_scholarships.len(),
            resolved = resolved.len(),
            "Resolved recommendations"
        );
        Ok(resolved)
    }
}
