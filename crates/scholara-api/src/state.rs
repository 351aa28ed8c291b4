//! Shared application state handed to every handler.

use std::sync::Arc;

use scholara_auth::{AuthService, ProfileService};
use scholara_catalog::CatalogService;
use scholara_core::repository::{ScholarshipRepository, UserProfileRepository};

/// Services behind `Arc` so that cloning the state per request is
/// cheap. The catalog is shared with the cleanup scheduler.
pub struct AppState<S: ScholarshipRepository, U: UserProfileRepository> {
    pub catalog: Arc<CatalogService<S>>,
    pub auth: Arc<AuthService<U>>,
    pub profiles: Arc<ProfileService<U, S>>,
}

impl<S: ScholarshipRepository, U: UserProfileRepository> AppState<S, U> {
    pub fn new(
        catalog: Arc<CatalogService<S>>,
        auth: AuthService<U>,
        profiles: ProfileService<U, S>,
    ) -> Self {
        Self {
            catalog,
            auth: Arc::new(auth),
            profiles: Arc::new(profiles),
        }
    }
}

// Derived Clone would require S: Clone and U: Clone.
impl<S: ScholarshipRepository, U: UserProfileRepository> Clone for AppState<S, U> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            auth: Arc::clone(&self.auth),
            profiles: Arc::clone(&self.profiles),
        }
    }
}
