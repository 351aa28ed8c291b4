//! Router assembly.

use axum::{
    Router,
    routing::{get, post},
};
use scholara_core::repository::{ScholarshipRepository, UserProfileRepository};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub mod scholarships;
pub mod user_profile;

pub fn build_router<S, U>(state: AppState<S, U>) -> Router
where
    S: ScholarshipRepository + 'static,
    U: UserProfileRepository + 'static,
{
    Router::new()
        .route("/api/scholarships", get(scholarships::list::<S, U>))
        .route("/api/scholarships/search", get(scholarships::search::<S, U>))
        .route("/api/scholarships/tags", get(scholarships::tags::<S, U>))
        .route(
            "/api/scholarships/cleanup-expired",
            post(scholarships::cleanup_expired::<S, U>),
        )
        .route("/api/scholarships/:id", get(scholarships::detail::<S, U>))
        .route("/api/user-profile/signup", post(user_profile::signup::<S, U>))
        .route("/api/user-profile/signin", post(user_profile::signin::<S, U>))
        .route("/api/user-profile/signout", post(user_profile::signout))
        .route(
            "/api/user-profile/complete-profile",
            post(user_profile::complete_profile::<S, U>),
        )
        .route("/api/user-profile/:user_id", get(user_profile::profile::<S, U>))
        .route(
            "/api/user-profile/:user_id/recommended-scholarships",
            get(user_profile::recommended::<S, U>),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
