//! Scholara API: the HTTP surface over the catalog and auth services.
//!
//! Every error leaves as a JSON `{message, error?}` body. Requests are
//! traced through `tower-http` and CORS is permissive.

pub mod error;
pub mod params;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
