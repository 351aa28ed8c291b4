//! Scholara Auth: password hashing, session tokens, signup/signin and
//! student profile operations.

pub mod config;
pub mod error;
pub mod password;
pub mod profile;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use profile::ProfileService;
pub use service::{AuthService, SigninInput, SigninOutput, SignupInput};
pub use token::SessionClaims;
