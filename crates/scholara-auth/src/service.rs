//! Authentication service: signup and signin orchestration.

use scholara_core::error::{ScholaraError, ScholaraResult};
use scholara_core::models::user_profile::{CreateUserProfile, PublicProfile, normalize_email};
use scholara_core::repository::UserProfileRepository;
use tracing::info;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the signup flow.
#[derive(Debug)]
pub struct SignupInput {
    pub name: String,
    pub email_id: String,
    pub password: String,
}

/// Input for the signin flow.
#[derive(Debug)]
pub struct SigninInput {
    pub email_id: String,
    pub password: String,
}

/// Successful signin result.
#[derive(Debug)]
pub struct SigninOutput {
    /// Signed HS256 session token.
    pub token: String,
    pub user: PublicProfile,
}

fn require(field: &str, value: &str) -> ScholaraResult<()> {
    if value.trim().is_empty() {
        return Err(ScholaraError::Validation {
            message: format!("{field} is required"),
        });
    }
    Ok(())
}

/// Authentication service.
///
/// Generic over the profile repository so that the auth layer has no
/// dependency on the database crate.
pub struct AuthService<U: UserProfileRepository> {
    user_repo: U,
    config: AuthConfig,
}

impl<U: UserProfileRepository> AuthService<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    /// Register a new student. The email is compared case-insensitively;
    /// a taken email yields `AlreadyExists`.
    pub async fn signup(&self, input: SignupInput) -> ScholaraResult<PublicProfile> {
        require("name", &input.name)?;
        require("email_id", &input.email_id)?;
        require("password", &input.password)?;

        let email_id = normalize_email(&input.email_id);

        // Fast path; the unique index still catches a concurrent signup.
        match self.user_repo.get_by_email(&email_id).await {
            Ok(_) => {
                return Err(ScholaraError::AlreadyExists {
                    entity: "user_profile".into(),
                });
            }
            Err(ScholaraError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let password_hash =
            password::hash_password(&input.password, self.config.pepper.as_deref())?;

        let profile = self
            .user_repo
            .create(CreateUserProfile {
                name: input.name.trim().to_string(),
                email_id,
                password_hash,
            })
            .await?;

        info!(user_id = %profile.id, "User signed up");
        Ok(profile.into())
    }

    /// Authenticate with email + password and issue a session token.
    ///
    /// Unknown email and wrong password produce the same
    /// `InvalidCredentials` error after the same Argon2 work.
    pub async fn signin(&self, input: SigninInput) -> ScholaraResult<SigninOutput> {
        let user = match self.user_repo.get_by_email(&input.email_id).await {
            Ok(u) => u,
            Err(ScholaraError::NotFound { .. }) => {
                password::verify_dummy(&input.password, self.config.pepper.as_deref());
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        let valid = password::verify_password(
            &input.password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = token::issue_session_token(user.id, &user.email_id, &self.config)?;

        info!(user_id = %user.id, "User signed in");
        Ok(SigninOutput {
            token,
            user: user.into(),
        })
    }
}
