//! Authentication configuration.

/// Configuration for the authentication service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for HS256 session tokens. No default: the server
    /// refuses to start without one.
    pub jwt_secret: String,
    /// Session token lifetime in seconds (default: 86_400 = 1 day).
    pub token_lifetime_secs: u64,
    /// JWT issuer (`iss` claim).
    pub jwt_issuer: String,
    /// Optional pepper prepended to passwords before Argon2id hashing.
    pub pepper: Option<String>,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_lifetime_secs: 86_400,
            jwt_issuer: "scholara".into(),
            pepper: None,
        }
    }
}
