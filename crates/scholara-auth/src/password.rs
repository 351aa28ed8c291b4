//! Password hashing and verification using Argon2id.

use std::sync::LazyLock;

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::error::AuthError;

fn peppered_input(password: &str, pepper: Option<&str>) -> Vec<u8> {
    match pepper {
        Some(p) => format!("{p}{password}").into_bytes(),
        None => password.as_bytes().to_vec(),
    }
}

fn hasher() -> Result<Argon2<'static>, AuthError> {
    // OWASP ASVS recommended: m=19456 (19 MiB), t=2, p=1
    let params = argon2::Params::new(19456, 2, 1, None)
        .map_err(|e| AuthError::Crypto(format!("argon2 params error: {e}")))?;
    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

/// Hash a password into an Argon2id PHC string with a fresh random
/// salt. The optional pepper is prepended to the password.
pub fn hash_password(password: &str, pepper: Option<&str>) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()?
        .hash_password(&peppered_input(password, pepper), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Crypto(format!("password hash error: {e}")))
}

/// Verify a plaintext password against a PHC-format hash.
///
/// Returns `Ok(false)` on mismatch and `Err(AuthError::Crypto)` when
/// the stored hash is malformed. The hash carries its own parameters,
/// so verification does not depend on the current cost settings.
pub fn verify_password(
    password: &str,
    hash: &str,
    pepper: Option<&str>,
) -> Result<bool, AuthError> {
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;

    match Argon2::default().verify_password(&peppered_input(password, pepper), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}

static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("scholara-no-such-account", None).ok());

/// Run one verification against a throwaway hash so that a lookup
/// miss costs as much as a wrong password. Always reports no match.
pub fn verify_dummy(password: &str, pepper: Option<&str>) -> bool {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, hash, pepper);
    }
    false
}
