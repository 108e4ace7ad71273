//! Owner sign-in against the credentials in the configuration.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::domain::auth::OwnerSession;
use crate::forms::auth::LoginFormPayload;
use crate::models::config::OwnerConfig;
use crate::services::{ServiceError, ServiceResult};

/// Shown for any wrong email or password.
pub const INVALID_CREDENTIALS: &str = "البريد الإلكتروني أو كلمة المرور غير صحيحة.";

/// Hash a plaintext password into an Argon2id PHC string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// `Ok(false)` on a mismatch, `Err` when `hash` is not a PHC string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Checks the submitted credentials. An empty configured hash disables
/// sign-in altogether.
pub fn sign_in(payload: LoginFormPayload, owner: &OwnerConfig) -> ServiceResult<OwnerSession> {
    if owner.password_hash.trim().is_empty() {
        log::error!("Sign-in attempted but no owner password hash is configured");
        return Err(ServiceError::Form(INVALID_CREDENTIALS.to_string()));
    }

    if payload.email != owner.email.trim().to_lowercase() {
        log::warn!("Sign-in rejected for unknown email {}", payload.email);
        return Err(ServiceError::Form(INVALID_CREDENTIALS.to_string()));
    }

    match verify_password(&payload.password, owner.password_hash.trim()) {
        Ok(true) => {
            log::info!("Owner {} signed in", payload.email);
            Ok(OwnerSession {
                email: payload.email,
            })
        }
        Ok(false) => {
            log::warn!("Sign-in rejected for {}: wrong password", payload.email);
            Err(ServiceError::Form(INVALID_CREDENTIALS.to_string()))
        }
        Err(e) => {
            log::error!("Configured owner password hash is invalid: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(hash: &str) -> OwnerConfig {
        OwnerConfig {
            email: "Owner@Example.com".into(),
            password_hash: hash.into(),
        }
    }

    fn payload(email: &str, password: &str) -> LoginFormPayload {
        LoginFormPayload {
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn hashes_verify() {
        let hash = hash_password("correct-horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct-horse", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn signs_in_configured_owner() {
        let config = owner(&hash_password("secret").unwrap());
        let session = sign_in(payload("owner@example.com", "secret"), &config).unwrap();
        assert_eq!(session.email, "owner@example.com");
    }

    #[test]
    fn rejects_bad_credentials_with_friendly_message() {
        let config = owner(&hash_password("secret").unwrap());
        let expected = Err(ServiceError::Form(INVALID_CREDENTIALS.to_string()));
        assert_eq!(sign_in(payload("owner@example.com", "nope"), &config), expected);
        assert_eq!(sign_in(payload("other@example.com", "secret"), &config), expected);
    }

    #[test]
    fn empty_hash_disables_sign_in() {
        let result = sign_in(payload("owner@example.com", ""), &owner(""));
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn malformed_hash_is_internal_error() {
        let result = sign_in(payload("owner@example.com", "x"), &owner("not-a-hash"));
        assert_eq!(result, Err(ServiceError::Internal));
    }
}
