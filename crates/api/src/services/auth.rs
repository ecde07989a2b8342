//! Account registration, login, and bearer-token handling.
//!
//! Passwords are hashed with argon2. Bearer tokens are opaque random
//! strings; only their SHA-256 hash is stored, so a leaked database dump
//! does not leak usable tokens.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use thiserror::Error;

use mealkit_core::{Email, EmailError};

use crate::db::{RepositoryError, UserRepository};
use crate::models::User;

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Number of random bytes in a bearer token.
const TOKEN_BYTES: usize = 32;

/// Errors from authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Password did not match the stored hash.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No account exists for the given email.
    #[error("user not found")]
    UserNotFound,

    /// An account already exists for the given email.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password failed the strength check.
    #[error("{0}")]
    WeakPassword(String),

    /// Email address failed to parse.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Underlying repository failure.
    #[error("repository error: {0}")]
    Repository(RepositoryError),

    /// Password hashing or verification failed internally.
    #[error("password hashing failed")]
    PasswordHash,
}

impl From<RepositoryError> for AuthError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(_) => Self::UserAlreadyExists,
            other => Self::Repository(other),
        }
    }
}

/// Authentication service over the user repository.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email does not parse,
    /// `AuthError::WeakPassword` if the password is too short, and
    /// `AuthError::UserAlreadyExists` if the email is taken.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        is_admin: bool,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;
        let user = self.users.create(&email, &password_hash, is_admin).await?;

        Ok(user)
    }

    /// Verify credentials and issue a fresh bearer token.
    ///
    /// The raw token is returned exactly once; only its hash is stored.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` for unknown emails and
    /// `AuthError::InvalidCredentials` for a wrong password.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        let email = Email::parse(email)?;

        let user = self
            .users
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_token(&user).await?;
        Ok((user, token))
    }

    /// Issue a bearer token for an existing user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if storing the token hash fails.
    pub async fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let token = generate_token();
        self.users.insert_token(user.id, &hash_token(&token)).await?;
        Ok(token)
    }

    /// Resolve a raw bearer token to its user, if the token is known.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn resolve_token(&self, token: &str) -> Result<Option<User>, AuthError> {
        let user = self.users.get_by_token_hash(&hash_token(token)).await?;
        Ok(user)
    }
}

/// Reject passwords below the minimum length.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password with argon2 and a fresh salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::PasswordHash)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored argon2 hash.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

/// Generate a fresh opaque bearer token.
#[must_use]
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// SHA-256 hash of a token, hex-encoded, as stored in `api_tokens`.
#[must_use]
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_password_roundtrip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_short_password_rejected() {
        let err = validate_password("short").unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword(_)));
        assert!(validate_password("long enough").is_ok());
    }

    #[test]
    fn test_generated_tokens_are_unique_hex() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), TOKEN_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_token_hash_is_stable_sha256() {
        let hash = hash_token("abc");
        assert_eq!(hash, hash_token("abc"));
        assert_eq!(hash.len(), 64);
        assert_ne!(hash, hash_token("abd"));
    }

    #[test]
    fn test_conflict_maps_to_user_already_exists() {
        let err: AuthError = RepositoryError::Conflict("taken".to_string()).into();
        assert!(matches!(err, AuthError::UserAlreadyExists));
    }
}
