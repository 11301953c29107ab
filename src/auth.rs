// ABOUTME: Password hashing and signed session cookies
// ABOUTME: bcrypt on the blocking pool plus HS256 session tokens carried in an HttpOnly cookie
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authentication and Session Management
//!
//! A successful login issues an HS256 token holding the user id and name. The
//! token travels in the `session` cookie; protected pages decode it on every
//! request, so the server keeps no session table.

use crate::config::AuthConfig;
use crate::constants::session::{AUDIENCE, COOKIE_NAME};
use crate::errors::{AppError, AppResult};
use crate::models::User;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Session token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: String,
    /// Login name
    pub user_name: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Audience (who the token is intended for)
    pub aud: String,
}

/// The user a valid session belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// User id
    pub user_id: i64,
    /// Login name
    pub user_name: String,
}

/// Issues and validates session tokens and builds their cookies
#[derive(Clone)]
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: i64,
    secure_cookies: bool,
}

impl SessionManager {
    /// Build from the session settings
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.session_secret.as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiry_hours: config.session_expiry_hours,
            secure_cookies: config.secure_cookies,
        }
    }

    /// Sign a session token for `user`
    ///
    /// # Errors
    ///
    /// Returns an internal error if encoding fails
    pub fn issue(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user.id.to_string(),
            user_name: user.user_name.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
            aud: AUDIENCE.to_owned(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign session token: {e}")))
    }

    /// Decode and verify a session token
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` for a bad signature, wrong audience, expired or
    /// malformed token
    pub fn validate(&self, token: &str) -> AppResult<SessionUser> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUDIENCE]);

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::ExpiredSignature => "session expired",
                ErrorKind::InvalidSignature => "session signature mismatch",
                ErrorKind::InvalidAudience => "session issued for another audience",
                _ => "malformed session token",
            };
            debug!("Rejected session token: {reason}");
            AppError::auth_invalid(reason)
        })?;

        let user_id = data
            .claims
            .sub
            .parse()
            .map_err(|_| AppError::auth_invalid("malformed session subject"))?;

        Ok(SessionUser {
            user_id,
            user_name: data.claims.user_name,
        })
    }

    /// `Set-Cookie` value carrying `token`
    #[must_use]
    pub fn session_cookie(&self, token: &str) -> String {
        let max_age = self.expiry_hours * 3600;
        format!(
            "{COOKIE_NAME}={token}; HttpOnly;{} Path=/; SameSite=Lax; Max-Age={max_age}",
            self.secure_attribute()
        )
    }

    /// `Set-Cookie` value that removes the session cookie
    #[must_use]
    pub fn clear_cookie(&self) -> String {
        format!(
            "{COOKIE_NAME}=; HttpOnly;{} Path=/; SameSite=Lax; Max-Age=0",
            self.secure_attribute()
        )
    }

    const fn secure_attribute(&self) -> &'static str {
        if self.secure_cookies {
            " Secure;"
        } else {
            ""
        }
    }
}

/// Hash a password with bcrypt on the blocking pool
///
/// # Errors
///
/// Returns an internal error if hashing fails or the blocking task panics
pub async fn hash_password(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

/// Check a password against a stored bcrypt hash on the blocking pool
///
/// A malformed stored hash counts as a mismatch.
///
/// # Errors
///
/// Returns an internal error if the blocking task panics
pub async fn verify_password(password: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(&password, &hash).unwrap_or(false))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))
}

/// Generate a random session signing key
///
/// # Errors
///
/// Returns an error if the system RNG fails
pub fn generate_session_secret() -> AppResult<[u8; 64]> {
    use ring::rand::{SecureRandom, SystemRandom};

    let rng = SystemRandom::new();
    let mut secret = [0u8; 64];

    rng.fill(&mut secret).map_err(|e| {
        tracing::error!("Failed to generate session secret: {e}");
        AppError::config("System RNG failure - cannot generate session secret")
    })?;

    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;

    fn user() -> User {
        User {
            id: 42,
            user_name: "koko".to_owned(),
            password_hash: String::new(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let sessions = SessionManager::new(&ServerConfig::for_testing().auth);
        let token = sessions.issue(&user()).unwrap();
        let session = sessions.validate(&token).unwrap();
        assert_eq!(session.user_id, 42);
        assert_eq!(session.user_name, "koko");
    }

    #[test]
    fn test_token_from_other_key_is_rejected() {
        let mut other = ServerConfig::for_testing().auth;
        other.session_secret = crate::config::SessionSecret::new(b"another-key".to_vec());
        let token = SessionManager::new(&other).issue(&user()).unwrap();

        let sessions = SessionManager::new(&ServerConfig::for_testing().auth);
        assert!(sessions.validate(&token).is_err());
        assert!(sessions.validate("not-a-token").is_err());
    }

    #[test]
    fn test_cookie_attributes() {
        let mut config = ServerConfig::for_testing().auth;
        let plain = SessionManager::new(&config).session_cookie("abc");
        assert!(plain.starts_with("session=abc; HttpOnly;"));
        assert!(!plain.contains("Secure"));

        config.secure_cookies = true;
        let sessions = SessionManager::new(&config);
        assert!(sessions.session_cookie("abc").contains("Secure;"));
        assert!(sessions.clear_cookie().contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_password_hash_and_verify() {
        let hash = hash_password("banana".to_owned()).await.unwrap();
        assert!(verify_password("banana".to_owned(), hash.clone()).await.unwrap());
        assert!(!verify_password("apple".to_owned(), hash).await.unwrap());
    }
}
