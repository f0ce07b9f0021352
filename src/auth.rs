//! Password hashing and opaque bearer tokens.
//!
//! Passwords are stored as argon2id PHC strings. Tokens are two random
//! UUIDs; only their SHA-256 digest is kept in the store.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::User;
use crate::repository::FindById;
use crate::store::{Database, RepositoryError, TokenKind};

#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct HashError(argon2::password_hash::Error);

#[derive(Debug, Clone, Copy)]
pub struct TokenSettings {
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            access_ttl: Duration::seconds(900),
            refresh_ttl: Duration::seconds(604_800),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

pub fn hash_password(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(HashError)?;
    Ok(hash.to_string())
}

/// False for a wrong password and for a stored value that is not a PHC string.
pub fn verify_password(password: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .map(|hash| Argon2::default().verify_password(password.as_bytes(), &hash).is_ok())
        .unwrap_or(false)
}

pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

fn generate_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Issue a fresh access/refresh pair for `user_id`.
pub fn issue_pair(
    db: &Database,
    user_id: Uuid,
    settings: &TokenSettings,
) -> Result<TokenPair, RepositoryError> {
    let now = Utc::now();
    let access_token = generate_token();
    let refresh_token = generate_token();

    db.users().issue_token(
        user_id,
        TokenKind::Access,
        hash_token(&access_token),
        now + settings.access_ttl,
    )?;
    db.users().issue_token(
        user_id,
        TokenKind::Refresh,
        hash_token(&refresh_token),
        now + settings.refresh_ttl,
    )?;

    Ok(TokenPair {
        access_token,
        refresh_token,
        token_type: "Bearer",
        expires_in: settings.access_ttl.num_seconds(),
    })
}

/// Resolve a token of the given kind to its user. Expired tokens are revoked.
pub fn resolve(db: &Database, token: &str, kind: TokenKind) -> Result<Option<User>, RepositoryError> {
    let hash = hash_token(token);
    let Some(row) = db.users().find_token(&hash)? else {
        return Ok(None);
    };
    if row.kind != kind {
        return Ok(None);
    }
    if row.expires_at <= Utc::now() {
        db.users().revoke_token(&hash)?;
        return Ok(None);
    }
    db.users().find_by_id(row.user_id)
}

/// Trade a refresh token for a new pair. The old refresh token is revoked.
pub fn refresh(
    db: &Database,
    refresh_token: &str,
    settings: &TokenSettings,
) -> Result<Option<TokenPair>, RepositoryError> {
    let Some(user) = resolve(db, refresh_token, TokenKind::Refresh)? else {
        return Ok(None);
    };
    db.users().revoke_token(&hash_token(refresh_token))?;
    issue_pair(db, user.entity.id(), settings).map(Some)
}
