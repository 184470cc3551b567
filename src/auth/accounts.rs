//! User account lookup and token issuance
//!
//! Accounts are provisioned out of band (see the `issue_token` binary); the
//! HTTP layer only ever reads them.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

use super::models::{Claims, User};
use crate::common::generate_user_id;

const MAX_USERNAME_LEN: usize = 150;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("invalid username: {0}")]
    InvalidUsername(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Letters, digits and `@ . + - _`, up to 150 characters
pub fn validate_username(username: &str) -> Result<(), AccountError> {
    if username.is_empty() || username.chars().count() > MAX_USERNAME_LEN {
        return Err(AccountError::InvalidUsername(format!(
            "username must be 1 to {} characters",
            MAX_USERNAME_LEN
        )));
    }

    if let Some(bad) = username
        .chars()
        .find(|c| !(c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')))
    {
        return Err(AccountError::InvalidUsername(format!(
            "username contains invalid character '{}'",
            bad
        )));
    }

    Ok(())
}

pub async fn find_user_by_id(pool: &SqlitePool, user_id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, username, created_at FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, username, created_at FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await
}

/// Returns the existing account for `username` or creates a new one
pub async fn find_or_create_user(pool: &SqlitePool, username: &str) -> Result<User, AccountError> {
    validate_username(username)?;

    if let Some(user) = find_user_by_username(pool, username).await? {
        return Ok(user);
    }

    let id = generate_user_id();
    sqlx::query("INSERT INTO users (id, username) VALUES (?, ?)")
        .bind(&id)
        .bind(username)
        .execute(pool)
        .await?;

    info!(user_id = %id, username = %username, "Created user account");

    let user = sqlx::query_as::<_, User>("SELECT id, username, created_at FROM users WHERE id = ?")
        .bind(&id)
        .fetch_one(pool)
        .await?;

    Ok(user)
}

/// Inserts `user` keyed by id, refreshing the username if the row exists
pub async fn ensure_user(pool: &SqlitePool, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO users (id, username) VALUES (?, ?)
        ON CONFLICT(id) DO UPDATE SET username = excluded.username
        "#,
    )
    .bind(&user.id)
    .bind(&user.username)
    .execute(pool)
    .await?;

    Ok(())
}

/// Signs an HS256 token for `user_id` valid for `ttl`
pub fn issue_token(secret: &str, user_id: &str, ttl: Duration) -> Result<String, AccountError> {
    let exp = (Utc::now() + ttl).timestamp().max(0) as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verifies signature and expiry and returns the claims
pub fn decode_token(secret: &str, token: &str) -> Result<Claims, AccountError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;

    Ok(decoded.claims)
}
