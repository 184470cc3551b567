//! Tests for auth module
//!
//! These tests verify core authentication functionality including:
//! - JWT token issuance and validation
//! - Account creation and lookup
//! - The AuthedUser extractor on a real route

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::test_support::{bearer_for, create_user, get, send, test_state, TEST_SECRET};
    use axum::http::StatusCode;
    use chrono::Duration;

    #[test]
    fn test_issue_and_decode_token() {
        let token = accounts::issue_token(TEST_SECRET, "U_ABC123", Duration::hours(1)).unwrap();
        let claims = accounts::decode_token(TEST_SECRET, &token).unwrap();
        assert_eq!(claims.sub, "U_ABC123");
    }

    #[test]
    fn test_decode_fails_with_wrong_secret() {
        let token = accounts::issue_token(TEST_SECRET, "U_ABC123", Duration::hours(1)).unwrap();
        let result = accounts::decode_token("wrong_secret_key", &token);
        assert!(matches!(result, Err(accounts::AccountError::Token(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = accounts::issue_token(TEST_SECRET, "U_ABC123", Duration::hours(-2)).unwrap();
        assert!(accounts::decode_token(TEST_SECRET, &token).is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(accounts::validate_username("user1").is_ok());
        assert!(accounts::validate_username("first.last+tag@example-1_x").is_ok());
        assert!(accounts::validate_username("").is_err());
        assert!(accounts::validate_username("has space").is_err());
        assert!(accounts::validate_username(&"a".repeat(151)).is_err());
    }

    #[tokio::test]
    async fn test_find_or_create_user_is_stable() {
        let (_, pool) = test_state(false).await;

        let first = accounts::find_or_create_user(&pool, "user1").await.unwrap();
        let second = accounts::find_or_create_user(&pool, "user1").await.unwrap();
        assert_eq!(first.id, second.id);
        assert!(first.id.starts_with("U_"));

        let other = accounts::find_or_create_user(&pool, "user2").await.unwrap();
        assert_ne!(first.id, other.id);
    }

    #[tokio::test]
    async fn test_ensure_user_refreshes_username() {
        let (_, pool) = test_state(false).await;
        let mut user = User {
            id: "U_FIXED1".to_string(),
            username: "before".to_string(),
            created_at: None,
        };
        accounts::ensure_user(&pool, &user).await.unwrap();
        user.username = "after".to_string();
        accounts::ensure_user(&pool, &user).await.unwrap();

        let stored = accounts::find_user_by_id(&pool, "U_FIXED1").await.unwrap().unwrap();
        assert_eq!(stored.username, "after");
    }

    #[tokio::test]
    async fn test_me_requires_credentials() {
        let (state, _) = test_state(false).await;
        let app = auth_routes().layer(axum::Extension(state));

        let (status, body) = send(app, get("/api/me", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_me_rejects_garbage_token() {
        let (state, _) = test_state(false).await;
        let app = auth_routes().layer(axum::Extension(state));

        let (status, _) = send(app, get("/api/me", Some("Bearer not-a-jwt"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_rejects_token_for_unknown_user() {
        let (state, _) = test_state(false).await;
        let app = auth_routes().layer(axum::Extension(state));
        let token = accounts::issue_token(TEST_SECRET, "U_GHOST1", Duration::hours(1)).unwrap();

        let auth = format!("Bearer {}", token);
        let (status, _) = send(app, get("/api/me", Some(&auth))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_returns_user() {
        let (state, pool) = test_state(false).await;
        let user = create_user(&pool, "user1").await;
        let app = auth_routes().layer(axum::Extension(state));

        let (status, body) = send(app, get("/api/me", Some(&bearer_for(&user)))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], user.id);
        assert_eq!(body["username"], "user1");
    }

    #[tokio::test]
    async fn test_raw_token_without_bearer_prefix() {
        let (state, pool) = test_state(false).await;
        let user = create_user(&pool, "user1").await;
        let app = auth_routes().layer(axum::Extension(state));
        let token = accounts::issue_token(TEST_SECRET, &user.id, Duration::hours(1)).unwrap();

        let (status, _) = send(app, get("/api/me", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dev_mode_bypasses_token() {
        let (state, _) = test_state(true).await;
        let app = auth_routes().layer(axum::Extension(state));

        let (status, body) = send(app, get("/api/me", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], crate::common::dev_mode::DEV_USER_ID);
    }
}
