//! Authentication handlers

use axum::extract::{Extension, Json};

use super::accounts::find_user_by_id;
use super::extractors::AuthedUser;
use super::models::User;
use crate::common::{ApiError, SharedState};

/// GET /api/me
/// Returns the current authenticated user's information
///
/// # Response
/// ```json
/// { "id": "U_K7NP3X", "username": "user1", "created_at": "2024-01-01 00:00:00" }
/// ```
pub async fn me_handler(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
) -> Result<Json<User>, ApiError> {
    let state = state_lock.read().await.clone();

    let user = find_user_by_id(&state.db, &authed.id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("user not found".to_string()))?;

    Ok(Json(user))
}
