use super::models::{Company, CompanyFilterParams, CompanyPayload, FollowStatus};
use super::services::CompaniesService;
use super::validators::{validate_company_changes, validate_filter, validate_new_company};
use crate::auth::AuthedUser;
use crate::common::{ApiError, SharedState};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::debug;

async fn companies_service(state: &SharedState) -> CompaniesService {
    let app_state = state.read().await;
    CompaniesService::new(app_state.db.clone())
}

/// Ids that aren't integers can't name a company, so they are a 404 rather than a 400
fn parse_company_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::NotFound("Company not found".to_string()))
}

// ============================================================================
// Company CRUD Handlers
// ============================================================================

/// GET /api/company/ - List companies, optionally filtered
pub async fn list_companies(
    Extension(state): Extension<SharedState>,
    params: Result<Query<CompanyFilterParams>, QueryRejection>,
) -> Result<Json<Vec<Company>>, ApiError> {
    let Query(params) = params?;
    let filter = validate_filter(&params)?;
    let companies = companies_service(&state)
        .await
        .list_companies(&filter)
        .await?;

    Ok(Json(companies))
}

/// POST /api/company/ - Create a new company
pub async fn create_company(
    Extension(state): Extension<SharedState>,
    payload: Result<Json<CompanyPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let new_company = validate_new_company(&payload)?;

    let company = companies_service(&state)
        .await
        .create_company(new_company)
        .await?;

    Ok((StatusCode::CREATED, Json(company)))
}

/// GET /api/company/:id/ - Get company by ID
pub async fn get_company(
    Extension(state): Extension<SharedState>,
    Path(company_id): Path<String>,
) -> Result<Json<Company>, ApiError> {
    let company_id = parse_company_id(&company_id)?;
    let company = companies_service(&state)
        .await
        .get_company_by_id(company_id)
        .await?;

    Ok(Json(company))
}

/// PATCH /api/company/:id/ - Change only the provided fields
pub async fn patch_company(
    Extension(state): Extension<SharedState>,
    Path(company_id): Path<String>,
    payload: Result<Json<CompanyPayload>, JsonRejection>,
) -> Result<Json<Company>, ApiError> {
    update_company(state, &company_id, payload, true).await
}

/// PUT /api/company/:id/ - Like PATCH, but name, type and country must be present
pub async fn put_company(
    Extension(state): Extension<SharedState>,
    Path(company_id): Path<String>,
    payload: Result<Json<CompanyPayload>, JsonRejection>,
) -> Result<Json<Company>, ApiError> {
    update_company(state, &company_id, payload, false).await
}

async fn update_company(
    state: SharedState,
    company_id: &str,
    payload: Result<Json<CompanyPayload>, JsonRejection>,
    partial: bool,
) -> Result<Json<Company>, ApiError> {
    let company_id = parse_company_id(company_id)?;
    let service = companies_service(&state).await;

    // Unknown ids are reported before anything about the body
    service.get_company_by_id(company_id).await?;

    let Json(payload) = payload?;
    let changes = validate_company_changes(&payload, partial)?;
    debug!(company_id, partial, "Validated company update");

    let company = service.update_company(company_id, changes).await?;

    Ok(Json(company))
}

/// DELETE /api/company/:id/ - Delete company and its follow relations
pub async fn delete_company(
    Extension(state): Extension<SharedState>,
    Path(company_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let company_id = parse_company_id(&company_id)?;
    companies_service(&state)
        .await
        .delete_company(company_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Follow Handlers
// ============================================================================

/// GET /api/company/:id/follow/ - Whether the caller follows the company
pub async fn follow_status(
    Extension(state): Extension<SharedState>,
    user: AuthedUser,
    Path(company_id): Path<String>,
) -> Result<Json<FollowStatus>, ApiError> {
    let company_id = parse_company_id(&company_id)?;
    let follow = companies_service(&state)
        .await
        .is_following(company_id, &user.id)
        .await?;

    Ok(Json(FollowStatus { follow }))
}

/// POST|PUT /api/company/:id/follow/ - Follow the company
pub async fn follow_company(
    Extension(state): Extension<SharedState>,
    user: AuthedUser,
    Path(company_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let company_id = parse_company_id(&company_id)?;
    companies_service(&state)
        .await
        .follow_company(company_id, &user.id)
        .await?;

    Ok(StatusCode::CREATED)
}

/// DELETE /api/company/:id/follow/ - Stop following the company
pub async fn unfollow_company(
    Extension(state): Extension<SharedState>,
    user: AuthedUser,
    Path(company_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let company_id = parse_company_id(&company_id)?;
    companies_service(&state)
        .await
        .unfollow_company(company_id, &user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/company/followings/ - Companies the caller follows, optionally filtered
pub async fn list_followings(
    Extension(state): Extension<SharedState>,
    user: AuthedUser,
    params: Result<Query<CompanyFilterParams>, QueryRejection>,
) -> Result<Json<Vec<Company>>, ApiError> {
    let Query(params) = params?;
    let filter = validate_filter(&params)?;
    let companies = companies_service(&state)
        .await
        .list_followed_companies(&user.id, &filter)
        .await?;

    Ok(Json(companies))
}
