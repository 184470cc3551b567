use super::handlers;
use axum::{routing::get, Router};

/// Creates the companies router with all company-related routes
pub fn companies_routes() -> Router {
    Router::new()
        // Company CRUD routes
        .route(
            "/api/company/",
            get(handlers::list_companies).post(handlers::create_company),
        )
        // Static segment, matched ahead of the :id routes
        .route("/api/company/followings/", get(handlers::list_followings))
        .route(
            "/api/company/:id/",
            get(handlers::get_company)
                .patch(handlers::patch_company)
                .put(handlers::put_company)
                .delete(handlers::delete_company),
        )
        // Follow routes
        .route(
            "/api/company/:id/follow/",
            get(handlers::follow_status)
                .post(handlers::follow_company)
                .put(handlers::follow_company)
                .delete(handlers::unfollow_company),
        )
}
