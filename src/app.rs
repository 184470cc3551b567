// src/app.rs
//! Router composition shared by the server binary and the router tests

use axum::{
    extract::Extension,
    http::{header, HeaderValue, Method},
    middleware, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::common::SharedState;
use crate::{auth, companies, health, logging_middleware};

pub fn build_router(shared: SharedState, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    Router::new()
        // Authentication
        .merge(auth::auth_routes())
        // Companies and the follow relation
        .merge(companies::companies_routes())
        // Liveness
        .merge(health::health_routes())
        // Middleware and layers
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(Extension(shared))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get, request, send, test_state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_unknown_route() {
        let (state, _) = test_state(false).await;
        let app = build_router(state, &[]);
        let (status, _) = send(app, get("/api/companies/", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let (state, _) = test_state(false).await;
        let app = build_router(state, &[]);
        let (status, _) = send(app, request(Method::DELETE, "/api/company/", None)).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let (state, _) = test_state(false).await;
        let app = build_router(state, &["http://localhost:3000".to_string()]);
        let preflight = axum::http::Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/company/")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(axum::body::Body::empty())
            .unwrap();

        let response = tower::ServiceExt::oneshot(app, preflight).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
    }
}
