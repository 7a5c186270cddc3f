use axum::{
    Router,
    http::{Method, StatusCode, Uri},
    middleware,
    routing::get,
};
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;
use super::types::ApiError;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/auth", auth::create_auth_router())
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::new(
        StatusCode::METHOD_NOT_ALLOWED,
        "MethodNotAllowed",
        format!("Method {} is not allowed on {}", method, uri.path()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::health::HealthResponse;
    use crate::api::middleware::APP_VERSION_HEADER;
    use crate::api::state::test_support::create_test_state;
    use crate::api::types::ErrorEnvelope;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health() {
        let app = create_router(create_test_state().await);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(APP_VERSION_HEADER).unwrap(),
            env!("CARGO_PKG_VERSION")
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: HealthResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(health.status, "healthy");
    }

    #[tokio::test]
    async fn test_version_header_on_errors() {
        let app = create_router(create_test_state().await);

        let response = app
            .oneshot(Request::builder().uri("/auth/me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(APP_VERSION_HEADER));
    }

    async fn envelope_for(method: &str, uri: &str) -> (StatusCode, ErrorEnvelope) {
        let app = create_router(create_test_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_unknown_route_uses_envelope() {
        let (status, envelope) = envelope_for("GET", "/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(envelope.status, 404);
        assert_eq!(envelope.reason, "NotFound");
        assert!(envelope.message.contains("/nope"));
        assert!(envelope.data.is_none());
    }

    #[tokio::test]
    async fn test_wrong_method_uses_envelope() {
        let (status, envelope) = envelope_for("POST", "/health").await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(envelope.status, 405);
        assert_eq!(envelope.reason, "MethodNotAllowed");
    }
}
