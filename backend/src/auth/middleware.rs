//! Authentication middleware
//!
//! Gates protected routes behind a `Authorization: Bearer <token>` header.
//! A request either ends up VERIFIED, with its claims attached as an
//! [`AuthUser`] extension, or is answered with an error envelope before the
//! wrapped handler runs.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue},
    middleware::Next,
    response::Response,
};
use munch_bunch_shared::AuthError;
use tracing::debug;

/// Authenticated caller, attached to the request by [`require_bearer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub username: String,
}

/// Extract the credential from an `Authorization` header
///
/// The header must be present, non-empty, and split into exactly two
/// whitespace-separated parts whose first is the `Bearer` scheme.
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, AuthError> {
    let header = match header {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthError::MissingHeader),
    };

    let value = header.to_str().map_err(|_| AuthError::MalformedHeader)?;
    let mut parts = value.split_whitespace();

    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        (None, _, _) => Err(AuthError::MissingHeader),
        _ => Err(AuthError::MalformedHeader),
    }
}

/// Middleware that admits only requests carrying a valid bearer token
///
/// Apply with `axum::middleware::from_fn_with_state` on the protected
/// router.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers().get(AUTHORIZATION)).map_err(|e| {
        debug!(path = %request.uri().path(), reason = %e, "Rejected protected request");
        e
    })?;

    let claims = state.jwt().verify_token(token)?;

    request.extensions_mut().insert(AuthUser {
        username: claims.username,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Extension, Router,
    };
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[rstest]
    #[case("Bearer abc.def.ghi", Ok("abc.def.ghi"))]
    #[case("bearer abc", Ok("abc"))]
    #[case("Bearer    abc", Ok("abc"))]
    #[case("   ", Err(AuthError::MissingHeader))]
    #[case("abc.def.ghi", Err(AuthError::MalformedHeader))]
    #[case("Bearer", Err(AuthError::MalformedHeader))]
    #[case("Bearer abc extra", Err(AuthError::MalformedHeader))]
    #[case("Basic dXNlcjpwYXNz", Err(AuthError::MalformedHeader))]
    fn test_bearer_token_shapes(#[case] raw: &str, #[case] expected: Result<&str, AuthError>) {
        let value = HeaderValue::from_str(raw).unwrap();
        assert_eq!(bearer_token(Some(&value)), expected);
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(bearer_token(None), Err(AuthError::MissingHeader));
        let empty = HeaderValue::from_static("");
        assert_eq!(bearer_token(Some(&empty)), Err(AuthError::MissingHeader));
    }

    #[test]
    fn test_non_ascii_header_is_malformed() {
        let value = HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap();
        assert_eq!(bearer_token(Some(&value)), Err(AuthError::MalformedHeader));
    }

    /// Router with a single protected handler that counts its invocations
    fn counting_app(state: AppState, hits: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/protected",
                get(move |Extension(user): Extension<AuthUser>| {
                    let hits = hits.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        user.username
                    }
                }),
            )
            .route_layer(from_fn_with_state(state.clone(), require_bearer))
            .with_state(state)
    }

    fn test_state() -> AppState {
        let mut config = AppConfig::default();
        config.password.bcrypt_cost = 4;
        AppState::in_memory(config)
    }

    async fn call(app: Router, auth: Option<&str>) -> StatusCode {
        let mut builder = HttpRequest::builder().uri("/protected");
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        response.status()
    }

    #[tokio::test]
    async fn test_missing_header_never_reaches_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = counting_app(test_state(), hits.clone());

        assert_eq!(call(app, None).await, StatusCode::BAD_REQUEST);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_and_invalid_never_reach_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = test_state();

        for header in ["Bearer", "Bearer a b", "Token abc", "Bearer invalid.token.here"] {
            let app = counting_app(state.clone(), hits.clone());
            assert_eq!(call(app, Some(header)).await, StatusCode::BAD_REQUEST);
        }
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler_with_claims() {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = test_state();
        let token = state.jwt().issue_token("alice").unwrap();
        let app = counting_app(state, hits.clone());

        let request = HttpRequest::builder()
            .uri("/protected")
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"alice");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
