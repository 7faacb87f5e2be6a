//! Origin enforcement and CORS headers.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, header::CONTENT_TYPE, header::ORIGIN},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::AppState;
use crate::error::AppError;
use crate::services::origins::OriginPolicy;

/// Axum middleware: rejects requests whose `Origin` is not on the allow-list.
///
/// Requests without an `Origin` header pass through untouched.
pub async fn enforce_origin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(value) = request.headers().get(ORIGIN) {
        let origin = value.to_str().ok();
        if origin.is_none() || !state.origins.is_allowed(origin) {
            let shown = String::from_utf8_lossy(value.as_bytes()).into_owned();
            warn!(origin = %shown, "rejected request from disallowed origin");
            return Err(AppError::OriginNotAllowed(shown));
        }
    }

    Ok(next.run(request).await)
}

/// CORS layer whose origin predicate mirrors [`OriginPolicy`].
pub fn cors_layer(policy: &OriginPolicy) -> CorsLayer {
    let allow_origin = if policy.allows_any() {
        AllowOrigin::any()
    } else {
        let policy = policy.clone();
        AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|o| policy.is_allowed(Some(o)))
                .unwrap_or(false)
        })
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}
