//! Method guard and CORS policy
//!
//! Every endpoint is read-only. OPTIONS gets an empty 200 acknowledgment,
//! GET passes through, and anything else is refused with 405.

use axum::{
    extract::Request,
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

use super::ApiError;

/// Middleware enforcing the GET-only contract
pub async fn method_guard(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    match method {
        Method::GET => next.run(request).await,
        Method::OPTIONS => StatusCode::OK.into_response(),
        other => {
            debug!("Rejecting {} {}", other, request.uri());
            ApiError::MethodNotAllowed.into_response()
        }
    }
}

/// Cross-origin policy: any origin, the standard methods and headers
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
