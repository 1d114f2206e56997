//! Request ID middleware for request tracing
//!
//! Every request gets a correlation id: the caller's `x-request-id` when it
//! carries a usable value, otherwise a fresh UUID v4. The id is written back
//! onto the inbound headers, stored in request extensions, attached to a
//! tracing span and echoed on the response.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;
use tracing::Instrument;
use uuid::Uuid;

/// Header name for request ID
pub const X_REQUEST_ID: &str = "x-request-id";

/// Resolve the correlation id for an inbound request.
///
/// Blank or whitespace-only values count as absent.
pub fn get_request_id(headers: &HeaderMap) -> String {
    headers
        .request_id()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Set `x-request-id` on the response and hand the same response back.
pub fn with_request_id_header<B>(
    mut response: axum::http::Response<B>,
    request_id: &str,
) -> axum::http::Response<B> {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            response
                .headers_mut()
                .insert(HeaderName::from_static(X_REQUEST_ID), value);
        }
        Err(_) => tracing::warn!(request_id, "Request id is not a valid header value"),
    }
    response
}

/// Resolved request id, available to handlers as an extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Without the middleware installed, fall back to resolving from headers
        Ok(parts
            .extensions
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(|| RequestId(get_request_id(&parts.headers))))
    }
}

pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = get_request_id(request.headers());

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        request
            .headers_mut()
            .insert(HeaderName::from_static(X_REQUEST_ID), value);
    }
    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let span = tracing::info_span!("request", request_id = %request_id);
    let response = next.run(request).instrument(span).await;

    with_request_id_header(response, &request_id)
}

/// Extension trait for extracting request ID from headers
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&str>;
}

impl RequestIdExt for HeaderMap {
    fn request_id(&self) -> Option<&str> {
        self.get(X_REQUEST_ID)?.to_str().ok()
    }
}
