//! Response helpers shared by kernel and plugin routes.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::http::header::{CACHE_CONTROL, EXPIRES, PRAGMA};
use axum::middleware::Next;
use axum::response::Response;

/// Middleware disabling client-side caching of a route's responses.
///
/// Kiosk terminals keep pages open for days; stale cached markup would
/// otherwise survive plugin updates.
pub async fn nocache(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate, max-age=0"),
    );
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));
    response
}
