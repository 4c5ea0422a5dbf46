//! Static file serving for plugin asset directories.

use std::path::{Path as FsPath, PathBuf};

use axum::{
    Router,
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::fs;
use tracing::warn;

/// Serve a plugin's static directory under `<prefix>/static/`.
pub fn plugin_static_router(prefix: &str, static_dir: PathBuf) -> Router {
    Router::new()
        .route(&format!("{prefix}/static/{{*path}}"), get(serve_static))
        .with_state(static_dir)
}

async fn serve_static(State(static_dir): State<PathBuf>, Path(path): Path<String>) -> Response {
    // Security: prevent path traversal
    let path = path.trim_start_matches('/');
    if path.contains("..") || path.contains('\0') {
        return not_found();
    }

    let file_path = static_dir.join(path);

    let content = match fs::read(&file_path).await {
        Ok(content) => content,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %file_path.display(), error = %e, "failed to read static file");
            }
            return not_found();
        }
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime_from_path(&file_path)),
            (header::CACHE_CONTROL, "public, max-age=86400"), // 1 day cache
        ],
        Body::from(content),
    )
        .into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

fn mime_from_path(path: &FsPath) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("html") => "text/html",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
