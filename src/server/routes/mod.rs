pub mod health;
pub mod history;
pub mod notes;
pub mod preview;

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::{DefaultBodyLimit, Request};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use rust_embed::RustEmbed;
use zapisnik_core::api::ErrorResponse;

use crate::notes::{NotesService, StoreError};

#[derive(RustEmbed)]
#[folder = "web/dist"]
struct WebAssets;

/// Shared state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<NotesService>,
    pub start_time: Instant,
}

/// Build the complete axum router.
pub fn build_router(service: Arc<NotesService>, start_time: Instant, log_requests: bool) -> Router {
    let state = AppState {
        service,
        start_time,
    };

    let router = Router::new()
        .route(
            "/api/notes",
            axum::routing::get(notes::list_notes).post(notes::create_note),
        )
        .route(
            "/api/notes/{id}",
            axum::routing::get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .route(
            "/api/notes/{id}/logs",
            axum::routing::get(history::get_note_logs),
        )
        .route(
            "/api/notes/{id}/logs/{commit}",
            axum::routing::get(history::get_note_at_commit),
        )
        .route("/api/preview", axum::routing::post(preview::post_preview))
        .route("/health", axum::routing::get(health::get_health))
        .layer(middleware::from_fn(cors_middleware))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB
        .fallback(serve_web_asset)
        .with_state(state);

    if log_requests {
        router.layer(middleware::from_fn(log_middleware))
    } else {
        router
    }
}

/// Map a store error onto a status code + JSON error body.
pub(crate) fn error_response(err: StoreError) -> Response {
    let status = match &err {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        axum::Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// Permissive CORS: the browser client is served from another origin
/// during development.
async fn cors_middleware(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return (
            StatusCode::NO_CONTENT,
            [
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                (
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    "GET, POST, PUT, DELETE, OPTIONS",
                ),
                (header::ACCESS_CONTROL_ALLOW_HEADERS, "content-type"),
            ],
        )
            .into_response();
    }

    let mut response = next.run(req).await;
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

/// Request log line: method, path, status, latency.
async fn log_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    log::info!(
        "{} {} {} {}ms",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}

/// Serve embedded web client assets (SPA with index.html fallback for
/// client-side routing).
async fn serve_web_asset(uri: axum::http::Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let file = if path.is_empty() { "index.html" } else { path };

    match WebAssets::get(file) {
        Some(content) => serve_embedded_file(file, content),
        None => {
            // SPA fallback: serve index.html for unmatched routes
            match WebAssets::get("index.html") {
                Some(content) => serve_embedded_file("index.html", content),
                None => (StatusCode::NOT_FOUND, "web client not available").into_response(),
            }
        }
    }
}

fn serve_embedded_file(path: &str, file: rust_embed::EmbeddedFile) -> Response {
    let mime = match path.rsplit('.').next() {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    };

    ([(header::CONTENT_TYPE, mime)], file.data).into_response()
}
