use axum::Json;
use zapisnik_core::api::{PreviewRequest, PreviewResponse};

/// Server-side markdown preview: the same rendering the client embeds,
/// exposed for clients that have none. Total over all inputs, so this
/// route has no error branch.
pub async fn post_preview(Json(req): Json<PreviewRequest>) -> Json<PreviewResponse> {
    Json(PreviewResponse {
        html: zapisnik_markdown::render(&req.content),
    })
}
