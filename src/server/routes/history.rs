use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use zapisnik_core::api::HistoryResponse;

use crate::server::routes::{AppState, error_response};

pub async fn get_note_logs(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.service.logs(&id) {
        Ok((note, logs)) => {
            (StatusCode::OK, Json(HistoryResponse { data: note, logs })).into_response()
        }
        Err(e) => {
            log::error!("failed to read logs for note {}: {}", id, e);
            error_response(e)
        }
    }
}

pub async fn get_note_at_commit(
    State(state): State<AppState>,
    Path((id, commit)): Path<(String, String)>,
) -> Response {
    match state.service.at_commit(&id, &commit) {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => {
            log::error!("failed to read note {} at {}: {}", id, commit, e);
            error_response(e)
        }
    }
}
