use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use zapisnik_core::api::{CreateNoteRequest, DeleteResponse, UpdateNoteRequest};

use crate::server::routes::{AppState, error_response};

pub async fn list_notes(State(state): State<AppState>) -> Response {
    match state.service.list() {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => {
            log::error!("failed to list notes: {}", e);
            error_response(e)
        }
    }
}

pub async fn get_note(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.service.get(&id) {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn create_note(
    State(state): State<AppState>,
    Json(req): Json<CreateNoteRequest>,
) -> Response {
    match state.service.create(req.title(), req.content()) {
        Ok(note) => (StatusCode::CREATED, Json(note)).into_response(),
        Err(e) => {
            log::error!("failed to create note: {}", e);
            error_response(e)
        }
    }
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateNoteRequest>,
) -> Response {
    match state
        .service
        .update(&id, req.title(), req.content(), req.commit.as_deref())
    {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => {
            log::error!("failed to update note {}: {}", id, e);
            error_response(e)
        }
    }
}

pub async fn delete_note(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.service.delete(&id) {
        Ok(()) => (StatusCode::OK, Json(DeleteResponse { success: true })).into_response(),
        Err(e) => {
            log::error!("failed to delete note {}: {}", id, e);
            error_response(e)
        }
    }
}
