//! Request/response types of the notes HTTP interface.

use serde::{Deserialize, Serialize};

use crate::note::Note;

/// GET /health response
#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// JSON error body: `{"error": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// POST /api/notes body.
///
/// `name` and `body` are the legacy spellings of `title` and `content`;
/// either is accepted, the canonical one wins when both are present.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl CreateNoteRequest {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().or(self.name.as_deref())
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref().or(self.body.as_deref())
    }
}

/// PUT /api/notes/{id} body. Absent fields keep their stored values;
/// `commit` becomes the history commit message for this write.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub commit: Option<String>,
}

impl UpdateNoteRequest {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().or(self.name.as_deref())
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref().or(self.body.as_deref())
    }
}

/// DELETE /api/notes/{id} response
#[derive(Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// One commit in a note's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteLogEntry {
    pub hash: String,
    pub date: String,
    pub message: String,
    pub author_name: String,
    pub author_email: String,
}

/// GET /api/notes/{id}/logs response: the current record plus its commit
/// log, newest first.
#[derive(Serialize, Deserialize)]
pub struct HistoryResponse {
    pub data: Note,
    pub logs: Vec<NoteLogEntry>,
}

/// POST /api/preview body
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub content: String,
}

/// POST /api/preview response
#[derive(Serialize, Deserialize)]
pub struct PreviewResponse {
    pub html: String,
}
