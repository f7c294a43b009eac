//! The note service: filesystem store plus git-backed history behind one
//! write-serialized interface.

mod store;

pub use store::NoteStore;

use parking_lot::Mutex;
use thiserror::Error;
use uuid::Uuid;
use zapisnik_core::api::NoteLogEntry;
use zapisnik_core::note::{self, Note};

use crate::git;
use crate::settings::AppSettings;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("note {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("git: {0}")]
    Git(String),
}

pub struct NotesService {
    store: NoteStore,
    /// Serializes mutations: concurrent commits would race on the git index.
    write_lock: Mutex<()>,
}

impl NotesService {
    /// Open the notes directory and make sure its history repo exists.
    pub fn open(settings: &AppSettings) -> Result<Self, StoreError> {
        let store = NoteStore::open(&settings.notes_dir)?;
        git::ensure_repo(store.dir())?;
        Ok(Self {
            store,
            write_lock: Mutex::new(()),
        })
    }

    pub fn list(&self) -> Result<Vec<Note>, StoreError> {
        self.store.list()
    }

    pub fn get(&self, id: &str) -> Result<Note, StoreError> {
        self.store.load(id)
    }

    /// Create a note under a fresh uuid and commit it.
    pub fn create(&self, title: Option<&str>, content: Option<&str>) -> Result<Note, StoreError> {
        let _guard = self.write_lock.lock();
        let now = note::now_millis();
        let note = Note {
            id: Uuid::new_v4().to_string(),
            title: title.unwrap_or("Untitled Note").to_string(),
            content: content.unwrap_or_default().to_string(),
            created_at: now,
            updated_at: now,
        };
        self.store.write(&note)?;
        git::commit_file(
            self.store.dir(),
            &NoteStore::file_name(&note.id),
            &format!("initial commit {}", note.id),
        )?;
        Ok(note)
    }

    /// Merge an update over the stored record; absent fields keep their
    /// stored values, and a missing record behaves as an empty one.
    pub fn update(
        &self,
        id: &str,
        title: Option<&str>,
        content: Option<&str>,
        commit_message: Option<&str>,
    ) -> Result<Note, StoreError> {
        let _guard = self.write_lock.lock();
        let existing = match self.store.load(id) {
            Ok(found) => found,
            Err(StoreError::NotFound(_)) => note::normalize(&serde_json::Value::Null, id).0,
            Err(e) => return Err(e),
        };
        let note = Note {
            id: id.to_string(),
            title: title.map_or(existing.title, str::to_string),
            content: content.map_or(existing.content, str::to_string),
            created_at: existing.created_at,
            updated_at: note::now_millis(),
        };
        self.store.write(&note)?;
        git::commit_file(
            self.store.dir(),
            &NoteStore::file_name(id),
            commit_message.unwrap_or("unknown edit"),
        )?;
        Ok(note)
    }

    /// Remove the record and commit the removal.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        if !self.store.exists(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        git::remove_file(
            self.store.dir(),
            &NoteStore::file_name(id),
            &format!("Removed file {id}"),
        )
    }

    /// The current record plus its commit log, newest first.
    pub fn logs(&self, id: &str) -> Result<(Note, Vec<NoteLogEntry>), StoreError> {
        let note = self.store.load(id)?;
        let logs = git::file_log(self.store.dir(), &NoteStore::file_name(id))?;
        Ok((note, logs))
    }

    /// The note as recorded at a historical commit.
    pub fn at_commit(&self, id: &str, commit: &str) -> Result<Note, StoreError> {
        let content =
            git::file_at_commit(self.store.dir(), commit, &NoteStore::file_name(id))?;
        let raw: serde_json::Value = serde_json::from_str(&content)?;
        Ok(note::normalize(&raw, id).0)
    }
}
