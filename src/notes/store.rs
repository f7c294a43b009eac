//! Filesystem note storage: one JSON record per `{id}.md` file.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use zapisnik_core::note::{self, Note};

use super::StoreError;

pub struct NoteStore {
    dir: PathBuf,
}

impl NoteStore {
    /// Open (creating if needed) the notes directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Filename a note id is stored under.
    pub fn file_name(id: &str) -> String {
        format!("{id}.md")
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(Self::file_name(id))
    }

    pub fn exists(&self, id: &str) -> bool {
        self.path_for(id).is_file()
    }

    /// Load one note, healing normalization drift back to disk.
    pub fn load(&self, id: &str) -> Result<Note, StoreError> {
        let path = self.path_for(id);
        if !path.is_file() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.read_record(&path, id)
    }

    /// Write a note record. The record lands under its own id, which can
    /// differ from the file it was read from when an old record carries a
    /// mismatched filename.
    pub fn write(&self, note: &Note) -> Result<(), StoreError> {
        fs::write(self.path_for(&note.id), serde_json::to_string(note)?)?;
        Ok(())
    }

    /// Every note in the directory, newest first. Unreadable records are
    /// skipped with a warning rather than failing the whole listing.
    pub fn list(&self) -> Result<Vec<Note>, StoreError> {
        let mut notes = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name == ".git" || name == ".gitkeep" {
                continue;
            }
            if !entry.file_type()?.is_file() {
                continue;
            }
            let id = name.strip_suffix(".md").unwrap_or(&name).to_string();
            match self.read_record(&entry.path(), &id) {
                Ok(note) => notes.push(note),
                Err(e) => log::warn!("skipping unreadable note {}: {}", name, e),
            }
        }
        notes.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
        Ok(notes)
    }

    fn read_record(&self, path: &Path, fallback_id: &str) -> Result<Note, StoreError> {
        let raw: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
        let (note, changed) = note::normalize(&raw, fallback_id);
        if changed {
            self.write(&note)?;
        }
        Ok(note)
    }
}
