//! Git plumbing for note history.
//!
//! Drives the `git` binary directly with `-C <notes_dir>`. Every note
//! write lands as exactly one commit, which is what makes the per-note
//! revision log and historical retrieval possible.

use std::path::Path;
use std::process::Command;

use zapisnik_core::api::NoteLogEntry;

use crate::notes::StoreError;

// Unit separator between fields, one commit per line:
// hash, author date, author name, author email, subject.
const LOG_FORMAT: &str = "--pretty=format:%H%x1f%aI%x1f%an%x1f%ae%x1f%s";

fn run_git(dir: &Path, args: &[&str]) -> Result<String, StoreError> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .map_err(|e| StoreError::Git(format!("failed to run git: {e}")))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        Err(StoreError::Git(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ))
    }
}

/// Return `true` if `dir` is the top of a git repository.
pub fn is_repo(dir: &Path) -> bool {
    dir.join(".git").exists()
}

/// `git init` the notes directory on first use.
pub fn ensure_repo(dir: &Path) -> Result<(), StoreError> {
    if is_repo(dir) {
        return Ok(());
    }
    run_git(dir, &["init", "--quiet"])?;
    log::info!("initialized note history repository in {}", dir.display());
    Ok(())
}

/// Stage one note file and record a commit for it.
pub fn commit_file(dir: &Path, file: &str, message: &str) -> Result<(), StoreError> {
    run_git(dir, &["add", file])?;
    commit(dir, message)
}

/// Remove one note file from the index and worktree, then commit.
pub fn remove_file(dir: &Path, file: &str, message: &str) -> Result<(), StoreError> {
    run_git(dir, &["rm", "--quiet", file])?;
    commit(dir, message)
}

fn commit(dir: &Path, message: &str) -> Result<(), StoreError> {
    // Explicit identity and --allow-empty: one write is one commit,
    // regardless of host git config or whether the content changed.
    run_git(
        dir,
        &[
            "-c",
            "user.name=zapisnik",
            "-c",
            "user.email=zapisnik@localhost",
            "commit",
            "--quiet",
            "--allow-empty",
            "-m",
            message,
        ],
    )?;
    Ok(())
}

/// Per-file commit log, newest first.
pub fn file_log(dir: &Path, file: &str) -> Result<Vec<NoteLogEntry>, StoreError> {
    let stdout = run_git(dir, &["log", LOG_FORMAT, "--", file])?;
    Ok(stdout
        .lines()
        .filter_map(|line| {
            let mut parts = line.split('\u{1f}');
            Some(NoteLogEntry {
                hash: parts.next()?.to_string(),
                date: parts.next()?.to_string(),
                author_name: parts.next()?.to_string(),
                author_email: parts.next()?.to_string(),
                message: parts.next()?.to_string(),
            })
        })
        .collect())
}

/// A file's content as of a commit, without touching the worktree.
pub fn file_at_commit(dir: &Path, commit: &str, file: &str) -> Result<String, StoreError> {
    let object = format!("{commit}:{file}");
    run_git(dir, &["show", &object])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        ensure_repo(dir.path()).unwrap();
        dir
    }

    #[test]
    fn ensure_repo_is_idempotent() {
        let dir = temp_repo();
        assert!(is_repo(dir.path()));
        ensure_repo(dir.path()).unwrap();
    }

    #[test]
    fn commit_and_log_roundtrip() {
        let dir = temp_repo();
        std::fs::write(dir.path().join("a.md"), "{}").unwrap();
        commit_file(dir.path(), "a.md", "initial commit a").unwrap();

        let log = file_log(dir.path(), "a.md").unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].message, "initial commit a");
        assert_eq!(log[0].author_name, "zapisnik");
        assert!(!log[0].hash.is_empty());
        assert!(!log[0].date.is_empty());
    }

    #[test]
    fn log_is_newest_first_and_per_file() {
        let dir = temp_repo();
        std::fs::write(dir.path().join("a.md"), "one").unwrap();
        commit_file(dir.path(), "a.md", "first").unwrap();
        std::fs::write(dir.path().join("b.md"), "other").unwrap();
        commit_file(dir.path(), "b.md", "unrelated").unwrap();
        std::fs::write(dir.path().join("a.md"), "two").unwrap();
        commit_file(dir.path(), "a.md", "second").unwrap();

        let log = file_log(dir.path(), "a.md").unwrap();
        let messages: Vec<_> = log.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
    }

    #[test]
    fn file_at_commit_reads_historical_content() {
        let dir = temp_repo();
        std::fs::write(dir.path().join("a.md"), "old").unwrap();
        commit_file(dir.path(), "a.md", "first").unwrap();
        std::fs::write(dir.path().join("a.md"), "new").unwrap();
        commit_file(dir.path(), "a.md", "second").unwrap();

        let log = file_log(dir.path(), "a.md").unwrap();
        let oldest = &log.last().unwrap().hash;
        assert_eq!(file_at_commit(dir.path(), oldest, "a.md").unwrap(), "old");
        assert_eq!(
            file_at_commit(dir.path(), &log[0].hash, "a.md").unwrap(),
            "new"
        );
    }

    #[test]
    fn removed_file_keeps_its_history() {
        let dir = temp_repo();
        std::fs::write(dir.path().join("a.md"), "x").unwrap();
        commit_file(dir.path(), "a.md", "first").unwrap();
        remove_file(dir.path(), "a.md", "Removed file a").unwrap();

        assert!(!dir.path().join("a.md").exists());
        let log = file_log(dir.path(), "a.md").unwrap();
        assert_eq!(log[0].message, "Removed file a");
    }

    #[test]
    fn unknown_commit_is_an_error() {
        let dir = temp_repo();
        std::fs::write(dir.path().join("a.md"), "x").unwrap();
        commit_file(dir.path(), "a.md", "first").unwrap();
        assert!(file_at_commit(dir.path(), "0000000", "a.md").is_err());
    }
}
