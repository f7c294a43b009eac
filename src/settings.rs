//! Service settings: a versioned JSON file in the user config directory,
//! with environment overrides for the deploy-time knobs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings schema version - increment when making breaking changes
pub const SETTINGS_VERSION: u32 = 1;

pub const DEFAULT_PORT: u16 = 5501;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppSettings {
    /// Settings schema version for migration support
    #[serde(default = "default_settings_version")]
    pub version: u32,
    /// Port the API server binds on (default: 5501)
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the note records and their git history
    #[serde(default = "default_notes_dir")]
    pub notes_dir: PathBuf,
    /// Log every request: method, path, status, latency (default: true)
    #[serde(default = "default_log_requests")]
    pub log_requests: bool,
}

fn default_settings_version() -> u32 {
    SETTINGS_VERSION
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_notes_dir() -> PathBuf {
    PathBuf::from("notes")
}

fn default_log_requests() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            port: DEFAULT_PORT,
            notes_dir: default_notes_dir(),
            log_requests: true,
        }
    }
}

/// Get the config directory path
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("zapisnik")
}

/// Get the settings file path
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Load settings from disk, writing the defaults out on first run.
///
/// Environment overrides the file: `PORT` and `ZAPISNIK_NOTES_DIR`.
pub fn load_settings() -> AppSettings {
    let path = settings_path();
    let mut settings = if path.exists() {
        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(parsed) => parsed,
                Err(e) => {
                    log::warn!("failed to parse settings: {}, using defaults", e);
                    AppSettings::default()
                }
            },
            Err(e) => {
                log::warn!("failed to read settings: {}, using defaults", e);
                AppSettings::default()
            }
        }
    } else {
        let defaults = AppSettings::default();
        if let Err(e) = save_settings(&defaults) {
            log::warn!("failed to write default settings: {}", e);
        }
        defaults
    };

    if let Some(port) = std::env::var("PORT").ok().and_then(|v| v.parse().ok()) {
        settings.port = port;
    }
    if let Ok(dir) = std::env::var("ZAPISNIK_NOTES_DIR") {
        if !dir.is_empty() {
            settings.notes_dir = PathBuf::from(dir);
        }
    }

    settings
}

/// Save settings to disk
pub fn save_settings(settings: &AppSettings) -> anyhow::Result<()> {
    let path = settings_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, serde_json::to_string_pretty(settings)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let settings = AppSettings::default();
        assert_eq!(settings.version, SETTINGS_VERSION);
        assert_eq!(settings.port, 5501);
        assert_eq!(settings.notes_dir, PathBuf::from("notes"));
        assert!(settings.log_requests);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.version, SETTINGS_VERSION);
        assert_eq!(settings.notes_dir, PathBuf::from("notes"));
    }

    #[test]
    fn settings_roundtrip_through_json() {
        let settings = AppSettings {
            port: 8080,
            notes_dir: PathBuf::from("/tmp/notes"),
            log_requests: false,
            ..AppSettings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.port, 8080);
        assert_eq!(back.notes_dir, PathBuf::from("/tmp/notes"));
        assert!(!back.log_requests);
    }
}
