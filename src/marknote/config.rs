//! # Configuration
//!
//! Stored as `config.json` in the data directory. Missing file or missing keys
//! fall back to the defaults below.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `storage_key` | `markdown-notes` | Key of the persisted record |
//! | `autosave_ms` | `1000` | Autosave quiescence window in milliseconds |
//! | `import_extensions` | `[".md", ".markdown", ".txt"]` | Extensions picked up when importing a directory |
//!
//! `autosave_ms` only matters to a long-running host that keeps a
//! [`NotesApi`](crate::api::NotesApi) open and calls `tick`. The bundled CLI
//! saves explicitly on every command and exits, so the window never elapses
//! there.

use crate::error::{NoteError, Result};
use crate::repository::DEFAULT_STORAGE_KEY;
use crate::store::validate_key;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_AUTOSAVE_MS: u64 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarknoteConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Quiescence window for buffered edits. Ignored by one-shot CLI commands.
    #[serde(default = "default_autosave_ms")]
    pub autosave_ms: u64,

    #[serde(default = "default_import_ext")]
    pub import_extensions: Vec<String>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_autosave_ms() -> u64 {
    DEFAULT_AUTOSAVE_MS
}

fn default_import_ext() -> Vec<String> {
    vec![".md".to_string(), ".markdown".to_string(), ".txt".to_string()]
}

impl Default for MarknoteConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            autosave_ms: default_autosave_ms(),
            import_extensions: default_import_ext(),
        }
    }
}

impl MarknoteConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NoteError::Io)?;
        let config: MarknoteConfig =
            serde_json::from_str(&content).map_err(NoteError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NoteError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NoteError::Serialization)?;
        fs::write(config_path, content).map_err(NoteError::Io)?;
        Ok(())
    }

    pub fn autosave_window(&self) -> Duration {
        Duration::from_millis(self.autosave_ms)
    }

    /// Read a value by its CLI name.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "storage-key" => Some(self.storage_key.clone()),
            "autosave-ms" => Some(self.autosave_ms.to_string()),
            "import-extensions" => Some(self.import_extensions.join(",")),
            _ => None,
        }
    }

    /// Set a value by its CLI name, validating it first.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "storage-key" => {
                validate_key(value)?;
                self.storage_key = value.to_string();
            }
            "autosave-ms" => {
                self.autosave_ms = value.parse().map_err(|_| {
                    NoteError::Api(format!("autosave-ms must be a number, got {}", value))
                })?;
            }
            "import-extensions" => {
                self.import_extensions = value
                    .split(',')
                    .map(str::trim)
                    .filter(|ext| !ext.is_empty())
                    .map(normalize_ext)
                    .collect();
            }
            other => return Err(NoteError::Api(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["storage-key", "autosave-ms", "import-extensions"]
    }
}

fn normalize_ext(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}
