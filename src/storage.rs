use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::task::Task;

/// Versioned file name holding the saved task list.
pub const DEFAULT_FILE: &str = "taskline.v1.json";

/// Persistence boundary: the whole collection is rewritten as one JSON
/// array on every mutation. Read and write failures never reach the
/// caller; the in-memory list stays the source of truth.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Default for Storage {
    fn default() -> Self {
        Self::new(DEFAULT_FILE)
    }
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the saved collection. A missing file, an unreadable file, and
    /// corrupt JSON all come back as an empty list.
    pub fn load(&self) -> Vec<Task> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                if err.kind() != ErrorKind::NotFound {
                    warn!(path = %self.path.display(), %err, "failed to read saved tasks");
                }
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "saved tasks are corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Writes the whole collection. Failures are logged and swallowed.
    pub fn save(&self, tasks: &[Task]) {
        let json = match serde_json::to_string_pretty(tasks) {
            Ok(json) => json,
            Err(err) => {
                warn!(%err, "failed to serialize tasks");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, json) {
            warn!(path = %self.path.display(), %err, "failed to save tasks");
        }
    }
}
