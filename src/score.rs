use directories::ProjectDirs;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Key under which the persistent best score lives.
pub const HIGH_SCORE_KEY: &str = "high_score";

/// Minimal key-value persistence boundary. The game depends on this
/// abstraction, never on a concrete storage mechanism.
pub trait ScoreStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// File-backed store: one plain-text file per key under the state directory.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    dir: PathBuf,
}

impl FileScoreStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            dir: Self::default_dir(),
        }
    }

    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Prefer the XDG-style ~/.local/state directory, falling back to the
    /// platform data-local dir.
    fn default_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("wordrush")
        } else if let Some(proj_dirs) = ProjectDirs::from("", "", "wordrush") {
            proj_dirs.data_local_dir().to_path_buf()
        } else {
            PathBuf::from(".wordrush")
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Default for FileScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for FileScoreStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.key_path(key), value)
    }
}

/// In-memory store for unit tests.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
