use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_BOARD_SIZE: usize = 4;
pub const DEFAULT_DURATION_SECS: u32 = 120;

/// Board size and game length, read from the config file and the command line.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    pub board_size: usize,
    pub duration_secs: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            duration_secs: DEFAULT_DURATION_SECS,
        }
    }
}

impl SessionConfig {
    /// Apply command line overrides on top of the stored values.
    pub fn merged(self, board_size: Option<usize>, duration_secs: Option<u32>) -> Self {
        Self {
            board_size: board_size.unwrap_or(self.board_size),
            duration_secs: duration_secs.unwrap_or(self.duration_secs),
        }
    }
}

/// Read-only source of the stored defaults.
pub trait ConfigStore {
    fn load(&self) -> SessionConfig;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "boggle") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("boggle_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> SessionConfig {
        let Ok(bytes) = fs::read(&self.path) else {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return SessionConfig::default();
        };
        match serde_json::from_slice::<SessionConfig>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable config");
                SessionConfig::default()
            }
        }
    }
}
