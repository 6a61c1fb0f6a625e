use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Line-delimited word list to play with instead of the built-in one
    pub words_file: Option<PathBuf>,
    /// Start over with the full list once every word has been played
    pub refill_when_empty: bool,
    /// `tracing` filter directive used when GALLOWS_LOG is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            words_file: None,
            refill_when_empty: true,
            log_filter: "info".to_string(),
        }
    }
}

/// Settings in effect for this run: the config file with CLI overrides applied
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeSettings {
    pub words_file: Option<PathBuf>,
    pub refill_when_empty: bool,
    pub seed: Option<u64>,
    pub log_filter: String,
}

impl From<&Config> for RuntimeSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            words_file: cfg.words_file.clone(),
            refill_when_empty: cfg.refill_when_empty,
            seed: None,
            log_filter: cfg.log_filter.clone(),
        }
    }
}

// the seed is per run and never persisted
impl From<&RuntimeSettings> for Config {
    fn from(rs: &RuntimeSettings) -> Self {
        Self {
            words_file: rs.words_file.clone(),
            refill_when_empty: rs.refill_when_empty,
            log_filter: rs.log_filter.clone(),
        }
    }
}

pub trait ConfigStore {
    /// A missing file yields the defaults; a file that cannot be read or
    /// parsed is an error so the caller can report it
    fn load(&self) -> Result<Config, ConfigError>;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "gallows") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("gallows_config.json")
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
    fn load(&self) -> Result<Config, ConfigError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| ConfigError::Invalid {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
