use directories::ProjectDirs;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter
pub const LOG_ENV: &str = "GALLOWS_LOG";

const LOG_FILE: &str = "gallows.log";

/// Where the game log lives: the XDG state dir on Linux
/// (`~/.local/state/gallows`), the local data dir elsewhere.
pub fn default_log_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "gallows")?;
    let dir = dirs.state_dir().unwrap_or_else(|| dirs.data_local_dir());
    Some(dir.join(LOG_FILE))
}

/// Send tracing output to `path` so it never lands on the game screen.
///
/// Each run appends to the file. The filter comes from GALLOWS_LOG when set,
/// otherwise `default_filter`. A subscriber that is already installed is left
/// in place.
pub fn init_file_logging(path: &Path, default_filter: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_log_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("gallows.log");

        init_file_logging(&path, "debug").unwrap();
        tracing::info!("hello from the test");

        assert!(path.exists());
    }

    #[test]
    fn keeps_previous_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallows.log");
        fs::write(&path, "earlier run\n").unwrap();

        init_file_logging(&path, "info").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("earlier run\n"));
    }

    #[test]
    fn default_path_names_the_log_file() {
        if let Some(path) = default_log_path() {
            assert_eq!(path.file_name().unwrap(), LOG_FILE);
            assert!(path.to_string_lossy().contains("gallows"));
        }
    }
}
