//! `.env` file loading.
//!
//! Runs before argument parsing so clap's `env` fallbacks and the
//! credential lookup see values from the file. Variables already set in the
//! process environment take precedence over the file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Outcome of looking for an environment file.
#[derive(Debug)]
pub enum EnvFile {
    Loaded(PathBuf),
    NotFound,
    Failed(String),
}

impl EnvFile {
    /// Load `.env` from the working directory or one of its parents.
    pub fn load() -> Self {
        Self::classify(dotenv::dotenv())
    }

    /// Load a specific file.
    pub fn load_from(path: &Path) -> Self {
        Self::classify(dotenv::from_path(path).map(|()| path.to_path_buf()))
    }

    fn classify(result: Result<PathBuf, dotenv::Error>) -> Self {
        match result {
            Ok(path) => EnvFile::Loaded(path),
            Err(dotenv::Error::Io(err)) if err.kind() == ErrorKind::NotFound => EnvFile::NotFound,
            Err(err) => EnvFile::Failed(err.to_string()),
        }
    }

    /// Report the outcome once tracing is up.
    pub fn log(&self) {
        match self {
            EnvFile::Loaded(path) => {
                tracing::debug!(path = %path.display(), "Loaded environment file")
            }
            EnvFile::NotFound => tracing::debug!("No .env file found"),
            EnvFile::Failed(err) => tracing::warn!(error = %err, "Failed to load .env file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_sets_variables() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".env");
        std::fs::write(&path, "ONCOCHAT_TEST_DOTENV_FRESH=from-file\n").unwrap();

        let outcome = EnvFile::load_from(&path);
        assert!(matches!(outcome, EnvFile::Loaded(ref p) if p == &path));
        assert_eq!(
            std::env::var("ONCOCHAT_TEST_DOTENV_FRESH").as_deref(),
            Ok("from-file")
        );

        // SAFETY: test-only, unique variable name, no concurrent reads of it.
        unsafe { std::env::remove_var("ONCOCHAT_TEST_DOTENV_FRESH") };
    }

    #[test]
    fn test_process_environment_wins_over_file() {
        let key = "ONCOCHAT_TEST_DOTENV_PRESET";
        // SAFETY: test-only, unique variable name, no concurrent reads of it.
        unsafe { std::env::set_var(key, "from-process") };

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".env");
        std::fs::write(&path, format!("{key}=from-file\n")).unwrap();

        EnvFile::load_from(&path);
        assert_eq!(std::env::var(key).as_deref(), Ok("from-process"));

        unsafe { std::env::remove_var(key) };
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let outcome = EnvFile::load_from(&tmp.path().join(".env"));
        assert!(matches!(outcome, EnvFile::NotFound));
    }
}
