//! File-backed `ScratchStore`.
//!
//! One file per key: `{dir}/{key}.json`. Writes replace the whole file;
//! there is no merging and the last writer wins.

use std::path::{Path, PathBuf};

use callscript_core::repository::scratch::ScratchStore;
use callscript_types::error::RepositoryError;

use super::validate_key;

pub struct FileScratchStore {
    dir: PathBuf,
}

impl FileScratchStore {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, RepositoryError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(path: &Path, err: std::io::Error) -> RepositoryError {
    RepositoryError::Io(format!("{}: {err}", path.display()))
}

impl ScratchStore for FileScratchStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let path = self.entry_path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&path, err)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let path = self.entry_path(key)?;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_error(&self.dir, e))?;
        tokio::fs::write(&path, value)
            .await
            .map_err(|e| io_error(&path, e))?;
        tracing::debug!(key, path = %path.display(), "Scratch entry written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        let path = self.entry_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(key, "Scratch entry removed");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(&path, err)),
        }
    }
}
