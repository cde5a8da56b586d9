use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::repository::StorageError;

/// Reduce a learner name to a cache key: ASCII letters and digits, lowercased.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// On-disk cache of generated welcome greetings, one `.wav` file per sanitized name.
#[derive(Debug, Clone)]
pub struct AudioCache {
    dir: PathBuf,
}

impl AudioCache {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the cached greeting for `name`.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("welcome-{}.wav", sanitize_name(name)))
    }

    /// Create the cache directory if missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub async fn ensure_dir(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Cached bytes for `name`, or `None` on a miss.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` for read failures other than a missing file.
    pub async fn load(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                log::debug!("audio cache hit: {}", path.display());
                Ok(Some(bytes))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Write the greeting for `name`, replacing any previous file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory or file cannot be written.
    pub async fn store(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        self.ensure_dir().await?;
        let path = self.path_for(name);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_everything_but_ascii_alphanumerics() {
        assert_eq!(sanitize_name("Zoë O'Brien 2"), "zoobrien2");
        assert_eq!(sanitize_name("../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_name("Friend"), "friend");
    }

    #[test]
    fn names_with_same_key_share_a_file() {
        let cache = AudioCache::new("/tmp/audio");
        assert_eq!(cache.path_for("Sam!"), cache.path_for("sam"));
        assert!(cache.path_for("sam").ends_with("welcome-sam.wav"));
    }

    #[tokio::test]
    async fn store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AudioCache::new(dir.path().join("nested"));

        assert!(cache.load("Ada").await.unwrap().is_none());
        cache.store("Ada", b"RIFF").await.unwrap();
        assert_eq!(cache.load("ada").await.unwrap().as_deref(), Some(&b"RIFF"[..]));
    }
}
