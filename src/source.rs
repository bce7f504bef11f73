//! Directory Source
//!
//! Loader serving one file per key from below a root directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::group::Getter;

/// Reads the value of `key` from the file `root/key`.
///
/// Keys may contain `/` to reach nested files but never leave `root`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        if key.contains("..") || key.starts_with('/') || relative.is_absolute() {
            return Err(CacheError::InvalidArgument(format!(
                "key escapes data dir: {}",
                key
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl Getter for DirectorySource {
    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.resolve(key)?;
        debug!(path = %path.display(), "reading from data dir");

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CacheError::NotFound(key.to_string()))
            }
            Err(e) => Err(CacheError::loader(e)),
        }
    }
}
