use crate::domain::repository::KeyValueStore;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, trace};

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling that is then renamed over the target, so a
/// reader sees either the old value or the new one.
#[derive(Clone, Debug)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            bail!("invalid storage key {:?}", key);
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => {
                trace!(path = %path.display(), "Read key from disk");
                Ok(Some(value))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(path = %path.display(), "Key file absent");
                Ok(None)
            }
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    #[instrument(skip(self, value), fields(dir = %self.dir.display(), bytes = value.len()))]
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("failed to create {}", self.dir.display()))?;

        let tmp = self
            .dir
            .join(format!(".{}.{:08x}.tmp", key, fastrand::u32(..)));
        tokio::fs::write(&tmp, value)
            .await
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e).with_context(|| format!("failed to replace {}", path.display()));
        }

        debug!(path = %path.display(), "Wrote key to disk");
        Ok(())
    }

    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Removed key file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove {}", path.display())),
        }
    }
}
