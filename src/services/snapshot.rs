use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{
    models::menu::MenuDocument,
    services::source::{MenuSource, Tier},
};

/// Relative path of the snapshot file, resolved against the working directory.
pub const SNAPSHOT_FILE: &str = "mock_response.json";

/// Single-document file mirror of the last successful write, shared by all outlets.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    path: PathBuf,
}

impl SnapshotCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. Missing or undecodable files yield `None`.
    pub async fn load(&self) -> Option<MenuDocument> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                debug!(path = %self.path.display(), "snapshot unreadable: {}", e);
                return None;
            }
        };

        match serde_json::from_slice::<MenuDocument>(&bytes) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(path = %self.path.display(), "snapshot exists but unmarshal failed: {}", e);
                None
            }
        }
    }

    /// Overwrite the snapshot with `doc`, pretty-printed.
    pub async fn store(&self, doc: &MenuDocument) -> anyhow::Result<()> {
        let data = serde_json::to_vec_pretty(doc)?;
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }
}

#[async_trait]
impl MenuSource for SnapshotCache {
    fn tier(&self) -> Tier {
        Tier::Snapshot
    }

    async fn try_load(&self, _outlet_id: i64) -> Option<MenuDocument> {
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::menu::default_menu;

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path().join(SNAPSHOT_FILE));
        assert!(cache.load().await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SNAPSHOT_FILE);
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        assert!(SnapshotCache::new(path).load().await.is_none());
    }

    #[tokio::test]
    async fn test_store_overwrites_and_pretty_prints() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path().join(SNAPSHOT_FILE));

        let mut first = default_menu();
        first.output.outlet_name = "First".into();
        cache.store(&first).await.unwrap();

        let mut second = default_menu();
        second.output.outlet_name = "Second".into();
        cache.store(&second).await.unwrap();

        let raw = tokio::fs::read_to_string(cache.path()).await.unwrap();
        assert!(raw.contains("\n  \"output\": {"));
        assert_eq!(cache.try_load(123).await, Some(second));
    }

    #[tokio::test]
    async fn test_store_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path().join("nope").join(SNAPSHOT_FILE));
        assert!(cache.store(&default_menu()).await.is_err());
    }
}
