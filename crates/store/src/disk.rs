//! Embedded sled-backed store.

use std::path::Path;

use async_trait::async_trait;

use crate::{Result, SettingsStore};

/// Settings store backed by an embedded sled database. Each set flushes,
/// so a completed save survives a crash (atomic replace-on-save).
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }
}

#[async_trait]
impl SettingsStore for SledStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.db.get(key)?.map(|v| v.to_vec()))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.db.insert(key, value)?;
        self.db.flush()?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.db.remove(key)?;
        self.db.flush()?;
        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for item in self.db.scan_prefix(prefix) {
            let (key, _) = item?;
            keys.push(String::from_utf8_lossy(&key).into_owned());
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledStore::open(dir.path().join("settings")).unwrap();

        store.set("widget:default:options", b"{}").await.unwrap();
        assert_eq!(
            store.get("widget:default:options").await.unwrap(),
            Some(b"{}".to_vec())
        );

        store.set("widget:default:options", b"{\"enabled\":true}").await.unwrap();
        assert_eq!(
            store.get("widget:default:options").await.unwrap(),
            Some(b"{\"enabled\":true}".to_vec())
        );

        store.delete("widget:default:options").await.unwrap();
        assert!(store.get("widget:default:options").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn scan_prefix_lists_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledStore::open(dir.path().join("settings")).unwrap();

        store.set("widget:a:options", b"1").await.unwrap();
        store.set("widget:a:render-cache", b"2").await.unwrap();
        store.set("unrelated", b"3").await.unwrap();

        let keys = store.list_keys("widget:a:").await.unwrap();
        assert_eq!(keys.len(), 2);
    }
}
