//! In-memory store for tests and ephemeral deployments.

use std::{collections::BTreeMap, sync::RwLock};

use async_trait::async_trait;

use crate::{Result, SettingsStore, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let data = self.data.read().map_err(|_| StoreError::Poisoned)?;
        Ok(data.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut data = self.data.write().map_err(|_| StoreError::Poisoned)?;
        data.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut data = self.data.write().map_err(|_| StoreError::Poisoned)?;
        data.remove(key);
        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let data = self.data.read().map_err(|_| StoreError::Poisoned)?;
        Ok(data
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
