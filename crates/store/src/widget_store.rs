//! Typed widget-settings access on top of a [`SettingsStore`].
//!
//! Owns the key scheme: `widget:{tenant}:options` holds the sanitized
//! settings document, `widget:{tenant}:render-cache` a derived rendered
//! snippet. Saves replace the document wholesale and invalidate the cache;
//! uninstall removes every trace for a tenant (or all tenants).

use std::sync::Arc;

use {
    serde_json::Value,
    tracing::{debug, info},
};

use floatkit_widget::{WidgetOptions, sanitize_options};

use crate::{Result, SettingsStore};

const KEY_PREFIX: &str = "widget:";

#[derive(Clone)]
pub struct WidgetStore {
    inner: Arc<dyn SettingsStore>,
}

impl WidgetStore {
    pub fn new(inner: Arc<dyn SettingsStore>) -> Self {
        Self { inner }
    }

    fn options_key(tenant: &str) -> String {
        format!("{KEY_PREFIX}{tenant}:options")
    }

    fn cache_key(tenant: &str) -> String {
        format!("{KEY_PREFIX}{tenant}:render-cache")
    }

    /// Load the stored document for a tenant, or first-activation defaults
    /// when nothing has been saved yet. Stored bytes are re-run through the
    /// sanitizer, so even a corrupted document degrades to something valid.
    pub async fn load(&self, tenant: &str) -> Result<WidgetOptions> {
        match self.inner.get(&Self::options_key(tenant)).await? {
            Some(bytes) => {
                let raw: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
                Ok(sanitize_options(&raw))
            },
            None => Ok(WidgetOptions::default()),
        }
    }

    /// Sanitize a raw submission and replace the stored document. Always
    /// succeeds with a best-effort-normalized document; the render cache is
    /// invalidated as part of the save.
    pub async fn save(&self, tenant: &str, raw: &Value) -> Result<WidgetOptions> {
        let options = sanitize_options(raw);
        let bytes = serde_json::to_vec(&options)?;
        self.inner.set(&Self::options_key(tenant), &bytes).await?;
        self.inner.delete(&Self::cache_key(tenant)).await?;
        info!(tenant, channels = options.channels.len(), "widget settings saved");
        Ok(options)
    }

    pub async fn cached_render(&self, tenant: &str) -> Result<Option<String>> {
        Ok(self
            .inner
            .get(&Self::cache_key(tenant))
            .await?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
    }

    pub async fn store_render(&self, tenant: &str, html: &str) -> Result<()> {
        self.inner.set(&Self::cache_key(tenant), html.as_bytes()).await
    }

    /// Cache a rendered snippet only if the stored document still matches
    /// the options it was rendered from. Returns whether the write
    /// happened. Narrows the window in which a concurrent save's cache
    /// invalidation could be overwritten by a stale snippet; the residual
    /// race stays within the store's last-write-wins model.
    pub async fn store_render_if_current(
        &self,
        tenant: &str,
        html: &str,
        rendered_from: &WidgetOptions,
    ) -> Result<bool> {
        if self.load(tenant).await? != *rendered_from {
            debug!(tenant, "skipping render cache write for superseded document");
            return Ok(false);
        }
        self.store_render(tenant, html).await?;
        Ok(true)
    }

    /// Remove the settings document and the derived cache for one tenant.
    pub async fn uninstall(&self, tenant: &str) -> Result<()> {
        self.inner.delete(&Self::options_key(tenant)).await?;
        self.inner.delete(&Self::cache_key(tenant)).await?;
        info!(tenant, "widget settings removed");
        Ok(())
    }

    /// Remove every widget key across all tenants. Leaves no residual
    /// state behind.
    pub async fn uninstall_all(&self) -> Result<()> {
        let keys = self.inner.list_keys(KEY_PREFIX).await?;
        debug!(count = keys.len(), "sweeping widget keys");
        for key in keys {
            self.inner.delete(&key).await?;
        }
        Ok(())
    }
}
