//! Boolean user settings
//!
//! Thin wrapper over the key-value store for the app's boolean toggles.
//! Reads never fail: any storage problem or unparseable value falls back
//! to the caller-supplied default, so screens can consult a setting
//! without error handling.

use std::sync::Arc;

use crate::constants::SETTINGS_PREFIX;
use crate::storage::{KeyValueStore, StorageError};

/// The boolean settings the app knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanSetting {
    /// Suppress remote poster lookups on stale cache entries
    ReducedDataMode,
    EnableNotifications,
    EnableHaptics,
    AutoPlayTrailers,
    SpoilerFreeMode,
}

impl BooleanSetting {
    /// Name used in the storage key and in logs
    pub fn name(&self) -> &'static str {
        match self {
            BooleanSetting::ReducedDataMode => "reducedDataMode",
            BooleanSetting::EnableNotifications => "enableNotifications",
            BooleanSetting::EnableHaptics => "enableHaptics",
            BooleanSetting::AutoPlayTrailers => "autoPlayTrailers",
            BooleanSetting::SpoilerFreeMode => "spoilerFreeMode",
        }
    }

    /// Full storage key under the settings namespace
    pub fn storage_key(&self) -> String {
        format!("{}{}", SETTINGS_PREFIX, self.name())
    }
}

/// Boolean setting reader/writer over a shared store
#[derive(Clone)]
pub struct Settings {
    store: Arc<dyn KeyValueStore>,
}

impl Settings {
    /// Create a settings accessor over the given store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read a boolean setting, returning `default` when the setting is
    /// unset or the store cannot be read
    pub async fn get(&self, setting: BooleanSetting, default: bool) -> bool {
        match self.store.get(&setting.storage_key()).await {
            Ok(Some(raw)) => raw == "true",
            Ok(None) => default,
            Err(e) => {
                tracing::warn!(setting = setting.name(), error = %e, "Failed to read setting");
                default
            }
        }
    }

    /// Persist a boolean setting
    pub async fn set(&self, setting: BooleanSetting, value: bool) -> Result<(), StorageError> {
        let raw = if value { "true" } else { "false" };
        self.store.set(&setting.storage_key(), raw).await
    }
}
