//! Config service: typed access to the stored configuration root.
//!
//! Reads and lazily initializes the `config` document (board members,
//! system prompts, translations) and applies per-field updates. Store
//! failures never propagate to callers: reads degrade to `None` (callers
//! fall back to the built-in defaults) and writes reduce to a boolean.

use serde_json::json;
use tracing::warn;

use stratboard_types::config::{BoardConfig, Language};

use crate::store::DocumentStore;

use std::collections::HashMap;

/// Store path of the configuration root.
const CONFIG_PATH: &str = "config";

/// Typed access to the stored configuration root.
///
/// Holds `Option<S>` mirroring the store connection: `None` when store
/// initialization failed at startup, in which case every read returns the
/// unavailable sentinel and every write is a no-op.
pub struct ConfigService<S: DocumentStore> {
    store: Option<S>,
}

impl<S: DocumentStore> ConfigService<S> {
    /// Create a config service over an optional store connection.
    pub fn new(store: Option<S>) -> Self {
        Self { store }
    }

    /// Whether a store connection is available.
    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    /// Read the configuration, writing the built-in defaults first when the
    /// config root is absent.
    ///
    /// Returns `None` when the store is unavailable, the read/initialize
    /// round-trip fails, or the stored document does not parse. Callers
    /// fall back to [`BoardConfig::default`].
    pub async fn get_or_init(&self) -> Option<BoardConfig> {
        let store = self.store.as_ref()?;

        let value = match store.get(CONFIG_PATH).await {
            Ok(Some(value)) => value,
            Ok(None) => {
                let defaults = BoardConfig::default();
                let document = match serde_json::to_value(&defaults) {
                    Ok(document) => document,
                    Err(err) => {
                        warn!(error = %err, "failed to serialize default config");
                        return None;
                    }
                };
                if let Err(err) = store.set(CONFIG_PATH, &document).await {
                    warn!(error = %err, "failed to initialize config");
                    return None;
                }
                match store.get(CONFIG_PATH).await {
                    Ok(Some(value)) => value,
                    Ok(None) => {
                        warn!("config still absent after initialization");
                        return None;
                    }
                    Err(err) => {
                        warn!(error = %err, "failed to re-read config after initialization");
                        return None;
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to read config");
                return None;
            }
        };

        match serde_json::from_value(value) {
            Ok(config) => Some(config),
            Err(err) => {
                warn!(error = %err, "stored config does not parse");
                None
            }
        }
    }

    /// Replace the stored board member list. Returns whether the write succeeded.
    pub async fn update_board_members(&self, members: &[String]) -> bool {
        self.patch_field("board_members", json!(members)).await
    }

    /// Replace the stored system prompt templates. Returns whether the write succeeded.
    pub async fn update_system_prompts(&self, prompts: &HashMap<Language, String>) -> bool {
        self.patch_field("system_prompts", json!(prompts)).await
    }

    /// Replace the stored translation tables. Returns whether the write succeeded.
    pub async fn update_translations(
        &self,
        translations: &HashMap<Language, HashMap<String, String>>,
    ) -> bool {
        self.patch_field("translations", json!(translations)).await
    }

    /// Merge one field into the config root, leaving siblings untouched.
    async fn patch_field(&self, field: &str, value: serde_json::Value) -> bool {
        let Some(store) = self.store.as_ref() else {
            return false;
        };

        let mut patch = serde_json::Map::new();
        patch.insert(field.to_string(), value);

        match store.update(CONFIG_PATH, &patch).await {
            Ok(()) => true,
            Err(err) => {
                warn!(field, error = %err, "failed to update config field");
                false
            }
        }
    }
}
