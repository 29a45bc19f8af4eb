//! Document store trait.
//!
//! Defines the narrow interface over the remote hierarchical key-value
//! store: `get`, `set`, and `update` over a slash-separated key path.
//! Implementations live in stratboard-infra.

use stratboard_types::error::StoreError;

/// Trait for hierarchical JSON document storage.
///
/// Paths are slash-separated from the store root (e.g. `config`,
/// `chats/0192d3c4-...`). Uses RPITIT (native async fn in traits,
/// Rust 2024 edition). Implementations live in stratboard-infra.
pub trait DocumentStore: Send + Sync {
    /// Read the document at `path`. Returns None if nothing is stored there.
    fn get(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Option<serde_json::Value>, StoreError>> + Send;

    /// Replace the document at `path` entirely.
    fn set(
        &self,
        path: &str,
        value: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Shallow-merge `patch` into the document at `path`: each named child
    /// is replaced, siblings not named are left untouched.
    fn update(
        &self,
        path: &str,
        patch: &serde_json::Map<String, serde_json::Value>,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
