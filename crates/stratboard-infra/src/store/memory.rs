//! In-memory [`DocumentStore`] backed by a JSON tree.
//!
//! Used as the test double for the remote store and as an offline backend.
//! Paths navigate nested objects the same way the Firebase REST API does:
//! `chats/abc` reads the `abc` child of the `chats` object.

use std::sync::Arc;

use tokio::sync::RwLock;

use stratboard_core::store::DocumentStore;
use stratboard_types::error::StoreError;

/// In-memory JSON-tree document store.
///
/// Clones share the same tree, so one handle can seed data that another
/// reads back.
#[derive(Clone, Default)]
pub struct MemoryStore {
    root: Arc<RwLock<serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Walk the tree to the value at `path`, if present.
fn lookup<'a>(root: &'a serde_json::Value, path: &str) -> Option<&'a serde_json::Value> {
    let mut current = root;
    for segment in segments(path) {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Walk the tree to the object at `path`, creating intermediate objects and
/// replacing non-object nodes along the way.
fn entry_mut<'a>(root: &'a mut serde_json::Value, path: &str) -> &'a mut serde_json::Value {
    let mut current = root;
    for segment in segments(path) {
        if !current.is_object() {
            *current = serde_json::Value::Object(serde_json::Map::new());
        }
        current = current
            .as_object_mut()
            .expect("node was just made an object")
            .entry(segment.to_string())
            .or_insert(serde_json::Value::Null);
    }
    current
}

impl DocumentStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let root = self.root.read().await;
        Ok(lookup(&root, path).filter(|v| !v.is_null()).cloned())
    }

    async fn set(&self, path: &str, value: &serde_json::Value) -> Result<(), StoreError> {
        let mut root = self.root.write().await;
        *entry_mut(&mut root, path) = value.clone();
        Ok(())
    }

    async fn update(
        &self,
        path: &str,
        patch: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), StoreError> {
        let mut root = self.root.write().await;
        let target = entry_mut(&mut root, path);
        if !target.is_object() {
            *target = serde_json::Value::Object(serde_json::Map::new());
        }
        let object = target.as_object_mut().expect("target was just made an object");
        for (key, value) in patch {
            object.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_absent_path_returns_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("config").await.unwrap(), None);
        assert_eq!(store.get("chats/missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get_nested_path() {
        let store = MemoryStore::new();
        store.set("chats/abc", &json!({"language": "English"})).await.unwrap();

        let value = store.get("chats/abc").await.unwrap().unwrap();
        assert_eq!(value["language"], "English");

        // Parent path sees the child
        let parent = store.get("chats").await.unwrap().unwrap();
        assert!(parent.get("abc").is_some());
    }

    #[tokio::test]
    async fn test_set_overwrites_entirely() {
        let store = MemoryStore::new();
        store.set("chats/abc", &json!({"a": 1, "b": 2})).await.unwrap();
        store.set("chats/abc", &json!({"c": 3})).await.unwrap();

        let value = store.get("chats/abc").await.unwrap().unwrap();
        assert_eq!(value, json!({"c": 3}));
    }

    #[tokio::test]
    async fn test_update_merges_named_children_only() {
        let store = MemoryStore::new();
        store
            .set("config", &json!({"board_members": ["A"], "system_prompts": {"English": "x"}}))
            .await
            .unwrap();

        let mut patch = serde_json::Map::new();
        patch.insert("board_members".to_string(), json!(["B", "C"]));
        store.update("config", &patch).await.unwrap();

        let value = store.get("config").await.unwrap().unwrap();
        assert_eq!(value["board_members"], json!(["B", "C"]));
        // Sibling untouched
        assert_eq!(value["system_prompts"]["English"], "x");
    }

    #[tokio::test]
    async fn test_clones_share_the_tree() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("config", &json!({"k": "v"})).await.unwrap();

        let value = other.get("config").await.unwrap().unwrap();
        assert_eq!(value["k"], "v");
    }
}
