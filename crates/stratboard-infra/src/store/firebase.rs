//! FirebaseStore -- [`DocumentStore`] over the Firebase Realtime Database
//! REST API.
//!
//! Every path maps to `{base_url}/{path}.json`: GET reads, PUT replaces,
//! PATCH shallow-merges the named children. Absent documents come back as
//! JSON `null`, which maps to `None`.
//!
//! The auth token is wrapped in [`secrecy::SecretString`], attached as the
//! `auth` query parameter, and is never logged or included in `Debug`
//! output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use stratboard_core::store::DocumentStore;
use stratboard_types::error::StoreError;

/// Firebase Realtime Database document store.
///
/// Cloning is cheap: the underlying `reqwest::Client` is a shared handle,
/// so each service can hold its own copy of the store.
#[derive(Clone)]
pub struct FirebaseStore {
    client: reqwest::Client,
    base_url: String,
    auth: Option<SecretString>,
}

impl FirebaseStore {
    /// Create a store rooted at `base_url` (e.g.
    /// `https://board-chat-default-rtdb.europe-west1.firebasedatabase.app`).
    pub fn new(base_url: impl Into<String>, auth: Option<SecretString>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        }
    }

    /// Build the REST URL for a document path.
    fn url(&self, path: &str) -> String {
        format!("{}/{}.json", self.base_url, path.trim_matches('/'))
    }

    /// Attach the auth token as a query parameter when configured.
    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Some(token) => request.query(&[("auth", token.expose_secret())]),
            None => request,
        }
    }

    /// Check the status and decode the body, mapping failures onto
    /// [`StoreError`].
    async fn read_body(response: reqwest::Response) -> Result<serde_json::Value, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::Payload(e.to_string()))
    }
}

// FirebaseStore intentionally does NOT derive Debug so the auth token can
// never leak through formatting.

impl DocumentStore for FirebaseStore {
    async fn get(&self, path: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let request = self.with_auth(self.client.get(self.url(path)));
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let value = Self::read_body(response).await?;
        // Firebase reports an absent document as JSON null.
        if value.is_null() {
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }

    async fn set(&self, path: &str, value: &serde_json::Value) -> Result<(), StoreError> {
        let request = self.with_auth(self.client.put(self.url(path)).json(value));
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        Self::read_body(response).await?;
        Ok(())
    }

    async fn update(
        &self,
        path: &str,
        patch: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), StoreError> {
        let request = self.with_auth(self.client.patch(self.url(path)).json(patch));
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        Self::read_body(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_shape() {
        let store = FirebaseStore::new("https://example.firebasedatabase.app/", None);
        assert_eq!(
            store.url("config"),
            "https://example.firebasedatabase.app/config.json"
        );
        assert_eq!(
            store.url("chats/abc-123"),
            "https://example.firebasedatabase.app/chats/abc-123.json"
        );
    }
}
