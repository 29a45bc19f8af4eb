//! Application state wiring all services together.
//!
//! Services are generic over the port traits, but AppState pins them to
//! the concrete infra implementations: the Firebase document store and the
//! OpenRouter completion client. Ephemeral sessions live here too, in a
//! DashMap keyed by session id.

use std::sync::Arc;

use dashmap::DashMap;
use secrecy::{ExposeSecret, SecretString};
use tracing::warn;
use uuid::Uuid;

use stratboard_core::chat::{ChatService, ConversationLogService, Session};
use stratboard_core::config::ConfigService;
use stratboard_infra::config::{load_app_config, resolve_data_dir, AppConfig, Secrets};
use stratboard_infra::llm::openrouter::OpenRouterProvider;
use stratboard_infra::store::FirebaseStore;

use crate::http::extractors::auth::hash_password;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteConfigService = ConfigService<FirebaseStore>;
pub type ConcreteLogService = ConversationLogService<FirebaseStore>;
pub type ConcreteChatService = ChatService<OpenRouterProvider>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub config_service: Arc<ConcreteConfigService>,
    pub log_service: Arc<ConcreteLogService>,
    pub chat_service: Arc<ConcreteChatService>,
    /// Ephemeral per-session conversation state, keyed by session id.
    pub sessions: Arc<DashMap<Uuid, Session>>,
    /// SHA-256 hex digest of the admin password.
    pub admin_password_hash: String,
    pub app_config: AppConfig,
}

impl AppState {
    /// Initialize the application state: load config, wire services.
    ///
    /// A missing document store credential is not fatal: the services run
    /// with no store connection and every persistence call degrades to the
    /// built-in defaults or a no-op.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let app_config = load_app_config(&data_dir).await;
        let secrets = Secrets::from_env();

        let store = match &secrets.database_url {
            Some(url) => Some(FirebaseStore::new(url.clone(), secrets.database_auth.clone())),
            None => {
                warn!("STRATBOARD_DB_URL not set; config and conversation logs will not persist");
                None
            }
        };

        let api_key = secrets.completion_api_key.unwrap_or_else(|| {
            warn!("OPENROUTER_API_KEY not set; completion requests will be rejected upstream");
            SecretString::from("")
        });
        let provider = OpenRouterProvider::new(
            api_key,
            app_config.http_referer.clone(),
            app_config.app_title.clone(),
        )
        .with_base_url(app_config.completion_base_url.clone());

        let config_service = ConfigService::new(store.clone());
        let log_service = ConversationLogService::new(store);
        let chat_service = ChatService::new(
            provider,
            app_config.model.clone(),
            app_config.temperature,
        );

        Ok(Self {
            config_service: Arc::new(config_service),
            log_service: Arc::new(log_service),
            chat_service: Arc::new(chat_service),
            sessions: Arc::new(DashMap::new()),
            admin_password_hash: hash_password(secrets.admin_password.expose_secret()),
            app_config,
        })
    }
}
