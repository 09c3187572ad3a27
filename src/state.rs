use std::{collections::HashSet, sync::Arc};

use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::{
    config::AppConfig,
    context::SessionContext,
    error::BridgeResult,
    platform::PlatformInstagram,
    service::http::{Fetcher, HttpClient, HttpService},
    storage::{SettingsStore, YamlSettingsStore},
    utils::http::create_instagram_client,
};

/// Everything a dispatch needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub session: Arc<SessionContext>,
    pub instagram: PlatformInstagram,
    /// Chats whose messages are honored; read once at startup.
    pub allowed_chats: Arc<HashSet<String>>,
    /// Messages sent before this instant are replays and ignored.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub async fn new(
        config: AppConfig,
        store: Arc<dyn SettingsStore>,
        client: Arc<dyn HttpClient>,
    ) -> BridgeResult<Self> {
        let session = Arc::new(SessionContext::load(store).await?);
        let allowed_chats = session.settings().await.allowed_chats.into_iter().collect::<HashSet<_>>();
        info!("{} chats allowed", allowed_chats.len());

        let fetcher = Fetcher::new(
            client,
            Arc::clone(&session),
            config.http.metadata_timeout(),
            config.http.media_timeout(),
        );

        Ok(Self {
            config,
            session,
            instagram: PlatformInstagram::new(fetcher),
            allowed_chats: Arc::new(allowed_chats),
            started_at: Utc::now(),
        })
    }

    /// Production wiring: YAML settings at the configured path and the reqwest client.
    pub async fn from_config(config: AppConfig) -> BridgeResult<Self> {
        let client = create_instagram_client(&config.http).context("Failed to build HTTP client")?;
        let store = Arc::new(YamlSettingsStore::new(&config.settings_path));

        Self::new(config, store, Arc::new(HttpService::new(client))).await
    }

    pub fn is_chat_allowed(&self, chat: &str) -> bool {
        self.allowed_chats.contains(chat)
    }
}
