mod error;
mod memory;
mod yaml;

pub use error::StorageError;
pub use memory::MemorySettingsStore;
pub use yaml::YamlSettingsStore;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Key under which the chat allow-list is stored in the settings document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AllowListKey {
    #[default]
    AllowedChats,
    /// Key used by older deployments, kept on write-back so they keep reading it.
    WhatsappAllowedGroups,
}

/// Durable module settings: session cookies, extra request headers and the chat allow-list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SettingsDocument", into = "SettingsDocument")]
pub struct Settings {
    pub cookies: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub allowed_chats: Vec<String>,
    /// Where `allowed_chats` was read from; `None` when the document had no allow-list.
    pub allow_list_key: Option<AllowListKey>,
    /// Keys this crate does not understand, written back untouched.
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// On-disk layout of [`Settings`].
#[derive(Serialize, Deserialize)]
struct SettingsDocument {
    #[serde(default)]
    cookies: BTreeMap<String, String>,
    #[serde(default)]
    headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    allowed_chats: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    whatsapp_allowed_groups: Option<Vec<String>>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_yaml::Value>,
}

impl From<SettingsDocument> for Settings {
    fn from(document: SettingsDocument) -> Self {
        let (allowed_chats, allow_list_key) = match (document.allowed_chats, document.whatsapp_allowed_groups) {
            (Some(chats), _) => (chats, Some(AllowListKey::AllowedChats)),
            (None, Some(chats)) => (chats, Some(AllowListKey::WhatsappAllowedGroups)),
            (None, None) => (Vec::new(), None),
        };

        Self {
            cookies: document.cookies,
            headers: document.headers,
            allowed_chats,
            allow_list_key,
            extra: document.extra,
        }
    }
}

impl From<Settings> for SettingsDocument {
    fn from(settings: Settings) -> Self {
        let mut document = SettingsDocument {
            cookies: settings.cookies,
            headers: settings.headers,
            allowed_chats: None,
            whatsapp_allowed_groups: None,
            extra: settings.extra,
        };

        match settings.allow_list_key {
            Some(AllowListKey::WhatsappAllowedGroups) => document.whatsapp_allowed_groups = Some(settings.allowed_chats),
            Some(AllowListKey::AllowedChats) => document.allowed_chats = Some(settings.allowed_chats),
            None if !settings.allowed_chats.is_empty() => document.allowed_chats = Some(settings.allowed_chats),
            None => {}
        }

        document
    }
}

#[async_trait]
pub trait SettingsStore: Send + Sync + 'static {
    async fn load(&self) -> Result<Settings, StorageError>;
    async fn save(&self, settings: &Settings) -> Result<(), StorageError>;
}
