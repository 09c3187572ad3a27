use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Settings, SettingsStore, StorageError};

/// Keeps settings in memory only. Counts saves so callers can observe persistence.
#[derive(Clone, Debug, Default)]
pub struct MemorySettingsStore {
    settings: Arc<Mutex<Settings>>,
    saves: Arc<Mutex<usize>>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(Mutex::new(settings)),
            saves: Arc::new(Mutex::new(0)),
        }
    }

    pub async fn snapshot(&self) -> Settings {
        self.settings.lock().await.clone()
    }

    pub async fn save_count(&self) -> usize {
        *self.saves.lock().await
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<Settings, StorageError> {
        Ok(self.settings.lock().await.clone())
    }

    async fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        *self.settings.lock().await = settings.clone();
        *self.saves.lock().await += 1;
        Ok(())
    }
}
