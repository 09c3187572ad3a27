use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;

use super::{Settings, SettingsStore, StorageError};

/// Settings persisted as a YAML document on disk.
#[derive(Clone, Debug)]
pub struct YamlSettingsStore {
    path: PathBuf,
}

impl YamlSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "settings.yaml".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SettingsStore for YamlSettingsStore {
    async fn load(&self) -> Result<Settings, StorageError> {
        let body = match tokio::fs::read_to_string(&self.path).await {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Settings file {} not found, starting empty", self.path.display());
                return Ok(Settings::default());
            }
            Err(e) => return Err(e.into()),
        };

        if body.trim().is_empty() {
            return Ok(Settings::default());
        }

        let settings = serde_yaml::from_str::<Settings>(&body)?;
        debug!(
            "Loaded settings from {}: {} cookies, {} headers, {} allowed chats",
            self.path.display(),
            settings.cookies.len(),
            settings.headers.len(),
            settings.allowed_chats.len()
        );

        Ok(settings)
    }

    async fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        let body = serde_yaml::to_string(settings)?;

        // write next to the target, then swap it in
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, body).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        Ok(())
    }
}
