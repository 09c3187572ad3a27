use std::{collections::BTreeMap, sync::Arc};

use tokio::sync::Mutex;

use crate::storage::{Settings, SettingsStore, StorageError};

/// Cookie and header state shared by every request made on behalf of the module.
///
/// Cookies received from Instagram rotate the values already tracked in the
/// settings document; names the document does not know are never added. Every
/// change is written back through the store while the lock is held, so concurrent
/// dispatches never interleave a read-modify-persist cycle.
pub struct SessionContext {
    settings: Mutex<Settings>,
    store: Arc<dyn SettingsStore>,
}

/// Point-in-time copy of what a request needs to carry.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub cookies: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
}

impl SessionContext {
    pub fn new(settings: Settings, store: Arc<dyn SettingsStore>) -> Self {
        Self {
            settings: Mutex::new(settings),
            store,
        }
    }

    pub async fn load(store: Arc<dyn SettingsStore>) -> Result<Self, StorageError> {
        let settings = store.load().await?;
        info!(
            "Session loaded with {} cookies and {} headers",
            settings.cookies.len(),
            settings.headers.len()
        );
        Ok(Self::new(settings, store))
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let settings = self.settings.lock().await;
        SessionSnapshot {
            cookies: settings.cookies.clone(),
            headers: settings.headers.clone(),
        }
    }

    pub async fn settings(&self) -> Settings {
        self.settings.lock().await.clone()
    }

    /// Updates tracked cookies from a response and persists when anything changed.
    ///
    /// Returns the number of cookies whose value changed. A failed write is logged
    /// and the in-memory update is kept.
    pub async fn merge_cookies<'a, I>(&self, received: I) -> usize
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut settings = self.settings.lock().await;

        let mut changed = 0;
        for (name, value) in received {
            match settings.cookies.get_mut(name) {
                Some(current) if current.as_str() != value => {
                    debug!("Rotating cookie {}", name);
                    *current = value.to_string();
                    changed += 1;
                }
                Some(_) => {}
                None => debug!("Ignoring untracked cookie {}", name),
            }
        }

        if changed > 0 {
            if let Err(e) = self.store.save(&settings).await {
                warn!("Failed to persist {} rotated cookies: {}", changed, e);
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::storage::MemorySettingsStore;

    struct FailingStore;

    #[async_trait]
    impl SettingsStore for FailingStore {
        async fn load(&self) -> Result<Settings, StorageError> {
            Ok(Settings::default())
        }

        async fn save(&self, _settings: &Settings) -> Result<(), StorageError> {
            Err(StorageError::Other("disk full".to_string()))
        }
    }

    fn tracked(pairs: &[(&str, &str)]) -> Settings {
        let mut settings = Settings::default();
        for (name, value) in pairs {
            settings.cookies.insert(name.to_string(), value.to_string());
        }
        settings
    }

    #[tokio::test]
    async fn test_untracked_cookies_are_not_added() {
        let store = MemorySettingsStore::default();
        let session = SessionContext::new(tracked(&[("sessionid", "S")]), Arc::new(store.clone()));

        let changed = session.merge_cookies([("csrftoken", "T")]).await;

        assert_eq!(changed, 0);
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.cookies.len(), 1);
        assert_eq!(snapshot.cookies.get("sessionid").map(String::as_str), Some("S"));
        assert_eq!(store.save_count().await, 0);
    }

    #[tokio::test]
    async fn test_tracked_cookie_rotation_is_persisted() {
        let store = MemorySettingsStore::default();
        let session = SessionContext::new(
            tracked(&[("sessionid", "S"), ("csrftoken", "T")]),
            Arc::new(store.clone()),
        );

        let changed = session
            .merge_cookies([("csrftoken", "T2"), ("sessionid", "S"), ("mid", "M")])
            .await;

        assert_eq!(changed, 1);
        let persisted = store.snapshot().await;
        assert_eq!(persisted.cookies.get("csrftoken").map(String::as_str), Some("T2"));
        assert_eq!(persisted.cookies.get("sessionid").map(String::as_str), Some("S"));
        assert!(!persisted.cookies.contains_key("mid"));
        assert_eq!(store.save_count().await, 1);
    }

    #[tokio::test]
    async fn test_unchanged_values_skip_persistence() {
        let store = MemorySettingsStore::default();
        let session = SessionContext::new(tracked(&[("sessionid", "S")]), Arc::new(store.clone()));

        session.merge_cookies([("sessionid", "S")]).await;
        assert_eq!(store.save_count().await, 0);
    }

    #[tokio::test]
    async fn test_persistence_failure_keeps_update() {
        let session = SessionContext::new(tracked(&[("sessionid", "S")]), Arc::new(FailingStore));

        let changed = session.merge_cookies([("sessionid", "S2")]).await;

        assert_eq!(changed, 1);
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.cookies.get("sessionid").map(String::as_str), Some("S2"));
    }

    #[tokio::test]
    async fn test_concurrent_merges_are_serialized() {
        let store = MemorySettingsStore::default();
        let session = Arc::new(SessionContext::new(
            tracked(&[("sessionid", "0"), ("csrftoken", "0")]),
            Arc::new(store.clone()),
        ));

        let mut handles = Vec::new();
        for i in 1..=8 {
            let session = Arc::clone(&session);
            handles.push(tokio::spawn(async move {
                let value = i.to_string();
                session.merge_cookies([("sessionid", value.as_str())]).await
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let persisted = store.snapshot().await;
        assert_eq!(persisted, session.settings().await);
        assert_eq!(persisted.cookies.len(), 2);
    }

    #[tokio::test]
    async fn test_load_reads_store() {
        let store = MemorySettingsStore::new(tracked(&[("sessionid", "S")]));
        let session = SessionContext::load(Arc::new(store)).await.unwrap();
        assert_eq!(session.snapshot().await.cookies.len(), 1);
    }
}
