use crate::{
    config::ConfigError,
    handler::DispatchError,
    platform::{instagram::InstagramError, PlatformError},
    service::http::FetchError,
    storage::StorageError,
    transport::TransportError,
};

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Instagram error: {0}")]
    Instagram(#[from] InstagramError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for BridgeError {
    fn from(error: anyhow::Error) -> Self {
        BridgeError::Other(error)
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;
