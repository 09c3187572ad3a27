use super::instagram::InstagramError;
use crate::service::http::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
    #[error("Instagram error: {0}")]
    Instagram(#[from] InstagramError),
}
