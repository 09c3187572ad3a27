mod caption;
pub mod decode;
mod error;
pub mod model;
mod util;
mod variant;

use bytes::Bytes;

pub use decode::{decode_media, probe_kind, DecodedMedia};
pub use error::*;
pub use model::{CarouselMedia, CarouselPost, ImagePost, MediaKind, MediaVariant, UserProfile, VideoPost};
pub use util::*;
pub use variant::select_variant;

use crate::service::http::{FetchError, Fetcher};

use super::PlatformError;

/// Instagram client used by the dispatcher.
#[derive(Clone)]
pub struct PlatformInstagram {
    fetcher: Fetcher,
}

impl PlatformInstagram {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    /// Raw media document for a post, reel or video link.
    pub async fn fetch_media_document(&self, link: &str) -> Result<Bytes, FetchError> {
        self.fetcher.authenticated_get(link).await
    }

    pub async fn fetch_profile(&self, link: &str) -> Result<UserProfile, PlatformError> {
        let body = self.fetcher.authenticated_get(link).await?;
        let profile = decode::decode_profile(&body)?;
        debug!("Resolved profile @{} ({})", profile.username, profile.id);
        Ok(profile)
    }

    pub async fn download(&self, url: &str) -> Result<Bytes, FetchError> {
        self.fetcher.fetch_binary(url).await
    }
}
