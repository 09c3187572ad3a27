use serde::de::{DeserializeOwned, Error as _};

use super::{
    error::InstagramError,
    model::{CarouselPost, ImagePost, ItemsEnvelope, MediaKind, MediaTypeProbe, ProfileEnvelope, UserProfile, VideoPost},
};

pub const IMAGE_SHAPE: &str = "InstagramImage";
pub const VIDEO_SHAPE: &str = "InstagramReel";
pub const CAROUSEL_SHAPE: &str = "InstagramCarousel";
pub const PROFILE_SHAPE: &str = "InstagramUserProfile";

/// A media document decoded according to its probed kind.
#[derive(Debug, Clone)]
pub enum DecodedMedia {
    Image(ImagePost),
    Video(VideoPost),
    Carousel(CarouselPost),
}

/// Reads `items[0].media_type` and nothing else.
pub fn probe_kind(body: &[u8]) -> MediaKind {
    let envelope = match serde_json::from_slice::<ItemsEnvelope<MediaTypeProbe>>(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            debug!("Media type probe failed: {}", e);
            return MediaKind::Invalid;
        }
    };

    match envelope.items.as_deref() {
        Some([first, ..]) => MediaKind::from_code(first.media_type),
        _ => MediaKind::Invalid,
    }
}

fn decode_first<T: DeserializeOwned>(body: &[u8], shape: &'static str) -> Result<T, InstagramError> {
    let envelope =
        serde_json::from_slice::<ItemsEnvelope<T>>(body).map_err(InstagramError::decode(shape))?;

    envelope
        .items
        .and_then(|items| items.into_iter().next())
        .ok_or_else(|| InstagramError::decode(shape)(serde_json::Error::custom("document has no items")))
}

pub fn decode_image(body: &[u8]) -> Result<ImagePost, InstagramError> {
    decode_first(body, IMAGE_SHAPE)
}

pub fn decode_video(body: &[u8]) -> Result<VideoPost, InstagramError> {
    decode_first(body, VIDEO_SHAPE)
}

pub fn decode_carousel(body: &[u8]) -> Result<CarouselPost, InstagramError> {
    decode_first(body, CAROUSEL_SHAPE)
}

pub fn decode_profile(body: &[u8]) -> Result<UserProfile, InstagramError> {
    let envelope = serde_json::from_slice::<ProfileEnvelope>(body).map_err(InstagramError::decode(PROFILE_SHAPE))?;

    if envelope.graphql.user.id.is_empty() {
        return Err(InstagramError::ProfileNotFound);
    }

    Ok(envelope.graphql.user)
}

/// Probes the document, then runs exactly one matching decoder.
pub fn decode_media(body: &[u8]) -> Result<DecodedMedia, InstagramError> {
    match probe_kind(body) {
        MediaKind::Image => decode_image(body).map(DecodedMedia::Image),
        MediaKind::Video => decode_video(body).map(DecodedMedia::Video),
        MediaKind::Carousel => decode_carousel(body).map(DecodedMedia::Carousel),
        other => Err(InstagramError::UnknownMediaKind(other.code())),
    }
}
