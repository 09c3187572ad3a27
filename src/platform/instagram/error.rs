#[derive(Debug, thiserror::Error)]
pub enum InstagramError {
    #[error("failed to decode {shape}: {source}")]
    Decode {
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Profile not found")]
    ProfileNotFound,
    #[error("Unknown media type: {0}")]
    UnknownMediaKind(i64),
}

impl InstagramError {
    pub(super) fn decode(shape: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| InstagramError::Decode { shape, source }
    }
}
