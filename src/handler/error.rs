use crate::{
    platform::instagram::InstagramError, service::http::FetchError, transport::TransportError,
};

use super::DispatchStage;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Metadata request failed: {0}")]
    Metadata(FetchError),
    #[error("Decode failed: {0}")]
    Decode(InstagramError),
    #[error("Unknown media type: {0}")]
    UnknownMediaKind(i64),
    #[error("No downloadable variant")]
    NoVariant,
    #[error("Media download failed: {0}")]
    MediaFetch(FetchError),
    #[error("Delivery failed: {0}")]
    Delivery(#[from] TransportError),
    #[error("Profile not found")]
    ProfileNotFound,
}

impl From<InstagramError> for DispatchError {
    fn from(error: InstagramError) -> Self {
        match error {
            InstagramError::UnknownMediaKind(code) => DispatchError::UnknownMediaKind(code),
            InstagramError::ProfileNotFound => DispatchError::ProfileNotFound,
            other => DispatchError::Decode(other),
        }
    }
}

impl DispatchError {
    pub fn stage(&self) -> DispatchStage {
        match self {
            DispatchError::Metadata(_) => DispatchStage::FetchMetadata,
            DispatchError::Decode(_) | DispatchError::UnknownMediaKind(_) | DispatchError::ProfileNotFound => {
                DispatchStage::Decode
            }
            DispatchError::NoVariant => DispatchStage::SelectVariant,
            DispatchError::MediaFetch(_) => DispatchStage::FetchMedia,
            DispatchError::Delivery(_) => DispatchStage::Deliver,
        }
    }

    /// Text sent back to the requester, for failures that happen before any media is fetched.
    /// Everything else is dropped silently.
    pub fn report_text(&self) -> Option<String> {
        match self {
            DispatchError::Metadata(e @ FetchError::Read(_)) => Some(format!("Could not read response body:\n\n{}", e)),
            DispatchError::Metadata(e) => Some(format!("Could not get JSON data:\n\n{}", e)),
            DispatchError::Decode(InstagramError::Decode { shape, source }) => {
                Some(format!("Could not parse body into {}:\n\n{}", shape, source))
            }
            DispatchError::UnknownMediaKind(code) => Some(format!("Unknown media type:\n\n[{}]", code)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_report_texts() {
        let err = DispatchError::Metadata(FetchError::Request("connection refused".to_string()));
        assert_eq!(
            err.report_text().as_deref(),
            Some("Could not get JSON data:\n\nError making request: connection refused")
        );

        let err = DispatchError::Metadata(FetchError::Read("unexpected eof".to_string()));
        assert_eq!(
            err.report_text().as_deref(),
            Some("Could not read response body:\n\nError reading response: unexpected eof")
        );

        let err = DispatchError::UnknownMediaKind(-1);
        assert_eq!(err.report_text().as_deref(), Some("Unknown media type:\n\n[-1]"));
    }

    #[test]
    fn test_decode_report_names_the_shape() {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = DispatchError::from(InstagramError::Decode {
            shape: "InstagramReel",
            source,
        });

        let text = err.report_text().unwrap();
        assert!(text.starts_with("Could not parse body into InstagramReel:\n\n"));
        assert_eq!(err.stage(), DispatchStage::Decode);
    }

    #[test]
    fn test_post_fetch_failures_are_silent() {
        assert_eq!(DispatchError::NoVariant.report_text(), None);
        assert_eq!(DispatchError::ProfileNotFound.report_text(), None);
        assert_eq!(
            DispatchError::MediaFetch(FetchError::Status(StatusCode::FORBIDDEN)).report_text(),
            None
        );
        assert_eq!(
            DispatchError::Delivery(TransportError::Upload("quota".to_string())).report_text(),
            None
        );
    }

    #[test]
    fn test_instagram_errors_map_to_dispatch_errors() {
        assert!(matches!(
            DispatchError::from(InstagramError::UnknownMediaKind(5)),
            DispatchError::UnknownMediaKind(5)
        ));
        assert!(matches!(
            DispatchError::from(InstagramError::ProfileNotFound),
            DispatchError::ProfileNotFound
        ));
    }
}
