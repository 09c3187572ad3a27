use async_trait::async_trait;
use bytes::Bytes;
use mime::Mime;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Upload failed: {0}")]
    Upload(String),
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundKind {
    Image,
    Video,
}

/// The message being answered; replies quote it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteContext {
    pub message_id: String,
    pub sender: String,
    pub quoted_text: String,
}

#[derive(Debug, Clone)]
pub struct OutboundMedia {
    pub kind: OutboundKind,
    pub bytes: Bytes,
    pub mimetype: Mime,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub duration_secs: Option<u32>,
    pub caption: Option<String>,
    pub quote: QuoteContext,
}

impl OutboundMedia {
    pub fn new(kind: OutboundKind, bytes: Bytes, quote: QuoteContext) -> Self {
        let mimetype = crate::utils::detect_content_type(&bytes);
        Self {
            kind,
            bytes,
            mimetype,
            width: None,
            height: None,
            duration_secs: None,
            caption: None,
            quote,
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_duration(mut self, secs: u32) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    pub fn with_caption(mut self, caption: String) -> Self {
        self.caption = Some(caption);
        self
    }
}

/// Messaging channel the resolved media is published to. Implemented by the host.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    async fn send_media(&self, chat: &str, media: OutboundMedia) -> Result<(), TransportError>;
    async fn send_text(&self, chat: &str, text: &str, quote: &QuoteContext) -> Result<(), TransportError>;
}
