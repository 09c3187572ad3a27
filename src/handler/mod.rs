mod error;
mod message;

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};

pub use error::DispatchError;

use crate::{
    platform::instagram::{classify_token, profile_url, LinkKind},
    state::AppState,
    transport::{MessageTransport, QuoteContext},
};

/// A chat message handed over by the host.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    pub message_id: String,
    pub chat_id: String,
    pub sender: String,
    pub text: String,
    pub is_from_self: bool,
    pub is_group: bool,
    pub is_broadcast: bool,
    pub timestamp: DateTime<Utc>,
}

impl InboundEvent {
    /// Broadcast list messages are answered in the sender's own chat.
    pub fn reply_chat(&self) -> &str {
        if self.is_broadcast && !self.is_group {
            &self.sender
        } else {
            &self.chat_id
        }
    }

    pub fn quote(&self) -> QuoteContext {
        QuoteContext {
            message_id: self.message_id.clone(),
            sender: self.sender.clone(),
            quoted_text: self.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStage {
    Classify,
    FetchMetadata,
    Decode,
    SelectVariant,
    FetchMedia,
    Deliver,
}

impl fmt::Display for DispatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DispatchStage::Classify => "classify",
            DispatchStage::FetchMetadata => "fetch-metadata",
            DispatchStage::Decode => "decode",
            DispatchStage::SelectVariant => "select-variant",
            DispatchStage::FetchMedia => "fetch-media",
            DispatchStage::Deliver => "deliver",
        };
        f.write_str(name)
    }
}

/// What happened to one recognized token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// At least one media message went out.
    Delivered { media_sent: usize },
    /// The failure was reported back to the requester with this text.
    Reported(String),
    /// Aborted without telling anyone.
    Dropped { stage: DispatchStage },
    /// Recognized but not handled (stories).
    Ignored,
}

/// Destination and quote shared by every message sent for one inbound event.
pub(crate) struct Reply<'a> {
    pub chat: &'a str,
    pub quote: QuoteContext,
}

#[derive(Clone)]
pub struct MessageHandler {
    state: Arc<AppState>,
    transport: Arc<dyn MessageTransport>,
}

impl MessageHandler {
    pub fn new(state: Arc<AppState>, transport: Arc<dyn MessageTransport>) -> Self {
        Self { state, transport }
    }

    /// Runs every Instagram token of the message through its flow, one after the other.
    /// Returns one outcome per recognized token; filtered events yield none.
    pub async fn handle_event(&self, event: &InboundEvent) -> Vec<DispatchOutcome> {
        if event.timestamp < self.state.started_at {
            debug!("Ignoring message {} sent before startup", event.message_id);
            return Vec::new();
        }

        let chat = event.reply_chat();
        if !event.is_from_self && !self.state.is_chat_allowed(chat) {
            debug!("Ignoring message {} from chat {} not in allow-list", event.message_id, chat);
            return Vec::new();
        }

        if event.text.trim().is_empty() {
            return Vec::new();
        }

        let reply = Reply {
            chat,
            quote: event.quote(),
        };

        let mut outcomes = Vec::new();
        for token in event.text.split_whitespace() {
            let outcome = match classify_token(token) {
                LinkKind::Content => {
                    info!("[{}] content link {}", DispatchStage::Classify, token);
                    message::handle_content_link(self, &reply, token).await
                }
                LinkKind::Profile => {
                    info!("[{}] profile link {}", DispatchStage::Classify, token);
                    message::handle_profile_link(self, &reply, token).await
                }
                LinkKind::Handle(username) => {
                    info!("[{}] profile handle @{}", DispatchStage::Classify, username);
                    message::handle_profile_link(self, &reply, &profile_url(&username)).await
                }
                LinkKind::Story => {
                    info!("[{}] stories are not supported, skipping {}", DispatchStage::Classify, token);
                    DispatchOutcome::Ignored
                }
                LinkKind::Unrelated => continue,
            };

            debug!("Token {} finished with {:?}", token, outcome);
            outcomes.push(outcome);
        }

        outcomes
    }
}
