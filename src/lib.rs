//! Resolves Instagram links shared in chat messages and republishes the media.
//!
//! The host wires an [`AppState`] and a [`MessageTransport`] into a
//! [`MessageHandler`] and feeds it every inbound message.

extern crate pretty_env_logger;
#[macro_use]
extern crate log;

pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod platform;
pub mod service;
pub mod state;
pub mod storage;
pub mod transport;
pub mod utils;


pub use config::{build_config, AppConfig};
pub use error::{BridgeError, BridgeResult};
pub use handler::{DispatchOutcome, InboundEvent, MessageHandler};
pub use state::AppState;
pub use transport::{MessageTransport, OutboundMedia, QuoteContext};

/// Installs the timed env logger, defaulting to `RUST_LOG=info`.
pub fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    let _ = pretty_env_logger::try_init_timed();
}
