//! Chat transport port.
//!
//! The core only needs one capability from the chat side: put a rendering
//! instruction in front of a conversation. Message formatting, keyboard
//! markup and API specifics live in the adapter.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::ChatId;
use crate::domain::survey::Reply;

/// Failures surfaced by transport implementations.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The transport API rejected the send.
    #[error("transport API error: {0}")]
    Api(String),

    /// The request never produced a usable response (network, timeout).
    #[error("transport request failed: {0}")]
    Transport(String),
}

/// Port for delivering rendering instructions to a chat.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Renders one reply into the given conversation.
    async fn send_reply(&self, chat: ChatId, reply: &Reply) -> Result<(), TransportError>;
}
