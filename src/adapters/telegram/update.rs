//! Inbound update mapping.
//!
//! The webhook receives transport-shaped JSON; this module narrows it to
//! the two event kinds the flow engine understands. Updates that carry
//! neither text nor a parseable callback are dropped.

use serde::Deserialize;

use crate::domain::foundation::ChatId;
use crate::domain::survey::{CallbackPayload, SurveyEvent};

/// One webhook delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub message: Option<IncomingMessage>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

/// A user-sent chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub chat: ChatRef,
    #[serde(default)]
    pub text: Option<String>,
}

/// The chat a message belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRef {
    pub id: i64,
}

/// A button tap on an inline keyboard.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub message: Option<IncomingMessage>,
    #[serde(default)]
    pub data: Option<String>,
}

impl Update {
    /// Maps the update to a conversation event, if it carries one.
    pub fn into_event(self) -> Option<(ChatId, SurveyEvent)> {
        if let Some(message) = self.message {
            let text = message.text?;
            return Some((ChatId::new(message.chat.id), SurveyEvent::Text(text)));
        }

        if let Some(callback) = self.callback_query {
            let chat = ChatId::new(callback.message?.chat.id);
            let payload = CallbackPayload::parse(&callback.data?)?;
            return Some((chat, SurveyEvent::Callback(payload)));
        }

        None
    }
}
