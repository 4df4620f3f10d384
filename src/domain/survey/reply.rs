//! Rendering instructions handed to the chat transport.

use super::calendar::CalendarGrid;

/// What the transport should put in front of the user next.
///
/// This is the whole outbound contract: a prompt with tappable options, a
/// prompt with the calendar grid, or a plain message that expects nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A question plus a flat list of selectable options rendered as
    /// tappable replies. An empty option list means free-text input.
    Prompt { text: String, options: Vec<String> },

    /// A prompt with the date-picker grid attached.
    Calendar { text: String, grid: CalendarGrid },

    /// A confirmation or error message; options (possibly empty) offer
    /// follow-up actions but no answer is awaited.
    Notice { text: String, options: Vec<String> },
}

impl Reply {
    /// Shorthand for a prompt with options.
    pub fn prompt(text: impl Into<String>, options: Vec<String>) -> Self {
        Self::Prompt { text: text.into(), options }
    }

    /// Shorthand for a notice with follow-up actions.
    pub fn notice(text: impl Into<String>, options: Vec<String>) -> Self {
        Self::Notice { text: text.into(), options }
    }

    /// The message text, whichever variant carries it.
    pub fn text(&self) -> &str {
        match self {
            Self::Prompt { text, .. } | Self::Calendar { text, .. } | Self::Notice { text, .. } => {
                text
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_accessor_reaches_every_variant() {
        let prompt = Reply::prompt("pick one", vec!["a".into()]);
        let notice = Reply::notice("done", vec![]);
        assert_eq!(prompt.text(), "pick one");
        assert_eq!(notice.text(), "done");
    }
}
