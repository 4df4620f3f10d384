//! Flow state machine.
//!
//! Tracks which kind of input the wizard is waiting for. The record keeps
//! the data; this enum keeps the phase, and the two are snapshotted
//! together so undo restores both.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// What the flow controller is currently waiting for.
///
/// `AwaitingAudience` splits from `AwaitingMoreAudience` so the first pick
/// (which creates the audience answer) is distinguishable from follow-up
/// picks and the "Done" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    /// No audience picked yet.
    AwaitingAudience,

    /// At least one audience picked; more picks or "Done" accepted.
    AwaitingMoreAudience,

    /// Audience finalized; a single region pick expected.
    AwaitingRegion,

    /// A free-text answer to the current step expected.
    AwaitingFreeText,

    /// Multi-select over the communication-type catalog in progress.
    AwaitingCommunicationTypes,

    /// Calendar shown; a date cell or month navigation expected.
    AwaitingDeadline,

    /// Queue exhausted and all required answers present; submission runs
    /// and the record is discarded, win or lose.
    Terminal,
}

impl FlowState {
    /// Returns true if arbitrary text is consumed as an answer here.
    pub fn accepts_free_text(&self) -> bool {
        matches!(self, Self::AwaitingFreeText)
    }

    /// Returns true if this state is driven by calendar callbacks.
    pub fn expects_calendar_input(&self) -> bool {
        matches!(self, Self::AwaitingDeadline)
    }

    /// Returns true if a multi-select phase is in progress.
    pub fn is_multi_select(&self) -> bool {
        matches!(self, Self::AwaitingAudience | Self::AwaitingMoreAudience | Self::AwaitingCommunicationTypes)
    }
}

impl StateMachine for FlowState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use FlowState::*;
        matches!(
            (self, target),
            // First audience pick creates the selection
            (AwaitingAudience, AwaitingMoreAudience) |
            // "Done" finalizes the audience
            (AwaitingMoreAudience, AwaitingRegion) |
            // Region pick builds the queue and asks the first question
            (AwaitingRegion, AwaitingFreeText) |
            // Next queued free-text question
            (AwaitingFreeText, AwaitingFreeText) |
            // Queue reaches the communication-type step
            (AwaitingFreeText, AwaitingCommunicationTypes) |
            // Minimal flow: description answered, nothing left to ask
            (AwaitingFreeText, Terminal) |
            // "Done" commits the selection, calendar follows
            (AwaitingCommunicationTypes, AwaitingDeadline) |
            // Valid date recorded
            (AwaitingDeadline, Terminal)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use FlowState::*;
        match self {
            AwaitingAudience => vec![AwaitingMoreAudience],
            AwaitingMoreAudience => vec![AwaitingRegion],
            AwaitingRegion => vec![AwaitingFreeText],
            AwaitingFreeText => vec![AwaitingFreeText, AwaitingCommunicationTypes, Terminal],
            AwaitingCommunicationTypes => vec![AwaitingDeadline],
            AwaitingDeadline => vec![Terminal],
            Terminal => vec![],
        }
    }
}
