//! Survey domain - the conversation state machine and its satellites.
//!
//! `engine` sequences the wizard, `record` accumulates answers and undo
//! history, `state` names the phases, `step` defines the queue contents,
//! `calendar` renders the date picker and `priority` derives urgency
//! tiers from deadlines.

pub mod calendar;
pub mod engine;
mod priority;
mod record;
mod reply;
mod state;
mod step;

pub use calendar::{CalendarButton, CalendarCursor, CalendarGrid, CallbackPayload};
pub use engine::{EngineOutcome, FlowError, SurveyEvent};
pub use priority::Priority;
pub use record::ConversationRecord;
pub use reply::Reply;
pub use state::FlowState;
pub use step::{full_survey_steps, minimal_ticket_steps, FlowTemplate, Question, Step};
