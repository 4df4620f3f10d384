//! The flow controller - sequences the wizard over the conversation record.
//!
//! One engine drives both flow templates. Every inbound event is first
//! checked against the navigation sentinels, then dispatched on the
//! current `FlowState`. Committing transitions snapshot the record before
//! mutating it; validation failures re-render the same prompt and touch
//! nothing.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::domain::catalog::{
    navigation_labels, Catalog, ALL_REGIONS, AUDIENCE, AUDIENCE_USERS, CANCEL_LABEL, DONE_LABEL,
    DRIVER_COMMUNICATION_TYPES, GO_BACK_LABEL, REGIONS, USER_COMMUNICATION_TYPES,
};
use crate::domain::foundation::ValidationError;

use super::calendar::{render_month, CalendarCursor, CallbackPayload};
use super::priority::Priority;
use super::record::ConversationRecord;
use super::reply::Reply;
use super::state::FlowState;
use super::step::{full_survey_steps, FlowTemplate, Question, Step};

const AUDIENCE_PROMPT: &str =
    "*For what audience is the communication planned?*\nSelect one or more options:";
const REGION_PROMPT: &str = "*Select regions:*\nSelect one option:";
const COMMUNICATION_TYPES_PROMPT: &str =
    "*Select communication types:*\nYou can select multiple options:";
const DEADLINE_PROMPT: &str = "*Select deadline:*";

/// A user-originated event, as the transport delivers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurveyEvent {
    /// Free-form message text; may match catalog labels or sentinels.
    Text(String),
    /// A parsed button-callback payload.
    Callback(CallbackPayload),
}

/// What the engine decided for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineOutcome {
    /// Put this in front of the user; the conversation continues.
    Render(Reply),
    /// Nothing to do (inert button, event for a finished record).
    Ignored,
    /// The user cancelled; the caller discards the record.
    Cancelled,
    /// The record reached `Terminal`; the caller assembles and submits.
    Completed,
}

/// Engine-internal failures. These indicate a corrupted record or a
/// broken transition table, never bad user input.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Transition(#[from] ValidationError),

    #[error("conversation record is inconsistent: {0}")]
    Inconsistent(&'static str),
}

/// Starts a conversation: builds the record and the opening prompt.
pub fn start(flow: FlowTemplate, today: NaiveDate) -> (ConversationRecord, Reply) {
    let record = ConversationRecord::new(flow, today);
    let reply = match flow {
        FlowTemplate::FullSurvey => audience_prompt(),
        FlowTemplate::MinimalTicket => question_prompt(flow, Question::TaskName),
    };
    (record, reply)
}

/// Feeds one event through the state machine.
pub fn handle(
    record: &mut ConversationRecord,
    event: &SurveyEvent,
    today: NaiveDate,
) -> Result<EngineOutcome, FlowError> {
    // Navigation sentinels are intercepted ahead of state dispatch.
    if let SurveyEvent::Text(text) = event {
        if text == CANCEL_LABEL {
            debug!(state = ?record.state(), "conversation cancelled");
            return Ok(EngineOutcome::Cancelled);
        }
        if text == GO_BACK_LABEL {
            // Empty history degrades to re-prompting the current question.
            let restored = record.go_back();
            debug!(restored, state = ?record.state(), "go back");
            return Ok(EngineOutcome::Render(reprompt(record, today)));
        }
    }

    match record.state() {
        FlowState::AwaitingAudience => handle_first_audience(record, event),
        FlowState::AwaitingMoreAudience => handle_more_audience(record, event),
        FlowState::AwaitingRegion => handle_region(record, event, today),
        FlowState::AwaitingFreeText => handle_free_text(record, event, today),
        FlowState::AwaitingCommunicationTypes => handle_communication_types(record, event, today),
        FlowState::AwaitingDeadline => handle_deadline(record, event, today),
        FlowState::Terminal => Ok(EngineOutcome::Ignored),
    }
}

/// Re-renders the prompt for the record's current state, e.g. after an
/// undo or an empty-history go-back.
pub fn reprompt(record: &ConversationRecord, today: NaiveDate) -> Reply {
    match record.state() {
        FlowState::AwaitingAudience | FlowState::AwaitingMoreAudience => audience_prompt(),
        FlowState::AwaitingRegion => region_prompt(),
        FlowState::AwaitingFreeText => match record.current_step() {
            Some(Step::FreeText(question)) => question_prompt(record.flow(), question),
            _ => Reply::prompt("Please continue with the current question.", navigation_labels()),
        },
        FlowState::AwaitingCommunicationTypes => communication_types_prompt(record),
        FlowState::AwaitingDeadline => calendar_reply(record, today, DEADLINE_PROMPT),
        FlowState::Terminal => Reply::notice("This conversation is already finished.", vec![]),
    }
}

// ─── Per-state handlers ─────────────────────────────────────────────────

fn handle_first_audience(
    record: &mut ConversationRecord,
    event: &SurveyEvent,
) -> Result<EngineOutcome, FlowError> {
    let SurveyEvent::Text(text) = event else {
        return Ok(render_invalid(
            "Please select an audience option from the list.",
            audience_options(),
        ));
    };

    if text == DONE_LABEL {
        return Ok(render_invalid(
            "Please select at least one audience option.",
            audience_options(),
        ));
    }

    match AUDIENCE.resolve(text) {
        Some(entry) => {
            record.save_snapshot();
            record.add_audience(entry.value());
            record.transition(FlowState::AwaitingMoreAudience)?;
            Ok(EngineOutcome::Render(selection_ack(entry.label())))
        }
        None => Ok(render_invalid(
            "Please select an audience option from the list.",
            audience_options(),
        )),
    }
}

fn handle_more_audience(
    record: &mut ConversationRecord,
    event: &SurveyEvent,
) -> Result<EngineOutcome, FlowError> {
    let SurveyEvent::Text(text) = event else {
        return Ok(render_invalid(
            "Please select an audience option from the list.",
            audience_options(),
        ));
    };

    if text == DONE_LABEL {
        if record.audience().is_empty() {
            return Ok(render_invalid(
                "Please select at least one audience option.",
                audience_options(),
            ));
        }
        record.save_snapshot();
        record.transition(FlowState::AwaitingRegion)?;
        return Ok(EngineOutcome::Render(region_prompt()));
    }

    match AUDIENCE.resolve(text) {
        Some(entry) => {
            // Duplicate picks acknowledge without committing anything.
            if !record.audience_contains(entry.value()) {
                record.save_snapshot();
                record.add_audience(entry.value());
            }
            Ok(EngineOutcome::Render(selection_ack(entry.label())))
        }
        None => Ok(render_invalid(
            "Please select an audience option from the list.",
            audience_options(),
        )),
    }
}

fn handle_region(
    record: &mut ConversationRecord,
    event: &SurveyEvent,
    today: NaiveDate,
) -> Result<EngineOutcome, FlowError> {
    let entry = match event {
        SurveyEvent::Text(text) => REGIONS.resolve(text),
        SurveyEvent::Callback(_) => None,
    };
    let Some(entry) = entry else {
        return Ok(render_invalid(
            "Please select a region from the list.",
            region_options(),
        ));
    };

    record.save_snapshot();
    let all_regions = entry.value() == ALL_REGIONS;
    record.set_region(entry.value(), full_survey_steps(all_regions));
    debug!(region = entry.value(), all_regions, "region selected, queue built");

    match record.advance_step() {
        Some(step) => enter_step(record, step, today),
        None => Err(FlowError::Inconsistent("region selection produced an empty queue")),
    }
}

fn handle_free_text(
    record: &mut ConversationRecord,
    event: &SurveyEvent,
    today: NaiveDate,
) -> Result<EngineOutcome, FlowError> {
    let Some(Step::FreeText(question)) = record.current_step() else {
        return Err(FlowError::Inconsistent("free-text state without a free-text step"));
    };

    let SurveyEvent::Text(text) = event else {
        return Ok(EngineOutcome::Render(question_prompt(record.flow(), question)));
    };

    record.save_snapshot();
    record.record_answer(question, text.clone());

    match record.advance_step() {
        Some(step) => enter_step(record, step, today),
        None => {
            record.transition(FlowState::Terminal)?;
            Ok(EngineOutcome::Completed)
        }
    }
}

fn handle_communication_types(
    record: &mut ConversationRecord,
    event: &SurveyEvent,
    today: NaiveDate,
) -> Result<EngineOutcome, FlowError> {
    let catalog = communication_catalog(record);

    let SurveyEvent::Text(text) = event else {
        return Ok(render_invalid(
            "Please select a communication type from the list.",
            communication_type_options(catalog),
        ));
    };

    if text == DONE_LABEL {
        if record.communication_types().is_empty() {
            return Ok(render_invalid(
                "Please select at least one communication type.",
                communication_type_options(catalog),
            ));
        }
        record.save_snapshot();
        record.commit_communication_types();
        return match record.advance_step() {
            Some(step) => enter_step(record, step, today),
            None => Err(FlowError::Inconsistent("no step queued after communication types")),
        };
    }

    match catalog.resolve(text) {
        Some(entry) => {
            // The display label is stored as-is here, unlike the audience
            // step which stores the bare value.
            if !record.communication_types_contains(entry.label()) {
                record.save_snapshot();
                record.add_communication_type(entry.label());
            }
            Ok(EngineOutcome::Render(selection_ack(entry.label())))
        }
        None => Ok(render_invalid(
            "Please select a communication type from the list.",
            communication_type_options(catalog),
        )),
    }
}

fn handle_deadline(
    record: &mut ConversationRecord,
    event: &SurveyEvent,
    today: NaiveDate,
) -> Result<EngineOutcome, FlowError> {
    let payload = match event {
        SurveyEvent::Callback(payload) => *payload,
        SurveyEvent::Text(_) => {
            return Ok(EngineOutcome::Render(calendar_reply(
                record,
                today,
                "Please pick a date from the calendar.",
            )));
        }
    };

    match payload {
        CallbackPayload::Ignore => Ok(EngineOutcome::Ignored),
        CallbackPayload::MonthNavigate { year, month } => {
            // Cursor moves are not answers: no snapshot.
            record.set_calendar_cursor(CalendarCursor { year, month });
            Ok(EngineOutcome::Render(calendar_reply(record, today, DEADLINE_PROMPT)))
        }
        CallbackPayload::DateSelected(date) => {
            if date < today {
                return Ok(EngineOutcome::Render(calendar_reply(
                    record,
                    today,
                    "❌ Cannot select a date in the past. Please choose a future date.",
                )));
            }
            record.save_snapshot();
            let priority = Priority::from_deadline(date, today);
            record.set_deadline(date, priority);
            record.transition(FlowState::Terminal)?;
            debug!(%date, %priority, "deadline recorded");
            Ok(EngineOutcome::Completed)
        }
    }
}

// ─── Step entry ─────────────────────────────────────────────────────────

/// Transitions into a freshly popped step and renders its prompt.
fn enter_step(
    record: &mut ConversationRecord,
    step: Step,
    today: NaiveDate,
) -> Result<EngineOutcome, FlowError> {
    let reply = match step {
        Step::FreeText(question) => {
            record.transition(FlowState::AwaitingFreeText)?;
            question_prompt(record.flow(), question)
        }
        Step::CommunicationTypes => {
            record.transition(FlowState::AwaitingCommunicationTypes)?;
            communication_types_prompt(record)
        }
        Step::Deadline => {
            record.transition(FlowState::AwaitingDeadline)?;
            calendar_reply(record, today, DEADLINE_PROMPT)
        }
    };
    Ok(EngineOutcome::Render(reply))
}

// ─── Prompt rendering ───────────────────────────────────────────────────

fn audience_options() -> Vec<String> {
    let mut options = AUDIENCE.labels();
    options.push(DONE_LABEL.to_string());
    options.extend(navigation_labels());
    options
}

fn region_options() -> Vec<String> {
    let mut options = REGIONS.labels();
    options.extend(navigation_labels());
    options
}

fn communication_type_options(catalog: &Catalog) -> Vec<String> {
    let mut options = catalog.labels();
    options.push(DONE_LABEL.to_string());
    options.extend(navigation_labels());
    options
}

/// The Users catalog applies whenever the audience includes Users;
/// otherwise the narrower driver catalog is offered.
fn communication_catalog(record: &ConversationRecord) -> &'static Catalog {
    if record.audience_contains(AUDIENCE_USERS) {
        &USER_COMMUNICATION_TYPES
    } else {
        &DRIVER_COMMUNICATION_TYPES
    }
}

fn audience_prompt() -> Reply {
    Reply::prompt(AUDIENCE_PROMPT, audience_options())
}

fn region_prompt() -> Reply {
    Reply::prompt(REGION_PROMPT, region_options())
}

fn question_prompt(flow: FlowTemplate, question: Question) -> Reply {
    let text = match flow {
        FlowTemplate::FullSurvey => format!("*{}*", question.prompt()),
        FlowTemplate::MinimalTicket => question.prompt().to_string(),
    };
    Reply::prompt(text, navigation_labels())
}

fn communication_types_prompt(record: &ConversationRecord) -> Reply {
    Reply::prompt(
        COMMUNICATION_TYPES_PROMPT,
        communication_type_options(communication_catalog(record)),
    )
}

fn calendar_reply(record: &ConversationRecord, today: NaiveDate, text: &str) -> Reply {
    Reply::Calendar {
        text: text.to_string(),
        grid: render_month(record.calendar_cursor(), today),
    }
}

fn selection_ack(label: &str) -> Reply {
    Reply::notice(
        format!("Selected: {label}\nYou can select more or click '{DONE_LABEL}'"),
        vec![],
    )
}

fn render_invalid(message: &str, options: Vec<String>) -> EngineOutcome {
    EngineOutcome::Render(Reply::prompt(message, options))
}
