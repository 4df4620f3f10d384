//! The conversation record - accumulated answers plus undo history.
//!
//! All mutation goes through the flow engine. The record itself enforces
//! the snapshot discipline: callers push a snapshot before a committing
//! mutation, and `go_back` restores exactly the state that existed before
//! the most recent one.

use std::collections::VecDeque;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateMachine, ValidationError};

use super::calendar::CalendarCursor;
use super::priority::Priority;
use super::state::FlowState;
use super::step::{minimal_ticket_steps, FlowTemplate, Question, Step};

/// Everything a snapshot must capture: the record minus its history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct RecordCore {
    flow: FlowTemplate,
    state: FlowState,
    audience: Vec<String>,
    region: Option<String>,
    answers: Vec<(Question, String)>,
    pending_steps: VecDeque<Step>,
    current_step: Option<Step>,
    communication_types: Vec<String>,
    deadline: Option<NaiveDate>,
    priority: Option<Priority>,
    calendar_cursor: CalendarCursor,
    steps_exhausted: bool,
}

/// One user's in-progress survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRecord {
    core: RecordCore,
    history: Vec<RecordCore>,
}

impl ConversationRecord {
    /// Creates a fresh record for the given flow template.
    ///
    /// The full survey starts at audience selection with an empty step
    /// queue (built once a region is chosen); the minimal ticket starts
    /// directly on its first free-text question.
    pub fn new(flow: FlowTemplate, today: NaiveDate) -> Self {
        let mut core = RecordCore {
            flow,
            state: match flow {
                FlowTemplate::FullSurvey => FlowState::AwaitingAudience,
                FlowTemplate::MinimalTicket => FlowState::AwaitingFreeText,
            },
            audience: Vec::new(),
            region: None,
            answers: Vec::new(),
            pending_steps: VecDeque::new(),
            current_step: None,
            communication_types: Vec::new(),
            deadline: None,
            priority: None,
            calendar_cursor: CalendarCursor::for_date(today),
            steps_exhausted: false,
        };
        if flow == FlowTemplate::MinimalTicket {
            core.pending_steps = minimal_ticket_steps();
            core.current_step = core.pending_steps.pop_front();
        }
        Self {
            core,
            history: Vec::new(),
        }
    }

    // ─── History ────────────────────────────────────────────────────────

    /// Pushes a snapshot of the current state onto the history stack.
    ///
    /// Must be called before a committing mutation, never after.
    pub fn save_snapshot(&mut self) {
        self.history.push(self.core.clone());
    }

    /// Restores the most recent snapshot. Returns false if there is none.
    pub fn go_back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.core = previous;
                true
            }
            None => false,
        }
    }

    /// Number of undo steps currently available.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // ─── Accessors ──────────────────────────────────────────────────────

    pub fn flow(&self) -> FlowTemplate {
        self.core.flow
    }

    pub fn state(&self) -> FlowState {
        self.core.state
    }

    pub fn audience(&self) -> &[String] {
        &self.core.audience
    }

    pub fn region(&self) -> Option<&str> {
        self.core.region.as_deref()
    }

    /// Answers in insertion order.
    pub fn answers(&self) -> &[(Question, String)] {
        &self.core.answers
    }

    /// The recorded answer to a question, if any.
    pub fn answer(&self, question: Question) -> Option<&str> {
        self.core
            .answers
            .iter()
            .find(|(q, _)| *q == question)
            .map(|(_, a)| a.as_str())
    }

    pub fn current_step(&self) -> Option<Step> {
        self.core.current_step
    }

    pub fn communication_types(&self) -> &[String] {
        &self.core.communication_types
    }

    pub fn deadline(&self) -> Option<NaiveDate> {
        self.core.deadline
    }

    pub fn priority(&self) -> Option<Priority> {
        self.core.priority
    }

    pub fn calendar_cursor(&self) -> CalendarCursor {
        self.core.calendar_cursor
    }

    /// Informational flag: the step queue drained at some point. Nothing
    /// gates on it.
    pub fn steps_exhausted(&self) -> bool {
        self.core.steps_exhausted
    }

    pub fn is_terminal(&self) -> bool {
        self.core.state == FlowState::Terminal
    }

    // ─── Mutators (engine only) ─────────────────────────────────────────

    /// Validated phase transition.
    pub fn transition(&mut self, target: FlowState) -> Result<(), ValidationError> {
        self.core.state = self.core.state.transition_to(target)?;
        Ok(())
    }

    pub fn audience_contains(&self, value: &str) -> bool {
        self.core.audience.iter().any(|v| v == value)
    }

    /// Appends an audience value. Callers de-duplicate (and snapshot)
    /// first via `audience_contains`.
    pub fn add_audience(&mut self, value: impl Into<String>) {
        self.core.audience.push(value.into());
    }

    /// Records the region and installs the step queue it implies.
    pub fn set_region(&mut self, value: impl Into<String>, steps: VecDeque<Step>) {
        self.core.region = Some(value.into());
        self.core.pending_steps = steps;
    }

    /// Pops the next pending step into `current_step`.
    ///
    /// An empty queue clears `current_step` and latches the informational
    /// exhaustion flag.
    pub fn advance_step(&mut self) -> Option<Step> {
        match self.core.pending_steps.pop_front() {
            Some(step) => {
                self.core.current_step = Some(step);
                Some(step)
            }
            None => {
                self.core.current_step = None;
                self.core.steps_exhausted = true;
                None
            }
        }
    }

    /// Records (or replaces) the answer to a question.
    pub fn record_answer(&mut self, question: Question, answer: impl Into<String>) {
        let answer = answer.into();
        match self.core.answers.iter_mut().find(|(q, _)| *q == question) {
            Some((_, existing)) => *existing = answer,
            None => self.core.answers.push((question, answer)),
        }
    }

    pub fn communication_types_contains(&self, label: &str) -> bool {
        self.core.communication_types.iter().any(|l| l == label)
    }

    /// Appends a communication-type label. Callers de-duplicate (and
    /// snapshot) first via `communication_types_contains`.
    pub fn add_communication_type(&mut self, label: impl Into<String>) {
        self.core.communication_types.push(label.into());
    }

    /// Commits the working multi-select list as the communication-types
    /// answer, joined with ", ".
    ///
    /// The working list must be non-empty; the engine enforces that before
    /// calling.
    pub fn commit_communication_types(&mut self) {
        let joined = self.core.communication_types.join(", ");
        self.record_answer(Question::CommunicationTypes, joined);
    }

    /// Records the deadline and its derived priority tier.
    pub fn set_deadline(&mut self, deadline: NaiveDate, priority: Priority) {
        self.core.deadline = Some(deadline);
        self.core.priority = Some(priority);
    }

    /// Moves the calendar cursor. Not an answer: callers do not snapshot.
    pub fn set_calendar_cursor(&mut self, cursor: CalendarCursor) {
        self.core.calendar_cursor = cursor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()
    }

    fn full_record() -> ConversationRecord {
        ConversationRecord::new(FlowTemplate::FullSurvey, today())
    }

    mod construction {
        use super::*;

        #[test]
        fn full_survey_starts_awaiting_audience() {
            let record = full_record();
            assert_eq!(record.state(), FlowState::AwaitingAudience);
            assert_eq!(record.current_step(), None);
            assert!(record.answers().is_empty());
        }

        #[test]
        fn minimal_ticket_starts_on_name_question() {
            let record = ConversationRecord::new(FlowTemplate::MinimalTicket, today());
            assert_eq!(record.state(), FlowState::AwaitingFreeText);
            assert_eq!(record.current_step(), Some(Step::FreeText(Question::TaskName)));
        }

        #[test]
        fn calendar_cursor_starts_on_current_month() {
            let record = full_record();
            assert_eq!(record.calendar_cursor(), CalendarCursor { year: 2025, month: 6 });
        }
    }

    mod history {
        use super::*;

        #[test]
        fn go_back_restores_exact_pre_mutation_state() {
            let mut record = full_record();
            let before = record.clone();

            record.save_snapshot();
            record.add_audience("Users");
            record.transition(FlowState::AwaitingMoreAudience).unwrap();

            assert!(record.go_back());
            assert_eq!(record.state(), before.state());
            assert_eq!(record.audience(), before.audience());
            assert_eq!(record.answers(), before.answers());
        }

        #[test]
        fn go_back_on_empty_history_is_a_refused_no_op() {
            let mut record = full_record();
            let before = record.clone();
            assert!(!record.go_back());
            assert_eq!(record, before);
        }

        #[test]
        fn go_back_unwinds_in_reverse_order() {
            let mut record = full_record();
            record.save_snapshot();
            record.add_audience("Users");
            record.save_snapshot();
            record.add_audience("Drivers");

            assert!(record.go_back());
            assert_eq!(record.audience(), ["Users"]);
            assert!(record.go_back());
            assert!(record.audience().is_empty());
        }

        #[test]
        fn snapshots_do_not_capture_history_itself() {
            let mut record = full_record();
            record.save_snapshot();
            record.save_snapshot();
            assert!(record.go_back());
            assert_eq!(record.history_len(), 1);
        }
    }

    mod answers {
        use super::*;

        #[test]
        fn record_answer_preserves_insertion_order() {
            let mut record = full_record();
            record.record_answer(Question::TaskAbout, "banner is broken");
            record.record_answer(Question::Rtb, "because reasons");
            let questions: Vec<Question> = record.answers().iter().map(|(q, _)| *q).collect();
            assert_eq!(questions, vec![Question::TaskAbout, Question::Rtb]);
        }

        #[test]
        fn record_answer_replaces_existing_entry() {
            let mut record = full_record();
            record.record_answer(Question::TaskAbout, "first");
            record.record_answer(Question::TaskAbout, "second");
            assert_eq!(record.answer(Question::TaskAbout), Some("second"));
            assert_eq!(record.answers().len(), 1);
        }

        #[test]
        fn commit_joins_communication_types_with_comma_space() {
            let mut record = full_record();
            record.add_communication_type("📱 Push");
            record.add_communication_type("💬 SMS");
            record.commit_communication_types();
            assert_eq!(
                record.answer(Question::CommunicationTypes),
                Some("📱 Push, 💬 SMS")
            );
        }
    }

    mod steps {
        use super::*;
        use crate::domain::survey::step::full_survey_steps;

        #[test]
        fn advance_step_consumes_front_to_back() {
            let mut record = full_record();
            record.set_region("CIS", full_survey_steps(false));
            assert_eq!(record.advance_step(), Some(Step::FreeText(Question::Country)));
            assert_eq!(record.advance_step(), Some(Step::FreeText(Question::City)));
        }

        #[test]
        fn exhausting_the_queue_latches_the_informational_flag() {
            let mut record = ConversationRecord::new(FlowTemplate::MinimalTicket, today());
            assert!(!record.steps_exhausted());
            record.advance_step();
            assert_eq!(record.advance_step(), None);
            assert!(record.steps_exhausted());
            assert_eq!(record.current_step(), None);
        }
    }

    proptest! {
        /// Any pick sequence stores each distinct audience value once,
        /// as long as callers gate on `audience_contains`.
        #[test]
        fn audience_deduplicates_across_any_pick_sequence(
            picks in proptest::collection::vec(0usize..3, 0..24)
        ) {
            let values = ["Users", "Drivers", "Partner park"];
            let mut record = full_record();
            for pick in &picks {
                let value = values[*pick];
                if !record.audience_contains(value) {
                    record.save_snapshot();
                    record.add_audience(value);
                }
            }
            let mut seen = std::collections::HashSet::new();
            for value in record.audience() {
                prop_assert!(seen.insert(value.clone()), "duplicate audience {value}");
            }
        }

        /// Snapshot-then-mutate followed by go_back is always an exact undo.
        #[test]
        fn go_back_is_exact_inverse_of_snapshot_mutation(extra in "[a-z]{1,12}") {
            let mut record = full_record();
            record.save_snapshot();
            record.add_audience("Users");
            let before = record.clone();

            record.save_snapshot();
            record.record_answer(Question::TaskAbout, extra);
            record.add_audience("Drivers");

            prop_assert!(record.go_back());
            prop_assert_eq!(record.audience(), before.audience());
            prop_assert_eq!(record.answers(), before.answers());
            prop_assert_eq!(record.state(), before.state());
        }
    }
}
