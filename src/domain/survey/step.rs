//! Survey steps and flow templates.
//!
//! The step queue drives the wizard: each entry is a tagged step kind, so
//! the engine branches on variants instead of comparing literal question
//! text. Questions are a closed enum carrying their prompt text.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// A question answered with free text (or, for `CommunicationTypes`, a
/// committed multi-select), identified by variant rather than prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Question {
    Country,
    City,
    TaskAbout,
    ProblemToSolve,
    Rtb,
    KeyMessage,
    SuccessIndicator,
    Segment,
    CommunicationTypes,
    TaskName,
    TaskDescription,
}

impl Question {
    /// The prompt text shown to the user.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Country => "Which country?",
            Self::City => "Which city?",
            Self::TaskAbout => "What is the task about? (What has happened?)",
            Self::ProblemToSolve => {
                "What problem do we want to solve with this communication?"
            }
            Self::Rtb => "RTB",
            Self::KeyMessage => "Key message",
            Self::SuccessIndicator => {
                "What would be your indicator that the problem was solved with the help of this communication?"
            }
            Self::Segment => {
                "Which segment of users/drivers should the communication be sent to?"
            }
            Self::CommunicationTypes => {
                "What types of communications you would like to use in this task?"
            }
            Self::TaskName => "Please enter the name of the task:",
            Self::TaskDescription => "Please enter the description of the task:",
        }
    }

    /// The questions rendered as heading + answer in an assembled ticket,
    /// in the order they are asked.
    pub fn survey_body_order() -> &'static [Question] {
        &[
            Self::TaskAbout,
            Self::ProblemToSolve,
            Self::Rtb,
            Self::KeyMessage,
            Self::SuccessIndicator,
            Self::Segment,
            Self::CommunicationTypes,
        ]
    }
}

/// One entry in the pending-step queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "question")]
pub enum Step {
    /// Ask a question, accept the next text verbatim.
    FreeText(Question),
    /// Multi-select over the audience-dependent communication-type catalog.
    CommunicationTypes,
    /// Date pick via the calendar grid.
    Deadline,
}

/// Which wizard the conversation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowTemplate {
    /// Audience → region → questions → communication types → deadline.
    FullSurvey,
    /// Name → description, fixed normal priority.
    MinimalTicket,
}

/// Builds the step queue for the full survey once a region is chosen.
///
/// The "All regions" sentinel skips the country/city prompts; every queue
/// ends with the communication-type multi-select and the deadline pick.
pub fn full_survey_steps(all_regions: bool) -> VecDeque<Step> {
    let mut steps = VecDeque::new();
    if !all_regions {
        steps.push_back(Step::FreeText(Question::Country));
        steps.push_back(Step::FreeText(Question::City));
    }
    steps.push_back(Step::FreeText(Question::TaskAbout));
    steps.push_back(Step::FreeText(Question::ProblemToSolve));
    steps.push_back(Step::FreeText(Question::Rtb));
    steps.push_back(Step::FreeText(Question::KeyMessage));
    steps.push_back(Step::FreeText(Question::SuccessIndicator));
    steps.push_back(Step::FreeText(Question::Segment));
    steps.push_back(Step::CommunicationTypes);
    steps.push_back(Step::Deadline);
    steps
}

/// Builds the step queue for the minimal ticket flow.
pub fn minimal_ticket_steps() -> VecDeque<Step> {
    VecDeque::from([
        Step::FreeText(Question::TaskName),
        Step::FreeText(Question::TaskDescription),
    ])
}
