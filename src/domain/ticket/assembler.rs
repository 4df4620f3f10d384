//! Ticket assembly - formats a completed record into summary/description.
//!
//! The external tracker caps summaries at 100 characters; descriptions
//! follow a fixed section order so tickets read uniformly in the queue.

use crate::domain::catalog::{country_flag, AUDIENCE, REGIONS};
use crate::domain::foundation::Timestamp;
use crate::domain::survey::{ConversationRecord, FlowTemplate, Priority, Question};

/// Maximum summary length accepted by the tracker.
pub const SUMMARY_MAX_CHARS: usize = 100;

/// A fully formatted ticket, ready for the client adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    pub summary: String,
    pub description: String,
    pub priority: Priority,
}

/// Formats a terminal conversation record into a ticket draft.
///
/// The full survey renders deadline, priority, audience, region and every
/// answered question; the minimal ticket renders only the metadata header
/// and the free-text description.
pub fn assemble(record: &ConversationRecord, submitted_at: Timestamp, submitter: &str) -> TicketDraft {
    match record.flow() {
        FlowTemplate::FullSurvey => assemble_full(record, submitted_at, submitter),
        FlowTemplate::MinimalTicket => assemble_minimal(record, submitted_at, submitter),
    }
}

fn metadata_header(submitted_at: Timestamp, submitter: &str) -> Vec<String> {
    vec![
        format!(
            "Current Date and Time (UTC - YYYY-MM-DD HH:MM:SS formatted): {}",
            submitted_at.as_header_string()
        ),
        format!("Current User's Login: {}", submitter),
    ]
}

fn assemble_full(record: &ConversationRecord, submitted_at: Timestamp, submitter: &str) -> TicketDraft {
    let priority = record.priority().unwrap_or(Priority::Normal);
    let mut parts = metadata_header(submitted_at, submitter);

    if let Some(deadline) = record.deadline() {
        parts.push(format!("\n⏰ Deadline: {}", deadline.format("%Y-%m-%d")));
    }
    parts.push(format!("⚡ Priority: {}\n", priority.as_str().to_uppercase()));

    parts.push("*For what audience is the communication planned?*".to_string());
    let audience_lines: Vec<String> = record
        .audience()
        .iter()
        .filter_map(|value| AUDIENCE.by_value(value))
        .map(|entry| format!("```{}```", entry.label()))
        .collect();
    parts.push(audience_lines.join("\n"));

    if let Some(region) = record.region() {
        parts.push("\n*Selected region:*".to_string());
        if let Some(entry) = REGIONS.by_value(region) {
            parts.push(format!("```{}```", entry.label()));
        }
    }

    if let Some(country) = record.answer(Question::Country) {
        let flag = country_flag(country).unwrap_or("");
        parts.push(format!("\n*Country:* {}{}", flag, country));
    }
    if let Some(city) = record.answer(Question::City) {
        parts.push(format!("\n*City:* {}", city));
    }

    for question in Question::survey_body_order() {
        let Some(answer) = record.answer(*question) else { continue };
        parts.push(format!("\n*{}*", question.prompt()));
        if *question == Question::CommunicationTypes {
            let lines: Vec<String> = answer
                .split(", ")
                .map(|label| format!("```{}```", label))
                .collect();
            parts.push(lines.join("\n"));
        } else {
            parts.push(answer.to_string());
        }
    }

    TicketDraft {
        summary: truncate_summary(record.answer(Question::TaskAbout).unwrap_or_default()),
        description: parts.join("\n"),
        priority,
    }
}

fn assemble_minimal(record: &ConversationRecord, submitted_at: Timestamp, submitter: &str) -> TicketDraft {
    let mut parts = metadata_header(submitted_at, submitter);
    parts.push(String::new());
    parts.push(record.answer(Question::TaskDescription).unwrap_or_default().to_string());

    TicketDraft {
        summary: truncate_summary(record.answer(Question::TaskName).unwrap_or_default()),
        description: parts.join("\n"),
        priority: Priority::Normal,
    }
}

/// Truncates to the tracker's summary limit on a character boundary.
fn truncate_summary(text: &str) -> String {
    text.chars().take(SUMMARY_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::domain::catalog::DONE_LABEL;
    use crate::domain::survey::engine::{handle, start};
    use crate::domain::survey::{CallbackPayload, SurveyEvent};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()
    }

    fn submitted_at() -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 6, 9, 14, 49, 11).unwrap())
    }

    fn feed(record: &mut ConversationRecord, event: SurveyEvent) {
        handle(record, &event, today()).expect("engine error");
    }

    fn text(s: &str) -> SurveyEvent {
        SurveyEvent::Text(s.to_string())
    }

    fn completed_full_survey(task_about: &str) -> ConversationRecord {
        let (mut record, _) = start(FlowTemplate::FullSurvey, today());
        feed(&mut record, text("👥 Users"));
        feed(&mut record, text(DONE_LABEL));
        feed(&mut record, text("🌍 CIS"));
        feed(&mut record, text("Germany"));
        feed(&mut record, text("Berlin"));
        feed(&mut record, text(task_about));
        feed(&mut record, text("Retention dip"));
        feed(&mut record, text("Strong brand trust"));
        feed(&mut record, text("We fixed it"));
        feed(&mut record, text("Complaint volume back to baseline"));
        feed(&mut record, text("Active city riders"));
        feed(&mut record, text("📱 Push"));
        feed(&mut record, text("💬 SMS"));
        feed(&mut record, text(DONE_LABEL));
        feed(
            &mut record,
            SurveyEvent::Callback(CallbackPayload::DateSelected(today() + chrono::Duration::days(1))),
        );
        record
    }

    fn completed_minimal(name: &str, description: &str) -> ConversationRecord {
        let (mut record, _) = start(FlowTemplate::MinimalTicket, today());
        feed(&mut record, text(name));
        feed(&mut record, text(description));
        record
    }

    mod full_survey {
        use super::*;

        #[test]
        fn header_carries_timestamp_and_submitter() {
            let record = completed_full_survey("Banner broken");
            let draft = assemble(&record, submitted_at(), "crm.bot");
            assert!(draft.description.starts_with(
                "Current Date and Time (UTC - YYYY-MM-DD HH:MM:SS formatted): 2025-06-09 14:49:11"
            ));
            assert!(draft.description.contains("Current User's Login: crm.bot"));
        }

        #[test]
        fn deadline_and_priority_render_after_header() {
            let record = completed_full_survey("Banner broken");
            let draft = assemble(&record, submitted_at(), "crm.bot");
            assert!(draft.description.contains("⏰ Deadline: 2025-06-10"));
            assert!(draft.description.contains("⚡ Priority: BLOCKER"));
            assert_eq!(draft.priority, Priority::Blocker);
        }

        #[test]
        fn audience_renders_display_labels() {
            let record = completed_full_survey("Banner broken");
            let draft = assemble(&record, submitted_at(), "crm.bot");
            assert!(draft.description.contains("```👥 Users```"));
        }

        #[test]
        fn region_country_and_city_render_in_order() {
            let record = completed_full_survey("Banner broken");
            let draft = assemble(&record, submitted_at(), "crm.bot");
            let region_at = draft.description.find("```🌍 CIS```").unwrap();
            let country_at = draft.description.find("*Country:* 🇩🇪Germany").unwrap();
            let city_at = draft.description.find("*City:* Berlin").unwrap();
            assert!(region_at < country_at && country_at < city_at);
        }

        #[test]
        fn unknown_country_renders_without_flag() {
            let (mut record, _) = start(FlowTemplate::FullSurvey, today());
            feed(&mut record, text("👥 Users"));
            feed(&mut record, text(DONE_LABEL));
            feed(&mut record, text("🌍 CIS"));
            feed(&mut record, text("Atlantis"));
            feed(&mut record, text("Underwater"));
            let draft = assemble(&record, submitted_at(), "crm.bot");
            assert!(draft.description.contains("*Country:* Atlantis"));
        }

        #[test]
        fn communication_types_split_one_per_line() {
            let record = completed_full_survey("Banner broken");
            let draft = assemble(&record, submitted_at(), "crm.bot");
            assert!(draft.description.contains("```📱 Push```\n```💬 SMS```"));
        }

        #[test]
        fn summary_is_task_about_answer() {
            let record = completed_full_survey("Banner broken");
            let draft = assemble(&record, submitted_at(), "crm.bot");
            assert_eq!(draft.summary, "Banner broken");
        }

        #[test]
        fn summary_truncates_to_limit() {
            let long = "x".repeat(250);
            let record = completed_full_survey(&long);
            let draft = assemble(&record, submitted_at(), "crm.bot");
            assert_eq!(draft.summary.chars().count(), SUMMARY_MAX_CHARS);
        }

        #[test]
        fn answered_questions_render_as_heading_plus_answer() {
            let record = completed_full_survey("Banner broken");
            let draft = assemble(&record, submitted_at(), "crm.bot");
            assert!(draft
                .description
                .contains("*What problem do we want to solve with this communication?*\nRetention dip"));
        }
    }

    mod minimal_ticket {
        use super::*;

        #[test]
        fn description_is_header_plus_free_text() {
            let record = completed_minimal("Fix banner", "Banner broken on Android");
            let draft = assemble(&record, submitted_at(), "crm.bot");
            assert!(draft.description.ends_with("\nBanner broken on Android"));
            assert!(draft.description.contains("Current User's Login: crm.bot"));
        }

        #[test]
        fn summary_is_the_task_name() {
            let record = completed_minimal("Fix banner", "Banner broken on Android");
            let draft = assemble(&record, submitted_at(), "crm.bot");
            assert_eq!(draft.summary, "Fix banner");
        }

        #[test]
        fn priority_is_fixed_normal() {
            let record = completed_minimal("Fix banner", "Banner broken on Android");
            let draft = assemble(&record, submitted_at(), "crm.bot");
            assert_eq!(draft.priority, Priority::Normal);
        }
    }

    #[test]
    fn truncation_respects_multibyte_characters() {
        let long = "🎯".repeat(150);
        assert_eq!(truncate_summary(&long).chars().count(), SUMMARY_MAX_CHARS);
    }
}
