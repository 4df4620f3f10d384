//! Event dispatcher - the single entry point for inbound chat events.
//!
//! Resolves the session, feeds the flow engine, pushes rendering
//! instructions out through the transport and, on terminal outcomes,
//! assembles the ticket and files it with the tracker. Sessions are
//! evicted on success, cancellation and unrecoverable errors alike.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::catalog::{CANCEL_LABEL, CREATE_TASK_LABEL, EMPTY_TICKET_LABEL};
use crate::domain::foundation::{ChatId, DomainError, ErrorCode, SubmissionId, Timestamp};
use crate::domain::survey::{
    engine, ConversationRecord, EngineOutcome, FlowTemplate, Reply, SurveyEvent,
};
use crate::domain::ticket::assemble;
use crate::ports::{ChatTransport, IssueTracker, NewIssue};

use super::registry::SessionRegistry;

const GREETING: &str = "Hello! I can help you create tasks in the team tracker.\n\
NOTE! This bot is for fast creation of tasks only. For big detailed projects please use the tracker queue directly.\n\
Choose an action:";

const CANCELLED_NOTICE: &str = "Operation cancelled. What would you like to do?";

/// Static settings the dispatcher needs for submissions and links.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Tracker queue every ticket files into.
    pub queue: String,

    /// Acting-user login recorded on tickets and sent to the tracker.
    pub submitter_login: String,

    /// Base URL for issue links in success messages.
    pub browse_base_url: String,
}

/// Wires inbound events to the flow engine and terminal outcomes to the
/// tracker.
pub struct Dispatcher {
    registry: SessionRegistry,
    transport: Arc<dyn ChatTransport>,
    tracker: Arc<dyn IssueTracker>,
    config: DispatcherConfig,
}

impl Dispatcher {
    pub fn new(
        registry: SessionRegistry,
        transport: Arc<dyn ChatTransport>,
        tracker: Arc<dyn IssueTracker>,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            registry,
            transport,
            tracker,
            config,
        }
    }

    /// Processes one event end to end.
    ///
    /// Unexpected failures are caught here: logged, reported to the user
    /// as a generic processing error, and the session is cleared so the
    /// user can restart cleanly.
    pub async fn dispatch(&self, chat: ChatId, event: SurveyEvent) {
        if let Err(err) = self.handle_event(chat, event).await {
            error!(%chat, %err, "event processing failed");
            self.registry.evict(chat).await;
            let notice = Reply::notice(
                "❌ An error occurred while processing your request. Please try again.",
                entry_options(),
            );
            if let Err(send_err) = self.transport.send_reply(chat, &notice).await {
                error!(%chat, %send_err, "failed to report processing error");
            }
        }
    }

    async fn handle_event(&self, chat: ChatId, event: SurveyEvent) -> Result<(), DomainError> {
        let today = Timestamp::now().date();

        if let SurveyEvent::Text(text) = &event {
            match text.as_str() {
                "/start" => {
                    self.registry.evict(chat).await;
                    return self.send(chat, &Reply::notice(GREETING, entry_options())).await;
                }
                CREATE_TASK_LABEL => return self.start_flow(chat, FlowTemplate::FullSurvey).await,
                EMPTY_TICKET_LABEL => {
                    return self.start_flow(chat, FlowTemplate::MinimalTicket).await
                }
                _ => {}
            }
        }

        // The /cancel command behaves like the cancel button.
        let event = match event {
            SurveyEvent::Text(text) if text == "/cancel" => {
                SurveyEvent::Text(CANCEL_LABEL.to_string())
            }
            other => other,
        };

        let outcome = self
            .registry
            .with_record(chat, |record| engine::handle(record, &event, today))
            .await;

        match outcome {
            None => self.handle_without_session(chat, &event).await,
            Some(Err(flow_err)) => Err(DomainError::new(
                ErrorCode::InternalError,
                flow_err.to_string(),
            )),
            Some(Ok(EngineOutcome::Render(reply))) => self.send(chat, &reply).await,
            Some(Ok(EngineOutcome::Ignored)) => Ok(()),
            Some(Ok(EngineOutcome::Cancelled)) => {
                self.registry.evict(chat).await;
                info!(%chat, "conversation cancelled");
                self.send(chat, &Reply::notice(CANCELLED_NOTICE, entry_options())).await
            }
            Some(Ok(EngineOutcome::Completed)) => self.submit(chat).await,
        }
    }

    /// Events for identities with no active conversation: text gets the
    /// greeting (a fresh start), stray button taps are dropped.
    async fn handle_without_session(
        &self,
        chat: ChatId,
        event: &SurveyEvent,
    ) -> Result<(), DomainError> {
        match event {
            SurveyEvent::Text(text) if text == CANCEL_LABEL => {
                self.send(chat, &Reply::notice(CANCELLED_NOTICE, entry_options())).await
            }
            SurveyEvent::Text(_) => {
                self.send(chat, &Reply::notice(GREETING, entry_options())).await
            }
            SurveyEvent::Callback(_) => Ok(()),
        }
    }

    async fn start_flow(&self, chat: ChatId, flow: FlowTemplate) -> Result<(), DomainError> {
        let today = Timestamp::now().date();
        let (record, reply) = engine::start(flow, today);
        // A new start discards any conversation already in flight.
        self.registry.insert(chat, record).await;
        info!(%chat, ?flow, "conversation started");
        self.send(chat, &reply).await
    }

    /// Assembles and files the ticket for a terminal record, then clears
    /// the session regardless of outcome.
    async fn submit(&self, chat: ChatId) -> Result<(), DomainError> {
        let Some(record) = self.registry.evict(chat).await else {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                "terminal outcome for an identity with no active record",
            ));
        };

        self.confirm_deadline(chat, &record).await?;

        let submitted_at = Timestamp::now();
        let submission = SubmissionId::new();
        let draft = assemble(&record, submitted_at, &self.config.submitter_login);
        let issue = NewIssue {
            queue: self.config.queue.clone(),
            summary: draft.summary,
            description: draft.description,
            priority: draft.priority,
            created_by: self.config.submitter_login.clone(),
            created_at: submitted_at,
            assignee: None,
        };

        info!(%submission, %chat, queue = %issue.queue, priority = %issue.priority, "submitting ticket");

        let reply = match self.tracker.create_issue(&issue).await {
            Ok(created) => {
                info!(%submission, key = %created.key, "ticket created");
                Reply::notice(
                    format!(
                        "✅ Task created successfully!\nKey: {key}\nLink: {base}/{key}",
                        key = created.key,
                        base = self.config.browse_base_url.trim_end_matches('/'),
                    ),
                    entry_options(),
                )
            }
            Err(err) => {
                // Single-attempt semantics: report, never retry. The
                // session is already cleared, forcing a restart.
                warn!(%submission, %err, "ticket submission failed");
                Reply::notice(format!("❌ Error creating task: {err}"), entry_options())
            }
        };

        self.send(chat, &reply).await
    }

    /// Full-survey submissions echo the picked deadline and derived
    /// priority before the tracker call.
    async fn confirm_deadline(
        &self,
        chat: ChatId,
        record: &ConversationRecord,
    ) -> Result<(), DomainError> {
        if let (Some(deadline), Some(priority)) = (record.deadline(), record.priority()) {
            let text = format!(
                "Selected deadline: {}\nPriority set to: {}",
                deadline.format("%Y-%m-%d"),
                priority
            );
            self.send(chat, &Reply::notice(text, vec![])).await?;
        }
        Ok(())
    }

    async fn send(&self, chat: ChatId, reply: &Reply) -> Result<(), DomainError> {
        self.transport
            .send_reply(chat, reply)
            .await
            .map_err(|e| DomainError::new(ErrorCode::TransportError, e.to_string()))
    }
}

fn entry_options() -> Vec<String> {
    vec![CREATE_TASK_LABEL.to_string(), EMPTY_TICKET_LABEL.to_string()]
}
