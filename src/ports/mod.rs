//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ChatTransport` - deliver a rendering instruction to a conversation
//! - `IssueTracker` - file an assembled ticket with the external tracker
//! - `AccessTokenProvider` - obtain the short-lived tracker credential

mod access_token;
mod chat_transport;
mod issue_tracker;

pub use access_token::AccessTokenProvider;
pub use chat_transport::{ChatTransport, TransportError};
pub use issue_tracker::{CreatedIssue, IssueTracker, NewIssue, TrackerError};
