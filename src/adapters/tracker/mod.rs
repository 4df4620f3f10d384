//! Tracker adapter - the `IssueTracker` port over the tracker REST API.

mod client;
mod dto;
mod token;

pub use client::{TrackerApiConfig, TrackerClient};
pub use token::MetadataTokenProvider;
