//! Ticket Intake - conversational intake bot for tracker tickets.
//!
//! A guided chat wizard collects structured answers (audience, region,
//! task details, communication types, deadline) and files the result as a
//! single ticket with the external issue tracker.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
