//! wfgate: a bearer-token HTTP gateway in front of two execution paths.
//!
//! The gateway authenticates callers with signed expiring tokens, coerces
//! request payloads to one structured shape, and forwards them to external
//! collaborators -- a workflow trigger and a generic handler -- translating
//! each outcome into an HTTP status. Embed the crate and supply your own
//! [`dispatch::Collaborator`] implementations, or run the binary with its
//! logging stubs.

pub mod api;
pub mod auth;
pub mod config;
pub mod dispatch;
pub mod users;
