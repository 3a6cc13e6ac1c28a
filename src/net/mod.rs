//! Dispatch layer - async task execution for HTTP requests, make targets
//! and background reference polling.
//!
//! The dispatch actor receives task commands and posts back typed events.

pub mod actor;
pub mod client;
pub mod request;
pub mod shell;

pub use actor::DispatchActor;
