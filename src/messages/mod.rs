//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, App, and
//! Dispatch layers.

pub mod commands;
pub mod events;
pub mod render;
pub mod ui_events;

pub use commands::TaskCommand;
pub use events::TaskEvent;
pub use render::RenderState;
pub use ui_events::{Screen, UiEvent};
