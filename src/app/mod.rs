//! App layer - central state management and command processing
//!
//! The App actor receives UI events and task events, updates state, and
//! emits task commands and render state.

pub mod actor;
pub mod commands;
pub mod inputs;
pub mod state;

pub use actor::AppActor;
pub use state::AppState;
