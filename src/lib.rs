//! # Curve Console
//!
//! An interactive terminal console for the bonding-curve launchpad REST API.
//!
//! ## Features
//! - Static endpoint catalog with per-endpoint parameter forms
//! - Per-endpoint input persistence across navigation
//! - Append-only request history
//! - Make-target runner with combined output capture
//! - Background reference-list polling for default values
//! - Stats overlay
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Dispatch Layer (Tokio runtime)

pub mod app;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod makefile;
pub mod messages;
pub mod models;
pub mod net;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use catalog::{build_catalog, Endpoint};
pub use config::Config;
pub use messages::{RenderState, Screen, TaskCommand, TaskEvent, UiEvent};
pub use models::{HttpMethod, MakeTarget, ReferenceCache, RequestResult};
pub use net::DispatchActor;
