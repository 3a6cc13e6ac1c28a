//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::InputField;
use crate::messages::Screen;
use crate::models::{HttpMethod, MakeTarget, RequestResult, StatsSnapshot};

/// One row of the endpoint list
#[derive(Debug, Clone)]
pub struct CatalogRow {
    pub name: &'static str,
    pub method: HttpMethod,
    pub category: &'static str,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Screen routing
    pub screen: Screen,
    /// Screen drawn beneath the stats overlay
    pub previous_screen: Screen,

    // Endpoint list
    pub catalog_rows: Vec<CatalogRow>,
    pub selected_endpoint: usize,
    pub search_mode: bool,
    pub search_buffer: String,

    // Request builder
    pub endpoint_description: String,
    pub method: HttpMethod,
    pub path_template: String,
    pub inputs: Vec<InputField>,
    pub focused_input: usize,

    // Response view
    pub response: Option<RequestResult>,
    pub in_flight: bool,
    pub last_error: Option<String>,

    // History (display window, newest first)
    pub history: Vec<RequestResult>,
    pub history_len: usize,
    pub history_scroll: u16,

    // Make commands
    pub make_targets: Vec<MakeTarget>,
    pub selected_target: usize,
    pub make_output: String,

    // Stats overlay + reference counts
    pub stats: StatsSnapshot,
    pub chain_count: usize,
    pub template_count: usize,

    // Settings
    pub base_url: String,
    pub user_id: String,
    pub make_file: String,
    pub poll_interval_secs: u64,
}
