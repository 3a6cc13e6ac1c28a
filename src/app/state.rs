//! App state - pure data structure with no I/O logic

use std::collections::HashMap;

use crate::catalog::Endpoint;
use crate::config::Config;
use crate::messages::render::{CatalogRow, RenderState};
use crate::messages::Screen;
use crate::models::{MakeTarget, ReferenceCache, RequestResult, StatsSnapshot};

/// Which kind of parameter a builder field feeds into
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Path,
    Query,
    Body,
}

/// One editable field in the request builder. The (kind, key) pair is the
/// explicit mapping from field index to logical parameter; fields are never
/// matched back by value.
#[derive(Clone, Debug)]
pub struct InputField {
    pub kind: InputKind,
    pub key: String,
    pub value: String,
    pub placeholder: String,
}

/// Per-endpoint saved input values and last response. Created lazily on
/// first navigation away from an endpoint, overwritten on every save.
#[derive(Clone, Debug, Default)]
pub struct EndpointInputState {
    pub path_values: HashMap<String, String>,
    pub query_values: HashMap<String, String>,
    pub body_values: HashMap<String, String>,
    pub last_response: Option<RequestResult>,
}

/// Main application state - pure data, single owner, mutated only inside
/// the app actor's event loop.
pub struct AppState {
    pub config: Config,
    pub catalog: Vec<Endpoint>,

    // Screen routing
    pub current_screen: Screen,
    pub previous_screen: Screen,

    // Endpoint selection and builder fields
    pub selected_endpoint: usize,
    pub inputs: Vec<InputField>,
    /// Index into `inputs`; `inputs.len()` is the Send control
    pub focused_input: usize,
    pub endpoint_states: HashMap<String, EndpointInputState>,

    // Working response for the currently selected endpoint
    pub response: Option<RequestResult>,

    // Search sub-mode (endpoint list only)
    pub search_mode: bool,
    pub search_buffer: String,

    // Request dispatch
    pub in_flight: bool,
    pub next_request_id: u64,
    pub last_error: Option<String>,

    // History: append-only, completion order, never truncated
    pub history: Vec<RequestResult>,
    pub history_scroll: u16,

    // Reference data
    pub reference: ReferenceCache,

    // Stats overlay
    pub stats: StatsSnapshot,

    // Make commands
    pub make_targets: Vec<MakeTarget>,
    pub selected_target: usize,
    pub make_output: String,
}

impl AppState {
    pub fn new(config: Config, catalog: Vec<Endpoint>, make_targets: Vec<MakeTarget>) -> Self {
        let mut state = AppState {
            config,
            catalog,
            current_screen: Screen::EndpointList,
            previous_screen: Screen::EndpointList,
            selected_endpoint: 0,
            inputs: Vec::new(),
            focused_input: 0,
            endpoint_states: HashMap::new(),
            response: None,
            search_mode: false,
            search_buffer: String::new(),
            in_flight: false,
            next_request_id: 1,
            last_error: None,
            history: Vec::new(),
            history_scroll: 0,
            reference: ReferenceCache::default(),
            stats: StatsSnapshot::default(),
            make_targets,
            selected_target: 0,
            make_output: String::new(),
        };
        // Prepare the first endpoint's fields before the loop starts;
        // no network call is issued here.
        state.load_endpoint_state();
        state
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn current_endpoint(&self) -> &Endpoint {
        &self.catalog[self.selected_endpoint]
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let endpoint = self.current_endpoint();
        let history_window = self
            .history
            .iter()
            .rev()
            .take(crate::constants::HISTORY_DISPLAY_CAP)
            .cloned()
            .collect();

        RenderState {
            screen: self.current_screen,
            previous_screen: self.previous_screen,
            catalog_rows: self
                .catalog
                .iter()
                .map(|e| CatalogRow {
                    name: e.name,
                    method: e.method,
                    category: e.category,
                })
                .collect(),
            selected_endpoint: self.selected_endpoint,
            endpoint_description: endpoint.description.to_string(),
            method: endpoint.method,
            path_template: endpoint.path_template.to_string(),
            inputs: self.inputs.clone(),
            focused_input: self.focused_input,
            search_mode: self.search_mode,
            search_buffer: self.search_buffer.clone(),
            response: self.response.clone(),
            in_flight: self.in_flight,
            last_error: self.last_error.clone(),
            history: history_window,
            history_len: self.history.len(),
            history_scroll: self.history_scroll,
            make_targets: self.make_targets.clone(),
            selected_target: self.selected_target,
            make_output: self.make_output.clone(),
            stats: self.stats.clone(),
            chain_count: self.reference.chains.len(),
            template_count: self.reference.templates.len(),
            base_url: self.config.base_url.clone(),
            user_id: self.config.user_id.clone(),
            make_file: self.config.make_file.clone(),
            poll_interval_secs: self.config.poll_interval.as_secs(),
        }
    }
}
