//! Command handlers - business logic for processing UI events and applying
//! task events. All mutation of `AppState` happens through these methods,
//! on the app actor's thread of control.

use crate::app::AppState;
use crate::messages::commands::PreparedRequest;
use crate::messages::{Screen, TaskCommand, TaskEvent};
use crate::net::request::{build_body, build_url};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn move_up(&mut self) {
        match self.current_screen {
            Screen::EndpointList => {
                let len = self.catalog.len();
                let next = self
                    .selected_endpoint
                    .checked_sub(1)
                    .unwrap_or(len - 1);
                self.change_selection(next);
            }
            Screen::MakeCommands => {
                if !self.make_targets.is_empty() {
                    self.selected_target = self
                        .selected_target
                        .checked_sub(1)
                        .unwrap_or(self.make_targets.len() - 1);
                }
            }
            _ => {}
        }
    }

    pub fn move_down(&mut self) {
        match self.current_screen {
            Screen::EndpointList => {
                let next = (self.selected_endpoint + 1) % self.catalog.len();
                self.change_selection(next);
            }
            Screen::MakeCommands => {
                if !self.make_targets.is_empty() {
                    self.selected_target = (self.selected_target + 1) % self.make_targets.len();
                }
            }
            _ => {}
        }
    }

    /// Back action. On the endpoint list and the make-command screen this
    /// terminates the session; elsewhere it returns to the endpoint list.
    /// Returns true when the session should end.
    pub fn back(&mut self) -> bool {
        match self.current_screen {
            Screen::EndpointList | Screen::MakeCommands => true,
            Screen::RequestBuilder | Screen::History | Screen::Settings => {
                self.current_screen = Screen::EndpointList;
                false
            }
            Screen::StatsModal => {
                self.dismiss_modal();
                false
            }
        }
    }

    pub fn focus_builder(&mut self) {
        self.current_screen = Screen::RequestBuilder;
    }

    pub fn focus_list(&mut self) {
        self.current_screen = Screen::EndpointList;
    }

    pub fn goto_endpoint_list(&mut self) {
        if self.current_screen != Screen::StatsModal {
            self.leave_search();
            self.current_screen = Screen::EndpointList;
        }
    }

    pub fn goto_make_commands(&mut self) {
        if self.current_screen != Screen::StatsModal {
            self.leave_search();
            self.current_screen = Screen::MakeCommands;
        }
    }

    pub fn goto_history(&mut self) {
        if self.current_screen != Screen::StatsModal {
            self.leave_search();
            self.current_screen = Screen::History;
            self.history_scroll = 0;
        }
    }

    pub fn goto_settings(&mut self) {
        if self.current_screen != Screen::StatsModal {
            self.leave_search();
            self.current_screen = Screen::Settings;
        }
    }

    // ========================
    // Stats overlay
    // ========================

    /// Open the stats overlay over the current screen and kick off the
    /// aggregation fetch.
    pub fn open_stats(&mut self) -> Option<TaskCommand> {
        if self.current_screen == Screen::StatsModal {
            return None;
        }
        self.previous_screen = self.current_screen;
        self.current_screen = Screen::StatsModal;
        self.stats = Default::default();
        Some(TaskCommand::FetchStats)
    }

    /// Any key press closes the overlay and restores the screen beneath.
    pub fn dismiss_modal(&mut self) {
        if self.current_screen == Screen::StatsModal {
            self.current_screen = self.previous_screen;
        }
    }

    // ========================
    // Search sub-mode
    // ========================

    pub fn enter_search(&mut self) {
        self.search_mode = true;
        self.search_buffer.clear();
    }

    /// Leaving search clears the buffer but keeps the selection.
    pub fn leave_search(&mut self) {
        self.search_mode = false;
        self.search_buffer.clear();
    }

    pub fn search_char(&mut self, c: char) {
        self.search_buffer.push(c);
        self.apply_search();
    }

    pub fn search_backspace(&mut self) {
        self.search_buffer.pop();
        self.apply_search();
    }

    /// Jump to the first catalog entry whose category, method or name
    /// contains the buffer as a case-insensitive substring. No match leaves
    /// the selection untouched.
    fn apply_search(&mut self) {
        if self.search_buffer.is_empty() {
            return;
        }
        let needle = self.search_buffer.to_lowercase();
        let hit = self.catalog.iter().position(|e| {
            e.category.to_lowercase().contains(&needle)
                || e.method.as_str().to_lowercase().contains(&needle)
                || e.name.to_lowercase().contains(&needle)
        });
        if let Some(idx) = hit {
            self.change_selection(idx);
        }
    }

    // ========================
    // Builder fields
    // ========================

    /// Focus positions run 0..=inputs.len(); the last position is the Send
    /// control rather than a field.
    pub fn next_field(&mut self) {
        self.focused_input = (self.focused_input + 1) % (self.inputs.len() + 1);
    }

    pub fn prev_field(&mut self) {
        self.focused_input = self
            .focused_input
            .checked_sub(1)
            .unwrap_or(self.inputs.len());
    }

    pub fn field_char(&mut self, c: char) {
        if let Some(field) = self.inputs.get_mut(self.focused_input) {
            field.value.push(c);
        }
    }

    pub fn field_backspace(&mut self) {
        if let Some(field) = self.inputs.get_mut(self.focused_input) {
            field.value.pop();
        }
    }

    /// Enter in the builder: send from the Send control, otherwise advance.
    pub fn confirm(&mut self) -> Option<TaskCommand> {
        if self.current_screen != Screen::RequestBuilder {
            return None;
        }
        if self.focused_input == self.inputs.len() {
            Some(self.prepare_request())
        } else {
            self.next_field();
            None
        }
    }

    // ========================
    // Request dispatch
    // ========================

    /// Build the outbound request from the current field values. Dispatching
    /// while another request is in flight is deliberately not blocked; the
    /// most recently completed result wins the display.
    pub fn prepare_request(&mut self) -> TaskCommand {
        let endpoint = self.current_endpoint().clone();
        let (path_values, query_values, body_values) = self.collect_values();

        let url = build_url(&self.config.base_url, &endpoint, &path_values, &query_values);
        let body = build_body(&endpoint, &body_values);

        self.in_flight = true;
        self.last_error = None;

        let id = self.next_id();
        tracing::info!(id, url = %url, method = endpoint.method.as_str(), "Dispatching request");

        TaskCommand::ExecuteRequest {
            id,
            prepared: PreparedRequest {
                method: endpoint.method,
                endpoint_name: endpoint.name.to_string(),
                url,
                body,
                user_id: self.config.user_id.clone(),
            },
        }
    }

    // ========================
    // Make commands
    // ========================

    pub fn run_selected_target(&mut self) -> Option<TaskCommand> {
        let target = self.make_targets.get(self.selected_target)?;
        let name = target.name.clone();
        self.make_output = format!("$ make {name}\n\nrunning...");
        tracing::info!(target = %name, "Running make target");
        Some(TaskCommand::RunMakeTarget { name })
    }

    // ========================
    // History scrolling
    // ========================

    pub fn scroll_up(&mut self) {
        self.history_scroll = self.history_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.history_scroll = self.history_scroll.saturating_add(1);
    }

    // ========================
    // Task event application
    // ========================

    /// Apply one typed async result. Each event type touches a disjoint
    /// slice of state, so arrival order across task kinds is immaterial.
    pub fn handle_task_event(&mut self, event: TaskEvent) {
        match event {
            TaskEvent::RequestCompleted(result) | TaskEvent::RequestFailed(result) => {
                self.in_flight = false;
                self.last_error = result.error.clone();
                self.history.push((*result).clone());

                // A result for an endpoint the user has since navigated away
                // from lands in that endpoint's saved state instead of the
                // current response view.
                if result.endpoint_name == self.current_endpoint().name {
                    self.response = Some(*result);
                } else {
                    let name = result.endpoint_name.clone();
                    self.endpoint_states.entry(name).or_default().last_response = Some(*result);
                }
            }
            TaskEvent::ShellCompleted { target, output } => {
                tracing::info!(target = %target, "Make target finished");
                self.make_output = output;
            }
            TaskEvent::ReferenceListsUpdated { chains, templates } => {
                // A failed side arrives as None; the cache keeps its last
                // good value.
                if let Some(chains) = chains {
                    self.reference.chains = chains;
                }
                if let Some(templates) = templates {
                    self.reference.templates = templates;
                }
            }
            TaskEvent::StatsFetched(snapshot) => {
                self.stats = snapshot;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;
    use crate::config::Config;
    use crate::models::{
        ChainSummary, HttpMethod, MakeTarget, RequestResult, StatsSnapshot, TemplateSummary,
    };

    fn state() -> AppState {
        AppState::new(Config::default(), build_catalog(), Vec::new())
    }

    fn index_of(state: &AppState, name: &str) -> usize {
        state.catalog.iter().position(|e| e.name == name).unwrap()
    }

    fn result_for(name: &str, status: Option<u16>, error: Option<&str>) -> RequestResult {
        RequestResult {
            method: HttpMethod::GET,
            endpoint_name: name.to_string(),
            request_url: format!("http://x{name}"),
            request_body: None,
            request_user_id: "u".into(),
            status_code: status,
            status_text: status.map(|_| "OK".to_string()).unwrap_or_default(),
            headers: vec![],
            body: "{}".into(),
            duration_ms: 1,
            error: error.map(String::from),
            request_time: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_search_jump_and_no_match() {
        let mut state = state();
        state.change_selection(index_of(&state, "Health"));

        state.enter_search();
        for c in "chain".chars() {
            state.search_char(c);
        }
        assert_eq!(state.selected_endpoint, index_of(&state, "Get Chains"));

        let before = state.selected_endpoint;
        state.leave_search();
        assert!(state.search_buffer.is_empty());
        assert_eq!(state.selected_endpoint, before);

        state.enter_search();
        for c in "zzz".chars() {
            state.search_char(c);
        }
        assert_eq!(state.selected_endpoint, before);
    }

    #[test]
    fn test_global_jump_ends_search_mode() {
        let mut state = state();
        state.enter_search();
        for c in "temp".chars() {
            state.search_char(c);
        }
        let selected = state.selected_endpoint;

        state.goto_make_commands();
        assert_eq!(state.current_screen, Screen::MakeCommands);
        assert!(!state.search_mode);
        assert!(state.search_buffer.is_empty());
        // The jump keeps the selection, like any explicit search exit.
        assert_eq!(state.selected_endpoint, selected);

        state.enter_search();
        state.goto_history();
        assert!(!state.search_mode);
    }

    #[test]
    fn test_stats_modal_saves_and_restores_screen() {
        let mut state = state();
        state.goto_history();
        assert_eq!(state.current_screen, Screen::History);

        let cmd = state.open_stats();
        assert!(matches!(cmd, Some(TaskCommand::FetchStats)));
        assert_eq!(state.current_screen, Screen::StatsModal);

        // Global jumps do nothing while the overlay is up.
        state.goto_make_commands();
        assert_eq!(state.current_screen, Screen::StatsModal);

        state.dismiss_modal();
        assert_eq!(state.current_screen, Screen::History);
    }

    #[test]
    fn test_back_transitions_and_quit() {
        let mut state = state();
        state.focus_builder();
        assert!(!state.back());
        assert_eq!(state.current_screen, Screen::EndpointList);

        state.goto_settings();
        assert!(!state.back());
        assert_eq!(state.current_screen, Screen::EndpointList);

        assert!(state.back());

        state.goto_make_commands();
        assert!(state.back());
    }

    #[test]
    fn test_history_is_append_only_in_completion_order() {
        let mut state = state();
        state.handle_task_event(TaskEvent::RequestCompleted(Box::new(result_for(
            "Get Chains",
            Some(200),
            None,
        ))));
        state.handle_task_event(TaskEvent::RequestFailed(Box::new(result_for(
            "Health",
            None,
            Some("connect refused"),
        ))));
        state.handle_task_event(TaskEvent::RequestCompleted(Box::new(result_for(
            "Get Chains",
            Some(404),
            None,
        ))));

        // Navigation must not disturb history.
        state.change_selection(index_of(&state, "Get Template"));
        state.change_selection(0);

        assert_eq!(state.history.len(), 3);
        assert_eq!(state.history[0].status_code, Some(200));
        assert!(state.history[1].is_error());
        assert_eq!(state.history[2].status_code, Some(404));
    }

    #[test]
    fn test_failed_fetch_keeps_cached_reference_lists() {
        let mut state = state();
        state.handle_task_event(TaskEvent::ReferenceListsUpdated {
            chains: Some(vec![ChainSummary {
                id: "c1".into(),
                name: "One".into(),
            }]),
            templates: Some(vec![TemplateSummary {
                id: "t1".into(),
                name: "Tpl".into(),
            }]),
        });

        state.handle_task_event(TaskEvent::ReferenceListsUpdated {
            chains: None,
            templates: None,
        });

        assert_eq!(state.reference.chains.len(), 1);
        assert_eq!(state.reference.templates.len(), 1);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_stale_result_gated_by_endpoint_identity() {
        let mut state = state();
        let get_chain = index_of(&state, "Get Chain");
        state.change_selection(get_chain);

        // Result arrives after the user has moved on.
        state.change_selection(index_of(&state, "Health"));
        state.handle_task_event(TaskEvent::RequestCompleted(Box::new(result_for(
            "Get Chain",
            Some(200),
            None,
        ))));

        assert!(state.response.is_none());
        assert!(!state.in_flight);
        assert_eq!(state.history.len(), 1);

        // It is waiting on return to the endpoint it belongs to.
        state.change_selection(get_chain);
        assert_eq!(
            state.response.as_ref().and_then(|r| r.status_code),
            Some(200)
        );
    }

    #[test]
    fn test_edit_default_and_dispatch_scenario() {
        let mut state = state();
        state.handle_task_event(TaskEvent::ReferenceListsUpdated {
            chains: Some(vec![ChainSummary {
                id: "c1".into(),
                name: "One".into(),
            }]),
            templates: None,
        });

        let get_chain = index_of(&state, "Get Chain");
        state.change_selection(get_chain);
        state.focus_builder();
        assert_eq!(state.inputs[0].value, "c1");

        state.field_backspace();
        state.field_backspace();
        for c in "c2".chars() {
            state.field_char(c);
        }

        let cmd = state.prepare_request();
        let TaskCommand::ExecuteRequest { prepared, .. } = cmd else {
            panic!("expected request command");
        };
        assert!(prepared.url.ends_with("/chains/c2"));
        assert!(state.in_flight);

        state.change_selection(index_of(&state, "Delete Chain"));
        state.change_selection(get_chain);
        assert_eq!(state.inputs[0].value, "c2");
    }

    #[test]
    fn test_confirm_advances_then_sends() {
        let mut state = state();
        state.change_selection(index_of(&state, "Get Chain"));
        state.focus_builder();
        assert_eq!(state.inputs.len(), 1);

        assert!(state.confirm().is_none());
        assert_eq!(state.focused_input, 1);

        let cmd = state.confirm();
        assert!(matches!(cmd, Some(TaskCommand::ExecuteRequest { .. })));
    }

    #[test]
    fn test_shell_and_stats_events() {
        let mut state = AppState::new(
            Config::default(),
            build_catalog(),
            vec![MakeTarget {
                name: "build".into(),
                description: "Compile".into(),
            }],
        );

        let cmd = state.run_selected_target();
        assert!(matches!(cmd, Some(TaskCommand::RunMakeTarget { .. })));

        state.handle_task_event(TaskEvent::ShellCompleted {
            target: "build".into(),
            output: "ok\n".into(),
        });
        assert_eq!(state.make_output, "ok\n");

        state.handle_task_event(TaskEvent::StatsFetched(StatsSnapshot {
            chain_count: Some(4),
            template_count: Some(2),
            error: None,
        }));
        assert_eq!(state.stats.chain_count, Some(4));
    }
}
