//! Input state cache - per-endpoint persistence of builder field values.
//!
//! The selection-change pipeline runs on every endpoint change regardless of
//! cause (cursor movement, search jump, initial load): save the outgoing
//! endpoint's values, then restore or seed the incoming endpoint's fields.
//! Field order is always derived from the endpoint's declared parameter
//! order, with body keys sorted; it is never taken from map iteration.

use std::collections::HashMap;

use crate::app::state::{AppState, EndpointInputState, InputField, InputKind};
use crate::catalog::{DefaultSource, Endpoint};

/// Flatten an endpoint's example body into (key, example text) pairs in
/// sorted key order. Non-object bodies yield nothing.
pub fn body_field_seeds(endpoint: &Endpoint) -> Vec<(String, String)> {
    let Some(raw) = endpoint.example_body else {
        return Vec::new();
    };
    let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(raw) else {
        return Vec::new();
    };

    let mut seeds: Vec<(String, String)> = map
        .into_iter()
        .map(|(k, v)| {
            let text = match v {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (k, text)
        })
        .collect();
    seeds.sort_by(|a, b| a.0.cmp(&b.0));
    seeds
}

impl AppState {
    /// Move the selection to `new_index`, running the full save/restore
    /// pipeline. Safe to call with the current index; edits survive.
    pub fn change_selection(&mut self, new_index: usize) {
        if new_index >= self.catalog.len() {
            return;
        }
        self.save_endpoint_state();
        self.selected_endpoint = new_index;
        self.load_endpoint_state();
    }

    /// Persist the current endpoint's field values and working response,
    /// replacing any prior entry. Unconditional on a non-empty identity.
    pub fn save_endpoint_state(&mut self) {
        let name = self.current_endpoint().name;
        if name.is_empty() {
            return;
        }

        let (path_values, query_values, body_values) = self.collect_values();
        self.endpoint_states.insert(
            name.to_string(),
            EndpointInputState {
                path_values,
                query_values,
                body_values,
                last_response: self.response.clone(),
            },
        );
    }

    /// Group current field values by kind, keyed by parameter name.
    pub fn collect_values(
        &self,
    ) -> (
        HashMap<String, String>,
        HashMap<String, String>,
        HashMap<String, String>,
    ) {
        let mut path_values = HashMap::new();
        let mut query_values = HashMap::new();
        let mut body_values = HashMap::new();

        for field in &self.inputs {
            let map = match field.kind {
                InputKind::Path => &mut path_values,
                InputKind::Query => &mut query_values,
                InputKind::Body => &mut body_values,
            };
            map.insert(field.key.clone(), field.value.clone());
        }

        (path_values, query_values, body_values)
    }

    /// Rebuild the ordered field list for the selected endpoint, restoring
    /// saved values verbatim when they exist, otherwise seeding defaults.
    /// Focus resets to the first field.
    pub fn load_endpoint_state(&mut self) {
        let endpoint = self.current_endpoint().clone();
        let saved = self.endpoint_states.get(endpoint.name).cloned();

        let mut inputs = Vec::new();

        for param in &endpoint.path_params {
            let restored = saved
                .as_ref()
                .and_then(|s| s.path_values.get(param.name).cloned());
            let value = match restored {
                Some(v) => v,
                None => param
                    .default
                    .and_then(|src| self.resolve_default(src))
                    .unwrap_or_default(),
            };
            inputs.push(InputField {
                kind: InputKind::Path,
                key: param.name.to_string(),
                value,
                placeholder: format!("{{{}}}", param.name),
            });
        }

        for param in &endpoint.query_params {
            let value = saved
                .as_ref()
                .and_then(|s| s.query_values.get(param.name).cloned())
                .unwrap_or_default();
            let placeholder = if param.required {
                format!("{} (required)", param.description)
            } else {
                param.description.to_string()
            };
            inputs.push(InputField {
                kind: InputKind::Query,
                key: param.name.to_string(),
                value,
                placeholder,
            });
        }

        for (key, example) in body_field_seeds(&endpoint) {
            let value = saved
                .as_ref()
                .and_then(|s| s.body_values.get(&key).cloned())
                .unwrap_or_else(|| example.clone());
            inputs.push(InputField {
                kind: InputKind::Body,
                key,
                value,
                placeholder: example,
            });
        }

        self.inputs = inputs;
        self.focused_input = 0;
        self.response = saved.and_then(|s| s.last_response);
    }

    fn resolve_default(&self, source: DefaultSource) -> Option<String> {
        match source {
            DefaultSource::FirstChainId => {
                self.reference.chains.first().map(|c| c.id.clone())
            }
            DefaultSource::FirstTemplateId => {
                self.reference.templates.first().map(|t| t.id.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;
    use crate::config::Config;
    use crate::models::ChainSummary;

    fn state() -> AppState {
        AppState::new(Config::default(), build_catalog(), Vec::new())
    }

    fn index_of(state: &AppState, name: &str) -> usize {
        state.catalog.iter().position(|e| e.name == name).unwrap()
    }

    fn set_field(state: &mut AppState, key: &str, value: &str) {
        let field = state
            .inputs
            .iter_mut()
            .find(|f| f.key == key)
            .expect("field present");
        field.value = value.to_string();
    }

    #[test]
    fn test_round_trip_restores_edits() {
        let mut state = state();
        let get_chain = index_of(&state, "Get Chain");
        let delete_chain = index_of(&state, "Delete Chain");

        state.change_selection(get_chain);
        set_field(&mut state, "id", "c2");

        state.change_selection(delete_chain);
        state.change_selection(get_chain);

        assert_eq!(state.inputs[0].key, "id");
        assert_eq!(state.inputs[0].value, "c2");
    }

    #[test]
    fn test_edit_matching_default_survives_round_trip() {
        // An edited value identical to a seeded default must not be
        // special-cased on restore.
        let mut state = state();
        state.reference.chains.push(ChainSummary {
            id: "c1".into(),
            name: "One".into(),
        });

        let get_chain = index_of(&state, "Get Chain");
        state.change_selection(get_chain);
        assert_eq!(state.inputs[0].value, "c1");

        set_field(&mut state, "id", "c2");
        state.change_selection(index_of(&state, "Get Chains"));

        // A new chain arriving first in the cache must not leak into the
        // saved state on return.
        state.reference.chains.insert(
            0,
            ChainSummary {
                id: "c0".into(),
                name: "Zero".into(),
            },
        );
        state.change_selection(get_chain);
        assert_eq!(state.inputs[0].value, "c2");
    }

    #[test]
    fn test_field_order_is_deterministic() {
        let mut state = state();
        let create_chain = index_of(&state, "Create Chain");
        state.change_selection(create_chain);

        let order: Vec<(InputKind, String)> = state
            .inputs
            .iter()
            .map(|f| (f.kind, f.key.clone()))
            .collect();

        for _ in 0..5 {
            state.load_endpoint_state();
            let again: Vec<(InputKind, String)> = state
                .inputs
                .iter()
                .map(|f| (f.kind, f.key.clone()))
                .collect();
            assert_eq!(order, again);
        }
    }

    #[test]
    fn test_order_is_path_then_query_then_body() {
        let mut state = state();
        state.change_selection(index_of(&state, "Quote Buy"));

        let kinds: Vec<InputKind> = state.inputs.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![InputKind::Path, InputKind::Query, InputKind::Query]
        );
        assert_eq!(state.focused_input, 0);
    }

    #[test]
    fn test_body_fields_seeded_from_example_sorted() {
        let mut state = state();
        state.change_selection(index_of(&state, "Create Chain"));

        let body_keys: Vec<&str> = state
            .inputs
            .iter()
            .filter(|f| f.kind == InputKind::Body)
            .map(|f| f.key.as_str())
            .collect();
        assert_eq!(
            body_keys,
            vec!["initial_supply", "name", "symbol", "template_id"]
        );

        let supply = state
            .inputs
            .iter()
            .find(|f| f.key == "initial_supply")
            .unwrap();
        assert_eq!(supply.value, "1000000");
        let name = state.inputs.iter().find(|f| f.key == "name").unwrap();
        assert_eq!(name.value, "My Chain");
    }

    #[test]
    fn test_required_query_params_marked_in_placeholder() {
        let mut state = state();
        state.change_selection(index_of(&state, "Quote Buy"));

        let amount = state.inputs.iter().find(|f| f.key == "amount").unwrap();
        assert!(amount.placeholder.ends_with("(required)"));
        let side = state.inputs.iter().find(|f| f.key == "side").unwrap();
        assert!(!side.placeholder.contains("(required)"));
    }

    #[test]
    fn test_path_default_from_reference_cache() {
        let mut state = state();
        state.reference.chains.push(ChainSummary {
            id: "chain-7".into(),
            name: "Seven".into(),
        });
        state.change_selection(index_of(&state, "Get Chain"));
        assert_eq!(state.inputs[0].value, "chain-7");
    }

    #[test]
    fn test_last_response_travels_with_endpoint() {
        let mut state = state();
        let get_chain = index_of(&state, "Get Chain");
        state.change_selection(get_chain);

        state.response = Some(crate::models::RequestResult {
            method: crate::models::HttpMethod::GET,
            endpoint_name: "Get Chain".into(),
            request_url: "http://x/chains/c1".into(),
            request_body: None,
            request_user_id: "u".into(),
            status_code: Some(200),
            status_text: "OK".into(),
            headers: vec![],
            body: "{}".into(),
            duration_ms: 3,
            error: None,
            request_time: chrono::Utc::now(),
        });

        state.change_selection(index_of(&state, "Health"));
        assert!(state.response.is_none());

        state.change_selection(get_chain);
        assert_eq!(
            state.response.as_ref().and_then(|r| r.status_code),
            Some(200)
        );
    }
}
