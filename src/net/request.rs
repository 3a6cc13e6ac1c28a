//! Request construction - turns an endpoint plus entered field values into
//! a concrete URL and payload.

use std::collections::HashMap;

use crate::catalog::Endpoint;

/// Build the request URL. Path placeholders with empty values are left
/// visibly unresolved; query parameters append in declared order and only
/// when non-empty, with no `?` at all when none apply.
pub fn build_url(
    base: &str,
    endpoint: &Endpoint,
    path_values: &HashMap<String, String>,
    query_values: &HashMap<String, String>,
) -> String {
    let mut path = endpoint.path_template.to_string();
    for param in &endpoint.path_params {
        if let Some(value) = path_values.get(param.name) {
            if !value.is_empty() {
                path = path.replace(&format!("{{{}}}", param.name), value);
            }
        }
    }

    let mut url = format!("{}{}", base.trim_end_matches('/'), path);

    let pairs: Vec<String> = endpoint
        .query_params
        .iter()
        .filter_map(|param| {
            query_values
                .get(param.name)
                .filter(|v| !v.is_empty())
                .map(|v| format!("{}={}", param.name, v))
        })
        .collect();

    if !pairs.is_empty() {
        url.push('?');
        url.push_str(&pairs.join("&"));
    }

    url
}

/// Build the JSON payload for endpoints with declared body fields. Empty
/// values are skipped; non-empty values are coerced to JSON when they parse,
/// otherwise kept as raw strings. Returns None for body-less endpoints.
pub fn build_body(endpoint: &Endpoint, body_values: &HashMap<String, String>) -> Option<String> {
    if !endpoint.has_body() {
        return None;
    }

    let mut map = serde_json::Map::new();
    let mut keys: Vec<&String> = body_values.keys().collect();
    keys.sort();

    for key in keys {
        let value = &body_values[key];
        if value.is_empty() {
            continue;
        }
        let json = serde_json::from_str::<serde_json::Value>(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.clone()));
        map.insert(key.clone(), json);
    }

    Some(serde_json::Value::Object(map).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;

    fn endpoint(name: &str) -> Endpoint {
        build_catalog()
            .into_iter()
            .find(|e| e.name == name)
            .unwrap()
    }

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_path_substitution() {
        let ep = endpoint("Get Chain");
        let url = build_url(
            "http://api.test",
            &ep,
            &values(&[("id", "abc")]),
            &HashMap::new(),
        );
        assert_eq!(url, "http://api.test/chains/abc");
    }

    #[test]
    fn test_empty_path_value_leaves_placeholder() {
        let ep = endpoint("Get Chain");
        let url = build_url(
            "http://api.test",
            &ep,
            &values(&[("id", "")]),
            &HashMap::new(),
        );
        assert_eq!(url, "http://api.test/chains/{id}");
    }

    #[test]
    fn test_query_in_declared_order_skipping_empty() {
        let ep = endpoint("Get Chains");
        let url = build_url(
            "http://api.test/",
            &ep,
            &HashMap::new(),
            &values(&[("status", "live"), ("offset", ""), ("limit", "10")]),
        );
        assert_eq!(url, "http://api.test/chains?limit=10&status=live");
    }

    #[test]
    fn test_no_question_mark_when_all_empty() {
        let ep = endpoint("Get Chains");
        let url = build_url(
            "http://api.test",
            &ep,
            &HashMap::new(),
            &values(&[("limit", ""), ("offset", "")]),
        );
        assert_eq!(url, "http://api.test/chains");
    }

    #[test]
    fn test_body_json_coercion_with_string_fallback() {
        let ep = endpoint("Create Chain");
        let body = build_body(
            &ep,
            &values(&[
                ("name", "My Chain"),
                ("initial_supply", "42"),
                ("flags", r#"{"beta": true}"#),
                ("symbol", ""),
            ]),
        )
        .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["name"], "My Chain");
        assert_eq!(parsed["initial_supply"], 42);
        assert_eq!(parsed["flags"]["beta"], true);
        assert!(parsed.get("symbol").is_none());
    }

    #[test]
    fn test_no_body_for_bodyless_endpoint() {
        let ep = endpoint("Get Chains");
        assert!(build_body(&ep, &HashMap::new()).is_none());
    }
}
