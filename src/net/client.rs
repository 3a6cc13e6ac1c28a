//! HTTP client wrapper - executes requests and formats responses

use std::time::Instant;

use crate::constants::{REQUEST_TIMEOUT_SECS, USER_ID_HEADER};
use crate::messages::commands::PreparedRequest;
use crate::messages::TaskEvent;
use crate::models::{ChainSummary, HttpMethod, RequestResult, StatsSnapshot, TemplateSummary};

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    use std::time::Duration;

    reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::DELETE => reqwest::Method::DELETE,
    }
}

/// Pretty-print a body when it parses as JSON, otherwise pass it through.
pub fn format_body(body: String) -> String {
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or(body),
        Err(_) => body,
    }
}

/// Execute a primary request. Any transport failure is captured into the
/// result's error field; a non-2xx status is ordinary content.
pub async fn execute_request(client: &reqwest::Client, prepared: PreparedRequest) -> TaskEvent {
    let start = Instant::now();
    let request_time = chrono::Utc::now();

    let mut builder = client
        .request(to_reqwest_method(prepared.method), &prepared.url)
        .header(USER_ID_HEADER, &prepared.user_id)
        .header("Content-Type", "application/json");
    if let Some(body) = &prepared.body {
        builder = builder.body(body.clone());
    }

    let mut result = RequestResult {
        method: prepared.method,
        endpoint_name: prepared.endpoint_name,
        request_url: prepared.url,
        request_body: prepared.body,
        request_user_id: prepared.user_id,
        status_code: None,
        status_text: String::new(),
        headers: Vec::new(),
        body: String::new(),
        duration_ms: 0,
        error: None,
        request_time,
    };

    match builder.send().await {
        Ok(resp) => {
            let status = resp.status();
            result.status_code = Some(status.as_u16());
            result.status_text = status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string();
            result.headers = resp
                .headers()
                .iter()
                .map(|(k, v)| {
                    (
                        k.to_string(),
                        v.to_str().unwrap_or("<binary>").to_string(),
                    )
                })
                .collect();

            match resp.text().await {
                Ok(body) => {
                    result.body = format_body(body);
                    result.duration_ms = start.elapsed().as_millis() as u64;
                    TaskEvent::RequestCompleted(Box::new(result))
                }
                Err(e) => {
                    result.error = Some(format!("Error reading body: {}", e));
                    result.duration_ms = start.elapsed().as_millis() as u64;
                    TaskEvent::RequestFailed(Box::new(result))
                }
            }
        }
        Err(e) => {
            let msg = if e.is_timeout() {
                format!("Request timed out ({}s)", REQUEST_TIMEOUT_SECS)
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                format!("Request failed: {}", e)
            };
            result.error = Some(msg);
            result.duration_ms = start.elapsed().as_millis() as u64;
            TaskEvent::RequestFailed(Box::new(result))
        }
    }
}

/// Pull a list out of a reference response that is either a bare array or
/// an object wrapping the array under a known key.
fn extract_array(value: serde_json::Value, keys: &[&str]) -> Option<serde_json::Value> {
    match value {
        serde_json::Value::Array(_) => Some(value),
        serde_json::Value::Object(mut map) => keys
            .iter()
            .find_map(|k| map.remove(*k))
            .filter(|v| v.is_array()),
        _ => None,
    }
}

async fn fetch_list<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    keys: &[&str],
) -> anyhow::Result<Vec<T>> {
    let resp = client.get(url).send().await?.error_for_status()?;
    let value: serde_json::Value = resp.json().await?;
    let array = extract_array(value, keys)
        .ok_or_else(|| anyhow::anyhow!("unexpected list shape from {url}"))?;
    Ok(serde_json::from_value(array)?)
}

pub async fn fetch_chains(
    client: &reqwest::Client,
    base_url: &str,
) -> anyhow::Result<Vec<ChainSummary>> {
    let url = format!("{}/chains", base_url.trim_end_matches('/'));
    fetch_list(client, &url, &["data", "chains"]).await
}

pub async fn fetch_templates(
    client: &reqwest::Client,
    base_url: &str,
) -> anyhow::Result<Vec<TemplateSummary>> {
    let url = format!("{}/templates", base_url.trim_end_matches('/'));
    fetch_list(client, &url, &["data", "templates"]).await
}

/// Refresh both reference lists. Each side that fails contributes None and
/// is retried on the next poll tick; nothing is surfaced to the user.
pub async fn fetch_reference_lists(client: &reqwest::Client, base_url: &str) -> TaskEvent {
    let (chains, templates) = tokio::join!(
        fetch_chains(client, base_url),
        fetch_templates(client, base_url),
    );

    if let Err(e) = &chains {
        tracing::debug!(error = %e, "Chain list refresh failed");
    }
    if let Err(e) = &templates {
        tracing::debug!(error = %e, "Template list refresh failed");
    }

    TaskEvent::ReferenceListsUpdated {
        chains: chains.ok(),
        templates: templates.ok(),
    }
}

/// Aggregate counts for the stats overlay from the reference endpoints.
pub async fn fetch_stats(client: &reqwest::Client, base_url: &str) -> TaskEvent {
    let (chains, templates) = tokio::join!(
        fetch_chains(client, base_url),
        fetch_templates(client, base_url),
    );

    let mut errors = Vec::new();
    let chain_count = match chains {
        Ok(list) => Some(list.len()),
        Err(e) => {
            errors.push(format!("chains: {e}"));
            None
        }
    };
    let template_count = match templates {
        Ok(list) => Some(list.len()),
        Err(e) => {
            errors.push(format!("templates: {e}"));
            None
        }
    };

    TaskEvent::StatsFetched(StatsSnapshot {
        chain_count,
        template_count,
        error: if errors.is_empty() {
            None
        } else {
            Some(errors.join("; "))
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_body_pretty_prints_json() {
        let formatted = format_body(r#"{"a":1}"#.to_string());
        assert_eq!(formatted, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_format_body_passes_through_non_json() {
        assert_eq!(format_body("plain text".into()), "plain text");
    }

    #[test]
    fn test_extract_array_shapes() {
        let bare = json!([{"id": "c1"}]);
        assert!(extract_array(bare, &["data"]).is_some());

        let wrapped = json!({"data": [{"id": "c1"}]});
        assert!(extract_array(wrapped, &["data", "chains"]).is_some());

        let wrong = json!({"other": 1});
        assert!(extract_array(wrong, &["data"]).is_none());
    }
}
