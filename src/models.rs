use serde::Deserialize;

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
        }
    }
}

/// The outcome of one dispatched request, successful or not. Immutable once
/// built; appended to history in completion order.
#[derive(Clone, Debug)]
pub struct RequestResult {
    pub method: HttpMethod,
    pub endpoint_name: String,
    pub request_url: String,
    pub request_body: Option<String>,
    pub request_user_id: String,
    pub status_code: Option<u16>,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub duration_ms: u64,
    pub error: Option<String>,
    pub request_time: chrono::DateTime<chrono::Utc>,
}

impl RequestResult {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Lightweight chain row from the reference endpoint
#[derive(Clone, Debug, Deserialize)]
pub struct ChainSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Lightweight template row from the reference endpoint
#[derive(Clone, Debug, Deserialize)]
pub struct TemplateSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Best-effort snapshot of backend lookup data, refreshed by the background
/// poller. Last successfully fetched list wins; a failed fetch keeps the
/// previous value.
#[derive(Clone, Debug, Default)]
pub struct ReferenceCache {
    pub chains: Vec<ChainSummary>,
    pub templates: Vec<TemplateSummary>,
}

/// Aggregated counts shown in the stats overlay
#[derive(Clone, Debug, Default)]
pub struct StatsSnapshot {
    pub chain_count: Option<usize>,
    pub template_count: Option<usize>,
    pub error: Option<String>,
}

/// One runnable target from the make-target catalog
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MakeTarget {
    pub name: String,
    pub description: String,
}
