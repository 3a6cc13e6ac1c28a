//! Task commands - communication from App layer to Dispatch layer

use crate::models::HttpMethod;

/// A fully constructed outbound request, captured at dispatch time so the
/// executing task never reads application state.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub endpoint_name: String,
    pub url: String,
    pub body: Option<String>,
    pub user_id: String,
}

/// Commands sent from App layer to Dispatch layer
#[derive(Debug, Clone)]
pub enum TaskCommand {
    /// Execute a primary HTTP request
    ExecuteRequest { id: u64, prepared: PreparedRequest },
    /// Run a make target as an external process
    RunMakeTarget { name: String },
    /// Fetch the chain and template reference lists
    FetchReferenceLists,
    /// Aggregate counts for the stats overlay
    FetchStats,
    /// Shutdown the dispatch actor
    Shutdown,
}
