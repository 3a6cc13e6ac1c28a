//! Task events - typed results delivered from the Dispatch layer back into
//! the app loop. Each dispatched task resolves to exactly one of these.

use crate::models::{ChainSummary, RequestResult, StatsSnapshot, TemplateSummary};

#[derive(Debug, Clone)]
pub enum TaskEvent {
    /// A primary request completed with an HTTP response (any status)
    RequestCompleted(Box<RequestResult>),
    /// A primary request failed before producing a response; the result
    /// carries the error and still enters history
    RequestFailed(Box<RequestResult>),
    /// A make target finished; output is combined stdout and stderr
    ShellCompleted { target: String, output: String },
    /// Reference lists were refreshed; `None` means that side's fetch
    /// failed and the cached value should be kept
    ReferenceListsUpdated {
        chains: Option<Vec<ChainSummary>>,
        templates: Option<Vec<TemplateSummary>>,
    },
    /// Stats aggregation finished
    StatsFetched(StatsSnapshot),
}
