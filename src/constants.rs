//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL for the launchpad API
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Default acting-user id sent with every request
pub const DEFAULT_USER_ID: &str = "console-operator";

/// Header carrying the acting-user id
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Default path of the make-target catalog file
pub const DEFAULT_MAKE_FILE: &str = "Makefile";

/// Interval between background reference-list refreshes, in seconds
pub const POLL_INTERVAL_SECS: u64 = 30;

/// Per-request HTTP timeout, in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Number of history entries shown on the history screen (history itself
/// is never truncated)
pub const HISTORY_DISPLAY_CAP: usize = 50;
