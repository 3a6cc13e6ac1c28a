//! Runtime configuration, resolved once at startup from environment
//! variables with built-in defaults.

use std::env;
use std::time::Duration;

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_MAKE_FILE, DEFAULT_USER_ID, POLL_INTERVAL_SECS,
};

/// Ambient configuration captured at process start. Tasks read it at
/// dispatch time; it is never mutated afterwards.
#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub user_id: String,
    pub make_file: String,
    pub poll_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let poll_secs = env::var("CURVE_CONSOLE_POLL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(POLL_INTERVAL_SECS);

        Config {
            base_url: env::var("CURVE_CONSOLE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            user_id: env::var("CURVE_CONSOLE_USER_ID")
                .unwrap_or_else(|_| DEFAULT_USER_ID.to_string()),
            make_file: env::var("CURVE_CONSOLE_MAKE_FILE")
                .unwrap_or_else(|_| DEFAULT_MAKE_FILE.to_string()),
            poll_interval: Duration::from_secs(poll_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            make_file: DEFAULT_MAKE_FILE.to_string(),
            poll_interval: Duration::from_secs(POLL_INTERVAL_SECS),
        }
    }
}
