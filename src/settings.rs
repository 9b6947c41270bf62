use std::time::Duration;

use crate::services::http::RetryPolicy;
use crate::services::{onesky, twosky};

/// HTTP request timeout unless overridden on the command line.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Runtime settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct Settings {
    pub twosky_url: String,
    pub onesky_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            twosky_url: twosky::DEFAULT_BASE_URL.to_string(),
            onesky_url: onesky::DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
        }
    }
}
