// Gateway configuration from environment variables

use std::time::Duration;

use crate::error::{BookingError, Result};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the remote data gateway.
///
/// Loaded from the environment (a `.env` file is honored via dotenvy):
/// - `TURNERO_API_URL` (optional): backend base URL, defaults to
///   `http://localhost:8000`
/// - `TURNERO_USE_FIXTURES` (optional): `true`/`1` selects the bundled
///   fixture gateway instead of the network
/// - `TURNERO_HTTP_TIMEOUT_SECS` (optional): per-request timeout,
///   defaults to 10 seconds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Backend base URL, without trailing slash.
    pub base_url: String,

    /// Serve the bundled fixture data instead of calling the backend.
    pub use_fixtures: bool,

    /// Upper bound on any single request.
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            use_fixtures: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GatewayConfig {
    /// Config for a specific backend URL with default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_trailing_slash(base_url.into()),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// - `TURNERO_HTTP_TIMEOUT_SECS` set but not a number
    pub fn from_env() -> Result<Self> {
        // Load .env file (ignore if not found)
        dotenvy::dotenv().ok();

        let base_url = std::env::var("TURNERO_API_URL")
            .map(trim_trailing_slash)
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let use_fixtures = std::env::var("TURNERO_USE_FIXTURES")
            .map(|value| is_truthy(&value))
            .unwrap_or(false);

        let timeout_secs = match std::env::var("TURNERO_HTTP_TIMEOUT_SECS") {
            Ok(value) => value.parse::<u64>().map_err(|_| {
                BookingError::Config(format!(
                    "TURNERO_HTTP_TIMEOUT_SECS must be a number of seconds, got '{value}'"
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            use_fixtures,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn is_truthy(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
