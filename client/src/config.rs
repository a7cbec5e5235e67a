//! Application configuration.
//!
//! Defaults are compiled in; every value can be overridden from the
//! environment (or a `.env` file) when the CLI starts:
//!
//! | Variable             | Default                                   |
//! |----------------------|-------------------------------------------|
//! | `KIRAI_API_URL`      | [`DEFAULT_API_URL`]                       |
//! | `KIRAI_PAGE_SIZE`    | [`DEFAULT_PAGE_SIZE`]                     |
//! | `KIRAI_TIMEOUT_SECS` | [`DEFAULT_TIMEOUT_SECS`]                  |
//! | `KIRAI_WAYBILL_NO`   | [`DEFAULT_WAYBILL_NO`]                    |
//! | `KIRAI_AGENCY_NAME`  | [`DEFAULT_AGENCY_NAME`]                   |
//! | `KIRAI_SESSION_FILE` | `<config dir>/kirai/session.json`         |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Record store and auth service base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8009";

/// Records per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// HTTP request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Waybill number printed on every document.
///
/// No record field carries a waybill number, so the printed value is a
/// fixed document code until the store provides one.
pub const DEFAULT_WAYBILL_NO: &str = "WB-0001";

/// Title printed above the document header.
pub const DEFAULT_AGENCY_NAME: &str = "Sri Vinayaka Commission Agency";

/// Runtime configuration for the client.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub page_size: usize,
    pub timeout: Duration,
    pub waybill_no: String,
    pub agency_name: String,
    /// Session file override; `None` uses the per-user config directory.
    pub session_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            waybill_no: DEFAULT_WAYBILL_NO.to_string(),
            agency_name: DEFAULT_AGENCY_NAME.to_string(),
            session_file: None,
        }
    }
}

impl Config {
    /// Build a config from `KIRAI_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try loading .env file
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = non_empty(lookup("KIRAI_API_URL")) {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = non_empty(lookup("KIRAI_PAGE_SIZE")) {
            config.page_size = match raw.parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => return Err(invalid("KIRAI_PAGE_SIZE", raw)),
            };
        }
        if let Some(raw) = non_empty(lookup("KIRAI_TIMEOUT_SECS")) {
            let secs = raw
                .parse::<u64>()
                .map_err(|_| invalid("KIRAI_TIMEOUT_SECS", raw.clone()))?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(waybill) = non_empty(lookup("KIRAI_WAYBILL_NO")) {
            config.waybill_no = waybill;
        }
        if let Some(name) = non_empty(lookup("KIRAI_AGENCY_NAME")) {
            config.agency_name = name;
        }
        if let Some(path) = non_empty(lookup("KIRAI_SESSION_FILE")) {
            config.session_file = Some(PathBuf::from(path));
        }

        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn invalid(name: &str, value: String) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        value,
    }
}
