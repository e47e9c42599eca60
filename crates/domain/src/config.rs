//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ACCOUNT_API_URL, DEFAULT_LB_API_URL, DEFAULT_TIMEOUT_SECS, LOGIN_PATH,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub http: HttpConfig,
}

/// Remote endpoints
///
/// The service is split across two hosts: the account host answers login and
/// datacenter listing, the load-balancer host answers everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the account/datacenter directory host
    pub account_api_url: String,
    /// Base URL of the load-balancer service host
    pub lb_api_url: String,
    /// Login endpoint path on the account host
    pub login_path: String,
}

/// Transport behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    /// Send `Connection: close` on every request
    pub close_connections: bool,
    /// Dump outgoing requests at debug level. Bearer tokens are not redacted.
    pub debug_requests: bool,
    /// Dump incoming responses at debug level
    pub debug_responses: bool,
    /// Skip TLS certificate verification. Only for test environments with
    /// self-signed certificates.
    pub danger_accept_invalid_certs: bool,
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            account_api_url: DEFAULT_ACCOUNT_API_URL.to_string(),
            lb_api_url: DEFAULT_LB_API_URL.to_string(),
            login_path: LOGIN_PATH.to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            close_connections: true,
            debug_requests: false,
            debug_responses: false,
            danger_accept_invalid_certs: false,
            user_agent: None,
        }
    }
}

impl Config {
    /// Configuration pointing both hosts at the same base URL.
    ///
    /// Used by tests that serve every endpoint from one mock server.
    pub fn single_host(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            api: ApiConfig {
                account_api_url: base_url.clone(),
                lb_api_url: base_url,
                ..ApiConfig::default()
            },
            http: HttpConfig::default(),
        }
    }
}
