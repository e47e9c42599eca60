//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Remote endpoints
pub const DEFAULT_ACCOUNT_API_URL: &str = "https://api.ctl.io";
pub const DEFAULT_LB_API_URL: &str = "https://api.loadbalancer.ctl.io";
pub const LOGIN_PATH: &str = "/v2/authentication/login";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Link relations in create responses
pub const LINK_REL_LOAD_BALANCER: &str = "loadbalancer";
pub const LINK_REL_POOL: &str = "pool";

// Session material from the environment
pub const ENV_USERNAME: &str = "CLC_API_USERNAME";
pub const ENV_PASSWORD: &str = "CLC_API_PASSWORD";
pub const ENV_ACCOUNT: &str = "CLC_API_ACCOUNT";
pub const ENV_LOCATION: &str = "CLC_API_LOCATION";
pub const ENV_TOKEN: &str = "CLC_API_TOKEN";

// Pool defaults applied when a field is omitted on the command line
pub const DEFAULT_POOL_PORT: u16 = 8080;
pub const DEFAULT_POOL_METHOD: &str = "roundrobin";
pub const DEFAULT_POOL_PERSISTENCE: &str = "none";
pub const DEFAULT_POOL_IDLE_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_POOL_MODE: &str = "tcp";
pub const DEFAULT_NODE_TARGET_PORT: u16 = 8080;
