//! Pool fields given on the command line as `key=value` tokens
//!
//! Recognised keys: `port`, `method`, `health`, `persistence`, `timeout`,
//! `mode`, `nodes`, `target`. Omitted keys keep the [`Pool::default`] values.
//! `target` applies to every node whatever its position among the tokens.
//! `health` takes `unhealthy:healthy:interval:port[:mode]`, or `none`.
//!
//! Parsing never touches the network, so a bad token aborts a pool command
//! before any call is made.

use std::str::FromStr;

use lbctl_domain::constants::{DEFAULT_NODE_TARGET_PORT, DEFAULT_POOL_MODE};
use lbctl_domain::{HealthCheck, LbError, Pool, PoolNode, Result};
use tracing::debug;

/// Keys accepted by [`PoolFields::parse`]
pub const POOL_FIELD_KEYS: &[&str] =
    &["port", "method", "health", "persistence", "timeout", "mode", "nodes", "target"];

/// Parsed pool fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolFields {
    pool: Pool,
}

impl PoolFields {
    /// Parse `key=value` tokens into a pool draft
    ///
    /// # Errors
    /// Returns `LbError::InvalidPoolArgument` for unknown keys, tokens without
    /// `=`, malformed integers and malformed health checks.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let mut pool = Pool::default();
        let mut node_ips: Option<Vec<String>> = None;
        let mut target_port = DEFAULT_NODE_TARGET_PORT;

        for token in tokens {
            let token = token.as_ref();
            let (key, value) = token.split_once('=').ok_or_else(|| unknown_field(token))?;

            match key {
                "port" => pool.incoming_port = parse_number(key, value)?,
                "method" => pool.method = value.to_string(),
                "health" => pool.health_check = parse_health(value)?,
                "persistence" => pool.persistence = value.to_string(),
                "timeout" => pool.idle_timeout_ms = parse_number(key, value)?,
                "mode" => pool.mode = value.to_string(),
                "nodes" => node_ips = Some(parse_node_ips(value)?),
                "target" => target_port = parse_number(key, value)?,
                _ => return Err(unknown_field(token)),
            }
        }

        pool.nodes = node_ips
            .unwrap_or_default()
            .into_iter()
            .map(|ip| PoolNode::new(ip, target_port))
            .collect();

        debug!(?pool, "parsed pool fields");
        Ok(Self { pool })
    }

    /// Draft for a pool that does not exist yet
    pub fn into_draft(self, lb_id: &str) -> Pool {
        Pool { id: String::new(), lb_id: lb_id.to_string(), ..self.pool }
    }

    /// Full replacement for an existing pool
    pub fn into_update(self, lb_id: &str, pool_id: &str) -> Pool {
        Pool { id: pool_id.to_string(), lb_id: lb_id.to_string(), ..self.pool }
    }
}

fn unknown_field(token: &str) -> LbError {
    LbError::InvalidPoolArgument(format!(
        "unrecognized pool field '{token}', expected one of: {}",
        POOL_FIELD_KEYS.join(", ")
    ))
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| LbError::InvalidPoolArgument(format!("{key} must be a number, got '{value}'")))
}

fn parse_node_ips(value: &str) -> Result<Vec<String>> {
    let ips: Vec<String> = value.split(',').map(str::to_string).collect();
    if ips.iter().any(String::is_empty) {
        return Err(LbError::InvalidPoolArgument(format!(
            "nodes must be a comma-separated list of addresses, got '{value}'"
        )));
    }
    Ok(ips)
}

fn parse_health(value: &str) -> Result<Option<HealthCheck>> {
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }

    let parts: Vec<&str> = value.split(':').collect();
    if !(4..=5).contains(&parts.len()) {
        return Err(LbError::InvalidPoolArgument(format!(
            "health must be unhealthy:healthy:interval:port[:mode] or none, got '{value}'"
        )));
    }

    Ok(Some(HealthCheck {
        unhealthy_threshold: parse_number("health unhealthy threshold", parts[0])?,
        healthy_threshold: parse_number("health healthy threshold", parts[1])?,
        interval_seconds: parse_number("health interval", parts[2])?,
        target_port: parse_number("health port", parts[3])?,
        mode: parts.get(4).map_or_else(|| DEFAULT_POOL_MODE.to_string(), |m| (*m).to_string()),
    }))
}
