//! Pool records

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_POOL_IDLE_TIMEOUT_MS, DEFAULT_POOL_METHOD, DEFAULT_POOL_MODE,
    DEFAULT_POOL_PERSISTENCE, DEFAULT_POOL_PORT,
};

/// A set of backend targets behind one load balancer
///
/// `id` is assigned by the service and is empty in a draft that has not been
/// created yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub id: String,
    /// Owning load balancer
    pub lb_id: String,
    /// Port the load balancer listens on
    pub incoming_port: u16,
    /// e.g. `roundrobin`, `leastconn`
    pub method: String,
    /// e.g. `none`
    pub persistence: String,
    pub idle_timeout_ms: u64,
    /// e.g. `tcp`, `http`
    pub mode: String,
    pub health_check: Option<HealthCheck>,
    pub nodes: Vec<PoolNode>,
}

/// Backend target. Nodes have no identity beyond their position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolNode {
    pub target_ip: String,
    pub target_port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    pub unhealthy_threshold: u32,
    pub healthy_threshold: u32,
    pub interval_seconds: u32,
    pub target_port: u16,
    pub mode: String,
}

impl Default for Pool {
    fn default() -> Self {
        Self {
            id: String::new(),
            lb_id: String::new(),
            incoming_port: DEFAULT_POOL_PORT,
            method: DEFAULT_POOL_METHOD.to_string(),
            persistence: DEFAULT_POOL_PERSISTENCE.to_string(),
            idle_timeout_ms: DEFAULT_POOL_IDLE_TIMEOUT_MS,
            mode: DEFAULT_POOL_MODE.to_string(),
            health_check: None,
            nodes: Vec::new(),
        }
    }
}

impl Pool {
    /// Whether the pool has been assigned an id by the service
    pub fn is_draft(&self) -> bool {
        self.id.is_empty()
    }
}

impl PoolNode {
    pub fn new(target_ip: impl Into<String>, target_port: u16) -> Self {
        Self { target_ip: target_ip.into(), target_port }
    }
}
