//! Datacenter and load-balancer records
//!
//! Snapshots of remote state at call time. Nothing here is cached.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::pool::Pool;

/// A datacenter the account can place load balancers in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datacenter {
    /// Canonical upper-case code, as later calls require it
    pub id: String,
    pub name: String,
}

/// Full load-balancer state, including its pools
///
/// Ids are only unique within a datacenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancer {
    pub id: String,
    pub name: String,
    pub description: String,
    pub public_ip: String,
    pub status: String,
    pub datacenter: String,
    /// Never absent; a load balancer without pools has an empty list
    pub pools: Vec<Pool>,
}

/// Listing entry for a load balancer, without status or pools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub public_ip: String,
    pub datacenter: String,
}

/// Result of a create call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerCreationInfo {
    pub id: String,
    /// Server-side request timestamp in epoch milliseconds
    pub request_time: i64,
}

impl LoadBalancerCreationInfo {
    /// Request timestamp as a UTC instant, per the server clock
    pub fn requested_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.request_time).single()
    }
}

/// Outcome of deleting a load balancer
///
/// Deleting one that does not exist is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted,
    AlreadyAbsent,
}

impl LoadBalancer {
    /// Find a pool by id
    pub fn pool(&self, pool_id: &str) -> Option<&Pool> {
        self.pools.iter().find(|pool| pool.id == pool_id)
    }
}
