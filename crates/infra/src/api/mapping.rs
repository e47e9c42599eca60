//! Conversions between wire shapes and domain records
//!
//! One direction per function. Absent node and pool lists become empty
//! vectors; an absent health check stays `None`.

use lbctl_domain::{
    Datacenter, HealthCheck, LoadBalancer, LoadBalancerCreationInfo, LoadBalancerSummary, Pool,
    PoolNode,
};

use super::wire::{
    DatacenterJson, HealthCheckJson, LinkJson, LoadBalancerDetailsJson, LoadBalancerListingJson,
    NodeJson, PoolJson, RequestStatusJson,
};

impl From<DatacenterJson> for Datacenter {
    /// The service lists ids in lower case but only accepts upper case
    fn from(dc: DatacenterJson) -> Self {
        Self { id: dc.id.to_uppercase(), name: dc.name }
    }
}

impl From<LoadBalancerListingJson> for LoadBalancerSummary {
    fn from(lb: LoadBalancerListingJson) -> Self {
        Self {
            id: lb.id,
            name: lb.name,
            description: lb.description,
            public_ip: lb.public_ip_address,
            datacenter: lb.data_center,
        }
    }
}

impl From<LoadBalancerDetailsJson> for LoadBalancer {
    fn from(lb: LoadBalancerDetailsJson) -> Self {
        let pools = lb
            .pools
            .unwrap_or_default()
            .into_iter()
            .map(|pool| pool_from_wire(&lb.id, pool))
            .collect();

        Self {
            id: lb.id,
            name: lb.name,
            description: lb.description,
            public_ip: lb.public_ip_address,
            status: lb.status,
            datacenter: lb.data_center,
            pools,
        }
    }
}

/// Wire pools do not carry their owner, so the load-balancer id is passed in
pub fn pool_from_wire(lb_id: &str, pool: PoolJson) -> Pool {
    Pool {
        id: pool.id,
        lb_id: lb_id.to_string(),
        incoming_port: pool.port,
        method: pool.load_balancing_method,
        persistence: pool.persistence,
        idle_timeout_ms: pool.idle_timeout,
        mode: pool.load_balancing_mode,
        health_check: pool.health_check.map(HealthCheck::from),
        nodes: pool.nodes.unwrap_or_default().into_iter().map(PoolNode::from).collect(),
    }
}

impl From<NodeJson> for PoolNode {
    fn from(node: NodeJson) -> Self {
        Self { target_ip: node.ip_address, target_port: node.private_port }
    }
}

impl From<HealthCheckJson> for HealthCheck {
    fn from(health: HealthCheckJson) -> Self {
        Self {
            unhealthy_threshold: health.unhealthy_threshold,
            healthy_threshold: health.healthy_threshold,
            interval_seconds: health.interval_seconds,
            target_port: health.target_port,
            mode: health.mode,
        }
    }
}

impl From<&Pool> for PoolJson {
    /// Request body for create and update; a draft's empty id is omitted
    fn from(pool: &Pool) -> Self {
        Self {
            id: pool.id.clone(),
            port: pool.incoming_port,
            load_balancing_method: pool.method.clone(),
            persistence: pool.persistence.clone(),
            idle_timeout: pool.idle_timeout_ms,
            load_balancing_mode: pool.mode.clone(),
            health_check: pool.health_check.as_ref().map(HealthCheckJson::from),
            nodes: Some(pool.nodes.iter().map(NodeJson::from).collect()),
        }
    }
}

impl From<&PoolNode> for NodeJson {
    fn from(node: &PoolNode) -> Self {
        Self { ip_address: node.target_ip.clone(), private_port: node.target_port }
    }
}

impl From<&HealthCheck> for HealthCheckJson {
    fn from(health: &HealthCheck) -> Self {
        Self {
            unhealthy_threshold: health.unhealthy_threshold,
            healthy_threshold: health.healthy_threshold,
            interval_seconds: health.interval_seconds,
            target_port: health.target_port,
            mode: health.mode.clone(),
        }
    }
}

/// Resource id of the first link with relation `rel`
///
/// A missing link is not an error here; callers decide what it means.
pub fn find_link<'a>(links: &'a [LinkJson], rel: &str) -> Option<&'a str> {
    links
        .iter()
        .find(|link| link.rel == rel)
        .map(|link| link.resource_id.as_str())
        .filter(|id| !id.is_empty())
}

/// Creation info for a load balancer, if the response links to one
pub fn creation_info(response: &RequestStatusJson, rel: &str) -> Option<LoadBalancerCreationInfo> {
    find_link(&response.links, rel).map(|id| LoadBalancerCreationInfo {
        id: id.to_string(),
        request_time: response.request_date,
    })
}
