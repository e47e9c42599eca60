//! Domain types and models

pub mod credentials;
pub mod load_balancer;
pub mod pool;

pub use credentials::Credentials;
pub use load_balancer::{
    Datacenter, DeleteOutcome, LoadBalancer, LoadBalancerCreationInfo, LoadBalancerSummary,
};
pub use pool::{HealthCheck, Pool, PoolNode};
