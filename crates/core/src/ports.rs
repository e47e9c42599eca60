//! Port interfaces for the load-balancer service
//!
//! The CLI only talks to these traits. `lbctl-infra` provides the HTTP
//! implementation; tests provide in-memory ones.

use async_trait::async_trait;
use lbctl_domain::{
    Datacenter, DeleteOutcome, LoadBalancer, LoadBalancerCreationInfo, LoadBalancerSummary, Pool,
    Result,
};

/// Previously issued session values, e.g. read from the environment
///
/// Empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionMaterial {
    pub username: Option<String>,
    pub password: Option<String>,
    pub account_alias: Option<String>,
    pub location_alias: Option<String>,
    pub bearer_token: Option<String>,
}

impl SessionMaterial {
    /// Username, account, location and token, when all four are present
    pub fn token_parts(&self) -> Option<(&str, &str, &str, &str)> {
        Some((
            present(&self.username)?,
            present(&self.account_alias)?,
            present(&self.location_alias)?,
            present(&self.bearer_token)?,
        ))
    }

    /// Username and password, when both are present
    pub fn login_parts(&self) -> Option<(&str, &str)> {
        Some((present(&self.username)?, present(&self.password)?))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Authenticated operations against the load-balancer service
///
/// Every operation checks for a valid session first and fails with
/// `MissingCredentials` without touching the network otherwise. Operations
/// take `&mut self` because an expired token is renewed in place.
#[async_trait]
pub trait LoadBalancerApi: Send {
    fn username(&self) -> &str;

    fn account_alias(&self) -> &str;

    fn location_alias(&self) -> &str;

    /// Whether the session can still be used
    fn has_credentials(&self) -> bool;

    /// Bearer token of the current session, for exporting it to a shell
    fn bearer_token(&self) -> &str;

    /// Blank the session. Later calls fail with `MissingCredentials`.
    fn logout(&mut self);

    /// Datacenters visible to the account, ids in upper case
    async fn list_datacenters(&mut self) -> Result<Vec<Datacenter>>;

    async fn create_load_balancer(
        &mut self,
        datacenter: &str,
        name: &str,
        description: &str,
    ) -> Result<LoadBalancerCreationInfo>;

    async fn inspect_load_balancer(&mut self, datacenter: &str, lb_id: &str)
        -> Result<LoadBalancer>;

    /// A missing load balancer yields `DeleteOutcome::AlreadyAbsent`
    async fn delete_load_balancer(&mut self, datacenter: &str, lb_id: &str)
        -> Result<DeleteOutcome>;

    async fn list_load_balancers(&mut self) -> Result<Vec<LoadBalancerSummary>>;

    /// Create `draft` and return the pool as the service reports it
    async fn create_pool(&mut self, datacenter: &str, lb_id: &str, draft: &Pool) -> Result<Pool>;

    /// Replace the pool identified by `pool.id` and return its new state
    async fn update_pool(&mut self, datacenter: &str, lb_id: &str, pool: &Pool) -> Result<Pool>;

    async fn delete_pool(&mut self, datacenter: &str, lb_id: &str, pool_id: &str) -> Result<()>;

    async fn inspect_pool(&mut self, datacenter: &str, lb_id: &str, pool_id: &str)
        -> Result<Pool>;
}

/// Opens sessions
#[async_trait]
pub trait SessionConnector: Send + Sync {
    /// Log in with a username and password
    async fn login(&self, username: &str, password: &str) -> Result<Box<dyn LoadBalancerApi>>;

    /// Rebuild a session from previously issued values, falling back to a
    /// login when only a username and password are available
    async fn restore(&self, material: &SessionMaterial) -> Result<Box<dyn LoadBalancerApi>>;
}
