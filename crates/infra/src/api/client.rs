//! Load-balancer service client
//!
//! Implements [`LoadBalancerApi`] over the authenticated [`Transport`]. Each
//! operation builds an account-scoped path, maps the domain value to its wire
//! shape where a body is sent, and maps the response back.

use async_trait::async_trait;
use lbctl_core::LoadBalancerApi;
use lbctl_domain::constants::{LINK_REL_LOAD_BALANCER, LINK_REL_POOL};
use lbctl_domain::{
    Credentials, Datacenter, DeleteOutcome, LbError, LoadBalancer, LoadBalancerCreationInfo,
    LoadBalancerSummary, Pool, Result,
};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::mapping::{creation_info, find_link};
use super::transport::{CallAuth, Host, Transport};
use super::wire::{
    CreateLoadBalancerJson, DatacenterJson, LoadBalancerDetailsJson,
    LoadBalancerListingWrapperJson, PoolJson, RequestStatusJson,
};
use crate::errors::InfraError;

/// Client for one authenticated session
pub struct LbaasClient {
    transport: Transport,
    credentials: Credentials,
}

impl LbaasClient {
    pub fn new(transport: Transport, credentials: Credentials) -> Self {
        Self { transport, credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn ensure_session(&self) -> Result<()> {
        if self.credentials.is_valid() {
            Ok(())
        } else {
            Err(LbError::MissingCredentials("no user is logged in".to_string()))
        }
    }

    fn lb_path(&self, datacenter: &str) -> String {
        format!("/{}/{}/loadbalancers", self.credentials.account_alias(), datacenter)
    }

    fn lb_item_path(&self, datacenter: &str, lb_id: &str) -> String {
        format!("{}/{lb_id}", self.lb_path(datacenter))
    }

    fn pools_path(&self, datacenter: &str, lb_id: &str) -> String {
        format!("{}/pools", self.lb_item_path(datacenter, lb_id))
    }

    fn pool_path(&self, datacenter: &str, lb_id: &str, pool_id: &str) -> String {
        format!("{}/{pool_id}", self.pools_path(datacenter, lb_id))
    }

    async fn get<R: serde::de::DeserializeOwned>(&mut self, host: Host, path: &str) -> Result<R> {
        self.transport
            .call(Method::GET, host, path, CallAuth::Session(&mut self.credentials), None)
            .await
    }
}

#[async_trait]
impl LoadBalancerApi for LbaasClient {
    fn username(&self) -> &str {
        self.credentials.username()
    }

    fn account_alias(&self) -> &str {
        self.credentials.account_alias()
    }

    fn location_alias(&self) -> &str {
        self.credentials.location_alias()
    }

    fn has_credentials(&self) -> bool {
        self.credentials.is_valid()
    }

    fn bearer_token(&self) -> &str {
        self.credentials.bearer_token()
    }

    fn logout(&mut self) {
        info!(user = self.credentials.username(), "logged out");
        self.credentials.clear();
    }

    #[instrument(skip(self))]
    async fn list_datacenters(&mut self) -> Result<Vec<Datacenter>> {
        self.ensure_session()?;
        let path = format!("/v2/datacenters/{}", self.credentials.account_alias());

        let datacenters: Vec<DatacenterJson> = self.get(Host::Account, &path).await?;
        debug!(count = datacenters.len(), "datacenters listed");
        Ok(datacenters.into_iter().map(Datacenter::from).collect())
    }

    #[instrument(skip(self, description))]
    async fn create_load_balancer(
        &mut self,
        datacenter: &str,
        name: &str,
        description: &str,
    ) -> Result<LoadBalancerCreationInfo> {
        self.ensure_session()?;
        let path = self.lb_path(datacenter);
        let body = to_body(&CreateLoadBalancerJson {
            name: name.to_string(),
            description: description.to_string(),
        })?;

        let status: RequestStatusJson = self
            .transport
            .call(
                Method::POST,
                Host::LoadBalancer,
                &path,
                CallAuth::Session(&mut self.credentials),
                Some(&body),
            )
            .await?;

        let info = creation_info(&status, LINK_REL_LOAD_BALANCER).ok_or_else(|| {
            LbError::AmbiguousCreation {
                datacenter: datacenter.to_string(),
                name: name.to_string(),
            }
        })?;

        info!(lb_id = %info.id, "load balancer creation requested");
        Ok(info)
    }

    #[instrument(skip(self))]
    async fn inspect_load_balancer(
        &mut self,
        datacenter: &str,
        lb_id: &str,
    ) -> Result<LoadBalancer> {
        self.ensure_session()?;
        let path = self.lb_item_path(datacenter, lb_id);

        let details: LoadBalancerDetailsJson = self.get(Host::LoadBalancer, &path).await?;
        Ok(LoadBalancer::from(details))
    }

    #[instrument(skip(self))]
    async fn delete_load_balancer(
        &mut self,
        datacenter: &str,
        lb_id: &str,
    ) -> Result<DeleteOutcome> {
        self.ensure_session()?;
        let path = self.lb_item_path(datacenter, lb_id);

        let result = self
            .transport
            .call_discarding_body(
                Method::DELETE,
                Host::LoadBalancer,
                &path,
                CallAuth::Session(&mut self.credentials),
                None,
            )
            .await;

        match result {
            Ok(()) => {
                info!("load balancer deleted");
                Ok(DeleteOutcome::Deleted)
            }
            Err(err) if err.is_not_found() => {
                info!("load balancer already absent");
                Ok(DeleteOutcome::AlreadyAbsent)
            }
            Err(err) => Err(err),
        }
    }

    #[instrument(skip(self))]
    async fn list_load_balancers(&mut self) -> Result<Vec<LoadBalancerSummary>> {
        self.ensure_session()?;
        let path = format!("/{}/loadbalancers", self.credentials.account_alias());

        let wrapper: LoadBalancerListingWrapperJson = self.get(Host::LoadBalancer, &path).await?;
        Ok(wrapper.values.into_iter().map(LoadBalancerSummary::from).collect())
    }

    #[instrument(skip(self, draft))]
    async fn create_pool(&mut self, datacenter: &str, lb_id: &str, draft: &Pool) -> Result<Pool> {
        self.ensure_session()?;
        let path = self.pools_path(datacenter, lb_id);

        let mut wire = PoolJson::from(draft);
        wire.id.clear();
        let body = to_body(&wire)?;

        let status: RequestStatusJson = self
            .transport
            .call(
                Method::POST,
                Host::LoadBalancer,
                &path,
                CallAuth::Session(&mut self.credentials),
                Some(&body),
            )
            .await?;

        let pool_id = find_link(&status.links, LINK_REL_POOL)
            .ok_or_else(|| LbError::PoolIdNotFound { lb_id: lb_id.to_string() })?
            .to_string();

        info!(%pool_id, "pool created");
        self.inspect_pool(datacenter, lb_id, &pool_id).await
    }

    #[instrument(skip(self, pool), fields(pool_id = %pool.id))]
    async fn update_pool(&mut self, datacenter: &str, lb_id: &str, pool: &Pool) -> Result<Pool> {
        self.ensure_session()?;
        if pool.is_draft() {
            return Err(LbError::InvalidPoolArgument("a pool id is required to update".into()));
        }
        let path = self.pool_path(datacenter, lb_id, &pool.id);
        let body = to_body(&PoolJson::from(pool))?;

        self.transport
            .call_discarding_body(
                Method::PUT,
                Host::LoadBalancer,
                &path,
                CallAuth::Session(&mut self.credentials),
                Some(&body),
            )
            .await?;

        info!("pool updated");
        self.inspect_pool(datacenter, lb_id, &pool.id).await
    }

    #[instrument(skip(self))]
    async fn delete_pool(&mut self, datacenter: &str, lb_id: &str, pool_id: &str) -> Result<()> {
        self.ensure_session()?;
        let path = self.pool_path(datacenter, lb_id, pool_id);

        self.transport
            .call_discarding_body(
                Method::DELETE,
                Host::LoadBalancer,
                &path,
                CallAuth::Session(&mut self.credentials),
                None,
            )
            .await?;

        info!("pool deleted");
        Ok(())
    }

    /// There is no single-pool endpoint; the owning load balancer is fetched
    /// and searched.
    #[instrument(skip(self))]
    async fn inspect_pool(&mut self, datacenter: &str, lb_id: &str, pool_id: &str) -> Result<Pool> {
        let lb = self.inspect_load_balancer(datacenter, lb_id).await?;

        lb.pool(pool_id).cloned().ok_or_else(|| LbError::PoolNotFound {
            lb_id: lb_id.to_string(),
            pool_id: pool_id.to_string(),
        })
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|err| LbError::from(InfraError::from(err)))
}
