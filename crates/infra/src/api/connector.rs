//! Opens HTTP-backed sessions

use async_trait::async_trait;
use lbctl_core::{LoadBalancerApi, SessionConnector, SessionMaterial};
use lbctl_domain::{Config, Result};

use super::auth::AuthService;
use super::client::LbaasClient;
use super::transport::Transport;

/// [`SessionConnector`] that talks to the real service
///
/// Each session gets its own transport built from the same configuration.
#[derive(Debug, Clone)]
pub struct HttpSessionConnector {
    config: Config,
}

impl HttpSessionConnector {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl SessionConnector for HttpSessionConnector {
    async fn login(&self, username: &str, password: &str) -> Result<Box<dyn LoadBalancerApi>> {
        let transport = Transport::new(&self.config)?;
        let credentials = AuthService::new(&transport).login(username, password).await?;
        Ok(Box::new(LbaasClient::new(transport, credentials)))
    }

    async fn restore(&self, material: &SessionMaterial) -> Result<Box<dyn LoadBalancerApi>> {
        let transport = Transport::new(&self.config)?;
        let credentials = AuthService::new(&transport).from_external_state(material).await?;
        Ok(Box::new(LbaasClient::new(transport, credentials)))
    }
}
