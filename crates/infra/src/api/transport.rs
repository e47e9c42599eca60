//! Authenticated transport
//!
//! Performs one JSON request against one of the two service hosts. A 401 on a
//! session call triggers a single re-authentication with the session's stored
//! username and password and, if that yields a valid session, a single replay
//! of the original request with the new token.

use lbctl_domain::{Config, Credentials, LbError, Result};
use reqwest::header::{AUTHORIZATION, CONNECTION, CONTENT_TYPE, HOST};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::auth;
use crate::errors::InfraError;
use crate::http::HttpClient;

const DUMP_TARGET: &str = "lbctl::http";

/// Which of the two service hosts a call goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    /// Login and datacenter directory
    Account,
    /// Load balancers and pools
    LoadBalancer,
}

/// How a call authenticates
#[derive(Debug)]
pub enum CallAuth<'a> {
    /// The login call itself: no session check, no `Authorization` header
    Login,
    /// A session call, renewed in place on 401
    Session(&'a mut Credentials),
}

/// Status and body of one HTTP exchange
#[derive(Debug)]
pub(crate) struct Reply {
    pub status: StatusCode,
    pub body: String,
}

/// Signed JSON calls against the account and load-balancer hosts
#[derive(Clone)]
pub struct Transport {
    http: HttpClient,
    account_api_url: String,
    lb_api_url: String,
    login_path: String,
    close_connections: bool,
    debug_requests: bool,
    debug_responses: bool,
}

impl Transport {
    /// Build a transport from configuration
    ///
    /// # Errors
    /// Returns `LbError::Config` if the HTTP client cannot be created
    pub fn new(config: &Config) -> Result<Self> {
        let http = HttpClient::from_config(&config.http)?;

        Ok(Self {
            http,
            account_api_url: config.api.account_api_url.trim_end_matches('/').to_string(),
            lb_api_url: config.api.lb_api_url.trim_end_matches('/').to_string(),
            login_path: config.api.login_path.clone(),
            close_connections: config.http.close_connections,
            debug_requests: config.http.debug_requests,
            debug_responses: config.http.debug_responses,
        })
    }

    pub fn base_url(&self, host: Host) -> &str {
        match host {
            Host::Account => &self.account_api_url,
            Host::LoadBalancer => &self.lb_api_url,
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Perform a call and decode the response body into `R`
    ///
    /// # Errors
    /// - `MissingCredentials` for a session call without a valid session
    /// - `Transport` when no HTTP status was received
    /// - `Remote` for a final status outside 2xx
    /// - `Decode` when the body does not match `R`
    pub async fn call<R: DeserializeOwned>(
        &self,
        method: Method,
        host: Host,
        path: &str,
        auth: CallAuth<'_>,
        body: Option<&Value>,
    ) -> Result<R> {
        let reply = self.exchange(method, host, path, auth, body).await?;
        serde_json::from_str(&reply.body).map_err(|err| LbError::from(InfraError::from(err)))
    }

    /// Perform a call whose response body is not needed
    pub async fn call_discarding_body(
        &self,
        method: Method,
        host: Host,
        path: &str,
        auth: CallAuth<'_>,
        body: Option<&Value>,
    ) -> Result<()> {
        self.exchange(method, host, path, auth, body).await.map(|_| ())
    }

    #[instrument(skip_all, fields(%method, ?host, path = %path))]
    async fn exchange(
        &self,
        method: Method,
        host: Host,
        path: &str,
        auth: CallAuth<'_>,
        body: Option<&Value>,
    ) -> Result<Reply> {
        let reply = match auth {
            CallAuth::Login => self.dispatch(method.clone(), host, path, None, body).await?,
            CallAuth::Session(credentials) => {
                if !credentials.is_valid() {
                    return Err(LbError::MissingCredentials(
                        "no valid session, log in first".to_string(),
                    ));
                }

                let reply = self
                    .dispatch(method.clone(), host, path, Some(credentials.bearer_token()), body)
                    .await?;

                if reply.status == StatusCode::UNAUTHORIZED {
                    info!("bearer token rejected, re-authenticating");
                    if auth::reauthenticate(self, credentials).await {
                        self.dispatch(
                            method.clone(),
                            host,
                            path,
                            Some(credentials.bearer_token()),
                            body,
                        )
                        .await?
                    } else {
                        reply
                    }
                } else {
                    reply
                }
            }
        };

        if !reply.status.is_success() {
            let url = self.url(host, path);
            if !self.debug_requests || !self.debug_responses {
                warn!(
                    %method, %url, status = %reply.status, body = %reply.body,
                    "HTTP call failed"
                );
            }
            return Err(status_error(&method, &url, &reply));
        }

        Ok(reply)
    }

    /// One HTTP exchange. Sends the bearer token when given one; never
    /// re-authenticates.
    pub(crate) async fn dispatch(
        &self,
        method: Method,
        host: Host,
        path: &str,
        bearer_token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Reply> {
        let url = self.url(host, path);
        let parsed = Url::parse(&url)
            .map_err(|err| LbError::Config(format!("invalid request URL {url}: {err}")))?;

        let mut request = self
            .http
            .request(method.clone(), parsed.clone())
            .header(HOST, authority(&parsed));

        if let Some(token) = bearer_token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        if self.close_connections {
            request = request.header(CONNECTION, "close");
        }

        let payload = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|err| LbError::from(InfraError::from(err)))?;

        if self.debug_requests {
            if let Some(token) = bearer_token {
                debug!(
                    target: DUMP_TARGET,
                    "{method} {url}\nAuthorization: Bearer {token}\n{}",
                    payload.as_deref().unwrap_or_default()
                );
            } else {
                // unauthenticated calls carry the password
                debug!(target: DUMP_TARGET, "auth request: {method} {url}");
            }
        }

        if let Some(payload) = payload {
            request = request.header(CONTENT_TYPE, "application/json").body(payload);
        }

        let response = self.http.send(request).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| LbError::Transport(format!("failed to read response body: {err}")))?;

        if self.debug_responses {
            debug!(target: DUMP_TARGET, "{status} {url}\n{body}");
        }

        Ok(Reply { status, body })
    }

    fn url(&self, host: Host, path: &str) -> String {
        format!("{}{}", self.base_url(host), path)
    }
}

fn authority(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

fn status_error(method: &Method, url: &str, reply: &Reply) -> LbError {
    let message = if reply.body.is_empty() {
        format!("{method} {url} returned status {}", reply.status)
    } else {
        format!("{method} {url} returned status {}: {}", reply.status, reply.body)
    };
    LbError::remote(reply.status.as_u16(), message)
}
