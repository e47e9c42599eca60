//! Authentication: login, session restoration and in-place renewal

use lbctl_core::SessionMaterial;
use lbctl_domain::{Credentials, LbError, Result};
use reqwest::Method;
use tracing::{debug, info, instrument, warn};

use super::transport::{CallAuth, Host, Transport};
use super::wire::{LoginRequest, LoginResponse};
use crate::errors::InfraError;

/// Exchanges usernames and passwords for sessions
pub struct AuthService<'a> {
    transport: &'a Transport,
}

impl<'a> AuthService<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Log in and return a fresh session
    ///
    /// The session keeps `password` so an expired token can be renewed.
    ///
    /// # Errors
    /// - `MissingCredentials` if either argument is empty
    /// - Any transport error from the login call
    /// - `Decode` if the response has no account alias or token
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<Credentials> {
        if username.is_empty() || password.is_empty() {
            return Err(LbError::MissingCredentials(
                "username and/or password not provided".to_string(),
            ));
        }

        let request = login_body(username, password)?;
        let response: LoginResponse = self
            .transport
            .call(
                Method::POST,
                Host::Account,
                self.transport.login_path(),
                CallAuth::Login,
                Some(&request),
            )
            .await
            .inspect_err(|err| warn!(error = %err, "login failed"))?;

        let username =
            if response.username.is_empty() { username.to_string() } else { response.username };
        let credentials = Credentials::new(
            username,
            password,
            response.account_alias,
            response.location_alias,
            response.bearer_token,
        );

        if !credentials.is_valid() {
            return Err(LbError::Decode(
                "login response did not include an account alias and bearer token".to_string(),
            ));
        }

        info!(
            user = credentials.username(),
            account = credentials.account_alias(),
            location = credentials.location_alias(),
            "logged in"
        );
        Ok(credentials)
    }

    /// Rebuild a session from previously issued values
    ///
    /// With username, account, location and token all present no call is
    /// made. Otherwise a username and password fall back to [`Self::login`].
    ///
    /// # Errors
    /// `MissingCredentials` if neither set of values is complete
    pub async fn from_external_state(&self, material: &SessionMaterial) -> Result<Credentials> {
        if let Some((username, account, location, token)) = material.token_parts() {
            debug!(user = username, account, "restoring session from token material");
            return Ok(Credentials::from_token(username, account, location, token));
        }

        if let Some((username, password)) = material.login_parts() {
            debug!(user = username, "token material incomplete, logging in");
            return self.login(username, password).await;
        }

        Err(LbError::MissingCredentials(format!(
            "session values incomplete: {}",
            missing_fields(material).join(", ")
        )))
    }
}

/// Renew `credentials` in place after the service rejected its token
///
/// Alias and token are cleared before the attempt so a failure leaves the
/// session invalid. A session without a password is invalidated without a
/// login call. Returns whether the session is valid afterwards.
pub(crate) async fn reauthenticate(transport: &Transport, credentials: &mut Credentials) -> bool {
    credentials.invalidate_token();

    let Some(password) = credentials.password().map(str::to_string) else {
        warn!(user = credentials.username(), "session has no password, cannot re-authenticate");
        return false;
    };
    let username = credentials.username().to_string();

    let request = match login_body(&username, &password) {
        Ok(request) => request,
        Err(err) => {
            warn!(error = %err, "could not build re-authentication request");
            return false;
        }
    };

    let reply = match transport
        .dispatch(Method::POST, Host::Account, transport.login_path(), None, Some(&request))
        .await
    {
        Ok(reply) => reply,
        Err(err) => {
            warn!(error = %err, "re-authentication request failed");
            return false;
        }
    };

    if !reply.status.is_success() {
        warn!(status = %reply.status, "re-authentication rejected");
        return false;
    }

    match serde_json::from_str::<LoginResponse>(&reply.body) {
        Ok(response) => {
            credentials.refresh(
                response.account_alias,
                response.location_alias,
                response.bearer_token,
            );
            info!(user = %username, "session renewed");
        }
        Err(err) => warn!(error = %err, "re-authentication response could not be decoded"),
    }

    credentials.is_valid()
}

fn login_body(username: &str, password: &str) -> Result<serde_json::Value> {
    serde_json::to_value(LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    })
    .map_err(|err| LbError::from(InfraError::from(err)))
}

fn missing_fields(material: &SessionMaterial) -> Vec<&'static str> {
    use lbctl_domain::constants::{
        ENV_ACCOUNT, ENV_LOCATION, ENV_PASSWORD, ENV_TOKEN, ENV_USERNAME,
    };

    let fields = [
        (ENV_USERNAME, &material.username),
        (ENV_ACCOUNT, &material.account_alias),
        (ENV_LOCATION, &material.location_alias),
        (ENV_TOKEN, &material.bearer_token),
        (ENV_PASSWORD, &material.password),
    ];

    fields
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(name, _)| name)
        .collect()
}
