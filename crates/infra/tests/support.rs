//! Shared helpers for integration tests against a mock service

use lbctl_core::{LoadBalancerApi, SessionConnector, SessionMaterial};
use lbctl_domain::Config;
use lbctl_infra::HttpSessionConnector;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "jdoe";
pub const PASSWORD: &str = "secret";
pub const ACCOUNT: &str = "ACCT";
pub const LOCATION: &str = "VA1";

/// Connector with both hosts pointed at `server`
pub fn connector_for(server: &MockServer) -> HttpSessionConnector {
    HttpSessionConnector::new(Config::single_host(server.uri()))
}

/// Answer the login call for `USERNAME`/`PASSWORD` with `token`
pub async fn mount_login(server: &MockServer, token: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/v2/authentication/login"))
        .and(body_json(json!({"username": USERNAME, "password": PASSWORD})))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_response(token)))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub fn login_response(token: &str) -> Value {
    json!({
        "username": USERNAME,
        "accountAlias": ACCOUNT,
        "locationAlias": LOCATION,
        "roles": ["AccountAdmin"],
        "bearerToken": token
    })
}

/// Session logged in with a password, so it can re-authenticate
pub async fn login_session(server: &MockServer) -> Box<dyn LoadBalancerApi> {
    connector_for(server).login(USERNAME, PASSWORD).await.expect("login should succeed")
}

/// Session restored from token material only, without a password
pub async fn token_session(server: &MockServer, token: &str) -> Box<dyn LoadBalancerApi> {
    let material = SessionMaterial {
        username: Some(USERNAME.into()),
        account_alias: Some(ACCOUNT.into()),
        location_alias: Some(LOCATION.into()),
        bearer_token: Some(token.into()),
        password: None,
    };
    connector_for(server).restore(&material).await.expect("restore should succeed")
}

pub fn lb_details(pools: Value) -> Value {
    json!({
        "id": "lb-1",
        "status": "ACTIVE",
        "name": "web",
        "description": "front end",
        "publicIPAddress": "203.0.113.9",
        "dataCenter": LOCATION,
        "pools": pools
    })
}
