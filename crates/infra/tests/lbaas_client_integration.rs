//! Integration tests for the load-balancer client
//!
//! **Coverage:**
//! - Pool create/inspect round trip through the wire format
//! - Datacenter id normalization
//! - Idempotent load-balancer delete
//! - Token expiry: re-authentication, replay, and failure paths
//! - Pool creation without a returned pool id
//!
//! **Infrastructure:**
//! - WireMock HTTP server standing in for both service hosts
//! - Sessions opened through `HttpSessionConnector`

#[path = "support.rs"]
mod support;

use lbctl_core::PoolFields;
use lbctl_domain::{DeleteOutcome, HealthCheck, LbError, Pool, PoolNode};
use serde_json::json;
use support::{
    lb_details, login_response, login_session, mount_login, token_session, ACCOUNT, LOCATION,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LB_PATH: &str = "/ACCT/VA1/loadbalancers/lb-1";

#[tokio::test]
async fn created_pool_round_trips_parsed_fields() {
    let server = MockServer::start().await;
    mount_login(&server, "token-1", 1).await;

    Mock::given(method("POST"))
        .and(path(format!("{LB_PATH}/pools")))
        .and(body_json(json!({
            "port": 9090,
            "loadBalancingMethod": "leastconn",
            "persistence": "none",
            "idleTimeout": 1000,
            "loadBalancingMode": "tcp",
            "nodes": [
                {"ipAddress": "10.0.0.1", "privatePort": 80},
                {"ipAddress": "10.0.0.2", "privatePort": 80}
            ]
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "id": "req-1",
            "links": [{"rel": "pool", "resourceId": "pool-1"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(LB_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(lb_details(json!([{
            "id": "pool-1",
            "port": 9090,
            "loadBalancingMethod": "leastconn",
            "persistence": "none",
            "idleTimeout": 1000,
            "loadBalancingMode": "tcp",
            "nodes": [
                {"ipAddress": "10.0.0.1", "privatePort": 80},
                {"ipAddress": "10.0.0.2", "privatePort": 80}
            ]
        }]))))
        .expect(1)
        .mount(&server)
        .await;

    let args = ["port=9090", "method=leastconn", "nodes=10.0.0.1,10.0.0.2", "target=80"];
    let draft = PoolFields::parse(&args).unwrap().into_draft("lb-1");

    let mut session = login_session(&server).await;
    let pool = session.create_pool(LOCATION, "lb-1", &draft).await.unwrap();

    assert_eq!(pool.id, "pool-1");
    assert_eq!(pool.incoming_port, 9090);
    assert_eq!(pool.method, "leastconn");
    assert_eq!(pool.nodes, vec![PoolNode::new("10.0.0.1", 80), PoolNode::new("10.0.0.2", 80)]);
    assert!(pool.health_check.is_none());
}

#[tokio::test]
async fn health_check_is_sent_and_mapped_back() {
    let server = MockServer::start().await;
    mount_login(&server, "token-1", 1).await;

    let health = json!({
        "unhealthyThreshold": 3,
        "healthyThreshold": 2,
        "intervalSeconds": 10,
        "targetPort": 8443,
        "mode": "http"
    });

    Mock::given(method("PUT"))
        .and(path(format!("{LB_PATH}/pools/pool-1")))
        .and(body_json(json!({
            "id": "pool-1",
            "port": 443,
            "loadBalancingMethod": "roundrobin",
            "persistence": "none",
            "idleTimeout": 1000,
            "loadBalancingMode": "tcp",
            "healthCheck": health,
            "nodes": []
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(LB_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(lb_details(json!([{
            "id": "pool-1",
            "port": 443,
            "healthCheck": health
        }]))))
        .mount(&server)
        .await;

    let pool = Pool {
        id: "pool-1".into(),
        lb_id: "lb-1".into(),
        incoming_port: 443,
        health_check: Some(HealthCheck {
            unhealthy_threshold: 3,
            healthy_threshold: 2,
            interval_seconds: 10,
            target_port: 8443,
            mode: "http".into(),
        }),
        ..Pool::default()
    };

    let mut session = login_session(&server).await;
    let updated = session.update_pool(LOCATION, "lb-1", &pool).await.unwrap();
    assert_eq!(updated.health_check, pool.health_check);
    assert!(updated.nodes.is_empty());
}

#[tokio::test]
async fn datacenter_ids_are_upper_case() {
    let server = MockServer::start().await;
    mount_login(&server, "token-1", 1).await;

    Mock::given(method("GET"))
        .and(path(format!("/v2/datacenters/{ACCOUNT}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "va1", "name": "US East (Sterling)"},
            {"id": "gb3", "name": "UK (Slough)"}
        ])))
        .mount(&server)
        .await;

    let mut session = login_session(&server).await;
    let datacenters = session.list_datacenters().await.unwrap();

    assert!(datacenters.iter().all(|dc| dc.id == dc.id.to_uppercase()));
    assert_eq!(datacenters[1].id, "GB3");
}

#[tokio::test]
async fn deleting_missing_load_balancer_is_not_an_error() {
    let server = MockServer::start().await;
    mount_login(&server, "token-1", 1).await;

    Mock::given(method("DELETE"))
        .and(path(LB_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let mut session = login_session(&server).await;
    let outcome = session.delete_load_balancer(LOCATION, "lb-1").await.unwrap();
    assert_eq!(outcome, DeleteOutcome::AlreadyAbsent);
}

#[tokio::test]
async fn load_balancer_without_pools_has_empty_pool_list() {
    let server = MockServer::start().await;
    let mut session = token_session(&server, "token-1").await;

    Mock::given(method("GET"))
        .and(path(LB_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "lb-1",
            "name": "web",
            "dataCenter": LOCATION
        })))
        .mount(&server)
        .await;

    let lb = session.inspect_load_balancer(LOCATION, "lb-1").await.unwrap();
    assert!(lb.pools.is_empty());
}

#[tokio::test]
async fn expired_token_is_renewed_and_request_replayed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/authentication/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_response("token-1")))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    let mut session = login_session(&server).await;

    Mock::given(method("POST"))
        .and(path("/v2/authentication/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_response("token-2")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ACCT/loadbalancers"))
        .and(header("authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ACCT/loadbalancers"))
        .and(header("authorization", "Bearer token-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "values": [{"id": "lb-1", "name": "web", "dataCenter": LOCATION}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let lbs = session.list_load_balancers().await.unwrap();
    assert_eq!(lbs.len(), 1);
    assert_eq!(session.bearer_token(), "token-2");
    assert!(session.has_credentials());
}

#[tokio::test]
async fn failed_renewal_invalidates_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/authentication/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_response("token-1")))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let mut session = login_session(&server).await;

    Mock::given(method("POST"))
        .and(path("/v2/authentication/login"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ACCT/loadbalancers"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let err = session.list_load_balancers().await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));
    assert!(!session.has_credentials());

    // invalid session: no further requests
    let err = session.list_datacenters().await.unwrap_err();
    assert!(matches!(err, LbError::MissingCredentials(_)));
}

#[tokio::test]
async fn token_only_session_is_invalidated_by_401() {
    let server = MockServer::start().await;
    mount_login(&server, "unused", 0).await;

    Mock::given(method("GET"))
        .and(path("/ACCT/loadbalancers"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = token_session(&server, "expired").await;
    let err = session.list_load_balancers().await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));
    assert!(!session.has_credentials());

    let err = session.list_load_balancers().await.unwrap_err();
    assert!(matches!(err, LbError::MissingCredentials(_)));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn pool_create_without_pool_link_fails_before_inspect() {
    let server = MockServer::start().await;
    mount_login(&server, "token-1", 1).await;

    Mock::given(method("POST"))
        .and(path(format!("{LB_PATH}/pools")))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "links": [{"rel": "status", "resourceId": "req-1"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(LB_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(lb_details(json!([]))))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = login_session(&server).await;
    let err = session.create_pool(LOCATION, "lb-1", &Pool::default()).await.unwrap_err();
    assert_eq!(err, LbError::PoolIdNotFound { lb_id: "lb-1".into() });
}
