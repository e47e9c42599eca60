//! Wire shapes of the remote JSON API
//!
//! These mirror the provider's field names and optionality and never leave
//! the `api` module; [`super::mapping`] converts them to and from domain
//! records. Missing or `null` fields decode to their zero value.

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `POST /v2/authentication/login` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /v2/authentication/login` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub account_alias: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location_alias: String,
    #[serde(deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub bearer_token: String,
}

/// Entry of `GET /v2/datacenters/<account>`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatacenterJson {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// Reference to a resource created or touched by a request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkJson {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub rel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(
        rename = "resourceId",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub resource_id: String,
}

/// Asynchronous request record returned by create calls
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestStatusJson {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub request_date: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub completion_date: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub links: Vec<LinkJson>,
}

/// `POST /<account>/<dc>/loadbalancers` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLoadBalancerJson {
    pub name: String,
    pub description: String,
}

/// Entry of `GET /<account>/loadbalancers`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoadBalancerListingJson {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "publicIPAddress", deserialize_with = "null_as_default")]
    pub public_ip_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data_center: String,
}

/// `GET /<account>/loadbalancers`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadBalancerListingWrapperJson {
    #[serde(deserialize_with = "null_as_default")]
    pub values: Vec<LoadBalancerListingJson>,
}

/// `GET /<account>/<dc>/loadbalancers/<id>`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoadBalancerDetailsJson {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "publicIPAddress", deserialize_with = "null_as_default")]
    pub public_ip_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data_center: String,
    pub pools: Option<Vec<PoolJson>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeJson {
    #[serde(deserialize_with = "null_as_default")]
    pub ip_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub private_port: u16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HealthCheckJson {
    #[serde(deserialize_with = "null_as_default")]
    pub unhealthy_threshold: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub healthy_threshold: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub interval_seconds: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub target_port: u16,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub mode: String,
}

/// Pool as returned inside load-balancer details, and as sent on
/// create/update (where an empty id is omitted)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoolJson {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub port: u16,
    #[serde(deserialize_with = "null_as_default")]
    pub load_balancing_method: String,
    #[serde(deserialize_with = "null_as_default")]
    pub persistence: String,
    #[serde(deserialize_with = "null_as_default")]
    pub idle_timeout: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub load_balancing_mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheckJson>,
    pub nodes: Option<Vec<NodeJson>>,
}
