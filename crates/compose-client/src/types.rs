//! Data types mirroring the Compose API's JSON shapes
//!
//! Collections come back wrapped in a HAL envelope (`{"_embedded": {...}}`),
//! single resources come back bare. Request bodies for deployment mutations
//! are wrapped as `{"deployment": {...}}`.

use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` as the type's default, the same as an absent key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

/// HAL envelope returned by collection endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComposeResponse {
    #[serde(rename = "_embedded", default, deserialize_with = "null_as_default")]
    pub embedded: Embedded,
}

/// Embedded collections, keyed by resource type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Embedded {
    #[serde(deserialize_with = "null_as_default")]
    pub accounts: Vec<Account>,
    #[serde(deserialize_with = "null_as_default")]
    pub deployments: Vec<Deployment>,
    #[serde(deserialize_with = "null_as_default")]
    pub recipes: Vec<Recipe>,
    #[serde(deserialize_with = "null_as_default")]
    pub clusters: Vec<Cluster>,
    /// Available upgrade transitions for a deployment
    #[serde(rename = "transitions", deserialize_with = "null_as_default")]
    pub versions: Vec<Version>,
    #[serde(deserialize_with = "null_as_default")]
    pub datacenters: Vec<Datacenter>,
}

/// An account the token has access to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// A provisioned database deployment
///
/// Empty fields are omitted when serialized, matching what the API sends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deployment {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub account_id: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub created_at: String,
    /// Database type, e.g. `mongodb`, `redis`, `postgresql`
    #[serde(
        rename = "type",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default",
    )]
    pub deployment_type: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub datacenter: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub units: u32,
    #[serde(skip_serializing_if = "std::ops::Not::not", deserialize_with = "null_as_default")]
    pub ssl: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not", deserialize_with = "null_as_default")]
    pub wired_tiger: bool,
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub provision_recipe_id: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub ca_certificate_base64: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_strings: Option<ConnectionStrings>,
}

/// Connection strings grouped by purpose
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionStrings {
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub health: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub ssh: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub admin: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub ssh_admin: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub cli: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub direct: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    #[serde(deserialize_with = "null_as_default")]
    pub compose_web_ui: Link,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub href: String,
    #[serde(skip_serializing_if = "std::ops::Not::not", deserialize_with = "null_as_default")]
    pub templated: bool,
}

/// A recipe is the API's handle on an asynchronous operation
/// (provision, scale, upgrade, deprovision)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub template: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status_detail: String,
    #[serde(deserialize_with = "null_as_default")]
    pub account_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub deployment_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cluster {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub account_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(
        rename = "type",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default",
    )]
    pub cluster_type: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub provider: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub multitenant: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub account_slug: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub subdomain: String,
}

/// An upgrade transition available to a deployment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Version {
    #[serde(deserialize_with = "null_as_default")]
    pub application: String,
    #[serde(deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(deserialize_with = "null_as_default")]
    pub from_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub to_version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Datacenter {
    #[serde(deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(deserialize_with = "null_as_default")]
    pub provider: String,
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
}

/// Unit allocation for a deployment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scalings {
    #[serde(deserialize_with = "null_as_default")]
    pub allocated_units: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub used_units: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub starting_units: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub minimum_units: u32,
}

/// Request wrapper: the API expects mutations under a `deployment` key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentEnvelope<T> {
    pub deployment: T,
}

impl<T> DeploymentEnvelope<T> {
    pub fn new(deployment: T) -> Self {
        Self { deployment }
    }
}

/// Parameters for provisioning a new deployment
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateDeploymentRequest {
    pub account_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub deployment_type: String,
    pub datacenter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub ssl: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub wired_tiger: bool,
}

impl CreateDeploymentRequest {
    pub fn new(
        account_id: impl Into<String>,
        name: impl Into<String>,
        deployment_type: impl Into<String>,
        datacenter: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            name: name.into(),
            deployment_type: deployment_type.into(),
            datacenter: datacenter.into(),
            ..Default::default()
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn units(mut self, units: u32) -> Self {
        self.units = Some(units);
        self
    }

    pub fn ssl(mut self, ssl: bool) -> Self {
        self.ssl = ssl;
        self
    }

    /// MongoDB only
    pub fn wired_tiger(mut self, wired_tiger: bool) -> Self {
        self.wired_tiger = wired_tiger;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleParams {
    pub units: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeParams {
    pub version: String,
}
