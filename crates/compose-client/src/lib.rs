//! # compose-client
//!
//! Typed async client for the Compose database provisioning API
//! (`https://api.compose.io/2016-07`).
//!
//! Every call is a single request/response round trip: the bearer token is
//! attached, a status above 202 is returned as a [`ComposeError`] carrying
//! the response body, and JSON is decoded into the types in [`types`].
//! Collection endpoints unwrap the HAL `_embedded` envelope for you.
//!
//! ```no_run
//! use compose_client::ComposeClient;
//!
//! # async fn run() -> compose_client::Result<()> {
//! let client = ComposeClient::from_env()?;
//! for deployment in client.get_deployments().await? {
//!     println!("{} ({})", deployment.name, deployment.deployment_type);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
mod endpoints;
pub mod error;
pub mod types;

pub use client::{
    API_URL_ENV_VAR, ComposeClient, ComposeClientBuilder, TOKEN_ENV_VAR, api_token_from_env,
    default_api_url,
};
pub use error::{ComposeError, Result};
pub use types::{
    Account, Cluster, ComposeResponse, ConnectionStrings, CreateDeploymentRequest, Datacenter,
    Deployment, Embedded, Link, Links, Recipe, Scalings, Version,
};
