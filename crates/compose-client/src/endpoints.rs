//! Typed accessors for each Compose API resource

use std::borrow::Cow;

use reqwest::Method;
use tracing::{debug, info};

use crate::client::ComposeClient;
use crate::error::Result;
use crate::types::{
    Account, Cluster, ComposeResponse, CreateDeploymentRequest, Datacenter, Deployment,
    DeploymentEnvelope, Recipe, ScaleParams, Scalings, UpgradeParams, Version,
};

/// Encode an identifier as a single path segment
fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

impl ComposeClient {
    async fn get_embedded(&self, path: &str) -> Result<ComposeResponse> {
        self.request(Method::GET, path, None).await
    }

    /// List accounts visible to the token
    pub async fn get_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.get_embedded("/accounts").await?.embedded.accounts)
    }

    /// List all deployments across the token's accounts
    pub async fn get_deployments(&self) -> Result<Vec<Deployment>> {
        Ok(self.get_embedded("/deployments").await?.embedded.deployments)
    }

    /// Fetch a single deployment, including its connection strings
    pub async fn get_deployment(&self, deployment_id: &str) -> Result<Deployment> {
        let path = format!("/deployments/{}", segment(deployment_id));
        self.request(Method::GET, &path, None).await
    }

    /// Provision a new deployment
    ///
    /// Returns the provisioning recipe; the deployment itself is created
    /// asynchronously by the platform.
    pub async fn create_deployment(&self, request: &CreateDeploymentRequest) -> Result<Recipe> {
        info!(
            "Creating {} deployment '{}' in account {}",
            request.deployment_type, request.name, request.account_id
        );
        let body = Self::encode(&DeploymentEnvelope::new(request))?;
        self.request(Method::POST, "/deployments", Some(body)).await
    }

    /// Deprovision a deployment, returning the deprovision recipe
    pub async fn delete_deployment(&self, deployment_id: &str) -> Result<Recipe> {
        info!("Deleting deployment {}", deployment_id);
        let path = format!("/deployments/{}", segment(deployment_id));
        self.request(Method::DELETE, &path, None).await
    }

    pub async fn get_recipe(&self, recipe_id: &str) -> Result<Recipe> {
        let path = format!("/recipes/{}", segment(recipe_id));
        self.request(Method::GET, &path, None).await
    }

    /// Recipes that have run against a deployment
    pub async fn get_deployment_recipes(&self, deployment_id: &str) -> Result<Vec<Recipe>> {
        let path = format!("/deployments/{}/recipes", segment(deployment_id));
        Ok(self.get_embedded(&path).await?.embedded.recipes)
    }

    pub async fn get_clusters(&self) -> Result<Vec<Cluster>> {
        Ok(self.get_embedded("/clusters").await?.embedded.clusters)
    }

    /// Version upgrades available to a deployment
    pub async fn get_deployment_versions(&self, deployment_id: &str) -> Result<Vec<Version>> {
        let path = format!("/deployments/{}/versions", segment(deployment_id));
        Ok(self.get_embedded(&path).await?.embedded.versions)
    }

    pub async fn get_datacenters(&self) -> Result<Vec<Datacenter>> {
        Ok(self.get_embedded("/datacenters").await?.embedded.datacenters)
    }

    pub async fn get_deployment_scalings(&self, deployment_id: &str) -> Result<Scalings> {
        let path = format!("/deployments/{}/scalings", segment(deployment_id));
        self.request(Method::GET, &path, None).await
    }

    /// Set the number of units allocated to a deployment
    pub async fn scale_deployment(&self, deployment_id: &str, units: u32) -> Result<Recipe> {
        debug!("Scaling deployment {} to {} units", deployment_id, units);
        let path = format!("/deployments/{}/scalings", segment(deployment_id));
        let body = Self::encode(&DeploymentEnvelope::new(ScaleParams { units }))?;
        self.request(Method::POST, &path, Some(body)).await
    }

    /// Upgrade a deployment to `version`
    pub async fn upgrade_deployment(&self, deployment_id: &str, version: &str) -> Result<Recipe> {
        debug!("Upgrading deployment {} to {}", deployment_id, version);
        let path = format!("/deployments/{}/versions", segment(deployment_id));
        let body = Self::encode(&DeploymentEnvelope::new(UpgradeParams {
            version: version.to_string(),
        }))?;
        self.request(Method::PATCH, &path, Some(body)).await
    }
}
