//! Deployment command implementations

use super::{confirm, output_error};
use crate::cli::{self, DeploymentCommands};
use crate::connection::ConnectionManager;
use crate::error::Result as CliResult;
use crate::output::{OutputFormat, print_output};
use compose_client::CreateDeploymentRequest;
use tracing::{debug, info};

pub async fn handle_deployment_command(
    cmd: &DeploymentCommands,
    conn_mgr: &ConnectionManager,
    profile_name: Option<&str>,
    output: cli::OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    let client = conn_mgr.create_client(profile_name)?;
    let single = OutputFormat::resolve(output, OutputFormat::Json);
    let listing = OutputFormat::resolve(output, OutputFormat::Table);

    let result = match cmd {
        DeploymentCommands::List => {
            let deployments = client.get_deployments().await?;
            debug!("Fetched {} deployments", deployments.len());
            print_output(deployments, listing, query)
        }
        DeploymentCommands::Get { id } => {
            let deployment = client.get_deployment(id).await?;
            print_output(deployment, single, query)
        }
        DeploymentCommands::Create {
            account_id,
            name,
            deployment_type,
            datacenter,
            version,
            units,
            ssl,
            wired_tiger,
        } => {
            let request = build_create_request(
                account_id,
                name,
                deployment_type,
                datacenter,
                version.as_deref(),
                *units,
                *ssl,
                *wired_tiger,
            );
            info!("Creating {} deployment '{}' in {}", deployment_type, name, datacenter);
            let recipe = client.create_deployment(&request).await?;
            print_output(recipe, single, query)
        }
        DeploymentCommands::Delete { id, yes } => {
            if !*yes && !confirm(&format!("Deprovision deployment '{}'?", id))? {
                println!("Deletion cancelled.");
                return Ok(());
            }
            info!("Deprovisioning deployment {}", id);
            let recipe = client.delete_deployment(id).await?;
            print_output(recipe, single, query)
        }
        DeploymentCommands::Recipes { id } => {
            let recipes = client.get_deployment_recipes(id).await?;
            print_output(recipes, listing, query)
        }
        DeploymentCommands::Versions { id } => {
            let versions = client.get_deployment_versions(id).await?;
            print_output(versions, listing, query)
        }
        DeploymentCommands::Scalings { id } => {
            let scalings = client.get_deployment_scalings(id).await?;
            print_output(scalings, single, query)
        }
        DeploymentCommands::Scale { id, units } => {
            info!("Scaling deployment {} to {} units", id, units);
            let recipe = client.scale_deployment(id, *units).await?;
            print_output(recipe, single, query)
        }
        DeploymentCommands::Upgrade { id, version } => {
            info!("Upgrading deployment {} to {}", id, version);
            let recipe = client.upgrade_deployment(id, version).await?;
            print_output(recipe, single, query)
        }
    };
    result.map_err(output_error)
}

#[allow(clippy::too_many_arguments)]
fn build_create_request(
    account_id: &str,
    name: &str,
    deployment_type: &str,
    datacenter: &str,
    version: Option<&str>,
    units: Option<u32>,
    ssl: bool,
    wired_tiger: bool,
) -> CreateDeploymentRequest {
    let mut request = CreateDeploymentRequest::new(account_id, name, deployment_type, datacenter)
        .ssl(ssl)
        .wired_tiger(wired_tiger);
    if let Some(version) = version {
        request = request.version(version);
    }
    if let Some(units) = units {
        request = request.units(units);
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_create_request_minimal() {
        let request =
            build_create_request("a1", "orders", "mongodb", "aws:us-east-1", None, None, false, false);
        assert_eq!(request.version, None);
        assert_eq!(request.units, None);
        assert!(!request.ssl);
    }

    #[test]
    fn test_build_create_request_full() {
        let request = build_create_request(
            "a1",
            "cache",
            "redis",
            "aws:eu-west-1",
            Some("3.2.9"),
            Some(2),
            true,
            false,
        );
        assert_eq!(request.deployment_type, "redis");
        assert_eq!(request.version.as_deref(), Some("3.2.9"));
        assert_eq!(request.units, Some(2));
        assert!(request.ssl);
    }
}
