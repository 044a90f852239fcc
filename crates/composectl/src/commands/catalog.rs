//! Account, recipe, cluster and datacenter commands

use super::output_error;
use crate::cli::{self, AccountCommands, ClusterCommands, DatacenterCommands, RecipeCommands};
use crate::connection::ConnectionManager;
use crate::error::Result as CliResult;
use crate::output::{OutputFormat, print_output};
use tracing::debug;

pub async fn handle_account_command(
    cmd: &AccountCommands,
    conn_mgr: &ConnectionManager,
    profile_name: Option<&str>,
    output: cli::OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    let client = conn_mgr.create_client(profile_name)?;
    match cmd {
        AccountCommands::List => {
            let accounts = client.get_accounts().await?;
            debug!("Fetched {} accounts", accounts.len());
            print_output(accounts, OutputFormat::resolve(output, OutputFormat::Table), query)
                .map_err(output_error)
        }
    }
}

pub async fn handle_recipe_command(
    cmd: &RecipeCommands,
    conn_mgr: &ConnectionManager,
    profile_name: Option<&str>,
    output: cli::OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    let client = conn_mgr.create_client(profile_name)?;
    match cmd {
        RecipeCommands::Get { id } => {
            let recipe = client.get_recipe(id).await?;
            debug!("Recipe {} status: {}", recipe.id, recipe.status);
            print_output(recipe, OutputFormat::resolve(output, OutputFormat::Json), query)
                .map_err(output_error)
        }
    }
}

pub async fn handle_cluster_command(
    cmd: &ClusterCommands,
    conn_mgr: &ConnectionManager,
    profile_name: Option<&str>,
    output: cli::OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    let client = conn_mgr.create_client(profile_name)?;
    match cmd {
        ClusterCommands::List => {
            let clusters = client.get_clusters().await?;
            debug!("Fetched {} clusters", clusters.len());
            print_output(clusters, OutputFormat::resolve(output, OutputFormat::Table), query)
                .map_err(output_error)
        }
    }
}

pub async fn handle_datacenter_command(
    cmd: &DatacenterCommands,
    conn_mgr: &ConnectionManager,
    profile_name: Option<&str>,
    output: cli::OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    let client = conn_mgr.create_client(profile_name)?;
    match cmd {
        DatacenterCommands::List => {
            let datacenters = client.get_datacenters().await?;
            debug!("Fetched {} datacenters", datacenters.len());
            print_output(datacenters, OutputFormat::resolve(output, OutputFormat::Table), query)
                .map_err(output_error)
        }
    }
}
