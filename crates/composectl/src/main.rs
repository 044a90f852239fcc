use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, shells};
use composectl_core::Config;
use tracing::{debug, error, info, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod connection;
mod error;
mod output;

use cli::{Cli, Commands};
use connection::ConnectionManager;
use error::ComposectlError;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let (config, config_path) = match load_config(cli.config_file.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            e.print_diagnostic();
            std::process::exit(1);
        }
    };
    debug!(
        "Creating ConnectionManager with config_path: {:?}",
        config_path
    );
    let conn_mgr = ConnectionManager::with_config_path(config, config_path);

    if let Err(e) = execute_command(&cli, &conn_mgr).await {
        e.print_diagnostic();
        std::process::exit(1);
    }

    Ok(())
}

/// Load configuration from `--config-file` or the default location
fn load_config(
    config_file: Option<&str>,
) -> Result<(Config, Option<std::path::PathBuf>), ComposectlError> {
    match config_file {
        Some(config_file) => {
            let path = std::path::PathBuf::from(config_file);
            debug!("Loading config from explicit path: {:?}", path);
            let config = Config::load_from_path(&path)?;
            Ok((config, Some(path)))
        }
        None => {
            debug!("Loading config from default location");
            Ok((Config::load()?, None))
        }
    }
}

fn init_tracing(verbose: u8) {
    // RUST_LOG wins over the verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "composectl=warn,composectl_core=warn,compose_client=warn",
            1 => "composectl=info,composectl_core=info,compose_client=info",
            2 => "composectl=debug,composectl_core=debug,compose_client=debug",
            _ => "composectl=trace,composectl_core=trace,compose_client=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .init();

    debug!("Tracing initialized with verbosity level: {}", verbose);
}

async fn execute_command(cli: &Cli, conn_mgr: &ConnectionManager) -> Result<(), ComposectlError> {
    trace!("Executing command: {:?}", cli.command);
    info!("Command: {}", format_command(&cli.command));

    let profile = cli.profile.as_deref();
    let query = cli.query.as_deref();

    let start = std::time::Instant::now();
    let result = match &cli.command {
        Commands::Version => {
            debug!("Showing version information");
            match cli.output {
                cli::OutputFormat::Json | cli::OutputFormat::Yaml => {
                    let output_data = serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "name": env!("CARGO_PKG_NAME"),
                    });
                    let fmt = output::OutputFormat::resolve(cli.output, output::OutputFormat::Json);
                    output::print_output(&output_data, fmt, None).map_err(commands::output_error)
                }
                _ => {
                    println!("composectl {}", env!("CARGO_PKG_VERSION"));
                    Ok(())
                }
            }
        }
        Commands::Completions { shell } => {
            debug!("Generating completions for {:?}", shell);
            generate_completions(*shell);
            Ok(())
        }
        Commands::Profile(cmd) => {
            commands::profile::handle_profile_command(cmd, conn_mgr, cli.output).await
        }
        Commands::Api { method, path, data } => {
            commands::api::handle_api_command(
                conn_mgr,
                commands::api::ApiCommandParams {
                    profile_name: profile,
                    method: *method,
                    path,
                    data: data.as_deref(),
                    output_format: output::OutputFormat::resolve(
                        cli.output,
                        output::OutputFormat::Json,
                    ),
                    query,
                },
            )
            .await
        }
        Commands::Account(cmd) => {
            commands::catalog::handle_account_command(cmd, conn_mgr, profile, cli.output, query)
                .await
        }
        Commands::Deployment(cmd) => {
            commands::deployment::handle_deployment_command(
                cmd, conn_mgr, profile, cli.output, query,
            )
            .await
        }
        Commands::Recipe(cmd) => {
            commands::catalog::handle_recipe_command(cmd, conn_mgr, profile, cli.output, query)
                .await
        }
        Commands::Cluster(cmd) => {
            commands::catalog::handle_cluster_command(cmd, conn_mgr, profile, cli.output, query)
                .await
        }
        Commands::Datacenter(cmd) => {
            commands::catalog::handle_datacenter_command(cmd, conn_mgr, profile, cli.output, query)
                .await
        }
    };

    let duration = start.elapsed();
    match &result {
        Ok(_) => info!("Command completed successfully in {:?}", duration),
        Err(e) => error!("Command failed after {:?}: {}", duration, e),
    }

    result
}

fn generate_completions(shell: cli::Shell) {
    let mut cmd = cli::Cli::command();
    let name = cmd.get_name().to_string();

    match shell {
        cli::Shell::Bash => generate(shells::Bash, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Zsh => generate(shells::Zsh, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Fish => generate(shells::Fish, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::PowerShell => {
            generate(shells::PowerShell, &mut cmd, name, &mut std::io::stdout())
        }
        cli::Shell::Elvish => generate(shells::Elvish, &mut cmd, name, &mut std::io::stdout()),
    }
}

/// Command name for logging; never includes tokens or request bodies
fn format_command(command: &Commands) -> String {
    match command {
        Commands::Version => "version".to_string(),
        Commands::Completions { shell } => format!("completions {:?}", shell),
        Commands::Profile(cmd) => {
            use cli::ProfileCommands::*;
            match cmd {
                List => "profile list".to_string(),
                Path => "profile path".to_string(),
                Show { name } => format!("profile show {}", name),
                Set { name, .. } => format!("profile set {} [credentials redacted]", name),
                Remove { name, .. } => format!("profile remove {}", name),
                Default { name } => format!("profile default {}", name),
            }
        }
        Commands::Api { method, path, data } => format!(
            "api {} {}{}",
            method,
            path,
            if data.is_some() { " [with data]" } else { "" }
        ),
        Commands::Account(_) => "account list".to_string(),
        Commands::Deployment(cmd) => format!("deployment {:?}", cmd),
        Commands::Recipe(cmd) => format!("recipe {:?}", cmd),
        Commands::Cluster(_) => "cluster list".to_string(),
        Commands::Datacenter(_) => "datacenter list".to_string(),
    }
}
