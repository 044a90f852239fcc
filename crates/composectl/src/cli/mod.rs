//! CLI structure and command definitions
//!
//! Two layers:
//! 1. Raw API access (`api` command)
//! 2. Typed resource commands (`account`, `deployment`, `recipe`, ...)

use clap::{Parser, Subcommand};

pub mod resources;

pub use resources::*;

/// Command-line client for the Compose database provisioning API
#[derive(Parser, Debug)]
#[command(name = "composectl")]
#[command(version, about = "Command-line client for the Compose provisioning API")]
#[command(long_about = "
Command-line client for the Compose provisioning API

Credentials come from a profile, or from COMPOSE_TOKEN when no profile
is configured.

EXAMPLES:
    # Store a token in a profile
    composectl profile set prod --token $COMPOSE_TOKEN

    # List deployments as a table
    composectl deployment list -o table

    # Filter output with JMESPath
    composectl deployment list -q '[?type==`redis`].name'

    # Provision a deployment
    composectl deployment create --account-id ACCOUNT --name orders \\
        --type mongodb --datacenter aws:us-east-1 --units 1

    # Direct API access
    composectl api get /deployments

For more help on a specific command, run:
    composectl <command> --help
")]
pub struct Cli {
    /// Profile to use for this command
    #[arg(long, short, global = true, env = "COMPOSECTL_PROFILE")]
    pub profile: Option<String>,

    /// Path to alternate configuration file
    #[arg(long, global = true, env = "COMPOSECTL_CONFIG_FILE")]
    pub config_file: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "auto")]
    pub output: OutputFormat,

    /// JMESPath query to filter output
    #[arg(long, short = 'q', global = true)]
    pub query: Option<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table for listings, JSON otherwise
    Auto,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Human-readable table format
    Table,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Raw API access - direct REST endpoint calls
    #[command(after_help = "EXAMPLES:
    # GET request
    composectl api get /accounts

    # POST request with JSON data
    composectl api post /deployments/ID/scalings --data '{\"deployment\":{\"units\":2}}'

    # PATCH request with data from a file
    composectl api patch /deployments/ID/versions --data @upgrade.json
")]
    Api {
        /// HTTP method
        #[arg(value_parser = parse_http_method)]
        method: HttpMethod,

        /// API endpoint path relative to the API version (e.g., /deployments)
        path: String,

        /// Request body (JSON string or @file)
        #[arg(long)]
        data: Option<String>,
    },

    /// Account operations
    #[command(subcommand, visible_alias = "acct")]
    Account(AccountCommands),

    /// Deployment operations
    #[command(subcommand, visible_alias = "dep")]
    Deployment(DeploymentCommands),

    /// Recipe (operation) tracking
    #[command(subcommand)]
    Recipe(RecipeCommands),

    /// Cluster operations
    #[command(subcommand)]
    Cluster(ClusterCommands),

    /// Datacenter listing
    #[command(subcommand, visible_alias = "dc")]
    Datacenter(DatacenterCommands),

    /// Profile management
    #[command(subcommand, visible_alias = "prof")]
    #[command(after_help = "EXAMPLES:
    # Create a profile (token prompted when --token is omitted)
    composectl profile set prod --token TOKEN

    # Point a profile at a different endpoint
    composectl profile set local --token TOKEN --api-url http://localhost:8080/2016-07

    # List all profiles
    composectl profile list

    # Set the default profile
    composectl profile default prod
")]
    Profile(ProfileCommands),

    /// Version information
    #[command(visible_alias = "ver")]
    Version,

    /// Generate shell completions
    #[command(visible_alias = "comp")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell", alias = "power-shell")]
    PowerShell,
    Elvish,
}

/// HTTP methods for raw API access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Parse HTTP method case-insensitively
fn parse_http_method(s: &str) -> Result<HttpMethod, String> {
    match s.to_lowercase().as_str() {
        "get" => Ok(HttpMethod::Get),
        "post" => Ok(HttpMethod::Post),
        "put" => Ok(HttpMethod::Put),
        "patch" => Ok(HttpMethod::Patch),
        "delete" => Ok(HttpMethod::Delete),
        _ => Err(format!(
            "invalid HTTP method: {} (valid: get, post, put, patch, delete)",
            s
        )),
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Patch => write!(f, "PATCH"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// Profile management commands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List all configured profiles
    #[command(visible_alias = "ls")]
    List,

    /// Show the path to the configuration file
    Path,

    /// Show details of a specific profile
    #[command(visible_alias = "get")]
    Show {
        /// Profile name to show
        name: String,
    },

    /// Set or create a profile
    #[command(visible_alias = "add")]
    Set {
        /// Profile name
        name: String,

        /// API token (prompted for when omitted)
        #[arg(long)]
        token: Option<String>,

        /// API base URL including the version path
        #[arg(long, default_value = "https://api.compose.io/2016-07")]
        api_url: String,

        /// Also make this the default profile
        #[arg(long)]
        default: bool,

        /// Store the token in the OS keyring instead of the config file
        #[cfg(feature = "secure-storage")]
        #[arg(long)]
        use_keyring: bool,
    },

    /// Remove a profile
    #[command(visible_alias = "rm")]
    Remove {
        /// Profile name to remove
        name: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Set the default profile
    Default {
        /// Profile name to use when --profile is not given
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_http_method_case_insensitive() {
        assert_eq!(parse_http_method("GET").unwrap(), HttpMethod::Get);
        assert_eq!(parse_http_method("Patch").unwrap(), HttpMethod::Patch);
        assert!(parse_http_method("trace").is_err());
    }

    #[test]
    fn test_parse_create_deployment() {
        let cli = Cli::try_parse_from([
            "composectl",
            "deployment",
            "create",
            "--account-id",
            "acct-1",
            "--name",
            "orders",
            "--type",
            "mongodb",
            "--datacenter",
            "aws:us-east-1",
            "--units",
            "2",
            "--ssl",
        ])
        .unwrap();

        match cli.command {
            Commands::Deployment(DeploymentCommands::Create {
                units, ssl, wired_tiger, ..
            }) => {
                assert_eq!(units, Some(2));
                assert!(ssl);
                assert!(!wired_tiger);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
