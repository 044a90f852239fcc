//! Resource command definitions

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// List accounts the token can access
    #[command(visible_alias = "ls")]
    List,
}

#[derive(Subcommand, Debug)]
pub enum DeploymentCommands {
    /// List all deployments
    #[command(visible_alias = "ls")]
    List,

    /// Get deployment details, including connection strings
    Get {
        /// Deployment ID
        id: String,
    },

    /// Provision a new deployment
    #[command(after_help = "EXAMPLES:
    # MongoDB with WiredTiger and SSL
    composectl deployment create --account-id ACCOUNT --name orders \\
        --type mongodb --datacenter aws:us-east-1 --ssl --wired-tiger

    # Redis with a pinned version and two units
    composectl deployment create --account-id ACCOUNT --name cache \\
        --type redis --datacenter aws:eu-west-1 --version 3.2.9 --units 2
")]
    Create {
        /// Account to create the deployment in
        #[arg(long)]
        account_id: String,

        /// Deployment name
        #[arg(long)]
        name: String,

        /// Database type (mongodb, redis, postgresql, elastic_search, rethink, rabbitmq, etcd, scylla, mysql, janusgraph)
        #[arg(long = "type")]
        deployment_type: String,

        /// Datacenter slug (see `composectl datacenter list`)
        #[arg(long)]
        datacenter: String,

        /// Database version; the platform default when omitted
        #[arg(long)]
        version: Option<String>,

        /// Initial units; the platform default when omitted
        #[arg(long)]
        units: Option<u32>,

        /// Enable SSL
        #[arg(long)]
        ssl: bool,

        /// Use the WiredTiger storage engine (MongoDB only)
        #[arg(long)]
        wired_tiger: bool,
    },

    /// Deprovision a deployment
    #[command(visible_alias = "rm")]
    Delete {
        /// Deployment ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// List recipes run against a deployment
    Recipes {
        /// Deployment ID
        id: String,
    },

    /// List versions a deployment can be upgraded to
    Versions {
        /// Deployment ID
        id: String,
    },

    /// Show unit allocation for a deployment
    Scalings {
        /// Deployment ID
        id: String,
    },

    /// Change the number of units allocated to a deployment
    Scale {
        /// Deployment ID
        id: String,

        /// Target number of units
        #[arg(long)]
        units: u32,
    },

    /// Upgrade a deployment to a new version
    Upgrade {
        /// Deployment ID
        id: String,

        /// Target version (see `composectl deployment versions`)
        #[arg(long)]
        version: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecipeCommands {
    /// Get a recipe's status
    Get {
        /// Recipe ID
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClusterCommands {
    /// List clusters
    #[command(visible_alias = "ls")]
    List,
}

#[derive(Subcommand, Debug)]
pub enum DatacenterCommands {
    /// List datacenters available for new deployments
    #[command(visible_alias = "ls")]
    List,
}
