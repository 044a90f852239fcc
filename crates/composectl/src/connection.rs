//! Connection management for Compose API clients

use crate::error::Result as CliResult;
use compose_client::ComposeClient;
use composectl_core::Config;
use std::path::PathBuf;
use tracing::{debug, info, trace};

/// User agent string for composectl HTTP requests
const COMPOSECTL_USER_AGENT: &str = concat!("composectl/", env!("CARGO_PKG_VERSION"));

/// Loaded configuration plus where it came from
#[derive(Clone)]
pub struct ConnectionManager {
    pub config: Config,
    pub config_path: Option<PathBuf>,
}

impl ConnectionManager {
    pub fn with_config_path(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// Save `config` to the file this manager was loaded from
    pub fn save_config(&self, config: &Config) -> CliResult<()> {
        match &self.config_path {
            Some(path) => config.save_to_path(path)?,
            None => config.save()?,
        }
        Ok(())
    }

    /// Path of the active configuration file
    pub fn active_config_path(&self) -> CliResult<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::config_path()?),
        }
    }

    /// Create an authenticated client for `profile_name`
    ///
    /// When --config-file is specified explicitly, COMPOSE_TOKEN and
    /// COMPOSE_API_URL are ignored so the file is the only source.
    pub fn create_client(&self, profile_name: Option<&str>) -> CliResult<ComposeClient> {
        debug!("Creating Compose client");
        trace!("Profile name: {:?}", profile_name);

        let use_env = self.config_path.is_none();
        if !use_env {
            info!("--config-file specified explicitly, ignoring environment variables");
        }

        let (token, url) = composectl_core::resolve_connection(&self.config, profile_name, use_env)?;
        info!("Connecting to Compose API: {}", url);

        let client = ComposeClient::builder()
            .token(token)
            .base_url(url)
            .user_agent(COMPOSECTL_USER_AGENT)
            .build()?;

        debug!("Compose client created successfully");
        Ok(client)
    }
}
