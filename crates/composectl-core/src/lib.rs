//! # composectl-core
//!
//! Shared pieces of composectl that are not tied to the command line:
//! profile configuration, credential resolution, and a unified error type
//! over the API client and the config layer.

pub mod config;
pub mod error;

pub use config::{Config, ConfigError, CredentialStore, Profile};
pub use error::{CoreError, Result};

use compose_client::{API_URL_ENV_VAR, ComposeClient, api_token_from_env, default_api_url};
use tracing::{debug, info};

/// Resolve the API token and base URL for `profile_name` (or the default profile)
///
/// With `use_env`, `COMPOSE_TOKEN`/`COMPOSE_API_URL` override stored values,
/// and a set `COMPOSE_TOKEN` is enough on its own when no profile exists.
pub fn resolve_connection(
    config: &Config,
    profile_name: Option<&str>,
    use_env: bool,
) -> Result<(String, String)> {
    if use_env && config.profiles.is_empty() && profile_name.is_none() {
        info!("No profiles configured, using environment credentials");
        let token = api_token_from_env()?;
        let url = std::env::var(API_URL_ENV_VAR).unwrap_or_else(|_| default_api_url());
        return Ok((token, url));
    }

    let name = config.resolve_profile(profile_name)?;
    info!("Using profile: {}", name);
    let profile = config.get_profile(&name)?;
    let (token, url) = profile.resolve_credentials(use_env)?;
    debug!("Resolved API URL {}", url);

    Ok((token, url))
}

/// Build a client from [`resolve_connection`]
pub fn client_for_profile(
    config: &Config,
    profile_name: Option<&str>,
    use_env: bool,
) -> Result<ComposeClient> {
    let (token, url) = resolve_connection(config, profile_name, use_env)?;
    Ok(ComposeClient::new(token, url)?)
}
