//! Configuration file handling
//!
//! Profiles are stored in TOML, one table per profile:
//!
//! ```toml
//! default_profile = "prod"
//!
//! [profiles.prod]
//! api_token = "${COMPOSE_PROD_TOKEN}"
//! api_url = "https://api.compose.io/2016-07"
//! ```

#[cfg(target_os = "macos")]
use directories::BaseDirs;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use compose_client::{API_URL_ENV_VAR, TOKEN_ENV_VAR, default_api_url};

use super::credential::CredentialStore;
use super::error::{ConfigError, Result};

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    /// Profile used when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    /// Map of profile name -> profile
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// Credentials for one Compose API endpoint
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Profile {
    /// Plain token or a `keyring:` reference
    pub api_token: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Profile {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            api_url: default_api_url(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Token and URL with keyring references resolved
    ///
    /// With `use_env`, `COMPOSE_TOKEN` and `COMPOSE_API_URL` override the
    /// stored values.
    pub fn resolve_credentials(&self, use_env: bool) -> Result<(String, String)> {
        let store = CredentialStore::new();
        let token_var = use_env.then_some(TOKEN_ENV_VAR);
        let url_var = use_env.then_some(API_URL_ENV_VAR);

        let token = store.get_credential(&self.api_token, token_var).map_err(|e| {
            ConfigError::CredentialError(format!("Failed to resolve API token: {}", e))
        })?;
        let url = store.get_credential(&self.api_url, url_var).map_err(|e| {
            ConfigError::CredentialError(format!("Failed to resolve API URL: {}", e))
        })?;

        Ok((token, url))
    }

    pub fn uses_keyring(&self) -> bool {
        CredentialStore::is_keyring_reference(&self.api_token)
    }
}

impl Config {
    /// Resolve which profile to use
    ///
    /// Explicit name, then `default_profile`, then the first profile by name.
    pub fn resolve_profile(&self, explicit_profile: Option<&str>) -> Result<String> {
        if let Some(name) = explicit_profile {
            return Ok(name.to_string());
        }

        if let Some(ref default) = self.default_profile {
            return Ok(default.clone());
        }

        if let Some((name, _)) = self.list_profiles().first() {
            return Ok(name.to_string());
        }

        Err(ConfigError::NoProfiles {
            suggestion: "Use 'composectl profile set <name> --token <token>' or export COMPOSE_TOKEN."
                .to_string(),
        })
    }

    pub fn get_profile(&self, name: &str) -> Result<&Profile> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.to_string(),
            })
    }

    /// Load configuration from the standard location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from `config_path`; a missing file is an empty config
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::LoadError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        let expanded = Self::expand_env_vars(&content);
        let config: Config = toml::from_str(&expanded)?;
        debug!(
            "Loaded {} profile(s) from {}",
            config.profiles.len(),
            config_path.display()
        );

        Ok(config)
    }

    /// Save configuration to the standard location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Save configuration to `config_path`, creating parent directories
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::SaveError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| ConfigError::SaveError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }

    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Remove a profile, clearing `default_profile` if it pointed at it
    pub fn remove_profile(&mut self, name: &str) -> Option<Profile> {
        if self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        self.profiles.remove(name)
    }

    /// All profiles sorted by name
    pub fn list_profiles(&self) -> Vec<(&String, &Profile)> {
        let mut profiles: Vec<_> = self.profiles.iter().collect();
        profiles.sort_by_key(|(name, _)| *name);
        profiles
    }

    /// Path to the configuration file
    ///
    /// On macOS `~/.config/composectl/config.toml` is used when that
    /// directory exists; otherwise the platform config directory.
    pub fn config_path() -> Result<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            if let Some(base_dirs) = BaseDirs::new() {
                let linux_style_dir = base_dirs.home_dir().join(".config").join("composectl");
                if linux_style_dir.exists() {
                    return Ok(linux_style_dir.join("config.toml"));
                }
            }
        }

        let proj_dirs =
            ProjectDirs::from("io", "compose", "composectl").ok_or(ConfigError::ConfigDirError)?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Expand `${VAR}` and `${VAR:-default}`; unknown variables are left as-is
    fn expand_env_vars(content: &str) -> String {
        shellexpand::env_with_context_no_errors(content, |var| std::env::var(var).ok()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.set_profile("prod".to_string(), Profile::new("tok"));
        config.default_profile = Some("prod".to_string());

        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(deserialized.default_profile.as_deref(), Some("prod"));
        assert_eq!(deserialized.profiles["prod"], Profile::new("tok"));
    }

    #[test]
    fn test_api_url_defaults() {
        let config: Config = toml::from_str(
            r#"
[profiles.prod]
api_token = "tok"
"#,
        )
        .unwrap();
        assert_eq!(
            config.profiles["prod"].api_url,
            "https://api.compose.io/2016-07"
        );
    }

    #[test]
    #[serial_test::serial]
    fn test_env_var_expansion() {
        unsafe {
            std::env::set_var("COMPOSECTL_TEST_TOKEN", "expanded-token");
        }

        let content = r#"
[profiles.prod]
api_token = "${COMPOSECTL_TEST_TOKEN}"
api_url = "${COMPOSECTL_MISSING_URL:-https://api.compose.io/2016-07}"
"#;
        let config: Config = toml::from_str(&Config::expand_env_vars(content)).unwrap();
        let profile = &config.profiles["prod"];
        assert_eq!(profile.api_token, "expanded-token");
        assert_eq!(profile.api_url, "https://api.compose.io/2016-07");

        unsafe {
            std::env::remove_var("COMPOSECTL_TEST_TOKEN");
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_unknown_env_var_left_untouched() {
        unsafe {
            std::env::remove_var("COMPOSECTL_NOT_SET");
        }
        let expanded = Config::expand_env_vars(r#"api_token = "${COMPOSECTL_NOT_SET}""#);
        assert!(expanded.contains("${COMPOSECTL_NOT_SET}"));
    }

    #[test]
    fn test_profile_resolution_order() {
        let mut config = Config::default();
        config.set_profile("staging".to_string(), Profile::new("s"));
        config.set_profile("prod".to_string(), Profile::new("p"));

        assert_eq!(config.resolve_profile(Some("other")).unwrap(), "other");
        // first alphabetically
        assert_eq!(config.resolve_profile(None).unwrap(), "prod");

        config.default_profile = Some("staging".to_string());
        assert_eq!(config.resolve_profile(None).unwrap(), "staging");
    }

    #[test]
    fn test_no_profiles_error() {
        let err = Config::default().resolve_profile(None).unwrap_err();
        assert!(err.to_string().contains("No profiles configured"));
        assert!(err.to_string().contains("COMPOSE_TOKEN"));
    }

    #[test]
    fn test_remove_default_profile_clears_default() {
        let mut config = Config::default();
        config.set_profile("prod".to_string(), Profile::new("p"));
        config.default_profile = Some("prod".to_string());

        assert!(config.remove_profile("prod").is_some());
        assert!(config.default_profile.is_none());
        assert!(config.remove_profile("prod").is_none());
    }

    #[test]
    fn test_get_profile_not_found() {
        let err = Config::default().get_profile("nope").unwrap_err();
        assert!(matches!(err, ConfigError::ProfileNotFound { .. }));
    }

    #[test]
    #[serial_test::serial]
    fn test_resolve_credentials_env_override() {
        unsafe {
            std::env::set_var(TOKEN_ENV_VAR, "env-token");
            std::env::remove_var(API_URL_ENV_VAR);
        }
        let profile = Profile::new("stored-token").with_api_url("http://localhost:9000/2016-07");

        let (token, url) = profile.resolve_credentials(true).unwrap();
        assert_eq!(token, "env-token");
        assert_eq!(url, "http://localhost:9000/2016-07");

        let (token, _) = profile.resolve_credentials(false).unwrap();
        assert_eq!(token, "stored-token");

        unsafe {
            std::env::remove_var(TOKEN_ENV_VAR);
        }
    }
}
