//! Profile management command implementations

use super::{confirm, output_error};
use crate::cli::{self, ProfileCommands};
use crate::connection::ConnectionManager;
use crate::error::{ComposectlError, Result as CliResult};
use crate::output::{OutputFormat, print_output};
use composectl_core::{CredentialStore, Profile};
use serde_json::json;
use tracing::{debug, info, trace};

/// Handle profile management commands
pub async fn handle_profile_command(
    profile_cmd: &ProfileCommands,
    conn_mgr: &ConnectionManager,
    output: cli::OutputFormat,
) -> CliResult<()> {
    use ProfileCommands::*;

    match profile_cmd {
        List => handle_list(conn_mgr, output),
        Path => handle_path(conn_mgr, output),
        Show { name } => handle_show(conn_mgr, name, output),
        Set {
            name,
            token,
            api_url,
            default,
            #[cfg(feature = "secure-storage")]
            use_keyring,
        } => {
            #[cfg(feature = "secure-storage")]
            let use_keyring = *use_keyring;
            #[cfg(not(feature = "secure-storage"))]
            let use_keyring = false;

            handle_set(
                conn_mgr,
                name,
                token.as_deref(),
                api_url,
                *default,
                use_keyring,
            )
        }
        Remove { name, yes } => handle_remove(conn_mgr, name, *yes),
        Default { name } => handle_default(conn_mgr, name),
    }
}

fn handle_list(conn_mgr: &ConnectionManager, output: cli::OutputFormat) -> CliResult<()> {
    debug!("Listing all configured profiles");
    let profiles = conn_mgr.config.list_profiles();
    trace!("Found {} profiles", profiles.len());

    let default = conn_mgr.config.default_profile.as_deref();
    let rows: Vec<serde_json::Value> = profiles
        .iter()
        .map(|(name, profile)| {
            json!({
                "name": name,
                "api_url": profile.api_url,
                "default": default == Some(name.as_str()),
                "keyring": profile.uses_keyring(),
            })
        })
        .collect();

    print_output(rows, OutputFormat::resolve(output, OutputFormat::Table), None)
        .map_err(output_error)
}

fn handle_path(conn_mgr: &ConnectionManager, output: cli::OutputFormat) -> CliResult<()> {
    let config_path = conn_mgr.active_config_path()?;

    match output {
        cli::OutputFormat::Json | cli::OutputFormat::Yaml => {
            let format = OutputFormat::resolve(output, OutputFormat::Json);
            print_output(json!({ "config_path": config_path }), format, None)
                .map_err(output_error)
        }
        _ => {
            println!("{}", config_path.display());
            Ok(())
        }
    }
}

fn handle_show(conn_mgr: &ConnectionManager, name: &str, output: cli::OutputFormat) -> CliResult<()> {
    let profile = conn_mgr.config.get_profile(name)?;
    let is_default = conn_mgr.config.default_profile.as_deref() == Some(name);

    let details = json!({
        "name": name,
        "api_url": profile.api_url,
        "api_token": mask_token(&profile.api_token),
        "default": is_default,
    });

    print_output(details, OutputFormat::resolve(output, OutputFormat::Table), None)
        .map_err(output_error)
}

fn handle_set(
    conn_mgr: &ConnectionManager,
    name: &str,
    token: Option<&str>,
    api_url: &str,
    make_default: bool,
    use_keyring: bool,
) -> CliResult<()> {
    debug!("Setting profile: {}", name);

    let token = match token {
        Some(token) => token.to_string(),
        None => rpassword::prompt_password("Compose API token: ").map_err(|e| {
            ComposectlError::InvalidInput {
                message: format!("Failed to read token: {}", e),
            }
        })?,
    };
    if token.trim().is_empty() {
        return Err(ComposectlError::InvalidInput {
            message: "API token cannot be empty".to_string(),
        });
    }

    let store = if use_keyring {
        CredentialStore::new()
    } else {
        CredentialStore::plaintext()
    };
    let stored_token = store.store_credential(&format!("{}-api-token", name), token.trim())?;

    let mut config = conn_mgr.config.clone();
    let existed = config.profiles.contains_key(name);
    config.set_profile(
        name.to_string(),
        Profile::new(stored_token).with_api_url(api_url),
    );
    if make_default || config.profiles.len() == 1 {
        config.default_profile = Some(name.to_string());
    }
    conn_mgr.save_config(&config)?;

    info!("Saved profile '{}'", name);
    if existed {
        println!("Profile '{}' updated.", name);
    } else {
        println!("Profile '{}' created.", name);
    }
    if config.default_profile.as_deref() == Some(name) {
        println!("'{}' is the default profile.", name);
    }
    Ok(())
}

fn handle_remove(conn_mgr: &ConnectionManager, name: &str, yes: bool) -> CliResult<()> {
    debug!("Removing profile: {}", name);
    let profile = conn_mgr.config.get_profile(name)?;

    if !yes && !confirm(&format!("Remove profile '{}'?", name))? {
        println!("Profile removal cancelled.");
        return Ok(());
    }

    if let Some(key) = profile.api_token.strip_prefix("keyring:") {
        CredentialStore::new().delete_credential(key)?;
    }

    let mut config = conn_mgr.config.clone();
    let was_default = config.default_profile.as_deref() == Some(name);
    config.remove_profile(name);
    conn_mgr.save_config(&config)?;

    println!("Profile '{}' removed.", name);
    if was_default {
        println!("Default profile cleared.");
    }
    Ok(())
}

fn handle_default(conn_mgr: &ConnectionManager, name: &str) -> CliResult<()> {
    conn_mgr.config.get_profile(name)?;

    let mut config = conn_mgr.config.clone();
    config.default_profile = Some(name.to_string());
    conn_mgr.save_config(&config)?;

    println!("Default profile set to '{}'.", name);
    Ok(())
}

/// Hide all but the last four characters of a plaintext token
fn mask_token(token: &str) -> String {
    if CredentialStore::is_keyring_reference(token) {
        return token.to_string();
    }
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
