//! Raw API access for endpoints without a typed command

use super::output_error;
use crate::cli::HttpMethod;
use crate::connection::ConnectionManager;
use crate::error::{ComposectlError, Result as CliResult};
use crate::output::{OutputFormat, print_output};
use serde_json::Value;
use tracing::info;

pub struct ApiCommandParams<'a> {
    pub profile_name: Option<&'a str>,
    pub method: HttpMethod,
    pub path: &'a str,
    pub data: Option<&'a str>,
    pub output_format: OutputFormat,
    pub query: Option<&'a str>,
}

pub async fn handle_api_command(
    conn_mgr: &ConnectionManager,
    params: ApiCommandParams<'_>,
) -> CliResult<()> {
    let client = conn_mgr.create_client(params.profile_name)?;
    let path = normalize_path(params.path);
    let body = match params.data {
        Some(data) => parse_body(data)?,
        None => serde_json::json!({}),
    };

    info!("API call: {} {}", params.method, path);
    let response = match params.method {
        HttpMethod::Get => client.get_raw(&path).await?,
        HttpMethod::Post => client.post_raw(&path, body).await?,
        HttpMethod::Put => client.put_raw(&path, body).await?,
        HttpMethod::Patch => client.patch_raw(&path, body).await?,
        HttpMethod::Delete => client.delete_raw(&path).await?,
    };

    print_output(response, params.output_format, params.query).map_err(output_error)
}

/// Ensure the path starts with `/`
fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Parse `--data`: inline JSON, or `@path` to read JSON from a file
fn parse_body(data: &str) -> CliResult<Value> {
    if let Some(file_path) = data.strip_prefix('@') {
        let content =
            std::fs::read_to_string(file_path).map_err(|e| ComposectlError::FileError {
                path: file_path.to_string(),
                message: e.to_string(),
            })?;
        serde_json::from_str(&content).map_err(|e| ComposectlError::FileError {
            path: file_path.to_string(),
            message: format!("invalid JSON: {}", e),
        })
    } else {
        serde_json::from_str(data).map_err(|e| ComposectlError::InvalidInput {
            message: format!("--data is not valid JSON: {}", e),
        })
    }
}
