//! Error types for composectl
//!
//! Every failure is reported as a cargo-style diagnostic with tips.

use colored::Colorize;
use compose_client::ComposeError;
use composectl_core::{ConfigError, CoreError};
use thiserror::Error;

/// Cargo-style diagnostic formatter for CLI errors.
///
/// ```text
/// error: Profile 'prod' not found
///
///   tip: List available profiles: composectl profile list
/// ```
pub struct CliDiagnostic {
    message: String,
    tips: Vec<String>,
}

impl CliDiagnostic {
    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            tips: Vec::new(),
        }
    }

    pub fn tip(mut self, text: &str) -> Self {
        self.tips.push(text.to_string());
        self
    }

    /// Print to stderr with colored formatting.
    pub fn print(&self) {
        eprint!("{}{}", "error".red().bold(), ": ".bold());
        eprintln!("{}", self.message);

        for tip in &self.tips {
            eprintln!();
            eprint!("  {}{}", "tip".yellow().bold(), ": ".bold());
            eprintln!("{}", tip);
        }
    }
}

/// Main error type for the composectl application
#[derive(Error, Debug)]
pub enum ComposectlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("No profile configured and COMPOSE_TOKEN is not set")]
    NoProfileConfigured,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("API error: {message}")]
    ApiError { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("File error for '{path}': {message}")]
    FileError { path: String, message: String },

    #[error("Connection error: {message}")]
    ConnectionError { message: String },

    #[error("Output formatting error: {message}")]
    OutputError { message: String },
}

pub type Result<T> = std::result::Result<T, ComposectlError>;

impl ComposectlError {
    /// Helpful next steps for resolving this error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            ComposectlError::ProfileNotFound { name } => vec![
                "List available profiles: composectl profile list".to_string(),
                format!("Create profile '{}': composectl profile set {}", name, name),
            ],
            ComposectlError::NoProfileConfigured => vec![
                "Create a profile: composectl profile set <name> --token <token>".to_string(),
                "Or export COMPOSE_TOKEN=<token>".to_string(),
            ],
            ComposectlError::AuthenticationFailed { .. } => vec![
                "Check the token: composectl profile show <profile>".to_string(),
                "Tokens are managed under Account > Access Tokens in the Compose console"
                    .to_string(),
            ],
            ComposectlError::ConnectionError { .. } => vec![
                "Check network connectivity".to_string(),
                "Verify the API URL: composectl profile show <profile>".to_string(),
            ],
            ComposectlError::NotFound { .. } => vec![
                "Verify the ID is correct".to_string(),
                "List deployments to find the ID: composectl deployment list".to_string(),
            ],
            ComposectlError::InvalidInput { .. } => {
                vec!["Check the command syntax: composectl <command> --help".to_string()]
            }
            ComposectlError::FileError { path, .. } => {
                vec![format!("Check that the file exists and is readable: {}", path)]
            }
            _ => vec![],
        }
    }

    pub fn print_diagnostic(&self) {
        let mut diag = CliDiagnostic::error(&self.to_string());
        for suggestion in self.suggestions() {
            diag = diag.tip(&suggestion);
        }
        diag.print();
    }
}

impl From<ComposeError> for ComposectlError {
    fn from(err: ComposeError) -> Self {
        match err {
            ComposeError::AuthenticationFailed { message } | ComposeError::Forbidden { message } => {
                ComposectlError::AuthenticationFailed { message }
            }
            ComposeError::MissingToken => ComposectlError::NoProfileConfigured,
            ComposeError::NotFound { message } => ComposectlError::NotFound { message },
            ComposeError::ConnectionError(message) => ComposectlError::ConnectionError { message },
            ComposeError::InvalidUrl { .. } => ComposectlError::Config(err.to_string()),
            _ => ComposectlError::ApiError {
                message: err.to_string(),
            },
        }
    }
}

impl From<ConfigError> for ComposectlError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { name } => ComposectlError::ProfileNotFound { name },
            ConfigError::NoProfiles { .. } => ComposectlError::NoProfileConfigured,
            other => ComposectlError::Config(other.to_string()),
        }
    }
}

impl From<CoreError> for ComposectlError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api(e) => e.into(),
            CoreError::Config(e) => e.into(),
        }
    }
}

impl From<serde_json::Error> for ComposectlError {
    fn from(err: serde_json::Error) -> Self {
        ComposectlError::OutputError {
            message: format!("JSON error: {}", err),
        }
    }
}

impl From<std::io::Error> for ComposectlError {
    fn from(err: std::io::Error) -> Self {
        ComposectlError::OutputError {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<anyhow::Error> for ComposectlError {
    fn from(err: anyhow::Error) -> Self {
        ComposectlError::Config(format!("{:#}", err))
    }
}
