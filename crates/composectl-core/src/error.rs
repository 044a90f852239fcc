//! Unified error handling for composectl-core
//!
//! Wraps API client and configuration errors with the same helper
//! predicates the client error exposes.
//!
//! ```rust
//! use composectl_core::CoreError;
//! use compose_client::ComposeError;
//!
//! let err: CoreError = ComposeError::NotFound { message: "gone".to_string() }.into();
//! assert!(err.is_not_found());
//! ```

use compose_client::ComposeError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("API error: {0}")]
    Api(#[from] ComposeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            CoreError::Api(e) => e.is_not_found(),
            CoreError::Config(ConfigError::ProfileNotFound { .. }) => true,
            CoreError::Config(_) => false,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        match self {
            CoreError::Api(e) => e.is_unauthorized() || matches!(e, ComposeError::MissingToken),
            CoreError::Config(_) => false,
        }
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, CoreError::Api(e) if e.is_server_error())
    }
}
