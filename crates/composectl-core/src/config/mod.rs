//! Profile configuration for composectl
//!
// Allow nested config module - this is intentional for the config subsystem

#![allow(clippy::module_inception)]
//!
//! - Multiple named profiles, each with an API token and URL
//! - Tokens stored inline, via `${VAR}` expansion, or in the OS keyring
//!   (`secure-storage` feature)
//! - Platform-specific config file location

pub mod config;
pub mod credential;
pub mod error;

pub use config::{Config, Profile};
pub use credential::{CredentialStorage, CredentialStore};
pub use error::{ConfigError, Result};
