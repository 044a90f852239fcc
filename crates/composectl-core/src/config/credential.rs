//! Where API tokens live
//!
//! A profile's token is either stored inline or as a `keyring:<key>`
//! reference into the OS keyring (with the `secure-storage` feature).
//! An environment variable, when given, always wins.

use super::error::{ConfigError, Result};
use std::env;
use tracing::debug;

/// Values with this prefix are looked up in the keyring
pub const KEYRING_PREFIX: &str = "keyring:";

#[cfg(feature = "secure-storage")]
const SERVICE_NAME: &str = "composectl";

/// Backend new credentials are written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStorage {
    #[cfg(feature = "secure-storage")]
    Keyring,
    Plaintext,
}

/// Reads and writes profile credentials
#[derive(Debug)]
pub struct CredentialStore {
    storage: CredentialStorage,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore {
    /// Store backed by the keyring when available, plaintext otherwise
    pub fn new() -> Self {
        #[cfg(feature = "secure-storage")]
        {
            if keyring::Entry::new(SERVICE_NAME, "__probe__").is_ok() {
                return Self {
                    storage: CredentialStorage::Keyring,
                };
            }
        }
        Self::plaintext()
    }

    pub fn plaintext() -> Self {
        Self {
            storage: CredentialStorage::Plaintext,
        }
    }

    pub fn storage(&self) -> CredentialStorage {
        self.storage
    }

    /// Persist `value` under `key`, returning what should be written to the config file
    ///
    /// For the keyring backend that is a `keyring:<key>` reference; for
    /// plaintext it is the value itself.
    pub fn store_credential(&self, key: &str, value: &str) -> Result<String> {
        match self.storage {
            #[cfg(feature = "secure-storage")]
            CredentialStorage::Keyring => {
                let entry = keyring::Entry::new(SERVICE_NAME, key)
                    .map_err(|e| ConfigError::KeyringError(e.to_string()))?;
                entry.set_password(value).map_err(|e| {
                    ConfigError::KeyringError(format!("Failed to store '{}': {}", key, e))
                })?;
                debug!("Stored credential '{}' in keyring", key);
                Ok(format!("{}{}", KEYRING_PREFIX, key))
            }
            CredentialStorage::Plaintext => {
                let _ = key;
                Ok(value.to_string())
            }
        }
    }

    /// Resolve a stored credential value
    ///
    /// Order: `env_var` if set and non-empty, then keyring reference, then
    /// the value as-is.
    pub fn get_credential(&self, value: &str, env_var: Option<&str>) -> Result<String> {
        if let Some(var) = env_var
            && let Ok(env_value) = env::var(var)
            && !env_value.is_empty()
        {
            debug!("Using credential from {}", var);
            return Ok(env_value);
        }

        let Some(key) = value.strip_prefix(KEYRING_PREFIX) else {
            return Ok(value.to_string());
        };

        #[cfg(feature = "secure-storage")]
        {
            let entry = keyring::Entry::new(SERVICE_NAME, key)
                .map_err(|e| ConfigError::KeyringError(e.to_string()))?;
            entry.get_password().map_err(|e| {
                ConfigError::KeyringError(format!(
                    "Failed to read '{}' from keyring: {}",
                    key, e
                ))
            })
        }
        #[cfg(not(feature = "secure-storage"))]
        {
            Err(ConfigError::CredentialError(format!(
                "'{}' is stored in the keyring but composectl was built without secure-storage",
                key
            )))
        }
    }

    /// Remove a keyring entry; missing entries are not an error
    pub fn delete_credential(&self, key: &str) -> Result<()> {
        match self.storage {
            #[cfg(feature = "secure-storage")]
            CredentialStorage::Keyring => {
                let entry = keyring::Entry::new(SERVICE_NAME, key)
                    .map_err(|e| ConfigError::KeyringError(e.to_string()))?;
                match entry.delete_credential() {
                    Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                    Err(e) => Err(ConfigError::KeyringError(format!(
                        "Failed to delete '{}' from keyring: {}",
                        key, e
                    ))),
                }
            }
            CredentialStorage::Plaintext => {
                let _ = key;
                Ok(())
            }
        }
    }

    pub fn is_keyring_reference(value: &str) -> bool {
        value.starts_with(KEYRING_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plaintext_passthrough() {
        let store = CredentialStore::plaintext();
        assert_eq!(store.get_credential("tok-123", None).unwrap(), "tok-123");
        assert_eq!(store.store_credential("any", "tok-123").unwrap(), "tok-123");
    }

    #[test]
    #[serial_test::serial]
    fn test_env_var_wins() {
        unsafe {
            env::set_var("COMPOSECTL_TEST_CREDENTIAL", "from-env");
        }
        let store = CredentialStore::plaintext();
        let value = store
            .get_credential("from-config", Some("COMPOSECTL_TEST_CREDENTIAL"))
            .unwrap();
        assert_eq!(value, "from-env");
        unsafe {
            env::remove_var("COMPOSECTL_TEST_CREDENTIAL");
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_empty_env_var_is_ignored() {
        unsafe {
            env::set_var("COMPOSECTL_TEST_CREDENTIAL", "");
        }
        let store = CredentialStore::plaintext();
        let value = store
            .get_credential("from-config", Some("COMPOSECTL_TEST_CREDENTIAL"))
            .unwrap();
        assert_eq!(value, "from-config");
        unsafe {
            env::remove_var("COMPOSECTL_TEST_CREDENTIAL");
        }
    }

    #[test]
    fn test_keyring_reference_detection() {
        assert!(CredentialStore::is_keyring_reference("keyring:prod-token"));
        assert!(!CredentialStore::is_keyring_reference("prod-token"));
        assert!(!CredentialStore::is_keyring_reference(""));
    }

    #[cfg(not(feature = "secure-storage"))]
    #[test]
    fn test_keyring_reference_without_feature() {
        let store = CredentialStore::plaintext();
        let err = store.get_credential("keyring:prod", None).unwrap_err();
        assert!(err.to_string().contains("secure-storage"));
    }

    #[cfg(feature = "secure-storage")]
    #[test]
    #[ignore = "Requires keyring service to be available"]
    fn test_keyring_round_trip() {
        let store = CredentialStore::new();
        let reference = store.store_credential("composectl-test", "secret").unwrap();
        assert!(reference.starts_with(KEYRING_PREFIX));
        assert_eq!(store.get_credential(&reference, None).unwrap(), "secret");
        let _ = store.delete_credential("composectl-test");
    }
}
