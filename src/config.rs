//! Configuration types.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Which session store backend to run with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local, lost on restart.
    Memory,
    /// Single JSON document on disk.
    File(PathBuf),
}

/// Honeypot service configuration.
#[derive(Debug, Clone)]
pub struct HoneypotConfig {
    /// Address the HTTP listener binds to.
    pub host: String,
    /// Port the HTTP listener binds to.
    pub port: u16,
    /// Session persistence backend.
    pub store: StoreBackend,
    /// Fixed seed for reply selection. `None` seeds from OS entropy.
    pub reply_seed: Option<u64>,
}

impl Default for HoneypotConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            store: StoreBackend::File(PathBuf::from("./data/sessions.json")),
            reply_seed: None,
        }
    }
}

impl HoneypotConfig {
    /// Build config from `SCAM_POT_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("SCAM_POT_HOST").unwrap_or(defaults.host);

        let port = match lookup("SCAM_POT_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "SCAM_POT_PORT".into(),
                message: format!("{raw:?}: {e}"),
            })?,
            None => defaults.port,
        };

        let store_path = lookup("SCAM_POT_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data/sessions.json"));

        let store = match lookup("SCAM_POT_STORE").as_deref().map(str::trim) {
            None | Some("file") => StoreBackend::File(store_path),
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "SCAM_POT_STORE".into(),
                    message: format!("unknown backend {other:?}, expected \"memory\" or \"file\""),
                });
            }
        };

        let reply_seed = match lookup("SCAM_POT_REPLY_SEED") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue {
                    key: "SCAM_POT_REPLY_SEED".into(),
                    message: format!("{raw:?}: {e}"),
                }
            })?),
            None => None,
        };

        let config = Self {
            host,
            port,
            store,
            reply_seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot be served.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SCAM_POT_PORT".into(),
                message: "port must be between 1 and 65535".into(),
            });
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "SCAM_POT_HOST".into(),
                message: "host must not be empty".into(),
            });
        }
        Ok(())
    }

    /// `host:port` string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
