// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime configuration from environment variables.
//!
//! | Variable                  | Meaning                                            |
//! |---------------------------|----------------------------------------------------|
//! | `GEMINI_API_KEY`          | Gemini key (falls back to `API_KEY`)               |
//! | `LAURA_GEMINI_MODEL`      | model name, default `gemini-2.5-flash`             |
//! | `LAURA_CHAT_TIMEOUT_SECS` | per-request limit; unset or `0` means no limit     |
//! | `LAURA_ASSETS`            | directory holding `animals/<id>/<n>.jpg`           |
//! | `LAURA_LOG`               | `tracing` filter directives                        |
//! | `LAURA_LOG_FILE`          | log destination while the terminal UI is running   |
//!
//! The TUI palette (`LAURA_TUI_PALETTE`) is read by the theme itself.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::chat::DEFAULT_GEMINI_MODEL;

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_API_KEY_FALLBACK: &str = "API_KEY";
pub const ENV_MODEL: &str = "LAURA_GEMINI_MODEL";
pub const ENV_CHAT_TIMEOUT_SECS: &str = "LAURA_CHAT_TIMEOUT_SECS";
pub const ENV_ASSETS: &str = "LAURA_ASSETS";
pub const ENV_LOG: &str = "LAURA_LOG";
pub const ENV_LOG_FILE: &str = "LAURA_LOG_FILE";

const DEFAULT_ASSETS_DIR: &str = "public";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },
}

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub chat_timeout: Option<Duration>,
    pub assets_dir: PathBuf,
    pub log_filter: Option<String>,
    pub log_file: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    /// Forces the guide offline even when a key is present.
    pub offline: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("chat_timeout", &self.chat_timeout)
            .field("assets_dir", &self.assets_dir)
            .field("log_filter", &self.log_filter)
            .field("log_file", &self.log_file)
            .field("catalog_path", &self.catalog_path)
            .field("offline", &self.offline)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_owned(),
            chat_timeout: None,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            log_filter: None,
            log_file: None,
            catalog_path: None,
            offline: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        config.api_key = var(ENV_API_KEY).or_else(|| var(ENV_API_KEY_FALLBACK));
        if let Some(model) = var(ENV_MODEL) {
            config.model = model;
        }
        if let Some(raw) = var(ENV_CHAT_TIMEOUT_SECS) {
            let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidTimeout {
                name: ENV_CHAT_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            config.chat_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(dir) = var(ENV_ASSETS) {
            config.assets_dir = PathBuf::from(dir);
        }
        config.log_filter = var(ENV_LOG);
        config.log_file = var(ENV_LOG_FILE).map(PathBuf::from);

        Ok(config)
    }

    /// The key to use for the guide, unless running offline.
    pub fn effective_api_key(&self) -> Option<&str> {
        if self.offline {
            return None;
        }
        self.api_key.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use std::time::Duration;

    use super::{Config, ConfigError};

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.chat_timeout.is_none());
        assert!(config.effective_api_key().is_none());
    }

    #[test]
    fn gemini_key_wins_over_fallback() {
        let config = config_from(&[("GEMINI_API_KEY", "primary"), ("API_KEY", "fallback")]).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("primary"));

        let config = config_from(&[("GEMINI_API_KEY", "  "), ("API_KEY", "fallback")]).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("fallback"));
    }

    #[test]
    fn offline_hides_the_key() {
        let mut config = config_from(&[("API_KEY", "k")]).unwrap();
        config.offline = true;
        assert!(config.effective_api_key().is_none());
    }

    #[test]
    fn parses_timeout_and_paths() {
        let config = config_from(&[
            ("LAURA_CHAT_TIMEOUT_SECS", "30"),
            ("LAURA_ASSETS", "/srv/laura"),
            ("LAURA_LOG_FILE", "/tmp/laura.log"),
            ("LAURA_GEMINI_MODEL", "gemini-2.0-flash"),
        ])
        .unwrap();
        assert_eq!(config.chat_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.assets_dir, PathBuf::from("/srv/laura"));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/laura.log")));
        assert_eq!(config.model, "gemini-2.0-flash");

        let config = config_from(&[("LAURA_CHAT_TIMEOUT_SECS", "0")]).unwrap();
        assert!(config.chat_timeout.is_none());
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let err = config_from(&[("LAURA_CHAT_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidTimeout {
                name: "LAURA_CHAT_TIMEOUT_SECS",
                value: "soon".to_owned()
            }
        );
    }

    #[test]
    fn debug_redacts_the_key() {
        let config = config_from(&[("API_KEY", "top-secret")]).unwrap();
        assert!(!format!("{config:?}").contains("top-secret"));
    }
}
