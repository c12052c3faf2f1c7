//! # gap-config
//!
//! Layered configuration loading for the GAP client using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`GAP_*` prefix, `__` as separator)
//! 2. Project-level `.gap/config.toml`
//! 3. User-level `~/.config/gap/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `GAP_API__BASE_URL` -> `api.base_url`, `GAP_AUTH__CLIENT_ID` ->
//! `auth.client_id`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use gap_config::GapConfig;
//!
//! let config = GapConfig::load_with_dotenv().expect("config");
//! if config.is_configured() {
//!     println!("API: {}", config.api.api_url());
//! }
//! ```

mod api;
mod auth;
mod error;
mod lenient;

pub use api::ApiConfig;
pub use auth::AuthConfig;
pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GapConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl GapConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".gap/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("GAP_").split("__"))
    }

    /// Required keys that are not set, in the order they are checked.
    ///
    /// Client credentials are only required when no bearer token is set.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api.base_url.is_empty() {
            missing.push("base_url");
        }
        if self.api.account_id.is_empty() {
            missing.push("account_id");
        }
        if !self.auth.uses_token() {
            if self.auth.client_id.is_empty() {
                missing.push("client_id");
            }
            if self.auth.client_secret.is_empty() {
                missing.push("client_secret");
            }
        }
        missing
    }

    pub fn is_configured(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] listing every missing key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::NotConfigured { missing })
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gap").join("config.toml"))
    }

    /// Walks up from `CARGO_MANIFEST_DIR` (if set) looking for `.env`, then
    /// falls back to the current directory. Missing files are ignored.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
