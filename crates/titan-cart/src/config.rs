//! # Cart Configuration
//!
//! Settings that shape how a [`Cart`](crate::Cart) names its session keys
//! and treats title updates.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TITAN_CART_DEFAULT_INSTANCE=default                                │
//! │     TITAN_CART_KEY_PREFIX=cart.                                        │
//! │     TITAN_CART_TITLE_UPDATE=value                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/titan-pos/cart.toml (Linux)                              │
//! │     ~/Library/Application Support/com.titan.pos/cart.toml (macOS)      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # cart.toml
//! default_instance = "default"
//! key_prefix = "cart."
//! title_update = "key_name"  # key_name | value
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CartError, CartResult};
use crate::item::TitleUpdatePolicy;

/// Instance name used when none (or an empty one) is given.
pub const DEFAULT_INSTANCE: &str = "default";

/// Prefix put in front of the instance name to form the session key.
pub const DEFAULT_KEY_PREFIX: &str = "cart.";

/// Cart settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Instance selected by `Cart::new` and by `instance(None)`.
    #[serde(default = "default_instance")]
    pub default_instance: String,

    /// Session key prefix; the key for instance `x` is `{key_prefix}x`.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// What a title update stores.
    #[serde(default)]
    pub title_update: TitleUpdatePolicy,
}

fn default_instance() -> String {
    DEFAULT_INSTANCE.to_string()
}

fn default_key_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        CartConfig {
            default_instance: default_instance(),
            key_prefix: default_key_prefix(),
            title_update: TitleUpdatePolicy::default(),
        }
    }
}

impl CartConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (cart.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CartResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading cart config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Cart config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load cart config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CartResult<()> {
        if self.default_instance.trim().is_empty() {
            return Err(CartError::Config(
                "default_instance must not be empty".into(),
            ));
        }

        if self.key_prefix.is_empty() {
            return Err(CartError::Config("key_prefix must not be empty".into()));
        }

        Ok(())
    }

    /// Session key for `instance`.
    pub fn session_key(&self, instance: &str) -> String {
        format!("{}{}", self.key_prefix, instance)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(instance) = std::env::var("TITAN_CART_DEFAULT_INSTANCE") {
            debug!(instance = %instance, "Overriding default cart instance from environment");
            self.default_instance = instance;
        }

        if let Ok(prefix) = std::env::var("TITAN_CART_KEY_PREFIX") {
            debug!(prefix = %prefix, "Overriding cart key prefix from environment");
            self.key_prefix = prefix;
        }

        if let Ok(policy) = std::env::var("TITAN_CART_TITLE_UPDATE") {
            match policy.parse() {
                Ok(parsed) => self.title_update = parsed,
                Err(_) => warn!(policy = %policy, "Unknown title update policy in environment"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "titan", "pos")
            .map(|dirs| dirs.config_dir().join("cart.toml"))
    }
}
