//! # Application Configuration
//!
//! Where the cart lives, where commands come from and go to, and which
//! extra promotions to register at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                               │
//! │     --db data/db.json --input cmd.json --output result.json             │
//! │                                                                         │
//! │  2. Environment Variables                                               │
//! │     CHECKOUT_DB_PATH, CHECKOUT_INPUT, CHECKOUT_OUTPUT                   │
//! │                                                                         │
//! │  3. TOML Config File                                                    │
//! │     --config <path>, else the platform config dir:                      │
//! │     ~/.config/checkout/checkout.toml (Linux)                            │
//! │     ~/Library/Application Support/com.checkout.engine/checkout.toml     │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                    │
//! │     db.json, input.json, output.json, no extra promotions               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # checkout.toml
//! [storage]
//! path = "db.json"
//!
//! [io]
//! input = "input.json"
//! output = "output.json"
//!
//! [[promotions]]
//! promotionId = 4242
//! applicableItems = [1001]
//! discountRate = 0.1
//! type = "seasonal"
//! ```

use std::path::{Path, PathBuf};

use checkout_core::PromotionDto;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

pub const ENV_DB_PATH: &str = "CHECKOUT_DB_PATH";
pub const ENV_INPUT: &str = "CHECKOUT_INPUT";
pub const ENV_OUTPUT: &str = "CHECKOUT_OUTPUT";

const CONFIG_FILE_NAME: &str = "checkout.toml";

// =============================================================================
// Storage Settings
// =============================================================================

/// Location of the cart snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("db.json")
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            path: default_storage_path(),
        }
    }
}

// =============================================================================
// I/O Settings
// =============================================================================

/// Command input and result output files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoSettings {
    #[serde(default = "default_input")]
    pub input: PathBuf,

    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_input() -> PathBuf {
    PathBuf::from("input.json")
}

fn default_output() -> PathBuf {
    PathBuf::from("output.json")
}

impl Default for IoSettings {
    fn default() -> Self {
        IoSettings {
            input: default_input(),
            output: default_output(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub io: IoSettings,

    /// Appended to the built-in catalog through `addPromotion`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub promotions: Vec<PromotionDto>,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else checkout.toml in the config dir)
    /// 3. Environment variables
    ///
    /// Flags are applied by the caller afterwards, followed by
    /// [`validate`](Self::validate).
    pub fn load(config_path: Option<&Path>) -> AppResult<Self> {
        let path = config_path
            .map(Path::to_path_buf)
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Reads a TOML file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|e| AppError::read(path, e))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.storage.path.as_os_str().is_empty() {
            return Err(AppError::invalid_config("storage.path must not be empty"));
        }

        if self.io.input.as_os_str().is_empty() {
            return Err(AppError::invalid_config("io.input must not be empty"));
        }

        if self.io.output.as_os_str().is_empty() {
            return Err(AppError::invalid_config("io.output must not be empty"));
        }

        if self.io.input == self.io.output {
            return Err(AppError::invalid_config(format!(
                "io.input and io.output must differ, both are {}",
                self.io.input.display()
            )));
        }

        Ok(())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its
    /// value. [`load`](Self::load) passes the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH) {
            debug!(path = %path, "Overriding storage path from environment");
            self.storage.path = PathBuf::from(path);
        }

        if let Some(input) = lookup(ENV_INPUT) {
            debug!(input = %input, "Overriding input path from environment");
            self.io.input = PathBuf::from(input);
        }

        if let Some(output) = lookup(ENV_OUTPUT) {
            debug!(output = %output, "Overriding output path from environment");
            self.io.output = PathBuf::from(output);
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "checkout", "engine")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
