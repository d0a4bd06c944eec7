//! # Station Configuration
//!
//! Configuration for the scanning station.
//!
//! ## Configuration File Format
//!
//! ```toml
//! # scanpos.toml
//!
//! [catalog]
//! url = "https://cart-backend-one.vercel.app/products"
//! # timeout_ms = 10000   # unset: wait for the catalog indefinitely
//!
//! [scanner]
//! cooldown_ms = 3000
//! device = "/dev/ttyACM0"  # keyboard-wedge scanner or decoder pipe
//!
//! [storage]
//! db_path = "/var/lib/scanpos/scanpos.db"
//! snapshot_key = "cart_items"
//!
//! [display]
//! currency = "AZN"
//! ```
//!
//! ## Load Order (later overrides earlier)
//! 1. Default values
//! 2. Config file (`scanpos.toml`)
//! 3. Environment variables (`SCANPOS_*`)
//! 4. Command-line flags

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use scanpos_catalog::{parse_catalog_url, DEFAULT_CATALOG_URL};
use scanpos_core::{Money, DEFAULT_COOLDOWN};

use crate::cli::Cli;

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No data directory available; set storage.db_path or SCANPOS_DB_PATH")]
    NoDataDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Catalog Settings
// =============================================================================

/// Where products come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Endpoint returning the full product array.
    #[serde(default = "default_catalog_url")]
    pub url: String,

    /// Request timeout. Unset means no timeout.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_catalog_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            url: default_catalog_url(),
            timeout_ms: None,
        }
    }
}

// =============================================================================
// Scanner Settings
// =============================================================================

/// Decoder and debounce settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerSettings {
    /// Cooldown after a completed lookup (milliseconds).
    /// Default: 3000
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,

    /// Line-oriented decoder source. `None` runs manual-entry only.
    #[serde(default)]
    pub device: Option<PathBuf>,
}

fn default_cooldown_ms() -> u64 {
    DEFAULT_COOLDOWN.as_millis() as u64
}

impl Default for ScannerSettings {
    fn default() -> Self {
        ScannerSettings {
            cooldown_ms: default_cooldown_ms(),
            device: None,
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

/// Snapshot database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Database file. `None` uses the platform data directory.
    #[serde(default)]
    pub db_path: Option<PathBuf>,

    /// Key the cart snapshot is stored under.
    #[serde(default = "default_snapshot_key")]
    pub snapshot_key: String,
}

fn default_snapshot_key() -> String {
    "cart_items".to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            db_path: None,
            snapshot_key: default_snapshot_key(),
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Currency label printed after amounts.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "AZN".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency: default_currency(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete station configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScannerConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub scanner: ScannerSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl ScannerConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading station config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads configuration, then applies command-line flags and re-validates.
    pub fn load_with_cli(cli: &Cli) -> ConfigResult<Self> {
        let mut config = Self::load(cli.config.clone())?;
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to file. Returns the path written.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoDataDir)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Station config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        parse_catalog_url(&self.catalog.url).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;

        if self.scanner.cooldown_ms == 0 {
            return Err(ConfigError::Invalid(
                "scanner.cooldown_ms must be greater than 0".into(),
            ));
        }

        if self.catalog.timeout_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "catalog.timeout_ms must be greater than 0 when set".into(),
            ));
        }

        if self.storage.snapshot_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.snapshot_key must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies `SCANPOS_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any variable source.
    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("SCANPOS_CATALOG_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.catalog.url = url;
        }

        if let Some(cooldown) = lookup("SCANPOS_COOLDOWN_MS") {
            match cooldown.parse::<u64>() {
                Ok(ms) => self.scanner.cooldown_ms = ms,
                Err(_) => warn!(value = %cooldown, "Ignoring non-numeric SCANPOS_COOLDOWN_MS"),
            }
        }

        if let Some(device) = lookup("SCANPOS_DEVICE") {
            debug!(device = %device, "Overriding decoder device from environment");
            self.scanner.device = Some(PathBuf::from(device));
        }

        if let Some(path) = lookup("SCANPOS_DB_PATH") {
            self.storage.db_path = Some(PathBuf::from(path));
        }

        if let Some(currency) = lookup("SCANPOS_CURRENCY") {
            self.display.currency = currency;
        }
    }

    /// Applies command-line flags.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(url) = &cli.catalog_url {
            self.catalog.url = url.clone();
        }
        if let Some(ms) = cli.lookup_timeout_ms {
            self.catalog.timeout_ms = Some(ms);
        }
        if let Some(ms) = cli.cooldown_ms {
            self.scanner.cooldown_ms = ms;
        }
        if let Some(device) = &cli.device {
            self.scanner.device = Some(device.clone());
        }
        if cli.no_camera {
            self.scanner.device = None;
        }
        if let Some(path) = &cli.db_path {
            self.storage.db_path = Some(path.clone());
        }
        if let Some(currency) = &cli.currency {
            self.display.currency = currency.clone();
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "scanpos", "pos")
            .map(|dirs| dirs.config_dir().join("scanpos.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Cooldown as a Duration.
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.scanner.cooldown_ms)
    }

    /// Catalog request timeout, if configured.
    pub fn lookup_timeout(&self) -> Option<Duration> {
        self.catalog.timeout_ms.map(Duration::from_millis)
    }

    /// Decoder device, if configured.
    pub fn device(&self) -> Option<&Path> {
        self.scanner.device.as_deref()
    }

    /// Resolves the snapshot database path.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.scanpos.pos/scanpos.db`
    /// - **Windows**: `%APPDATA%\scanpos\pos\data\scanpos.db`
    /// - **Linux**: `~/.local/share/pos/scanpos.db`
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.storage.db_path {
            return Ok(path.clone());
        }
        directories::ProjectDirs::from("com", "scanpos", "pos")
            .map(|dirs| dirs.data_dir().join("scanpos.db"))
            .ok_or(ConfigError::NoDataDir)
    }

    /// Formats an amount with the configured currency label.
    ///
    /// ## Example
    /// ```rust,ignore
    /// assert_eq!(config.format_currency(Money::from_cents(450)), "4.50 AZN");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let currency = self.display.currency.trim();
        if currency.is_empty() {
            amount.to_string()
        } else {
            format!("{} {}", amount, currency)
        }
    }
}
