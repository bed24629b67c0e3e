//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`storefront.toml`, or the path in `ATELIER_CONFIG`)
//! 3. Environment variables (`ATELIER_*`)
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! store_name = "Atelier Handcrafted Jewelry"
//!
//! [currency]
//! code = "USD"
//! symbol = "$"
//! decimals = 2
//!
//! [payments]
//! latency_ms = 1500
//!
//! [storage]
//! persist_cart = true
//! data_dir = "/var/lib/atelier"
//! # db_path = "/var/lib/atelier/atelier.db"   (wins over data_dir)
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use atelier_core::validation::validate_currency_code;

/// Database file name inside the data directory.
pub const DATABASE_FILE_NAME: &str = "atelier.db";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

const MAX_CURRENCY_DECIMALS: u8 = 4;

/// Errors while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (shown in the header and on confirmations)
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Simulated processor latency in milliseconds
    pub payment_latency_ms: u64,

    /// Whether the cart survives restarts
    pub persist_cart: bool,

    /// Directory holding the database file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Explicit database file, wins over `data_dir`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Atelier Handcrafted Jewelry"
    /// - Currency: USD ($, 2 decimals)
    /// - Payment latency: 1500 ms
    /// - Cart persisted in the platform data directory
    fn default() -> Self {
        ConfigState {
            store_name: "Atelier Handcrafted Jewelry".to_string(),
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            payment_latency_ms: atelier_payments::config::DEFAULT_LATENCY_MS,
            persist_cart: true,
            data_dir: None,
            db_path: None,
        }
    }
}

// =============================================================================
// Config File
// =============================================================================

/// On-disk shape of `storefront.toml`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    store_name: Option<String>,
    #[serde(default)]
    currency: CurrencySection,
    #[serde(default)]
    payments: PaymentsSection,
    #[serde(default)]
    storage: StorageSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CurrencySection {
    code: Option<String>,
    symbol: Option<String>,
    decimals: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PaymentsSection {
    latency_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StorageSection {
    persist_cart: Option<bool>,
    data_dir: Option<PathBuf>,
    db_path: Option<PathBuf>,
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// A missing config file is not an error. An unreadable or invalid one is.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let env = |name: &str| std::env::var(name).ok();
        let path = Self::resolve_path(config_path, env);
        Self::load_with(path.as_deref(), env)
    }

    /// Loads config or returns defaults (with env overrides) if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        let env = |name: &str| std::env::var(name).ok();
        let path = Self::resolve_path(config_path, env);
        Self::load_or_default_with(path.as_deref(), env)
    }

    fn resolve_path(
        config_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<PathBuf> {
        config_path
            .or_else(|| lookup("ATELIER_CONFIG").map(PathBuf::from))
            .or_else(Self::default_config_path)
    }

    fn load_or_default_with(path: Option<&Path>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::load_with(path, &lookup).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            let mut config = Self::default();
            config.apply_overrides(&lookup);
            match config.validate() {
                Ok(()) => config,
                Err(e) => {
                    warn!("Environment overrides rejected: {}. Using built-in defaults.", e);
                    Self::default()
                }
            }
        })
    }

    /// Same as [`ConfigState::load`] with an explicit variable lookup.
    fn load_with(
        path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                config.apply_file(toml::from_str(&contents)?);
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(name) = file.store_name {
            self.store_name = name;
        }
        if let Some(code) = file.currency.code {
            self.set_currency(code);
        }
        if let Some(symbol) = file.currency.symbol {
            self.currency_symbol = symbol;
        }
        if let Some(decimals) = file.currency.decimals {
            self.currency_decimals = decimals;
        }
        if let Some(ms) = file.payments.latency_ms {
            self.payment_latency_ms = ms;
        }
        if let Some(persist) = file.storage.persist_cart {
            self.persist_cart = persist;
        }
        if file.storage.data_dir.is_some() {
            self.data_dir = file.storage.data_dir;
        }
        if file.storage.db_path.is_some() {
            self.db_path = file.storage.db_path;
        }
    }

    /// Applies `ATELIER_*` overrides. Unparseable values are ignored with a warning.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("ATELIER_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(code) = lookup("ATELIER_CURRENCY") {
            debug!(currency = %code, "Overriding currency from environment");
            self.set_currency(code.to_ascii_uppercase());
        }

        if let Some(dir) = lookup("ATELIER_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(path) = lookup("ATELIER_DB_PATH") {
            self.db_path = Some(PathBuf::from(path));
        }

        if let Some(latency) = lookup("ATELIER_PAYMENT_LATENCY_MS") {
            match latency.parse::<u64>() {
                Ok(ms) => self.payment_latency_ms = ms,
                Err(_) => warn!(value = %latency, "Ignoring invalid ATELIER_PAYMENT_LATENCY_MS"),
            }
        }

        if let Some(persist) = lookup("ATELIER_PERSIST_CART") {
            match persist.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.persist_cart = true,
                "0" | "false" | "no" | "off" => self.persist_cart = false,
                _ => warn!(value = %persist, "Ignoring invalid ATELIER_PERSIST_CART"),
            }
        }
    }

    /// Sets the currency code and, for well-known codes, its symbol and decimals.
    fn set_currency(&mut self, code: String) {
        if let Some((symbol, decimals)) = known_currency(&code) {
            self.currency_symbol = symbol.to_string();
            self.currency_decimals = decimals;
        }
        self.currency_code = code;
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }

        validate_currency_code(&self.currency_code)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "currency decimals must be at most {}, got {}",
                MAX_CURRENCY_DECIMALS, self.currency_decimals
            )));
        }

        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Resolves the database file.
    ///
    /// ## Resolution Order
    /// 1. `db_path`
    /// 2. `data_dir/atelier.db`
    /// 3. Platform data directory:
    ///    - **macOS**: `~/Library/Application Support/com.atelier.storefront/atelier.db`
    ///    - **Windows**: `%APPDATA%\atelier\storefront\data\atelier.db`
    ///    - **Linux**: `~/.local/share/storefront/atelier.db`
    pub fn database_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.db_path {
            return Some(path.clone());
        }

        self.data_dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .map(|dir| dir.join(DATABASE_FILE_NAME))
    }

    /// Formats a minor-unit amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "atelier", "storefront")
}

fn known_currency(code: &str) -> Option<(&'static str, u8)> {
    match code {
        "USD" | "CAD" | "AUD" => Some(("$", 2)),
        "EUR" => Some(("€", 2)),
        "GBP" => Some(("£", 2)),
        "JPY" => Some(("¥", 0)),
        _ => None,
    }
}
