//! # Vendor Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SABZI_LEDGER_PATH=/srv/market/inventory_data.json                  │
//! │     SABZI_TAX_RATE=5                                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/sabzi-pos/sabzi.toml (Linux)                             │
//! │     ~/Library/Application Support/com.sabzi.pos/sabzi.toml (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     5% tax, 5 kg low stock, 5% simulated gateway failures              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! ledger_path = "/srv/market/inventory_data.json"
//! currency_symbol = "₹"
//!
//! [store]
//! name = "Green Valley Vegetable Market"
//! address = "123 Market Street, Fresh City"
//! phone = "+91-9876543210"
//!
//! [tax]
//! rate_bps = 500
//!
//! [inventory]
//! low_stock_threshold_kg = 5.0
//!
//! [payment]
//! online_failure_rate = 0.05
//! delay_ms = 1500
//! ```

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use sabzi_core::payment::{DEFAULT_ONLINE_FAILURE_RATE, DEFAULT_PAYMENT_DELAY};
use sabzi_core::validation::validate_tax_rate_bps;
use sabzi_core::{
    GatewaySettings, Quantity, ReceiptFormatter, StoreInfo, TaxRate, DEFAULT_CURRENCY_SYMBOL,
    DEFAULT_TAX_RATE_BPS, LOW_STOCK_THRESHOLD,
};
use sabzi_ledger::DEFAULT_LEDGER_FILE;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "sabzi.toml";

// =============================================================================
// Config Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(String),

    #[error("Failed to save config: {0}")]
    Save(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Load(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Save(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        let info = StoreInfo::default();
        StoreSection {
            name: info.name,
            address: info.address,
            phone: info.phone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxSection {
    /// Basis points, 500 = 5%.
    pub rate_bps: u32,
}

impl Default for TaxSection {
    fn default() -> Self {
        TaxSection {
            rate_bps: DEFAULT_TAX_RATE_BPS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventorySection {
    pub low_stock_threshold_kg: f64,
}

impl Default for InventorySection {
    fn default() -> Self {
        InventorySection {
            low_stock_threshold_kg: LOW_STOCK_THRESHOLD.as_decimal_kg(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentSection {
    pub online_failure_rate: f64,
    pub delay_ms: u64,
}

impl Default for PaymentSection {
    fn default() -> Self {
        PaymentSection {
            online_failure_rate: DEFAULT_ONLINE_FAILURE_RATE,
            delay_ms: DEFAULT_PAYMENT_DELAY.as_millis() as u64,
        }
    }
}

// =============================================================================
// Vendor Config
// =============================================================================

/// Settings for one vendor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorConfig {
    /// Ledger file; platform data directory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_path: Option<PathBuf>,
    pub currency_symbol: String,
    pub store: StoreSection,
    pub tax: TaxSection,
    pub inventory: InventorySection,
    pub payment: PaymentSection,
}

impl Default for VendorConfig {
    fn default() -> Self {
        VendorConfig {
            ledger_path: None,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            store: StoreSection::default(),
            tax: TaxSection::default(),
            inventory: InventorySection::default(),
            payment: PaymentSection::default(),
        }
    }
}

impl VendorConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`sabzi.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading vendor config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load vendor config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::Save("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Save(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::Save(e.to_string()))?;

        info!(?path, "Vendor config saved");
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        validate_tax_rate_bps(self.tax.rate_bps)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store name must not be empty".into()));
        }

        let rate = self.payment.online_failure_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::Invalid(format!(
                "online_failure_rate must be between 0 and 1, got {}",
                rate
            )));
        }

        let threshold = self.inventory.low_stock_threshold_kg;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "low_stock_threshold_kg must be positive, got {}",
                threshold
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `SABZI_*` overrides from any key lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("SABZI_LEDGER_PATH") {
            debug!(path = %path, "Overriding ledger path from environment");
            self.ledger_path = Some(PathBuf::from(path));
        }

        if let Some(name) = lookup("SABZI_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(rate) = lookup("SABZI_TAX_RATE") {
            match rate.parse::<f64>() {
                Ok(pct) if pct.is_finite() && pct >= 0.0 => {
                    self.tax.rate_bps = TaxRate::from_percentage(pct).bps();
                }
                _ => warn!(rate = %rate, "Ignoring unparsable SABZI_TAX_RATE"),
            }
        }

        if let Some(rate) = lookup("SABZI_PAYMENT_FAILURE_RATE") {
            match rate.parse::<f64>() {
                Ok(r) => self.payment.online_failure_rate = r,
                Err(_) => warn!(rate = %rate, "Ignoring unparsable SABZI_PAYMENT_FAILURE_RATE"),
            }
        }

        if let Some(delay) = lookup("SABZI_PAYMENT_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => self.payment.delay_ms = ms,
                Err(_) => warn!(delay = %delay, "Ignoring unparsable SABZI_PAYMENT_DELAY_MS"),
            }
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "sabzi", "pos")
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Derived Settings
    // =========================================================================

    /// Configured ledger path, else the platform data directory, else
    /// `inventory_data.json` in the working directory.
    pub fn ledger_path(&self) -> PathBuf {
        self.ledger_path
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().join(DEFAULT_LEDGER_FILE)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LEDGER_FILE))
    }

    pub fn store_info(&self) -> StoreInfo {
        StoreInfo {
            name: self.store.name.clone(),
            address: self.store.address.clone(),
            phone: self.store.phone.clone(),
        }
    }

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax.rate_bps)
    }

    pub fn low_stock_threshold(&self) -> Quantity {
        Quantity::from_decimal_kg(self.inventory.low_stock_threshold_kg).unwrap_or(LOW_STOCK_THRESHOLD)
    }

    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            delay: Duration::from_millis(self.payment.delay_ms),
            online_failure_rate: self.payment.online_failure_rate,
        }
    }

    pub fn receipt_formatter(&self) -> ReceiptFormatter {
        ReceiptFormatter::new(self.store_info(), self.tax_rate(), self.currency_symbol.clone())
    }
}
