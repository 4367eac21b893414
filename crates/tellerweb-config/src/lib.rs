//! Configuration management for tellerweb
//!
//! This module handles loading, validation, and management of
//! tellerweb configuration from YAML files.

pub mod error;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

/// Reject chrono format strings that would fail when rendering
fn is_valid_strftime(format: &str) -> bool {
    !format.is_empty() && StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins (empty allows any origin)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8082
}

/// Snapshot data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the JSON snapshot of accounts, cards, beneficiaries and transactions
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("./data/snapshot.json")
}

/// Statement export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementConfig {
    /// Bank name printed on the statement header and footer
    #[serde(default = "default_bank_name")]
    pub bank_name: String,
    /// Currency symbol prefixed to every amount
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// chrono format for the CSV date column
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,
    /// chrono format for dates on the printable statement
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for StatementConfig {
    fn default() -> Self {
        Self {
            bank_name: default_bank_name(),
            currency_symbol: default_currency_symbol(),
            datetime_format: default_datetime_format(),
            date_format: default_date_format(),
        }
    }
}

fn default_bank_name() -> String {
    "Reuel Banking".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_datetime_format() -> String {
    "%-m/%-d/%Y, %-I:%M:%S %p".to_string()
}

fn default_date_format() -> String {
    "%-m/%-d/%Y".to_string()
}

/// Dashboard and analytics settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Number of recent transactions on the dashboard
    #[serde(default = "default_recent_transactions")]
    pub recent_transactions: usize,
    /// Number of months in the monthly deposits/withdrawals series
    #[serde(default = "default_analytics_months")]
    pub analytics_months: u32,
    /// Number of days in the daily cash flow series
    #[serde(default = "default_analytics_days")]
    pub analytics_days: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_transactions: default_recent_transactions(),
            analytics_months: default_analytics_months(),
            analytics_days: default_analytics_days(),
        }
    }
}

fn default_recent_transactions() -> usize {
    5
}

/// Upper bound for `dashboard.analytics_months`
pub const MAX_ANALYTICS_MONTHS: u32 = 120;

/// Upper bound for `dashboard.analytics_days`
pub const MAX_ANALYTICS_DAYS: u32 = 366;

fn default_analytics_months() -> u32 {
    6
}

fn default_analytics_days() -> u32 {
    30
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Snapshot data settings
    #[serde(default)]
    pub data: DataConfig,
    /// Statement export settings
    #[serde(default)]
    pub statement: StatementConfig,
    /// Dashboard settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|_| ConfigError::IoError)?;

        let config = Self::from_yaml(&content)?;
        log::debug!(target: "tellerweb::config", "Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.statement.currency_symbol.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "statement.currency_symbol".to_string(),
                reason: "Currency symbol must not be empty".to_string(),
            });
        }

        if self.statement.bank_name.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "statement.bank_name".to_string(),
            });
        }

        for (field, format) in [
            ("statement.datetime_format", &self.statement.datetime_format),
            ("statement.date_format", &self.statement.date_format),
        ] {
            if !is_valid_strftime(format) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("Invalid date format: {}", format),
                });
            }
        }

        if self.dashboard.recent_transactions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.recent_transactions".to_string(),
                reason: "Recent transaction count must be greater than 0".to_string(),
            });
        }

        if self.dashboard.analytics_months == 0 || self.dashboard.analytics_days == 0 {
            return Err(ConfigError::ValidationError {
                message: "Analytics windows must cover at least one month and one day".to_string(),
            });
        }

        if self.dashboard.analytics_months > MAX_ANALYTICS_MONTHS {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.analytics_months".to_string(),
                reason: format!("Analytics months must be at most {}", MAX_ANALYTICS_MONTHS),
            });
        }

        if self.dashboard.analytics_days > MAX_ANALYTICS_DAYS {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.analytics_days".to_string(),
                reason: format!("Analytics days must be at most {}", MAX_ANALYTICS_DAYS),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
