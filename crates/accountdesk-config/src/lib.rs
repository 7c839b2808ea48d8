//! Configuration management for accountdesk
//!
//! This module handles loading, validation, and management of
//! accountdesk configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Accounts REST service location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme, host and port of the accounts service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Collection path under the base url
    #[serde(default = "default_accounts_path")]
    pub accounts_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            accounts_path: default_accounts_path(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5008".to_string()
}

fn default_accounts_path() -> String {
    "/api/accounts".to_string()
}

/// Reference backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5008
}

/// Pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Rows per page when a list is first shown
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Choices offered by the rows-per-page selector
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_size_options: default_page_size_options(),
        }
    }
}

impl PaginationConfig {
    /// Accept `page_size` if it is non-zero and, when options are set, one of them
    pub fn check_page_size(&self, page_size: usize) -> ConfigResult<()> {
        if page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.page_size".to_string(),
                reason: "Page size must be greater than 0".to_string(),
            });
        }
        if !self.page_size_options.is_empty() && !self.page_size_options.contains(&page_size) {
            return Err(ConfigError::InvalidValue {
                field: "pagination.page_size".to_string(),
                reason: format!("Page size must be one of {:?}", self.page_size_options),
            });
        }
        Ok(())
    }
}

fn default_page_size() -> usize {
    5
}

fn default_page_size_options() -> Vec<usize> {
    vec![5, 10, 25]
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Symbol appended to balances
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            decimal_places: default_decimal_places(),
            thousands_separator: default_thousands_sep(),
        }
    }
}

fn default_symbol() -> String {
    "€".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_thousands_sep() -> String {
    ",".to_string()
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
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub currency: CurrencyConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|_| ConfigError::IoError {
            path: path.display().to_string(),
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: "Base url must start with http:// or https://".to_string(),
            });
        }

        if !self.api.accounts_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "api.accounts_path".to_string(),
                reason: "Accounts path must start with '/'".to_string(),
            });
        }

        self.pagination.check_page_size(self.pagination.page_size)?;

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Full url of the accounts collection
    pub fn accounts_url(&self) -> String {
        format!(
            "{}{}",
            self.api.base_url.trim_end_matches('/'),
            self.api.accounts_path
        )
    }

    /// Address the reference backend binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.accounts_url(), "http://localhost:5008/api/accounts");
        assert_eq!(config.pagination.page_size, 5);
        assert_eq!(config.bind_address(), "0.0.0.0:5008");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_template_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.api.accounts_path, "/api/accounts");
        assert_eq!(config.currency.symbol, "€");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("api:\n  base_url: \"https://bank.example.com/\"\n").unwrap();
        assert_eq!(config.accounts_url(), "https://bank.example.com/api/accounts");
        assert_eq!(config.pagination.page_size_options, vec![5, 10, 25]);
    }

    #[test]
    fn test_check_page_size_against_options() {
        let pagination = PaginationConfig::default();
        assert!(pagination.check_page_size(10).is_ok());
        assert!(matches!(
            pagination.check_page_size(7),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(pagination.check_page_size(0).is_err());

        let open = PaginationConfig { page_size: 5, page_size_options: vec![] };
        assert!(open.check_page_size(7).is_ok());
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let err = Config::from_yaml("pagination:\n  page_size: 0\n").unwrap_err();
        match err {
            ConfigError::InvalidValue { field, .. } => assert_eq!(field, "pagination.page_size"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_page_size_outside_options() {
        let err = Config::from_yaml("pagination:\n  page_size: 7\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = Config::from_yaml("api:\n  base_url: \"ftp://host\"\n").unwrap_err();
        assert!(err.to_string().contains("api.base_url"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("api: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidYaml { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(PathBuf::from("/nonexistent/accountdesk.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }
}
