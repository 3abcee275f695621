use crate::adapters::{HttpContactTransport, TomlCatalogFile};
use crate::core::catalog::Catalog;
use crate::core::contact::SimulatedTransport;
use crate::domain::model::Locale;
use crate::domain::ports::ContactTransport;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const MAX_SIMULATED_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// TOML file replacing the built-in seminar list.
    pub file: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactTransportKind {
    #[default]
    Simulated,
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    #[serde(default)]
    pub transport: ContactTransportKind,
    #[serde(default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,
    #[serde(default = "default_success_notice_ms")]
    pub success_notice_ms: u64,
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_locale() -> String {
    Locale::default().code().to_string()
}

fn default_currency_symbol() -> String {
    "€".to_string()
}

fn default_simulated_delay_ms() -> u64 {
    1000
}

fn default_success_notice_ms() -> u64 {
    5000
}

fn default_timeout_seconds() -> u64 {
    10
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            transport: ContactTransportKind::default(),
            simulated_delay_ms: default_simulated_delay_ms(),
            success_notice_ms: default_success_notice_ms(),
            endpoint: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl BookingConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BookingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BookingError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let locale = self.site.default_locale.to_ascii_lowercase();
        if !Locale::ALL.iter().any(|l| l.code() == locale) {
            return Err(BookingError::InvalidConfigValueError {
                field: "site.default_locale".to_string(),
                value: self.site.default_locale.clone(),
                reason: "Supported locales: fr, en, ka".to_string(),
            });
        }

        validation::validate_non_empty_string("site.currency_symbol", &self.site.currency_symbol)?;

        if let Some(file) = &self.catalog.file {
            validation::validate_path("catalog.file", file)?;
            validation::validate_file_extension("catalog.file", file, &["toml"])?;
        }

        validation::validate_range(
            "contact.simulated_delay_ms",
            self.contact.simulated_delay_ms,
            0,
            MAX_SIMULATED_DELAY_MS,
        )?;
        validation::validate_positive_number("contact.timeout_seconds", self.contact.timeout_seconds, 1)?;

        if self.contact.transport == ContactTransportKind::Http {
            let endpoint = validation::validate_required_field("contact.endpoint", &self.contact.endpoint)?;
            validation::validate_url("contact.endpoint", endpoint)?;
        }

        if let Some(level) = &self.logging.level {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(BookingError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.clone(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }

    pub fn default_locale(&self) -> Locale {
        Locale::resolve(Some(&self.site.default_locale))
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog.file {
            Some(file) => Catalog::load(&TomlCatalogFile::new(file)),
            None => Ok(Catalog::builtin()),
        }
    }

    pub fn contact_transport(&self) -> Result<Arc<dyn ContactTransport>> {
        match self.contact.transport {
            ContactTransportKind::Simulated => Ok(Arc::new(SimulatedTransport::new(
                Duration::from_millis(self.contact.simulated_delay_ms),
            ))),
            ContactTransportKind::Http => {
                let endpoint =
                    validation::validate_required_field("contact.endpoint", &self.contact.endpoint)?;
                Ok(Arc::new(HttpContactTransport::new(
                    endpoint.clone(),
                    Duration::from_secs(self.contact.timeout_seconds),
                )?))
            }
        }
    }

    pub fn success_notice(&self) -> Duration {
        Duration::from_millis(self.contact.success_notice_ms)
    }
}

impl Validate for BookingConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = BookingConfig::from_toml_str("").unwrap();
        assert_eq!(config.default_locale(), Locale::Fr);
        assert_eq!(config.site.currency_symbol, "€");
        assert_eq!(config.contact.simulated_delay_ms, 1000);
        assert_eq!(config.success_notice(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
        assert_eq!(config.load_catalog().unwrap().len(), 6);
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[site]
default_locale = "en"
currency_symbol = "GEL"

[contact]
transport = "http"
endpoint = "https://api.example.com/contact"
timeout_seconds = 3

[logging]
level = "debug"
format = "json"
"#;

        let config = BookingConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.default_locale(), Locale::En);
        assert_eq!(config.contact.transport, ContactTransportKind::Http);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FB_TEST_CONTACT_ENDPOINT", "https://contact.example.com");

        let toml_content = r#"
[contact]
transport = "http"
endpoint = "${FB_TEST_CONTACT_ENDPOINT}"
"#;

        let config = BookingConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.contact.endpoint.as_deref(),
            Some("https://contact.example.com")
        );

        std::env::remove_var("FB_TEST_CONTACT_ENDPOINT");
    }

    #[test]
    fn test_http_transport_requires_endpoint() {
        let config = BookingConfig::from_toml_str("[contact]\ntransport = \"http\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(BookingError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_locale = BookingConfig::from_toml_str("[site]\ndefault_locale = \"de\"\n").unwrap();
        assert!(bad_locale.validate().is_err());

        let bad_catalog = BookingConfig::from_toml_str("[catalog]\nfile = \"seminars.json\"\n").unwrap();
        assert!(bad_catalog.validate().is_err());

        let bad_delay = BookingConfig::from_toml_str("[contact]\nsimulated_delay_ms = 120000\n").unwrap();
        assert!(bad_delay.validate().is_err());

        let bad_level = BookingConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(bad_level.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            BookingConfig::from_toml_str("[site\n"),
            Err(BookingError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[site]\ndefault_locale = \"ka\"\n")
            .unwrap();

        let config = BookingConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.default_locale(), Locale::Ka);
    }
}
