//! Client configuration.

use std::time::Duration;

use clap::Args;
use jiff::tz::TimeZone;
use reqwest::Url;
use storefront::images::DEFAULT_CDN_BASE;
use thiserror::Error;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Backend and display settings.
#[derive(Debug, Args)]
pub struct StorefrontConfig {
    /// Base URL of the storefront REST API
    #[arg(long, env = "STOREFRONT_API_URL", default_value = "http://localhost:8000/api")]
    pub api_url: String,

    /// Bearer token of the signed-in customer
    #[arg(long, env = "STOREFRONT_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Image CDN delivery base
    #[arg(long, env = "STOREFRONT_CDN_BASE", default_value = DEFAULT_CDN_BASE)]
    pub cdn_base: String,

    /// Wait before redirecting a signed-out customer to login, in milliseconds
    #[arg(long, env = "LOGIN_REDIRECT_DELAY_MS", default_value_t = 3000)]
    pub login_redirect_delay_ms: u64,

    /// IANA time zone for dates; the system zone when omitted
    #[arg(long, env = "STOREFRONT_TIMEZONE")]
    pub timezone: Option<String>,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API URL {0:?}: expected an http or https URL")]
    InvalidApiUrl(String),

    #[error("unknown time zone {name:?}")]
    TimeZone {
        name: String,
        #[source]
        source: jiff::Error,
    },
}

impl StorefrontConfig {
    /// Check the API URL is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] for anything but an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match Url::parse(&self.api_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            _ => Err(ConfigError::InvalidApiUrl(self.api_url.clone())),
        }
    }

    #[must_use]
    pub fn login_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.login_redirect_delay_ms)
    }

    /// Zone dates are shown in.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TimeZone`] when the configured zone is unknown.
    pub fn time_zone(&self) -> Result<TimeZone, ConfigError> {
        match &self.timezone {
            Some(name) => TimeZone::get(name).map_err(|source| ConfigError::TimeZone {
                name: name.clone(),
                source,
            }),
            None => Ok(TimeZone::system()),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        config: StorefrontConfig,
    }

    #[test]
    fn defaults_apply() -> testresult::TestResult {
        let harness = Harness::try_parse_from(["storefront"])?;

        assert_eq!(harness.config.login_redirect_delay(), Duration::from_secs(3));
        assert_eq!(harness.config.cdn_base, DEFAULT_CDN_BASE);
        assert!(harness.config.validate().is_ok());

        Ok(())
    }

    #[test]
    fn rejects_non_http_api_url() -> testresult::TestResult {
        let harness = Harness::try_parse_from(["storefront", "--api-url", "ftp://example.com"])?;

        assert!(matches!(
            harness.config.validate(),
            Err(ConfigError::InvalidApiUrl(_))
        ));

        Ok(())
    }
}
