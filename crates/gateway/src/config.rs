//! Gateway configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `WOO_URL` - Catalog REST base URL (e.g., `https://shop.example/wp-json/wc/v3`)
//! - `WC_KEY` - Catalog consumer key
//! - `WC_SECRET` - Catalog consumer secret
//! - `ANTHROPIC_API_KEY` - Anthropic API key for intent classification
//!
//! ## Optional
//! - `GATEWAY_HOST` - Bind address (default: 127.0.0.1)
//! - `GATEWAY_PORT` - Listen port (default: 3000)
//! - `CLASSIFIER_MODEL` - Claude model ID (default: claude-3-5-haiku-latest)
//! - `CLASSIFIER_MAX_TOKENS` - Response token cap (default: 512)
//! - `CLASSIFIER_TIMEOUT_SECS` - Per-call classifier timeout (default: 20)
//! - `CATALOG_TIMEOUT_SECS` - Per-call catalog timeout (default: 15)
//! - `CATALOG_COLOR_ATTRIBUTE` - Color taxonomy for search filters (default: `pa_colore`)
//! - `CATALOG_SIZE_ATTRIBUTE` - Size taxonomy for search filters (default: `pa_taglia`)
//! - `VARIANT_SIZE_HINT` - Attribute-name fragment marking size attributes (default: size)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use shop_assistant_core::DEFAULT_SIZE_HINT;
use thiserror::Error;
use url::Url;

const DEFAULT_CLASSIFIER_MODEL: &str = "claude-3-5-haiku-latest";
const DEFAULT_CLASSIFIER_MAX_TOKENS: u32 = 512;
const DEFAULT_CLASSIFIER_TIMEOUT_SECS: u64 = 20;
const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 15;
const DEFAULT_COLOR_ATTRIBUTE: &str = "pa_colore";
const DEFAULT_SIZE_ATTRIBUTE: &str = "pa_taglia";
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Gateway application configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Catalog REST API configuration
    pub catalog: CatalogConfig,
    /// Intent classifier configuration
    pub classifier: ClassifierConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Catalog REST API configuration.
///
/// Implements `Debug` manually to redact the consumer secret.
#[derive(Clone)]
pub struct CatalogConfig {
    /// REST base URL, without trailing `/products`
    pub base_url: Url,
    /// Consumer key (basic auth username)
    pub consumer_key: String,
    /// Consumer secret (basic auth password)
    pub consumer_secret: SecretString,
    /// Timeout applied to every catalog call
    pub timeout: Duration,
    /// Attribute taxonomy used for color search filters
    pub color_attribute: String,
    /// Attribute taxonomy used for size search filters
    pub size_attribute: String,
    /// Fragment of a variant attribute name that marks it as a size
    pub size_hint: String,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url.as_str())
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .field("color_attribute", &self.color_attribute)
            .field("size_attribute", &self.size_attribute)
            .field("size_hint", &self.size_hint)
            .finish()
    }
}

/// Intent classifier (Claude) configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ClassifierConfig {
    /// Anthropic API key
    pub api_key: SecretString,
    /// Model ID (e.g., claude-3-5-haiku-latest)
    pub model: String,
    /// Maximum tokens for the classifier response
    pub max_tokens: u32,
    /// Timeout applied to every classifier call
    pub timeout: Duration,
}

impl std::fmt::Debug for ClassifierConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("GATEWAY_HOST", "127.0.0.1")?;
        let port = parse_env("GATEWAY_PORT", "3000")?;
        let catalog = CatalogConfig::from_env()?;
        let classifier = ClassifierConfig::from_env()?;

        Ok(Self {
            host,
            port,
            catalog,
            classifier,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    /// Create a catalog configuration with default timeout and attribute names.
    #[must_use]
    pub fn new(base_url: Url, consumer_key: String, consumer_secret: SecretString) -> Self {
        Self {
            base_url,
            consumer_key,
            consumer_secret,
            timeout: Duration::from_secs(DEFAULT_CATALOG_TIMEOUT_SECS),
            color_attribute: DEFAULT_COLOR_ATTRIBUTE.to_string(),
            size_attribute: DEFAULT_SIZE_ATTRIBUTE.to_string(),
            size_hint: DEFAULT_SIZE_HINT.to_string(),
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        let raw_url = get_required_env("WOO_URL")?;
        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("WOO_URL".to_string(), e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "WOO_URL".to_string(),
                format!("unsupported scheme '{}'", base_url.scheme()),
            ));
        }

        let timeout_secs: u64 = parse_env(
            "CATALOG_TIMEOUT_SECS",
            &DEFAULT_CATALOG_TIMEOUT_SECS.to_string(),
        )?;

        Ok(Self {
            base_url,
            consumer_key: get_required_env("WC_KEY")?,
            consumer_secret: get_validated_secret("WC_SECRET")?,
            timeout: Duration::from_secs(timeout_secs),
            color_attribute: get_env_or_default("CATALOG_COLOR_ATTRIBUTE", DEFAULT_COLOR_ATTRIBUTE),
            size_attribute: get_env_or_default("CATALOG_SIZE_ATTRIBUTE", DEFAULT_SIZE_ATTRIBUTE),
            size_hint: get_env_or_default("VARIANT_SIZE_HINT", DEFAULT_SIZE_HINT),
        })
    }
}

impl ClassifierConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs: u64 = parse_env(
            "CLASSIFIER_TIMEOUT_SECS",
            &DEFAULT_CLASSIFIER_TIMEOUT_SECS.to_string(),
        )?;

        Ok(Self {
            api_key: get_validated_secret("ANTHROPIC_API_KEY")?,
            model: get_env_or_default("CLASSIFIER_MODEL", DEFAULT_CLASSIFIER_MODEL),
            max_tokens: parse_env(
                "CLASSIFIER_MAX_TOKENS",
                &DEFAULT_CLASSIFIER_MAX_TOKENS.to_string(),
            )?,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to a default literal.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog_config() -> CatalogConfig {
        CatalogConfig::new(
            Url::parse("https://shop.example/wp-json/wc/v3").unwrap(),
            "ck_live_key".to_string(),
            SecretString::from("cs_9f8e7d6c5b4a39281706f5e4d3c2b1a0"),
        )
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-consumer-secret", "WC_SECRET");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaa", "WC_SECRET");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("cs_9f8e7d6c5b4a39281706f5e4d3c2b1a0", "WC_SECRET");
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_value_invalid_port() {
        let result: Result<u16, _> = parse_value("GATEWAY_PORT", "70000");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "GATEWAY_PORT"));
    }

    #[test]
    fn test_catalog_config_defaults() {
        let config = catalog_config();
        assert_eq!(config.color_attribute, "pa_colore");
        assert_eq!(config.size_attribute, "pa_taglia");
        assert_eq!(config.size_hint, "size");
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_socket_addr() {
        let config = GatewayConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            catalog: catalog_config(),
            classifier: ClassifierConfig {
                api_key: SecretString::from("sk-ant-test"),
                model: DEFAULT_CLASSIFIER_MODEL.to_string(),
                max_tokens: DEFAULT_CLASSIFIER_MAX_TOKENS,
                timeout: Duration::from_secs(DEFAULT_CLASSIFIER_TIMEOUT_SECS),
            },
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_config_debug_redacts_secrets() {
        let catalog = format!("{:?}", catalog_config());
        assert!(catalog.contains("ck_live_key"));
        assert!(catalog.contains("[REDACTED]"));
        assert!(!catalog.contains("cs_9f8e7d6c"));

        let classifier = format!(
            "{:?}",
            ClassifierConfig {
                api_key: SecretString::from("sk-ant-super-secret"),
                model: DEFAULT_CLASSIFIER_MODEL.to_string(),
                max_tokens: 512,
                timeout: Duration::from_secs(7),
            }
        );
        assert!(classifier.contains("[REDACTED]"));
        assert!(classifier.contains("timeout: 7s"));
        assert!(!classifier.contains("sk-ant-super-secret"));
    }
}
