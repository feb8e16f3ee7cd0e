//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CTP_API_URL` - Commerce API base URL (e.g., `https://api.europe-west1.gcp.commercetools.com`)
//! - `CTP_PROJECT_KEY` - Commerce project key
//!
//! ## Optional
//! - `CTP_AUTH_URL` - OAuth server base URL, enables token refresh
//! - `CTP_CLIENT_ID` - OAuth client ID (required with `CTP_AUTH_URL`)
//! - `CTP_CLIENT_SECRET` - OAuth client secret (required with `CTP_AUTH_URL`)
//! - `CARTWHEEL_STORAGE_PATH` - Local storage file (default: `.cartwheel/storage.json`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_STORAGE_PATH: &str = ".cartwheel/storage.json";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
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

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Commerce API configuration
    pub commerce: CommerceConfig,
    /// File backing the local key-value store
    pub storage_path: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Commerce API configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct CommerceConfig {
    /// API base URL
    pub api_url: Url,
    /// Project key, the first path segment of every resource
    pub project_key: String,
    /// OAuth client used to refresh access tokens, if configured
    pub oauth: Option<OAuthConfig>,
}

/// OAuth client credentials for token refresh.
#[derive(Clone)]
pub struct OAuthConfig {
    /// OAuth server base URL
    pub auth_url: Url,
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: SecretString,
}

impl std::fmt::Debug for CommerceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommerceConfig")
            .field("api_url", &self.api_url.as_str())
            .field("project_key", &self.project_key)
            .field("oauth", &self.oauth)
            .finish()
    }
}

impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("auth_url", &self.auth_url.as_str())
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
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

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontConfig::from_env`].
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(&lookup);

        let commerce = CommerceConfig {
            api_url: vars.url("CTP_API_URL")?,
            project_key: vars.required("CTP_PROJECT_KEY")?,
            oauth: OAuthConfig::from_vars(&vars)?,
        };

        let storage_path = PathBuf::from(vars.or_default("CARTWHEEL_STORAGE_PATH", DEFAULT_STORAGE_PATH));

        Ok(Self {
            commerce,
            storage_path,
            sentry_dsn: vars.optional("SENTRY_DSN"),
            sentry_environment: vars.optional("SENTRY_ENVIRONMENT"),
        })
    }
}

impl OAuthConfig {
    fn from_vars(vars: &Vars<'_>) -> Result<Option<Self>, ConfigError> {
        if vars.optional("CTP_AUTH_URL").is_none() {
            return Ok(None);
        }

        Ok(Some(Self {
            auth_url: vars.url("CTP_AUTH_URL")?,
            client_id: vars.required("CTP_CLIENT_ID")?,
            client_secret: vars.validated_secret("CTP_CLIENT_SECRET")?,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Vars<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Vars<'_> {
    /// Get an optional variable. Empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.is_empty())
    }

    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Get a required variable parsed as an absolute URL.
    fn url(&self, key: &str) -> Result<Url, ConfigError> {
        let value = self.required(key)?;
        let url = Url::parse(&value)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                "must be a base URL".to_string(),
            ));
        }
        Ok(url)
    }

    /// Load and validate a secret.
    fn validated_secret(&self, key: &str) -> Result<SecretString, ConfigError> {
        let value = self.required(key)?;
        validate_secret_strength(&value, key)?;
        Ok(SecretString::from(value))
    }
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

    // Real client secrets are random strings
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    const STRONG_SECRET: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6";

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_vars(|key| map.get(key).cloned())
    }

    #[test]
    fn test_minimal_config() {
        let config = load(&[
            ("CTP_API_URL", "https://api.example.test"),
            ("CTP_PROJECT_KEY", "shop"),
        ])
        .unwrap();

        assert_eq!(config.commerce.project_key, "shop");
        assert!(config.commerce.oauth.is_none());
        assert_eq!(config.storage_path, PathBuf::from(DEFAULT_STORAGE_PATH));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_missing_project_key() {
        let err = load(&[("CTP_API_URL", "https://api.example.test")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "CTP_PROJECT_KEY"));
    }

    #[test]
    fn test_invalid_api_url() {
        let err = load(&[("CTP_API_URL", "not a url"), ("CTP_PROJECT_KEY", "shop")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "CTP_API_URL"));
    }

    #[test]
    fn test_oauth_requires_client_credentials() {
        let err = load(&[
            ("CTP_API_URL", "https://api.example.test"),
            ("CTP_PROJECT_KEY", "shop"),
            ("CTP_AUTH_URL", "https://auth.example.test"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "CTP_CLIENT_ID"));
    }

    #[test]
    fn test_oauth_config_loaded() {
        let config = load(&[
            ("CTP_API_URL", "https://api.example.test"),
            ("CTP_PROJECT_KEY", "shop"),
            ("CTP_AUTH_URL", "https://auth.example.test"),
            ("CTP_CLIENT_ID", "client"),
            ("CTP_CLIENT_SECRET", STRONG_SECRET),
            ("CARTWHEEL_STORAGE_PATH", "/tmp/cart.json"),
        ])
        .unwrap();

        let oauth = config.commerce.oauth.unwrap();
        assert_eq!(oauth.client_id, "client");
        assert_eq!(oauth.client_secret.expose_secret(), STRONG_SECRET);
        assert_eq!(config.storage_path, PathBuf::from("/tmp/cart.json"));
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // "ab" has entropy of 1 bit per char (50% a, 50% b)
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-client-secret", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        assert!(validate_secret_strength(STRONG_SECRET, "TEST_VAR").is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = CommerceConfig {
            api_url: Url::parse("https://api.example.test").unwrap(),
            project_key: "shop".to_string(),
            oauth: Some(OAuthConfig {
                auth_url: Url::parse("https://auth.example.test").unwrap(),
                client_id: "client_id_value".to_string(),
                client_secret: SecretString::from("super_secret_client_secret"),
            }),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("client_id_value"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_client_secret"));
    }
}
