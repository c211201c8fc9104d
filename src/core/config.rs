use super::error::ConfigError;
use tracing::debug;

pub const API_URL: &str = "API_URL";
pub const BUCKET_NAME: &str = "BUCKET_NAME";
pub const KEY_NAME: &str = "KEY_NAME";
pub const REGION: &str = "REGION";
pub const BASE_CURRENCY: &str = "BASE_CURRENCY";
pub const S3_ENDPOINT: &str = "S3_ENDPOINT";

/// Settings for one invocation, read from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub bucket_name: String,
    pub key_name: String,
    pub region: String,
    pub base_currency: String,
    /// Custom endpoint for S3-compatible stores; `None` targets AWS.
    pub s3_endpoint: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        debug!("Loading config from environment");
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config through `lookup`, reporting every missing variable at once.
    ///
    /// Unset and blank values are both treated as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut missing = Vec::new();
        let mut require = |name: &'static str| {
            read(name).unwrap_or_else(|| {
                missing.push(name);
                String::new()
            })
        };

        let api_url = require(API_URL);
        let bucket_name = require(BUCKET_NAME);
        let key_name = require(KEY_NAME);
        let region = require(REGION);
        let base_currency = require(BASE_CURRENCY);

        if !missing.is_empty() {
            return Err(ConfigError::Missing { vars: missing });
        }

        let config = Self {
            api_url,
            bucket_name,
            key_name,
            region,
            base_currency,
            s3_endpoint: read(S3_ENDPOINT),
        };
        debug!(?config, "Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, String> {
        HashMap::from([
            (API_URL, "https://rates.example.com/v1/merchant".to_string()),
            (BUCKET_NAME, "rates-bucket".to_string()),
            (KEY_NAME, "fx/latest.json".to_string()),
            (REGION, "eu-west-1".to_string()),
            (BASE_CURRENCY, "USD".to_string()),
        ])
    }

    fn load(env: &HashMap<&'static str, String>) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn test_config_from_lookup() {
        let config = load(&full_env()).unwrap();
        assert_eq!(config.api_url, "https://rates.example.com/v1/merchant");
        assert_eq!(config.bucket_name, "rates-bucket");
        assert_eq!(config.key_name, "fx/latest.json");
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.base_currency, "USD");
        assert!(config.s3_endpoint.is_none());
    }

    #[test]
    fn test_config_reads_optional_endpoint() {
        let mut env = full_env();
        env.insert(S3_ENDPOINT, "http://localhost:9000".to_string());
        let config = load(&env).unwrap();
        assert_eq!(config.s3_endpoint.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_config_trims_values() {
        let mut env = full_env();
        env.insert(BASE_CURRENCY, "  EUR \n".to_string());
        let config = load(&env).unwrap();
        assert_eq!(config.base_currency, "EUR");
    }

    #[test]
    fn test_each_required_var_is_checked() {
        for name in [API_URL, BUCKET_NAME, KEY_NAME, REGION, BASE_CURRENCY] {
            let mut env = full_env();
            env.remove(name);
            assert_eq!(
                load(&env),
                Err(ConfigError::Missing { vars: vec![name] }),
                "expected {name} to be required"
            );
        }
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut env = full_env();
        env.insert(REGION, "   ".to_string());
        assert_eq!(load(&env), Err(ConfigError::Missing { vars: vec![REGION] }));
    }

    #[test]
    fn test_all_missing_vars_reported_together() {
        let env = HashMap::new();
        assert_eq!(
            load(&env),
            Err(ConfigError::Missing {
                vars: vec![API_URL, BUCKET_NAME, KEY_NAME, REGION, BASE_CURRENCY]
            })
        );
    }
}
