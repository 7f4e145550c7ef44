//! Configuration module
//!
//! Everything the service needs is read once at startup from the environment
//! (optionally seeded from a `.env` file) and then passed around explicitly.

use std::env;
use std::fmt;

// Common constants
const DEFAULT_SERVER_PORT: u16 = 0;
const DEFAULT_AWS_REGION: &str = "us-east-1";
const DEFAULT_MAX_BODY_SIZE_MB: usize = 50;

/// Object storage credentials and target bucket
#[derive(Clone)]
pub struct StorageConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub endpoint: Option<String>,
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// 0 binds an ephemeral port
    pub server_port: u16,
    pub environment: String,
    /// When true, robots.txt allows indexing
    pub robots_index: bool,
    pub max_body_size_bytes: usize,
    pub storage: StorageConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| anyhow::anyhow!("{} must be set", key))
        };

        let storage = StorageConfig {
            access_key_id: required("AWS_KEY")?,
            secret_access_key: required("AWS_SECRET")?,
            bucket: required("AWS_S3_BUCKET")?,
            region: lookup("AWS_REGION").unwrap_or_else(|| DEFAULT_AWS_REGION.to_string()),
            endpoint: lookup("S3_ENDPOINT").filter(|value| !value.trim().is_empty()),
        };

        let server_port = match lookup("MICROSERVICE_PORT") {
            Some(port) if !port.trim().is_empty() => port
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("Invalid MICROSERVICE_PORT '{}': {}", port, e))?,
            _ => DEFAULT_SERVER_PORT,
        };

        let max_body_size_mb = lookup("MAX_BODY_SIZE_MB")
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_BODY_SIZE_MB);

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let config = Config {
            server_port,
            environment,
            robots_index: lookup("ROBOTS_INDEX").as_deref() == Some("true"),
            max_body_size_bytes: max_body_size_mb * 1024 * 1024,
            storage,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_body_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_BODY_SIZE_MB cannot be 0"));
        }

        if let Some(endpoint) = &self.storage.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(anyhow::anyhow!(
                    "S3_ENDPOINT must start with http:// or https://"
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("AWS_KEY", "key"),
        ("AWS_SECRET", "secret"),
        ("AWS_S3_BUCKET", "bucket"),
    ];

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();
        assert_eq!(config.server_port, 0);
        assert!(!config.robots_index);
        assert_eq!(config.storage.bucket, "bucket");
        assert_eq!(config.storage.region, "us-east-1");
        assert!(config.storage.endpoint.is_none());
        assert_eq!(config.max_body_size_bytes, 50 * 1024 * 1024);
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("MICROSERVICE_PORT", "8080"),
            ("ROBOTS_INDEX", "true"),
            ("AWS_REGION", "eu-west-1"),
            ("S3_ENDPOINT", "http://localhost:9000"),
            ("MAX_BODY_SIZE_MB", "5"),
            ("APP_ENV", "prod"),
        ]);
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.server_port, 8080);
        assert!(config.robots_index);
        assert_eq!(config.storage.region, "eu-west-1");
        assert_eq!(
            config.storage.endpoint.as_deref(),
            Some("http://localhost:9000")
        );
        assert_eq!(config.max_body_size_bytes, 5 * 1024 * 1024);
        assert_eq!(config.environment, "prod");
    }

    #[test]
    fn test_robots_index_requires_literal_true() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("ROBOTS_INDEX", "1"));
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert!(!config.robots_index);
    }

    #[test]
    fn test_missing_credentials() {
        let err = Config::from_lookup(lookup_from(&[("AWS_KEY", "key")])).unwrap_err();
        assert!(err.to_string().contains("AWS_SECRET"));

        let err = Config::from_lookup(lookup_from(&[
            ("AWS_KEY", "key"),
            ("AWS_SECRET", "secret"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("AWS_S3_BUCKET"));
    }

    #[test]
    fn test_invalid_port() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("MICROSERVICE_PORT", "not-a-port"));
        assert!(Config::from_lookup(lookup_from(&pairs)).is_err());
    }

    #[test]
    fn test_invalid_endpoint() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("S3_ENDPOINT", "localhost:9000"));
        assert!(Config::from_lookup(lookup_from(&pairs)).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret\""));
        assert!(debug.contains("<redacted>"));
    }
}
