use std::env;
use std::time::Duration;

use anyhow::Context;
use vivah_core::storage::TableNames;

/// Default per-operation store deadline, below the 10s request timeout.
const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Physical table name per entity kind.
    pub tables: TableNames,
    /// AWS region for DynamoDB (default: "us-east-1")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub aws_region: String,
    /// Endpoint override, e.g. a local DynamoDB.
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub aws_endpoint_url: Option<String>,
    /// Maximum items fetched per query page (default: 100)
    pub query_page_size: usize,
    /// Deadline for a single store operation, retries included (default: 5s)
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub store_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `USERS_TABLE`, `PROFILES_TABLE`, `MATCHES_TABLE`, `LIKES_TABLE`,
    ///   `MESSAGES_TABLE` - table names (see [`TableNames::from_env`])
    /// - `AWS_REGION` - DynamoDB region (default: "us-east-1")
    /// - `AWS_ENDPOINT_URL` - DynamoDB endpoint override (optional)
    /// - `QUERY_PAGE_SIZE` - items per query page (default: 100)
    /// - `STORE_TIMEOUT_MS` - per-operation store deadline (default: 5000)
    ///
    /// Fails when two entity kinds resolve to the same table name.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let tables = TableNames::from_lookup(&lookup);
        tables.validate().context("Invalid table configuration")?;

        Ok(Self {
            tables,
            aws_region: lookup("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            aws_endpoint_url: lookup("AWS_ENDPOINT_URL").filter(|url| !url.is_empty()),
            query_page_size: lookup("QUERY_PAGE_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(100),
            store_timeout: lookup("STORE_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_STORE_TIMEOUT),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tables: TableNames::default(),
            aws_region: "us-east-1".to_string(),
            aws_endpoint_url: None,
            query_page_size: 100,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.tables, TableNames::default());
        assert_eq!(config.aws_region, "us-east-1");
        assert!(config.aws_endpoint_url.is_none());
        assert_eq!(config.query_page_size, 100);
        assert_eq!(config.store_timeout, Duration::from_secs(5));
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    #[test]
    fn test_from_lookup_reads_overrides() {
        let config = Config::from_lookup(vars(&[
            ("PROFILES_TABLE", "dev-Profiles"),
            ("QUERY_PAGE_SIZE", "25"),
            ("STORE_TIMEOUT_MS", "1500"),
            ("AWS_ENDPOINT_URL", ""),
        ]))
        .unwrap();

        assert_eq!(config.tables.profiles, "dev-Profiles");
        assert_eq!(config.query_page_size, 25);
        assert_eq!(config.store_timeout, Duration::from_millis(1500));
        assert!(config.aws_endpoint_url.is_none());
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let config = Config::from_lookup(vars(&[
            ("QUERY_PAGE_SIZE", "0"),
            ("STORE_TIMEOUT_MS", "soon"),
        ]))
        .unwrap();

        assert_eq!(config.query_page_size, 100);
        assert_eq!(config.store_timeout, DEFAULT_STORE_TIMEOUT);
    }

    #[test]
    fn test_store_timeout_is_below_request_timeout() {
        assert!(DEFAULT_STORE_TIMEOUT < crate::app::REQUEST_TIMEOUT);
    }

    #[test]
    fn test_shared_table_name_fails_startup() {
        let err = Config::from_lookup(vars(&[("MESSAGES_TABLE", "Matches")])).unwrap_err();

        assert_eq!(err.to_string(), "Invalid table configuration");
        assert!(format!("{err:#}").contains("shared by `matches` and `messages`"));
    }
}
