//! Driver configuration.

use serde::Deserialize;

/// Environment variable holding the database URL.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable holding the pool size.
pub const MAX_CONNECTIONS_ENV: &str = "OXIDE_REST_MAX_CONNECTIONS";

/// Connection settings for [`SqliteDriver`](crate::sqlite::SqliteDriver).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Database connection URL.
    pub database_url: String,
    /// Maximum pool size.
    pub max_connections: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            database_url: String::from("sqlite::memory:"),
            max_connections: 5,
        }
    }
}

impl DriverConfig {
    /// Reads `DATABASE_URL` and `OXIDE_REST_MAX_CONNECTIONS`.
    ///
    /// Missing or unparsable variables keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from any key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            database_url: lookup(DATABASE_URL_ENV).unwrap_or(defaults.database_url),
            max_connections: lookup(MAX_CONNECTIONS_ENV)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
        }
    }

    /// Sets the database URL.
    #[must_use]
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn max_connections(mut self, n: u32) -> Self {
        self.max_connections = n;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DriverConfig::default();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_from_lookup() {
        let config = DriverConfig::from_lookup(|key| match key {
            DATABASE_URL_ENV => Some("sqlite://app.db".to_string()),
            MAX_CONNECTIONS_ENV => Some("12".to_string()),
            _ => None,
        });
        assert_eq!(config.database_url, "sqlite://app.db");
        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn test_from_lookup_bad_pool_size() {
        let config = DriverConfig::from_lookup(|key| {
            (key == MAX_CONNECTIONS_ENV).then(|| "many".to_string())
        });
        assert_eq!(config, DriverConfig::default());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: DriverConfig = serde_json::from_str(r#"{"max_connections": 1}"#).unwrap();
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.database_url, "sqlite::memory:");
    }
}
