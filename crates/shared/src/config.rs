//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Back-office API configuration.
    pub api: ApiConfig,
    /// Acting-user session.
    #[serde(default)]
    pub session: SessionConfig,
    /// Lookup cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Back-office API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined to.
    pub base_url: String,
    /// Timeout for regular requests, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Timeout for file delete requests, in seconds.
    #[serde(default = "default_file_delete_timeout")]
    pub file_delete_timeout_secs: u64,
}

fn default_timeout() -> u64 {
    15
}

fn default_file_delete_timeout() -> u64 {
    60
}

impl ApiConfig {
    /// Creates a configuration for the given base URL with default timeouts.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: default_timeout(),
            file_delete_timeout_secs: default_file_delete_timeout(),
        }
    }
}

/// Acting-user session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Identifier injected as `usuario_log_id`; requests go out unmodified when absent.
    #[serde(default)]
    pub usuario_id: Option<i64>,
}

/// Lookup cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached list responses.
    #[serde(default = "default_cache_capacity")]
    pub max_capacity: u64,
    /// Time-to-live for cached lists, in seconds.
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

fn default_cache_capacity() -> u64 {
    200
}

fn default_cache_ttl() -> u64 {
    300 // 5 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with_base_url(None)
    }

    /// Loads configuration, letting `base_url` take precedence over every
    /// file and environment source.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or no base URL is
    /// set anywhere.
    pub fn load_with_base_url(base_url: Option<String>) -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TESORERIA").separator("__"))
            .set_override_option("api.base_url", base_url)?
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("TESORERIA__API__BASE_URL", Some("http://localhost:3000/api")),
                ("TESORERIA__SESSION__USUARIO_ID", Some("12")),
                ("TESORERIA__API__TIMEOUT_SECS", None),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.api.base_url, "http://localhost:3000/api");
                assert_eq!(config.api.timeout_secs, 15);
                assert_eq!(config.api.file_delete_timeout_secs, 60);
                assert_eq!(config.session.usuario_id, Some(12));
                assert_eq!(config.cache.max_capacity, 200);
                assert_eq!(config.cache.ttl_secs, 300);
            },
        );
    }

    #[test]
    fn test_base_url_override_stands_in_for_configuration() {
        temp_env::with_vars(
            [
                ("TESORERIA__API__BASE_URL", None::<&str>),
                ("TESORERIA__SESSION__USUARIO_ID", None),
            ],
            || {
                assert!(AppConfig::load().is_err());

                let config =
                    AppConfig::load_with_base_url(Some("http://backoffice.test/api".into()))
                        .unwrap();
                assert_eq!(config.api.base_url, "http://backoffice.test/api");
                assert_eq!(config.api.timeout_secs, 15);
                assert!(config.session.usuario_id.is_none());
            },
        );
    }

    #[test]
    fn test_base_url_override_beats_environment() {
        temp_env::with_vars(
            [("TESORERIA__API__BASE_URL", Some("http://from-env.test/api"))],
            || {
                let config =
                    AppConfig::load_with_base_url(Some("http://from-flag.test/api".into()))
                        .unwrap();
                assert_eq!(config.api.base_url, "http://from-flag.test/api");
            },
        );
    }

    #[test]
    fn test_api_config_defaults() {
        let api = ApiConfig::new("http://example.test");
        assert_eq!(api.timeout_secs, 15);
        assert_eq!(api.file_delete_timeout_secs, 60);
        assert!(SessionConfig::default().usuario_id.is_none());
    }
}
