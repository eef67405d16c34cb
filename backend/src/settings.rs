//! Server configuration loaded via OrthoConfig.
//!
//! Values are layered from configuration files, `SWISSPARCEL_*` environment
//! variables and command-line flags. Accessors apply the defaults so callers
//! never handle raw optionals.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use crate::inbound::http::api_key::{ApiKey, EmptyApiKey};
use crate::outbound::persistence::DEFAULT_MAX_CONNECTIONS;

/// Listen address used when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

const DEVELOPMENT_API_KEY: &str = "swissparcel-dev-key";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not a valid socket address.
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        /// Raw configured value.
        value: String,
        /// Parser failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// No API key was configured in a release build.
    #[error("SWISSPARCEL_API_KEY must be set")]
    MissingApiKey,
    /// The configured API key was blank.
    #[error(transparent)]
    EmptyApiKey(#[from] EmptyApiKey),
}

/// Configuration values for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SWISSPARCEL")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Shared secret expected in the `X-API-Key` header.
    pub api_key: Option<String>,
    /// PostgreSQL connection string; in-memory storage is used when absent.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Insert the example parcels at startup.
    #[ortho_config(default = false)]
    pub seed_example_data: bool,
}

impl ServerSettings {
    /// Return the configured listen address, falling back to the default.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// Build the API key guard from configuration.
    ///
    /// Debug builds fall back to a fixed development key with a warning so
    /// local runs work without extra setup; release builds refuse to start.
    ///
    /// # Errors
    /// Returns [`SettingsError::MissingApiKey`] in release builds when no key
    /// is configured, or [`SettingsError::EmptyApiKey`] for a blank key.
    pub fn api_key(&self) -> Result<ApiKey, SettingsError> {
        match self.api_key.as_deref() {
            Some(secret) => Ok(ApiKey::new(secret)?),
            None if cfg!(debug_assertions) => {
                warn!("SWISSPARCEL_API_KEY is not set; using the development key");
                Ok(ApiKey::new(DEVELOPMENT_API_KEY)?)
            }
            None => Err(SettingsError::MissingApiKey),
        }
    }

    /// Return the connection pool size, falling back to the default.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    /// Return the database URL when one is configured and non-blank.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "SWISSPARCEL_BIND_ADDR",
        "SWISSPARCEL_API_KEY",
        "SWISSPARCEL_DATABASE_URL",
        "SWISSPARCEL_DB_MAX_CONNECTIONS",
        "SWISSPARCEL_SEED_EXAMPLE_DATA",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("swissparcel")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("valid constant")
        );
        assert_eq!(settings.db_max_connections(), DEFAULT_MAX_CONNECTIONS);
        assert!(settings.database_url().is_none());
        assert!(!settings.seed_example_data);
        let key = settings.api_key().expect("debug builds fall back");
        assert!(key.matches(DEVELOPMENT_API_KEY));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SWISSPARCEL_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("SWISSPARCEL_API_KEY", Some("SUPER_ALEX".to_owned())),
            (
                "SWISSPARCEL_DATABASE_URL",
                Some("postgres://parcels@localhost/parcels".to_owned()),
            ),
            ("SWISSPARCEL_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("SWISSPARCEL_SEED_EXAMPLE_DATA", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("valid address"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("valid literal")
        );
        assert!(settings.api_key().expect("key").matches("SUPER_ALEX"));
        assert_eq!(
            settings.database_url(),
            Some("postgres://parcels@localhost/parcels")
        );
        assert_eq!(settings.db_max_connections(), 4);
        assert!(settings.seed_example_data);
    }

    fn settings_with(bind_addr: Option<&str>, api_key: Option<&str>) -> ServerSettings {
        ServerSettings {
            bind_addr: bind_addr.map(str::to_owned),
            api_key: api_key.map(str::to_owned),
            database_url: Some("  ".to_owned()),
            db_max_connections: None,
            seed_example_data: false,
        }
    }

    #[rstest]
    #[case("not-an-address")]
    #[case("localhost")]
    #[case("0.0.0.0:99999")]
    fn invalid_bind_addresses_are_reported(#[case] raw: &str) {
        let settings = settings_with(Some(raw), None);
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { .. })
        ));
    }

    #[rstest]
    fn blank_api_key_is_rejected() {
        let settings = settings_with(None, Some("   "));
        assert!(matches!(
            settings.api_key(),
            Err(SettingsError::EmptyApiKey(_))
        ));
    }

    #[rstest]
    fn blank_database_url_selects_memory_storage() {
        let settings = settings_with(None, None);
        assert!(settings.database_url().is_none());
    }
}
