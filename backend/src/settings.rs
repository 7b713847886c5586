//! Application settings loaded via OrthoConfig.
//!
//! Sources are merged from CLI flags, `RECIPES_*` environment variables and
//! an optional configuration file. Session secrets are not read here; see
//! [`crate::inbound::http::session_config`].

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_DB_POOL_SIZE: u32 = 10;

/// Errors raised when settings are present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("database_url is required (set RECIPES_DATABASE_URL)")]
    MissingDatabaseUrl,
    #[error("bind_addr {value:?} is not a socket address")]
    InvalidBindAddr { value: String },
}

/// Process-level configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECIPES")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Listener address, `0.0.0.0:3000` when unset.
    pub bind_addr: Option<String>,
    /// Skip the embedded migrations that otherwise run before binding.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
    /// Maximum pooled database connections.
    pub db_pool_size: Option<u32>,
}

impl AppSettings {
    /// The configured database URL.
    ///
    /// # Errors
    ///
    /// [`SettingsError::MissingDatabaseUrl`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// The listener address.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .trim()
            .parse()
            .map_err(|_| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
            })
    }

    /// Whether embedded migrations run at startup.
    pub fn run_migrations(&self) -> bool {
        !self.skip_migrations
    }

    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size.unwrap_or(DEFAULT_DB_POOL_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "RECIPES_DATABASE_URL",
        "RECIPES_BIND_ADDR",
        "RECIPES_SKIP_MIGRATIONS",
        "RECIPES_DB_POOL_SIZE",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("recipe-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        );
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 3000)))
        );
        assert!(!settings.skip_migrations);
        assert!(settings.run_migrations());
        assert_eq!(settings.db_pool_size(), DEFAULT_DB_POOL_SIZE);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "RECIPES_DATABASE_URL",
                Some("postgres://recipes@db/recipes".to_owned()),
            ),
            ("RECIPES_BIND_ADDR", Some("127.0.0.1:8080".to_owned())),
            ("RECIPES_SKIP_MIGRATIONS", Some("true".to_owned())),
            ("RECIPES_DB_POOL_SIZE", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.database_url(),
            Ok("postgres://recipes@db/recipes")
        );
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 8080)))
        );
        assert!(!settings.run_migrations());
        assert_eq!(settings.db_pool_size(), 4);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_database_urls_are_missing(#[case] url: &str) {
        let settings = AppSettings {
            database_url: Some(url.to_owned()),
            bind_addr: None,
            skip_migrations: false,
            db_pool_size: None,
        };
        assert_eq!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        );
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let settings = AppSettings {
            database_url: None,
            bind_addr: Some("localhost".to_owned()),
            skip_migrations: false,
            db_pool_size: None,
        };
        assert_eq!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr {
                value: "localhost".to_owned()
            })
        );
    }
}
