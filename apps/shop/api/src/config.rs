//! Configuration for Shop API

use core_config::{AppInfo, FromEnv, app_info, env_parse, server::ServerConfig};
use database::common::RetryConfig;
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    /// Backoff for the startup connection
    pub retry: RetryConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving (`RUN_MIGRATIONS`, default true).
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let retry = RetryConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let run_migrations = env_parse("RUN_MIGRATIONS", "true")?;

        Ok(Self {
            app: app_info!(),
            database,
            retry,
            server,
            environment,
            run_migrations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_requires_database_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/shop")),
                ("RUN_MIGRATIONS", None),
                ("PORT", None),
                ("DB_CONNECT_RETRIES", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(config.run_migrations);
                assert_eq!(config.app.name, "shop_api");
                assert_eq!(config.database.url(), "postgres://localhost/shop");
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.retry.max_retries, 5);
            },
        );
    }

    #[test]
    fn test_config_rejects_invalid_migration_flag() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/shop")),
                ("RUN_MIGRATIONS", Some("sometimes")),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}
