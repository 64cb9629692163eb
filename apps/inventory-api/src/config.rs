//! Configuration for Inventory API

use core_config::{AppInfo, FromEnv, app_info, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    /// Apply pending migrations at startup (`RUN_MIGRATIONS`, default true)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let database = PostgresConfig::from_env()?;
        let run_migrations = env_parse("RUN_MIGRATIONS", "true")?;

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            database,
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
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("DATABASE_URL"));
        });
    }

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/inventory")),
                ("APP_ENV", None),
                ("PORT", None),
                ("RUN_MIGRATIONS", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "inventory_api");
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.server.port, 8080);
                assert!(config.run_migrations);
            },
        );
    }

    #[test]
    fn test_migrations_can_be_disabled() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/inventory")),
                ("RUN_MIGRATIONS", Some("false")),
            ],
            || {
                assert!(!Config::from_env().unwrap().run_migrations);
            },
        );
    }
}
