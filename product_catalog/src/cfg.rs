use config::{ConfigError, Environment};
use dotenvy::dotenv;
use serde::Deserialize;

const ENV_PREFIX: &str = "CATALOG";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl Config {
    /// Reads `CATALOG_*` variables, after loading a local `.env` if present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        config::Config::builder()
            .set_default("max_connections", 5)?
            .set_default("host", "127.0.0.1")?
            .set_default("port", 7878)?
            .set_default("log_level", "info")?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let cfg = Config::from_env(env(&[(
            "CATALOG_DATABASE_URL",
            "postgres://shop@localhost/shop",
        )]))
        .unwrap();

        assert_eq!(cfg.database_url, "postgres://shop@localhost/shop");
        assert_eq!(cfg.max_connections, 5);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.addr(), "127.0.0.1:7878");
    }

    #[test]
    fn env_overrides_defaults() {
        let cfg = Config::from_env(env(&[
            ("CATALOG_DATABASE_URL", "postgres://shop@db/shop"),
            ("CATALOG_PORT", "8080"),
            ("CATALOG_HOST", "0.0.0.0"),
            ("CATALOG_MAX_CONNECTIONS", "12"),
        ]))
        .unwrap();

        assert_eq!(cfg.addr(), "0.0.0.0:8080");
        assert_eq!(cfg.max_connections, 12);
    }

    #[test]
    fn database_url_is_required() {
        let err = Config::from_env(env(&[("CATALOG_PORT", "8080")])).unwrap_err();
        assert!(err.to_string().contains("database_url"));
    }
}
