use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

/// Environment variables are read with this prefix, e.g. `COMICS_DATABASE_URL`.
pub const ENV_PREFIX: &str = "COMICS_";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:comics.db".to_string(),
            listen_addr: "0.0.0.0:5000".to_string(),
            loglevel: "info".to_string(),
            body_limit: 1024 * 1024,
        }
    }
}

impl Config {
    /// Defaults overlaid with `COMICS_*` environment variables.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX))
    }
}
