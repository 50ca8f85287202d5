use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Runtime settings, read from `APP__*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Number of synchronous database actors.
    pub db_workers: usize,
    pub pool_size: u32,
    /// CORS origin of the front-end. Any origin is accepted when unset.
    pub allowed_origin: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix("APP"))
    }

    fn load(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("db_workers", 5)?
            .set_default("pool_size", 10)?
            .add_source(
                env.prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
