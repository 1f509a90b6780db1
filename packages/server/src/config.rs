use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Applies to both establishing and acquiring a pooled connection.
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

/// Runtime feature flag for the contests subsystem. When disabled, every
/// `/contests` endpoint answers 503 regardless of state.
#[derive(Debug, Deserialize, Clone)]
pub struct ContestsConfig {
    pub enabled: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub contests: ContestsConfig,
}

fn apply_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 3000)?
        .set_default("server.cors.allow_origins", Vec::<String>::new())?
        .set_default("server.cors.max_age", 3600)?
        // Submission bursts are short; a modest pool with a long idle
        // timeout beats holding 100 connections open.
        .set_default("database.max_connections", 20)?
        .set_default("database.min_connections", 2)?
        .set_default("database.connect_timeout_secs", 10)?
        .set_default("database.idle_timeout_secs", 300)?
        .set_default("contests.enabled", true)
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = apply_defaults(Config::builder())?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., TYPEOFF__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("TYPEOFF").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
