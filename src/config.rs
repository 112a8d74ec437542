use config::{Config, ConfigError, Environment, File};
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

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    /// Connection string for the durable store. When absent the in-process
    /// fallback backend is used instead.
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AdminConfig {
    /// Shared administrator secret. No default: administrative endpoints
    /// fail closed while this is unset.
    pub key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitConfig {
    /// Fixed-window length for administrative endpoints, in seconds.
    pub window_secs: u64,
    /// Requests allowed per client IP per window. 0 disables limiting.
    pub max_requests: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub admin: AdminConfig,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            // 10 admin requests per client per 15 minutes.
            .set_default("rate_limit.window_secs", 900)?
            .set_default("rate_limit.max_requests", 10)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., MOVECO__ADMIN__KEY)
            .add_source(Environment::with_prefix("MOVECO").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
