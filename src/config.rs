use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: Server,
    pub db: Db,
    pub subscriptions: Subscriptions,
    pub observability: Observability,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Db {
    pub backend: Backend,
    pub url: String,
    pub max_connections: u32,
}

/// History page sizes used by the subscription use cases.
#[derive(Debug, Deserialize, Clone)]
pub struct Subscriptions {
    pub history_limit: u32,
    pub max_history_limit: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Observability {
    pub service_name: String,
    pub log_level: String,
    pub json_logs: bool,
    pub enable_metrics: bool,
}

/// Load settings from `config/default.toml`, `config/<env>.toml`, and env overrides.
pub fn load() -> Result<Settings, config::ConfigError> {
    let env_name = std::env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());
    config::Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{env_name}")).required(false))
        .add_source(config::Environment::with_prefix("HOOKREG").separator("__"))
        .build()?
        .try_deserialize()
}
