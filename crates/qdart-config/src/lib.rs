use serde::{Deserialize, Serialize};
use std::{env, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Local,
    Dev,
    Test,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_env(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "local" => Self::Local,
            "dev" | "development" => Self::Dev,
            "test" | "testing" => Self::Test,
            "staging" => Self::Staging,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Test => "test",
            Self::Staging => "staging",
            Self::Prod => "prod",
        };
        write!(f, "{}", value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub service_name: String,
    pub environment: Environment,
    pub bind_addr: String,
    pub metrics_addr: Option<String>,
    pub log_level: String,
    pub command_room: String,
    pub geocode_timeout_ms: u64,
    pub seed_demo: bool,
}

impl ServiceConfig {
    pub fn from_env(default_service_name: &str) -> Self {
        let service_name = env_var("QDART_SERVICE_NAME", default_service_name.to_string());
        let environment = Environment::from_env(&env_var("QDART_ENV", "local".to_string()));
        let bind_addr = env_var("QDART_BIND_ADDR", "0.0.0.0:5000".to_string());
        let metrics_addr = env::var("QDART_METRICS_ADDR").ok();
        let log_level = env_var("QDART_LOG_LEVEL", "info".to_string());
        let command_room = env_var("QDART_COMMAND_ROOM", "command".to_string());
        let geocode_timeout_ms = env_var_u64("QDART_GEOCODE_TIMEOUT_MS", 800);
        let seed_demo = env_var_bool("QDART_SEED_DEMO", false);

        Self {
            service_name,
            environment,
            bind_addr,
            metrics_addr,
            log_level,
            command_room,
            geocode_timeout_ms,
            seed_demo,
        }
    }
}

fn env_var(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn env_var_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_var_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .map(|value| match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        })
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_aliases() {
        assert_eq!(Environment::from_env("production"), Environment::Prod);
        assert_eq!(Environment::from_env("TESTING"), Environment::Test);
        assert_eq!(Environment::from_env("unknown"), Environment::Local);
    }
}
