//! Configuration management
//!
//! Everything comes from the environment: the bot credential and the audit
//! channel are required, the liveness port is optional.

use crate::application::errors::ConfigError;

pub const ENV_BOT_TOKEN: &str = "BOT_TOKEN";
pub const ENV_LOG_CHANNEL_ID: &str = "LOG_CHANNEL_ID";
pub const ENV_HEALTH_PORT: &str = "HEALTH_PORT";

/// Bot configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub audit_channel_id: i64,
    pub health_port: Option<u16>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = require(ENV_BOT_TOKEN)?;
        let audit_channel_id = parse_var(ENV_LOG_CHANNEL_ID, &require(ENV_LOG_CHANNEL_ID)?)?;
        let health_port = match std::env::var(ENV_HEALTH_PORT) {
            Ok(value) => Some(parse_var(ENV_HEALTH_PORT, &value)?),
            Err(_) => None,
        };

        Ok(Self {
            bot_token,
            audit_channel_id,
            health_port,
        })
    }
}

fn require(name: &str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name.to_string())),
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        reason: format!("cannot parse {:?}", value),
    })
}
