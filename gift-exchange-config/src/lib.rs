use core::fmt::{Debug, Display};

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use gift_exchange_optimizer::{ForbiddenPair, Participant, DEFAULT_MAX_ATTEMPTS};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "gift-exchange.toml";
pub const ENV_PREFIX: &str = "GIFT_EXCHANGE_";

fn default_budget() -> String {
    "$25–$40".to_owned()
}

const fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

#[derive(Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_budget")]
    pub budget: String,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Never shown to participants.
    #[serde(default)]
    pub forbidden_pairs: Vec<ForbiddenPair>,
}

#[derive(thiserror::Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Figment(#[from] figment::Error),
}

impl Debug for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[must_use]
pub fn figment() -> Figment {
    Figment::new()
        .merge(Toml::file(CONFIG_FILE))
        .merge(Env::prefixed(ENV_PREFIX))
}

pub fn get_config() -> Result<Config, ConfigError> {
    Ok(figment().extract()?)
}
