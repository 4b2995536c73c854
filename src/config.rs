use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_ISS_NOW_URL: &str = "http://api.open-notify.org/iss-now.json";
pub const DEFAULT_PREDICTOR_URL: &str = "http://astroviewer-sat2c.appspot.com/predictor";
pub const DEFAULT_POSITION_TIMEOUT_SECS: u64 = 10;

/// Runtime settings, read from the environment (or a `.env` file).
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub google_maps_token: String,
    pub static_map_key: Option<String>,
    pub iss_now_url: String,
    pub predictor_url: String,
    pub position_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| dotenv::var(name).ok())
    }

    /// Builds the config from any variable source; `from_env` passes `dotenv::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let or_default = |name: &'static str, default: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let position_timeout = match lookup("POSITION_TIMEOUT_SECS") {
            Some(value) => {
                let secs = value
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or(ConfigError::Invalid {
                        name: "POSITION_TIMEOUT_SECS",
                        value: value.clone(),
                    })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_POSITION_TIMEOUT_SECS),
        };

        Ok(Config {
            discord_token: required("DISCORD_TOKEN")?,
            google_maps_token: required("GOOGLE_MAPS_TOKEN")?,
            static_map_key: lookup("STATIC_MAP_KEY").filter(|key| !key.trim().is_empty()),
            iss_now_url: or_default("ISS_NOW_URL", DEFAULT_ISS_NOW_URL),
            predictor_url: or_default("PREDICTOR_URL", DEFAULT_PREDICTOR_URL),
            position_timeout,
        })
    }
}
