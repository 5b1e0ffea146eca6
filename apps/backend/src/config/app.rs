//! Process configuration loaded from environment variables.
//!
//! Variables must be set by the runtime environment (docker `env_file`, or
//! sourced manually for local runs). Every variable has a default; a value
//! that is present but unparsable is a configuration error.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::player::DEFAULT_HEALTH;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Round template file, one template per line.
    pub res_path: PathBuf,
    /// Idle age after which sessions are evicted. `None` disables eviction.
    pub session_idle_ttl: Option<Duration>,
    pub sweep_interval: Duration,
    /// Health given to players added over HTTP.
    pub player_start_health: i32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            res_path: PathBuf::from("res.txt"),
            session_idle_ttl: Some(Duration::from_secs(6 * 60 * 60)),
            sweep_interval: Duration::from_secs(300),
            player_start_health: DEFAULT_HEALTH,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; `from_env` uses the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("BACKEND_HOST").unwrap_or(defaults.host);
        let port = parse_var(&lookup, "BACKEND_PORT")?.unwrap_or(defaults.port);
        let res_path = lookup("VERIDRINK_RES_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.res_path);

        let session_idle_ttl = match parse_var::<u64, _>(&lookup, "SESSION_IDLE_TTL_SECS")? {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => defaults.session_idle_ttl,
        };

        let sweep_interval = match parse_var::<u64, _>(&lookup, "SESSION_SWEEP_INTERVAL_SECS")? {
            Some(0) => {
                return Err(AppError::config(
                    "SESSION_SWEEP_INTERVAL_SECS must be greater than zero",
                ))
            }
            Some(secs) => Duration::from_secs(secs),
            None => defaults.sweep_interval,
        };

        let player_start_health =
            parse_var(&lookup, "PLAYER_START_HEALTH")?.unwrap_or(defaults.player_start_health);

        Ok(Self {
            host,
            port,
            res_path,
            session_idle_ttl,
            sweep_interval,
            player_start_health,
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| AppError::config(format!("{key} has invalid value '{raw}': {e}"))),
    }
}
