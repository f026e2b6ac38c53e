//! # Configuration
//!
//! Runtime settings read from the environment, with `.env` support.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `CDS_API_KEY` | required | Directions API key |
//! | `ROUTE_CACHE_PATH` | `route_cache.json` | Route cache document |
//! | `TICK_INTERVAL_SECS` | `5` | Courier moves one waypoint per interval |
//! | `TRAVEL_MODE` | `driving` | `driving`, `walking` or `bicycling` |
//! | `DIRECTIONS_TIMEOUT_SECS` | `10` | Per-request provider timeout |
//! | `DEPARTURE_POLICY` | `now` | `now`, or `startup` to freeze departure at launch |
//! | `DIRECTIONS_URL` | Google endpoint | Override for proxies and tests |

use crate::directions::google::DEFAULT_DIRECTIONS_URL;
use crate::model::{DeparturePolicy, TravelMode};
use chrono::Utc;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const API_KEY_ENV: &str = "CDS_API_KEY";
pub const CACHE_PATH_ENV: &str = "ROUTE_CACHE_PATH";
pub const TICK_INTERVAL_ENV: &str = "TICK_INTERVAL_SECS";
pub const TRAVEL_MODE_ENV: &str = "TRAVEL_MODE";
pub const TIMEOUT_ENV: &str = "DIRECTIONS_TIMEOUT_SECS";
pub const DEPARTURE_POLICY_ENV: &str = "DEPARTURE_POLICY";
pub const DIRECTIONS_URL_ENV: &str = "DIRECTIONS_URL";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub cache_path: PathBuf,
    pub tick_interval: Duration,
    pub travel_mode: TravelMode,
    pub request_timeout: Duration,
    pub departure_policy: DeparturePolicy,
    pub directions_url: String,
}

impl Settings {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    /// Builds settings from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_ENV).ok_or(ConfigError::Missing(API_KEY_ENV))?;

        let travel_mode = match get(TRAVEL_MODE_ENV) {
            Some(raw) => raw.parse::<TravelMode>().map_err(|reason| ConfigError::Invalid {
                key: TRAVEL_MODE_ENV,
                reason,
            })?,
            None => TravelMode::default(),
        };

        let departure_policy = match get(DEPARTURE_POLICY_ENV).as_deref().map(str::trim) {
            None | Some("now") => DeparturePolicy::Now,
            Some("startup") => DeparturePolicy::FrozenAt(Utc::now()),
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: DEPARTURE_POLICY_ENV,
                    reason: format!("expected 'now' or 'startup', got '{other}'"),
                })
            }
        };

        Ok(Self {
            api_key,
            cache_path: get(CACHE_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("route_cache.json")),
            tick_interval: seconds(get(TICK_INTERVAL_ENV), TICK_INTERVAL_ENV, 5)?,
            travel_mode,
            request_timeout: seconds(get(TIMEOUT_ENV), TIMEOUT_ENV, 10)?,
            departure_policy,
            directions_url: get(DIRECTIONS_URL_ENV)
                .unwrap_or_else(|| DEFAULT_DIRECTIONS_URL.to_string()),
        })
    }
}

fn seconds(raw: Option<String>, key: &'static str, default: u64) -> Result<Duration, ConfigError> {
    let secs = match raw {
        Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        })?,
        None => default,
    };
    if secs == 0 {
        return Err(ConfigError::Invalid {
            key,
            reason: "must be at least 1 second".into(),
        });
    }
    Ok(Duration::from_secs(secs))
}
