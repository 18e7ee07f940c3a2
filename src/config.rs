use std::path::PathBuf;

use chrono::{Local, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 23455;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub admin_token: Option<String>,
    /// Zone the schedule times are published in; host local time when unset.
    pub timezone: Option<Tz>,
}

impl Config {
    /// Read `SCHEDULE_*` variables, after loading a `.env` file if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match get("SCHEDULE_PORT").filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidPort(raw.clone(), e))?,
            None => DEFAULT_PORT,
        };

        let data_dir = match get("SCHEDULE_DATA_DIR").filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .ok_or(ConfigError::NoDataDir)?
                .join("streamhub-schedule"),
        };

        let admin_token = get("SCHEDULE_ADMIN_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let timezone = match get("SCHEDULE_TIMEZONE").filter(|v| !v.trim().is_empty()) {
            Some(name) => Some(
                name.trim()
                    .parse::<Tz>()
                    .map_err(|_| ConfigError::UnknownTimezone(name.clone()))?,
            ),
            None => None,
        };

        Ok(Self {
            port,
            data_dir,
            admin_token,
            timezone,
        })
    }
}

/// Wall-clock time in the publisher's zone.
pub fn local_now(timezone: Option<Tz>) -> NaiveDateTime {
    match timezone {
        Some(tz) => Utc::now().with_timezone(&tz).naive_local(),
        None => Local::now().naive_local(),
    }
}
