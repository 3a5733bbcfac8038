use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;

use crate::model::Coordinate;

/// Telegram credentials and recipients.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Non-empty; duplicates are kept and receive duplicate messages.
    pub chat_ids: Vec<String>,
}

/// The fixed location reports are generated for.
#[derive(Debug, Clone)]
pub struct LocationConfig {
    pub name: String,
    pub coordinate: Coordinate,
}

/// Daily trigger time, in `timezone` local time.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub hour: u8,
    pub minute: u8,
    pub timezone: Tz,
}

/// Top-level configuration, sourced from environment variables.
///
/// Loaded and validated once at startup, then passed explicitly into every
/// core call. There is no ambient lookup after this point.
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub location: LocationConfig,
    pub schedule: ScheduleConfig,
}

const DEFAULT_HOUR: u8 = 6;
const DEFAULT_MINUTE: u8 = 45;
const DEFAULT_TIMEZONE: &str = "Asia/Hong_Kong";

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an explicit variable lookup.
    ///
    /// Tests supply a closure over a map instead of mutating the process
    /// environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bot_token = require(&get, "TELEGRAM_BOT_TOKEN")?;
        let chat_ids_raw = require(&get, "TELEGRAM_CHAT_IDS")?;
        let name = require(&get, "LOCATION_NAME")?;
        let lat_raw = require(&get, "LOCATION_LAT")?;
        let lon_raw = require(&get, "LOCATION_LON")?;

        let latitude: f64 = lat_raw
            .parse()
            .with_context(|| format!("LOCATION_LAT is not a number: '{lat_raw}'"))?;
        let longitude: f64 = lon_raw
            .parse()
            .with_context(|| format!("LOCATION_LON is not a number: '{lon_raw}'"))?;

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(anyhow!("LOCATION_LAT must be between -90 and 90"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(anyhow!("LOCATION_LON must be between -180 and 180"));
        }

        let chat_ids: Vec<String> = chat_ids_raw
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_owned)
            .collect();

        if chat_ids.is_empty() {
            return Err(anyhow!(
                "TELEGRAM_CHAT_IDS must contain at least one chat ID"
            ));
        }

        let hour = parse_or_default(&get, "SCHEDULE_HOUR", DEFAULT_HOUR)?;
        if hour > 23 {
            return Err(anyhow!("SCHEDULE_HOUR must be between 0 and 23"));
        }

        let minute = parse_or_default(&get, "SCHEDULE_MINUTE", DEFAULT_MINUTE)?;
        if minute > 59 {
            return Err(anyhow!("SCHEDULE_MINUTE must be between 0 and 59"));
        }

        let tz_raw = get("TIMEZONE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone: Tz = tz_raw
            .parse()
            .map_err(|_| anyhow!("TIMEZONE is not a valid IANA zone name: '{tz_raw}'"))?;

        Ok(Self {
            telegram: TelegramConfig {
                bot_token,
                chat_ids,
            },
            location: LocationConfig {
                name,
                coordinate: Coordinate {
                    latitude,
                    longitude,
                },
            },
            schedule: ScheduleConfig {
                hour,
                minute,
                timezone,
            },
        })
    }
}

fn require(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    get(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| anyhow!("Missing {key}"))
}

// Blank values count as unset.
fn parse_or_default(get: &impl Fn(&str) -> Option<String>, key: &str, default: u8) -> Result<u8> {
    match get(key).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} is not a number: '{raw}'")),
        None => Ok(default),
    }
}
