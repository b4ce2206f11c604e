use crate::config::ConfigError;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::time::Duration;

/// Parse `5`, `1s`, `500ms`, `2m` or `1h 30m`. A bare number means seconds.
pub fn parse_duration(value: &str) -> Result<Duration, ConfigError> {
    let value = value.trim();
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        return value
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| ConfigError::InvalidDuration {
                value: value.to_string(),
                reason: e.to_string(),
            });
    }

    humantime::parse_duration(value).map_err(|e| ConfigError::InvalidDuration {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a report window bound: `YYYYMMDD-hhmmss`, `YYYY-MM-DD hh:mm:ss`,
/// or `hh:mm:ss` meaning today.
pub fn parse_time(value: &str) -> Result<NaiveDateTime, ConfigError> {
    parse_time_on(value, Local::now().date_naive())
}

/// Like [`parse_time`], with `today` used for the time-only form.
pub fn parse_time_on(value: &str, today: NaiveDate) -> Result<NaiveDateTime, ConfigError> {
    let value = value.trim();

    for format in ["%Y%m%d-%H%M%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(at);
        }
    }

    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .map(|time| today.and_time(time))
        .map_err(|_| ConfigError::InvalidTime {
            value: value.to_string(),
        })
}

/// Parse `COLUMN:REGEX`. The regex may itself contain colons.
pub fn parse_filter(value: &str) -> Result<(String, Regex), ConfigError> {
    let Some((column, pattern)) = value.split_once(':') else {
        return Err(ConfigError::InvalidFilter {
            value: value.to_string(),
        });
    };
    if column.is_empty() {
        return Err(ConfigError::InvalidFilter {
            value: value.to_string(),
        });
    }

    let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        value: value.to_string(),
        source,
    })?;
    Ok((column.to_string(), regex))
}
