//! Human-friendly duration strings for the cache TTL
//!
//! Accepts one or more `<number><unit>` terms such as `1wk`, `12h`, `1d 6h`
//! or `1.5 days`. A bare number is read as milliseconds.

use crate::ConfigError;
use std::time::Duration;

const SECOND: f64 = 1_000.0;
const MINUTE: f64 = 60.0 * SECOND;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const WEEK: f64 = 7.0 * DAY;
const YEAR: f64 = 365.25 * DAY;
const MONTH: f64 = YEAR / 12.0;

/// Milliseconds per unit, or `None` for an unknown unit
fn unit_millis(unit: &str) -> Option<f64> {
    let millis = match unit.to_ascii_lowercase().as_str() {
        "" | "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1.0,
        "s" | "sec" | "secs" | "second" | "seconds" => SECOND,
        "m" | "min" | "mins" | "minute" | "minutes" => MINUTE,
        "h" | "hr" | "hrs" | "hour" | "hours" => HOUR,
        "d" | "day" | "days" => DAY,
        "w" | "wk" | "wks" | "week" | "weeks" => WEEK,
        "mo" | "month" | "months" => MONTH,
        "y" | "yr" | "yrs" | "year" | "years" => YEAR,
        _ => return None,
    };
    Some(millis)
}

/// Parses a TTL string into a [`Duration`]
///
/// # Examples
///
/// ```
/// use spread_harvest::config::parse_ttl;
/// use std::time::Duration;
///
/// assert_eq!(parse_ttl("1wk").unwrap(), Duration::from_secs(7 * 24 * 3600));
/// assert_eq!(parse_ttl("1h 30min").unwrap(), Duration::from_secs(5400));
/// ```
pub fn parse_ttl(input: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDuration(input.to_string());

    let mut rest = input.trim();
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total = 0.0;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(invalid());
        }
        let value: f64 = rest[..number_len].parse().map_err(|_| invalid())?;
        rest = rest[number_len..].trim_start();

        let unit_len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let factor = unit_millis(&rest[..unit_len]).ok_or_else(invalid)?;
        rest = rest[unit_len..].trim_start_matches(|c: char| c.is_whitespace() || c == ',');

        total += value * factor;
    }

    Ok(Duration::from_millis(total.round() as u64))
}
