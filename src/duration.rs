//! Parsing and display of polling cadence strings.
//!
//! CLI flags and config values accept cadences like "500ms", "3s" or
//! "0.5s". A bare integer is taken as milliseconds.

use std::time::Duration;

use anyhow::{bail, Result};

/// Suffix to milliseconds multiplier (longer suffixes first).
const UNITS: &[(&str, f64)] = &[("ms", 1.0), ("s", 1_000.0), ("m", 60_000.0)];

/// Parse a cadence string like "500ms", "3s", "0.5s" or "250".
pub fn parse_cadence(s: &str) -> Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        bail!("empty cadence");
    }

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str.trim().parse()?;
            return millis_to_duration(val * multiplier);
        }
    }

    // No recognized suffix: bare milliseconds
    let val: f64 = s.parse()?;
    millis_to_duration(val)
}

fn millis_to_duration(millis: f64) -> Result<Duration> {
    if !millis.is_finite() || millis < 0.0 {
        bail!("cadence out of range: {}ms", millis);
    }
    Ok(Duration::from_millis(millis.round() as u64))
}

/// Compact display of a cadence, e.g. "500ms" or "3s".
pub fn format_cadence(d: Duration) -> String {
    let millis = d.as_millis();
    if millis >= 1_000 && millis % 1_000 == 0 {
        format!("{}s", millis / 1_000)
    } else {
        format!("{}ms", millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_millis() {
        assert_eq!(parse_cadence("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_cadence("250").unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_cadence("3s").unwrap(), Duration::from_secs(3));
        assert_eq!(parse_cadence("0.5s").unwrap(), Duration::from_millis(500));
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_cadence("2m").unwrap(), Duration::from_secs(120));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_cadence("").is_err());
        assert!(parse_cadence("fast").is_err());
        assert!(parse_cadence("-1s").is_err());
    }

    #[test]
    fn test_format_cadence() {
        assert_eq!(format_cadence(Duration::from_millis(500)), "500ms");
        assert_eq!(format_cadence(Duration::from_secs(3)), "3s");
        assert_eq!(format_cadence(Duration::from_millis(1500)), "1500ms");
    }
}
