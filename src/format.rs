//! Formatting of metric payloads for popup display.
//!
//! Pure functions: thousands grouping for counts, integer-rounded rate
//! computation, and tail-keeping truncation of long record samples so a
//! high-rate stream cannot grow the popup without bound.

use serde::Deserialize;

/// Marker appended to a truncated record sample.
pub const TRUNCATION_MARKER: &str = "[...]";

/// Default maximum record sample length before truncation kicks in.
pub const DEFAULT_RECORD_LIMIT: usize = 500;

/// A throughput reading as returned by the monitoring endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ThroughputSample {
    /// Cumulative bytes transferred.
    pub nbytes: u64,
    /// Cumulative lines (records) transferred.
    pub nlines: u64,
    /// Elapsed time in seconds since the stream started.
    pub rtime: f64,
    /// The most recent record seen on the stream.
    pub data: String,
}

/// Display-ready throughput figures for a popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThroughputView {
    pub bytes: String,
    pub lines: String,
    pub bytes_per_sec: String,
    pub lines_per_sec: String,
    pub record: String,
}

impl ThroughputView {
    /// Format a raw sample for display, truncating the record sample to
    /// `record_limit` characters.
    pub fn from_sample(sample: &ThroughputSample, record_limit: usize) -> Self {
        Self {
            bytes: group_thousands(sample.nbytes),
            lines: group_thousands(sample.nlines),
            bytes_per_sec: group_thousands(rate(sample.nbytes, sample.rtime)),
            lines_per_sec: group_thousands(rate(sample.nlines, sample.rtime)),
            record: truncate_record(&sample.data, record_limit),
        }
    }
}

/// Format a count with a comma as thousands separator.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Per-second rate, rounded to the nearest integer. Zero elapsed time
/// yields zero rather than a division artifact.
pub fn rate(count: u64, elapsed_secs: f64) -> u64 {
    if elapsed_secs <= 0.0 {
        return 0;
    }
    (count as f64 / elapsed_secs).round() as u64
}

/// Truncate a record sample, keeping the most recent tail.
///
/// Samples longer than `limit` characters lose their leading `limit`
/// characters and gain the truncation marker. Counted in characters,
/// not bytes, so multi-byte records never split mid-character.
pub fn truncate_record(data: &str, limit: usize) -> String {
    let len = data.chars().count();
    if len <= limit {
        return data.to_string();
    }
    let mut out: String = data.chars().skip(limit).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(1_000_000_000), "1,000,000,000");
    }

    #[test]
    fn test_rate_rounds_to_nearest() {
        assert_eq!(rate(10, 4.0), 3); // 2.5 rounds up
        assert_eq!(rate(9, 4.0), 2); // 2.25 rounds down
        assert_eq!(rate(1500, 1.0), 1500);
    }

    #[test]
    fn test_rate_zero_elapsed() {
        assert_eq!(rate(1234, 0.0), 0);
        assert_eq!(rate(1234, -1.0), 0);
    }

    #[test]
    fn test_truncate_short_record_unchanged() {
        assert_eq!(truncate_record("hello", 500), "hello");
        let exactly = "x".repeat(500);
        assert_eq!(truncate_record(&exactly, 500), exactly);
    }

    #[test]
    fn test_truncate_keeps_tail() {
        // 800 chars with a 500 threshold: the last 300 survive, marker appended.
        let head = "a".repeat(500);
        let tail = "b".repeat(300);
        let data = format!("{}{}", head, tail);
        let out = truncate_record(&data, 500);
        assert_eq!(out, format!("{}{}", tail, TRUNCATION_MARKER));
        assert!(!out.contains('a'));
    }

    #[test]
    fn test_truncate_multibyte_safe() {
        let data = "é".repeat(600);
        let out = truncate_record(&data, 500);
        assert_eq!(out, format!("{}{}", "é".repeat(100), TRUNCATION_MARKER));
    }

    #[test]
    fn test_throughput_view() {
        let sample = ThroughputSample {
            nbytes: 1234567,
            nlines: 999,
            rtime: 2.0,
            data: "last line".to_string(),
        };
        let view = ThroughputView::from_sample(&sample, 500);
        assert_eq!(view.bytes, "1,234,567");
        assert_eq!(view.lines, "999");
        assert_eq!(view.bytes_per_sec, "617,284"); // 617283.5 rounds up
        assert_eq!(view.lines_per_sec, "500"); // 499.5 rounds up
        assert_eq!(view.record, "last line");
    }
}
