//! Simulated time units
//!
//! All durations are stored as simulated seconds. Months are fixed at 31 days
//! and years at 12 months, so unit conversion never depends on a calendar.

use super::types::Seconds;

pub const ONE_SECOND: Seconds = 1.0;
pub const ONE_MINUTE: Seconds = ONE_SECOND * 60.0;
pub const ONE_HOUR: Seconds = ONE_MINUTE * 60.0;
pub const ONE_DAY: Seconds = ONE_HOUR * 24.0;
pub const ONE_MONTH: Seconds = ONE_DAY * 31.0;
pub const ONE_YEAR: Seconds = ONE_MONTH * 12.0;

/// A unit accepted in an action's `time` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
    Years,
}

impl TimeUnit {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "seconds" | "second" => Some(TimeUnit::Seconds),
            "minutes" | "minute" => Some(TimeUnit::Minutes),
            "hours" | "hour" => Some(TimeUnit::Hours),
            "days" | "day" => Some(TimeUnit::Days),
            "months" | "month" => Some(TimeUnit::Months),
            "years" | "year" => Some(TimeUnit::Years),
            _ => None,
        }
    }

    /// Length of one unit in simulated seconds
    pub fn seconds(&self) -> Seconds {
        match self {
            TimeUnit::Seconds => ONE_SECOND,
            TimeUnit::Minutes => ONE_MINUTE,
            TimeUnit::Hours => ONE_HOUR,
            TimeUnit::Days => ONE_DAY,
            TimeUnit::Months => ONE_MONTH,
            TimeUnit::Years => ONE_YEAR,
        }
    }
}

/// Render a duration as "2 days 3 hours 1 minute 4 seconds"
///
/// The duration is rounded to whole seconds first. Zero-valued components
/// are left out; a zero duration renders as "0 seconds".
pub fn format_duration(seconds: Seconds) -> String {
    let mut remaining = seconds.round();
    if !(remaining > 0.0) {
        return "0 seconds".to_string();
    }

    let mut parts = Vec::new();

    for (unit, name) in [(ONE_DAY, "day"), (ONE_HOUR, "hour"), (ONE_MINUTE, "minute")] {
        if remaining >= unit {
            let count = (remaining / unit).floor();
            remaining -= count * unit;
            parts.push(plural(count, name));
        }
    }

    if remaining > 0.0 {
        parts.push(plural(remaining, "second"));
    }

    parts.join(" ")
}

fn plural(count: f64, name: &str) -> String {
    if count == 1.0 {
        format!("{} {}", count, name)
    } else {
        format!("{} {}s", count, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_lengths() {
        assert_eq!(ONE_HOUR, 3600.0);
        assert_eq!(ONE_MONTH, 31.0 * 86400.0);
        assert_eq!(ONE_YEAR, 12.0 * ONE_MONTH);
        assert_eq!(TimeUnit::parse("days").unwrap().seconds(), ONE_DAY);
        assert!(TimeUnit::parse("fortnights").is_none());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0 seconds");
        assert_eq!(format_duration(1.0), "1 second");
        assert_eq!(format_duration(45.0), "45 seconds");
        assert_eq!(format_duration(ONE_HOUR), "1 hour");
        assert_eq!(
            format_duration(2.0 * ONE_DAY + 3.0 * ONE_HOUR + ONE_MINUTE + 4.0),
            "2 days 3 hours 1 minute 4 seconds"
        );
    }

    #[test]
    fn test_format_duration_rounds_before_splitting() {
        assert_eq!(format_duration(3599.7), "1 hour");
        assert_eq!(format_duration(59.6), "1 minute");
        assert_eq!(format_duration(61.4), "1 minute 1 second");
        assert_eq!(format_duration(0.4), "0 seconds");
    }
}
