//! Human-readable cell text.

use chrono::{DateTime, Local, Utc};
use humansize::{format_size, BINARY};

/// `12.3s` below a minute, `4m 05s` below an hour, `1h 02m 03s` above.
pub fn format_seconds(secs: f64) -> String {
    let secs = if secs.is_finite() && secs > 0.0 { secs } else { 0.0 };
    if secs < 59.95 {
        return format!("{:.1}s", secs);
    }
    let total = secs.round() as u64;
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, seconds)
    } else {
        format!("{}m {:02}s", minutes, seconds)
    }
}

pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, BINARY)
}

/// Whole percentages print without a fraction (`50`), others truncated to one digit (`33.3`), so
/// nothing short of 100 ever reads `100`.
pub fn format_percent(percent: f64) -> String {
    if percent.fract() == 0.0 {
        format!("{}", percent as u64)
    } else {
        // values stored just below a tenth must not drop a digit
        let truncated = (percent * 10.0 + 1e-9).floor() / 10.0;
        format!("{:.1}", truncated)
    }
}

/// Wall-clock time of day in the local zone.
pub fn format_clock(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_pick_a_unit() {
        assert_eq!(format_seconds(0.0), "0.0s");
        assert_eq!(format_seconds(12.34), "12.3s");
        assert_eq!(format_seconds(65.0), "1m 05s");
        assert_eq!(format_seconds(3723.0), "1h 02m 03s");
    }

    #[test]
    fn negative_and_nan_seconds_render_as_zero() {
        assert_eq!(format_seconds(-4.0), "0.0s");
        assert_eq!(format_seconds(f64::NAN), "0.0s");
    }

    #[test]
    fn just_under_a_minute_does_not_print_sixty_seconds() {
        assert_eq!(format_seconds(59.97), "1m 00s");
    }

    #[test]
    fn percent_formatting() {
        assert_eq!(format_percent(0.0), "0");
        assert_eq!(format_percent(100.0), "100");
        assert_eq!(format_percent(33.333), "33.3");
        assert_eq!(format_percent(12.3), "12.3");
    }

    #[test]
    fn almost_complete_never_reads_as_complete() {
        assert_eq!(format_percent(99.96), "99.9");
        assert_eq!(format_percent(99.999), "99.9");
        assert_eq!(format_percent(66.68), "66.6");
    }

    #[test]
    fn bytes_use_binary_units() {
        assert_eq!(format_bytes(0), "0 B");
        assert!(format_bytes(3 * 1024 * 1024).contains("MiB"));
    }
}
