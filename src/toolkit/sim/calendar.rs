//! Lexical time forms understood and produced by the simulated toolkit.
//!
//! Accepted inputs (UTC, optional trailing `UTC`/`Z`):
//! * `2024-JAN-15 12:30:45.123` (month abbreviation, any case)
//! * `2024-01-15T12:30:45.123` (ISO calendar)
//!
//! Time-of-day and fractional seconds may be omitted. Output is ISO calendar.
//! Seconds run up to 60 inside a leap second, in both directions.
use std::sync::LazyLock;

use hifitime::{Duration, Epoch};
use regex::Regex;

use crate::time::{utc_fields, utc_from_fields};

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

static MONTH_NAME_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4})-([A-Za-z]{3})-(\d{1,2})(?:[ T](\d{1,2}):(\d{2})(?::(\d{2})(?:\.(\d+))?)?)?(?:\s*(?:UTC|Z))?$",
    )
    .expect("valid month-name time regex")
});

static ISO_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4})-(\d{2})-(\d{2})(?:[T ](\d{1,2}):(\d{2})(?::(\d{2})(?:\.(\d+))?)?)?(?:\s*(?:UTC|Z))?$",
    )
    .expect("valid ISO time regex")
});

fn month_number(abbrev: &str) -> Option<u8> {
    let upper = abbrev.to_uppercase();
    MONTHS
        .iter()
        .position(|m| *m == upper)
        .map(|idx| idx as u8 + 1)
}

/// Fractional second digits → nanoseconds (extra digits beyond 9 are dropped).
fn fraction_to_nanos(digits: &str) -> u32 {
    let mut padded: String = digits.chars().take(9).collect();
    while padded.len() < 9 {
        padded.push('0');
    }
    padded.parse().unwrap_or(0)
}

/// Parse a civil UTC string into an epoch, `None` if it matches no known form
/// or names an impossible calendar date.
pub(crate) fn parse_civil(input: &str) -> Option<Epoch> {
    let input = input.trim();
    let (caps, month) = if let Some(caps) = ISO_FORM.captures(input) {
        let month = caps[2].parse::<u8>().ok()?;
        (caps, month)
    } else {
        let caps = MONTH_NAME_FORM.captures(input)?;
        let month = month_number(&caps[2])?;
        (caps, month)
    };

    let year = caps[1].parse::<i32>().ok()?;
    let day = caps[3].parse::<u8>().ok()?;
    let field = |idx: usize| {
        caps.get(idx)
            .map(|m| m.as_str().parse::<u8>().ok())
            .unwrap_or(Some(0))
    };
    let hour = field(4)?;
    let minute = field(5)?;
    let second = field(6)?;
    let nanos = caps.get(7).map(|m| fraction_to_nanos(m.as_str())).unwrap_or(0);

    utc_from_fields((year, month, day, hour, minute, second, nanos))
}

/// Format an epoch as `YYYY-MM-DDTHH:MM:SS[.fff]` UTC, rounded to `precision` digits.
pub(crate) fn format_iso(epoch: Epoch, precision: u32) -> String {
    let precision = precision.min(9);
    let half_unit = Duration::from_seconds(0.5 * 10f64.powi(-(precision as i32)));
    let (y, mo, d, h, mi, s, ns) = utc_fields(&(epoch + half_unit));

    let mut out = format!("{y:04}-{mo:02}-{d:02}T{h:02}:{mi:02}:{s:02}");
    if precision > 0 {
        let scaled = ns / 10u32.pow(9 - precision);
        out.push_str(&format!(".{:0width$}", scaled, width = precision as usize));
    }
    out
}

#[cfg(test)]
mod test_calendar {
    use super::*;
    use hifitime::TimeScale;

    #[test]
    fn test_parse_both_forms() {
        let a = parse_civil("2024-JAN-15 12:30:45.250").unwrap();
        let b = parse_civil("2024-01-15T12:30:45.25").unwrap();
        let c = parse_civil("2024-jan-15 12:30:45.25 UTC").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(
            a,
            Epoch::from_gregorian(2024, 1, 15, 12, 30, 45, 250_000_000, TimeScale::UTC)
        );
    }

    #[test]
    fn test_parse_date_only() {
        let e = parse_civil("2000-01-01").unwrap();
        assert_eq!(e, Epoch::from_gregorian(2000, 1, 1, 0, 0, 0, 0, TimeScale::UTC));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_civil("yesterday").is_none());
        assert!(parse_civil("2024-XYZ-01 00:00:00").is_none());
        assert!(parse_civil("2024-02-31T00:00:00").is_none());
    }

    #[test]
    fn test_leap_second_both_ways() {
        let leap = parse_civil("2016-DEC-31 23:59:60.5").unwrap();
        let midnight = parse_civil("2017-01-01T00:00:00").unwrap();
        assert!((midnight.to_et_seconds() - leap.to_et_seconds() - 0.5).abs() < 1e-6);
        assert_eq!(format_iso(leap, 3), "2016-12-31T23:59:60.500");

        let before = midnight.to_time_scale(TimeScale::TAI) - Duration::from_seconds(20.0);
        assert_eq!(format_iso(before, 0), "2016-12-31T23:59:41");
        assert!(parse_civil("2018-DEC-31 23:59:60").is_none());
    }

    #[test]
    fn test_format_rounds_to_precision() {
        let e = Epoch::from_gregorian(2024, 3, 1, 23, 59, 59, 999_600_000, TimeScale::UTC);
        assert_eq!(format_iso(e, 3), "2024-03-02T00:00:00.000");
        assert_eq!(format_iso(e, 0), "2024-03-02T00:00:00");

        let e = Epoch::from_gregorian(2024, 3, 1, 8, 5, 7, 123_400_000, TimeScale::UTC);
        assert_eq!(format_iso(e, 3), "2024-03-01T08:05:07.123");
    }
}
