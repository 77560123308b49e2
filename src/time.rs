//! # Time conversion
//!
//! Civil instants ([`hifitime::Epoch`]) ↔ ephemeris time (TDB seconds past
//! J2000) through the toolkit's leap-second aware converter.
//!
//! **A leap-second kernel must be loaded** before either direction succeeds:
//! without it the toolkit refuses the conversion and the call fails with
//! [`OrreryError::InvalidTime`]. No fallback table is used.
//!
//! ## Lexical forms
//!
//! | Direction         | Sent to / read from the toolkit  |
//! |-------------------|----------------------------------|
//! | civil → ET        | `YYYY-MON-DD HH:MM:SS.ffffff` (UTC) |
//! | ET → civil        | `YYYY-MM-DDTHH:MM:SS.ffffff` (UTC) |
use std::sync::LazyLock;

use hifitime::{Duration, Epoch, TimeScale};
use regex::Regex;

use crate::{
    constants::EphemerisTime,
    orrery_errors::OrreryError,
    toolkit::{error_check::guarded, Toolkit},
};

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Fractional second digits requested from the toolkit (µs resolution).
const CIVIL_PRECISION: u32 = 6;

static ISO_CALENDAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})T(\d{2}):(\d{2}):(\d{2})(?:\.(\d{1,9}))?$")
        .expect("valid ISO calendar regex")
});

/// Gregorian fields `(year, month, day, hour, minute, second, nanoseconds)`.
pub type Gregorian = (i32, u8, u8, u8, u8, u8, u32);

/// UTC calendar fields of `epoch` (any time scale).
///
/// An instant inside an inserted leap second is reported as `second == 60`.
/// `Epoch::to_gregorian_utc` looks the TAI−UTC offset up with the TAI instant,
/// which picks the new offset during the seconds that precede each leap
/// second. Here the offset is the one whose UTC side has been reached, the
/// rule [`utc_from_fields`] (and `Epoch::from_gregorian_utc`) inverts.
pub fn utc_fields(epoch: &Epoch) -> Gregorian {
    let offset = |e: Epoch| e.leap_seconds(true).unwrap_or(0.0);
    let tai = epoch.to_time_scale(TimeScale::TAI);

    let ahead = offset(tai);
    let naive = tai - Duration::from_seconds(ahead);
    let settled = offset(naive);
    if settled == ahead {
        return naive.to_gregorian_tai();
    }

    let before = tai - Duration::from_seconds(settled);
    let (y, mo, d, h, mi, s, ns) = naive.to_gregorian_tai();
    if offset(before) != settled && ahead - settled == 1.0 && s == 59 {
        (y, mo, d, h, mi, 60, ns)
    } else {
        before.to_gregorian_tai()
    }
}

/// Instant of UTC calendar fields, accepting `second == 60` only inside a
/// real leap second. `None` for an impossible date.
pub fn utc_from_fields((y, mo, d, h, mi, s, ns): Gregorian) -> Option<Epoch> {
    if s != 60 {
        return Epoch::maybe_from_gregorian(y, mo, d, h, mi, s, ns, TimeScale::UTC).ok();
    }
    let last = Epoch::maybe_from_gregorian(y, mo, d, h, mi, 59, ns, TimeScale::UTC).ok()?;
    let leap = last.to_time_scale(TimeScale::TAI) + Duration::from_seconds(1.0);
    (utc_fields(&leap).5 == 60).then_some(leap)
}

/// Format `epoch` (any time scale) as the toolkit's UTC month-name form.
///
/// Return
/// ----------
/// * The lexical form with microsecond resolution, or [`OrreryError::InvalidTime`]
///   when the UTC year does not fit in four digits.
pub fn format_civil(epoch: &Epoch) -> Result<String, OrreryError> {
    let (y, mo, d, h, mi, s, ns) = utc_fields(epoch);
    if !(1..=9999).contains(&y) {
        return Err(OrreryError::InvalidTime {
            time: epoch.to_string(),
            reason: format!("year {y} cannot be expressed in the toolkit calendar format"),
        });
    }
    let month = MONTHS[usize::from(mo.clamp(1, 12)) - 1];
    Ok(format!(
        "{y:04}-{month}-{d:02} {h:02}:{mi:02}:{s:02}.{:06}",
        ns / 1_000
    ))
}

/// Convert a civil instant to ephemeris time.
///
/// Arguments
/// -----------------
/// * `toolkit`: Converter, a leap-second kernel must be loaded in it.
/// * `epoch`: The instant, normalized to UTC before formatting.
///
/// Return
/// ----------
/// * Ephemeris seconds past J2000, or [`OrreryError::InvalidTime`].
pub fn civil_to_ephemeris_time<T: Toolkit + ?Sized>(
    toolkit: &mut T,
    epoch: &Epoch,
) -> Result<EphemerisTime, OrreryError> {
    let text = format_civil(epoch)?;
    guarded(toolkit, |tk| tk.civil_to_et(&text)).map_err(|failure| OrreryError::InvalidTime {
        time: text.clone(),
        reason: failure.to_string(),
    })
}

/// Convert ephemeris time back to a UTC civil instant.
///
/// Return
/// ----------
/// * The UTC [`Epoch`], or [`OrreryError::InvalidTime`] if the toolkit rejects
///   the epoch or its output cannot be read back.
pub fn ephemeris_time_to_civil<T: Toolkit + ?Sized>(
    toolkit: &mut T,
    et: EphemerisTime,
) -> Result<Epoch, OrreryError> {
    let invalid = |reason: String| OrreryError::InvalidTime {
        time: format!("ET {et}"),
        reason,
    };
    let text = guarded(toolkit, |tk| tk.et_to_civil(et, CIVIL_PRECISION))
        .map_err(|failure| invalid(failure.to_string()))?;
    parse_iso(&text).ok_or_else(|| invalid(format!("unreadable calendar string {text:?}")))
}

/// Current wall-clock instant.
pub fn now() -> Result<Epoch, OrreryError> {
    Epoch::now().map_err(|e| OrreryError::ClockUnavailable(e.to_string()))
}

fn parse_iso(text: &str) -> Option<Epoch> {
    let caps = ISO_CALENDAR.captures(text.trim())?;
    let num = |idx: usize| caps[idx].parse::<u8>().ok();
    let year = caps[1].parse::<i32>().ok()?;
    let nanos = match caps.get(7) {
        Some(frac) => format!("{:0<9}", frac.as_str()).parse::<u32>().ok()?,
        None => 0,
    };
    utc_from_fields((year, num(2)?, num(3)?, num(4)?, num(5)?, num(6)?, nanos))
}
