//! Compound duration codec
//!
//! This module owns the textual duration encoding used by the fraction form
//! of a [`Rate`](crate::Rate) string: one or more decimal amounts each
//! suffixed by a unit, concatenated (`"300ms"`, `"1.5h"`, `"2h45m"`).
//! [`format_duration`] renders the canonical clock-style form (`"1h0m0s"`)
//! that [`parse_duration`] reads back exactly.

use std::time::Duration;

use thiserror::Error;


const NANOS_PER_US: u64 = 1_000;
const NANOS_PER_MS: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;
const NANOS_PER_MIN: u64 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MIN;

/// Totals are capped at `i64::MAX` nanoseconds, the range of the wire
/// format the rate strings originate from.
const MAX_NANOS: u64 = i64::MAX as u64;

/// Failure parsing a compound duration string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseDurationError {
    /// The input was empty.
    #[error("empty duration string")]
    Empty,

    /// The input does not follow the `<amount><unit>...` grammar.
    #[error("invalid duration {0:?}")]
    Invalid(String),

    /// An amount was not followed by a unit.
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    /// An amount was followed by an unrecognized unit.
    #[error("unknown unit {unit:?} in duration {value:?}")]
    UnknownUnit { unit: String, value: String },

    /// The total exceeds the representable range.
    #[error("duration {0:?} out of range")]
    Overflow(String),

    /// The total is negative; time spans are non-negative.
    #[error("negative duration {0:?}")]
    Negative(String),
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_US),
        "ms" => Some(NANOS_PER_MS),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(NANOS_PER_MIN),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Parses a compound duration string such as `"300ms"`, `"1.5h"` or
/// `"2h45m"`.
///
/// The grammar is an optional leading sign followed by one or more
/// `<decimal-amount><unit>` groups, with units `ns`, `us` (or `µs`), `ms`,
/// `s`, `m` and `h`. `"0"` alone (optionally signed) is valid and means
/// zero. The sign is part of the grammar, but time spans are unsigned, so
/// any negative non-zero total is rejected.
///
/// # Example
///
/// ```
/// use eventrate::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("1h30m")?, Duration::from_secs(5400));
/// assert_eq!(parse_duration(".5s")?, Duration::from_millis(500));
/// # Ok::<(), eventrate::ParseDurationError>(())
/// ```
pub fn parse_duration(s: &str) -> Result<Duration, ParseDurationError> {
    if s.is_empty() {
        return Err(ParseDurationError::Empty);
    }

    let mut negative = false;
    let mut rest = s;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    // The one unitless spelling: a bare (signed) zero.
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(ParseDurationError::Invalid(s.to_string()));
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let int_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (int_digits, after_int) = rest.split_at(int_end);

        let mut amount: u64 = 0;
        for b in int_digits.bytes() {
            amount = amount
                .checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(b - b'0')))
                .filter(|&v| v <= MAX_NANOS)
                .ok_or_else(|| ParseDurationError::Overflow(s.to_string()))?;
        }

        // Optional fraction: digits after the dot accumulate separately and
        // are scaled by the unit below. Digits past u64 precision are
        // consumed but cannot change the result.
        let mut frac: u64 = 0;
        let mut frac_scale = 1.0f64;
        let mut has_frac = false;
        let mut after_frac = after_int;
        if let Some(frac_start) = after_int.strip_prefix('.') {
            let frac_end = frac_start
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(frac_start.len());
            let (frac_digits, remainder) = frac_start.split_at(frac_end);
            has_frac = !frac_digits.is_empty();
            for b in frac_digits.bytes() {
                if frac < u64::MAX / 10 {
                    frac = frac * 10 + u64::from(b - b'0');
                    frac_scale *= 10.0;
                }
            }
            after_frac = remainder;
        }
        if int_digits.is_empty() && !has_frac {
            return Err(ParseDurationError::Invalid(s.to_string()));
        }

        let unit_end = after_frac
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_frac.len());
        let (unit, remainder) = after_frac.split_at(unit_end);
        if unit.is_empty() {
            return Err(ParseDurationError::MissingUnit(s.to_string()));
        }
        let nanos_per_unit = unit_nanos(unit).ok_or_else(|| ParseDurationError::UnknownUnit {
            unit: unit.to_string(),
            value: s.to_string(),
        })?;

        if amount > MAX_NANOS / nanos_per_unit {
            return Err(ParseDurationError::Overflow(s.to_string()));
        }
        let mut group = amount * nanos_per_unit;
        if has_frac {
            group = group
                .checked_add((frac as f64 * (nanos_per_unit as f64 / frac_scale)) as u64)
                .filter(|&v| v <= MAX_NANOS)
                .ok_or_else(|| ParseDurationError::Overflow(s.to_string()))?;
        }
        total = total
            .checked_add(group)
            .filter(|&v| v <= MAX_NANOS)
            .ok_or_else(|| ParseDurationError::Overflow(s.to_string()))?;

        rest = remainder;
    }

    if negative && total != 0 {
        return Err(ParseDurationError::Negative(s.to_string()));
    }

    Ok(Duration::from_nanos(total))
}

/// Renders a duration in the canonical compound form read back by
/// [`parse_duration`].
///
/// Sub-second durations use the largest fitting unit (`100ns`, `1.5µs`,
/// `300ms`); anything at or above one second uses the positional
/// hour/minute/second form (`30s`, `1m30s`, `1h0m0s`). Hours are not
/// broken into days.
///
/// # Example
///
/// ```
/// use eventrate::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(3600)), "1h0m0s");
/// assert_eq!(format_duration(Duration::from_millis(300)), "300ms");
/// ```
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < u128::from(NANOS_PER_US) {
        return format!("{nanos}ns");
    }
    if nanos < u128::from(NANOS_PER_MS) {
        return format!("{}µs", fmt_amount(nanos, u128::from(NANOS_PER_US)));
    }
    if nanos < u128::from(NANOS_PER_SEC) {
        return format!("{}ms", fmt_amount(nanos, u128::from(NANOS_PER_MS)));
    }

    let secs = nanos / u128::from(NANOS_PER_SEC);
    let sec_part = fmt_amount(
        nanos % u128::from(NANOS_PER_MIN),
        u128::from(NANOS_PER_SEC),
    );
    let minutes = (secs / 60) % 60;
    let hours = secs / 3600;

    if hours > 0 {
        format!("{hours}h{minutes}m{sec_part}s")
    } else if minutes > 0 {
        format!("{minutes}m{sec_part}s")
    } else {
        format!("{sec_part}s")
    }
}

/// Formats `nanos / unit` with the fractional part trimmed of trailing
/// zeros, e.g. `1500ns / 1000` renders as `"1.5"`.
fn fmt_amount(nanos: u128, unit: u128) -> String {
    let whole = nanos / unit;
    let frac = nanos % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let width = unit.ilog10() as usize;
    let mut digits = format!("{frac:0width$}");
    while digits.ends_with('0') {
        digits.pop();
    }
    format!("{whole}.{digits}")
}
