//! The [`Rate`] configuration value
//!
//! A `Rate` expresses a throughput limit as "N events per time span T",
//! parsed from and rendered to a compact textual form. Consumers (a rate
//! limiter, a scheduler) call [`Rate::events_per_second`] to obtain a
//! numeric figure and otherwise treat the value as opaque configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::duration::{format_duration, parse_duration};
use crate::error::{EventsError, RateParseError};


/// A count of events over a time span, e.g. "100 events per hour".
///
/// The textual encoding has two forms:
///
/// - a bare number (`"100"`, `"2.5"`), which sets [`events`](Rate::events)
///   and leaves [`over_time`](Rate::over_time) at the zero sentinel;
/// - a fraction `"<count>/<duration>"` (`"100/1h"`, `"5/300ms"`), where the
///   count is a whole number of at most 52 bits and the duration uses the
///   compound grammar of [`parse_duration`](crate::parse_duration).
///
/// A zero `over_time` means "no time basis": `events` is taken as an
/// already-per-second figure.
///
/// # Example
///
/// ```
/// use eventrate::Rate;
/// use std::time::Duration;
///
/// let rate: Rate = "100/1h".parse()?;
/// assert_eq!(rate.events, 100.0);
/// assert_eq!(rate.over_time, Duration::from_secs(3600));
/// assert_eq!(rate.to_string(), "100/1h0m0s");
/// # Ok::<(), eventrate::RateParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rate {
    /// Count of events. Never negative when parsed from text; fractional
    /// values can arise from arithmetic but the fraction form only
    /// produces whole counts.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "is_zero_events")
    )]
    pub events: f64,

    /// Time span the events are counted over. [`Duration::ZERO`] is the
    /// sentinel for "no explicit time basis". On the wire this is an
    /// integer nanosecond count.
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "over_time_nanos", skip_serializing_if = "Duration::is_zero")
    )]
    pub over_time: Duration,
}

impl Rate {
    /// Largest event count accepted by the fraction form: the count is
    /// widened into the `f64` events field and must survive without
    /// rounding, which bounds it to the 52-bit mantissa.
    pub const MAX_EVENTS: u64 = (1 << 52) - 1;

    const HOUR: Duration = Duration::from_secs(3600);

    /// Creates a rate of `events` per `over_time`.
    pub fn new(events: f64, over_time: Duration) -> Self {
        Rate { events, over_time }
    }

    /// Creates a rate of n events per second.
    pub fn per_second(n: u64) -> Self {
        Rate::new(n as f64, Duration::from_secs(1))
    }

    /// Creates a rate of n events per minute.
    pub fn per_minute(n: u64) -> Self {
        Rate::new(n as f64, Duration::from_secs(60))
    }

    /// Creates a rate of n events per hour.
    pub fn per_hour(n: u64) -> Self {
        Rate::new(n as f64, Self::HOUR)
    }

    /// Creates a rate of n events per day.
    pub fn per_day(n: u64) -> Self {
        Rate::new(n as f64, Duration::from_secs(86_400))
    }

    /// Returns this rate as events per second.
    ///
    /// With the zero-sentinel `over_time`, `events` is returned unchanged:
    /// it is already a per-second figure.
    ///
    /// # Example
    ///
    /// ```
    /// use eventrate::Rate;
    ///
    /// let rate = Rate::per_hour(100);
    /// assert!((rate.events_per_second() - 100.0 / 3600.0).abs() < 1e-12);
    /// ```
    pub fn events_per_second(&self) -> f64 {
        if self.over_time.is_zero() {
            return self.events;
        }
        self.events / self.over_time.as_secs_f64()
    }

    /// Returns a copy with an unset `over_time` normalized to one hour.
    ///
    /// The `over_time` argument is currently **ignored**: when the
    /// receiver's time base is the zero sentinel, the result always gets a
    /// one-hour base, whatever the caller passes. Deployed configuration
    /// relies on the one-hour default, so the quirk is kept and pinned by
    /// test rather than fixed here. A non-zero receiver is returned
    /// unchanged.
    // TODO: honor the `over_time` argument once configs relying on the
    // one-hour default have been audited.
    pub fn default_over_time(&self, _over_time: Duration) -> Rate {
        if self.over_time.is_zero() {
            return Rate {
                events: self.events,
                over_time: Self::HOUR,
            };
        }
        *self
    }
}

impl FromStr for Rate {
    type Err = RateParseError;

    /// Parses the textual forms described on [`Rate`]: a bare float first,
    /// then the `<count>/<duration>` fraction.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(events) = s.parse::<f64>() {
            return Ok(Rate {
                events,
                over_time: Duration::ZERO,
            });
        }

        let mut parts = s.splitn(3, '/');
        let (events_part, over_time_part) = match (parts.next(), parts.next(), parts.next()) {
            (Some(events), Some(over_time), None) => (events, over_time),
            _ => {
                return Err(RateParseError::Malformed {
                    value: s.to_string(),
                });
            }
        };

        let count: u64 = events_part.parse().map_err(|err| RateParseError::Events {
            value: s.to_string(),
            source: EventsError::Int(err),
        })?;
        if count > Self::MAX_EVENTS {
            return Err(RateParseError::Events {
                value: s.to_string(),
                source: EventsError::OutOfRange(count),
            });
        }

        let over_time = parse_duration(over_time_part).map_err(|err| RateParseError::OverTime {
            value: s.to_string(),
            source: err,
        })?;

        Ok(Rate {
            events: count as f64,
            over_time,
        })
    }
}

impl fmt::Display for Rate {
    /// Renders the sentinel form with six decimal digits (`"100.000000"`)
    /// and the fraction form as `"<count>/<duration>"` (`"10/1h0m0s"`).
    ///
    /// The fraction form truncates a fractional count to a whole number.
    /// That is lossy, and kept byte-for-byte compatible with existing
    /// rendered configuration.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.over_time.is_zero() {
            return write!(f, "{:.6}", self.events);
        }
        write!(
            f,
            "{}/{}",
            self.events as u64,
            format_duration(self.over_time)
        )
    }
}

#[cfg(feature = "serde")]
fn is_zero_events(events: &f64) -> bool {
    *events == 0.0
}

/// Wire representation of `over_time`: an integer nanosecond count,
/// omitted when zero. Serialization saturates at `u64::MAX` nanoseconds;
/// parsed values never get that large.
#[cfg(feature = "serde")]
mod over_time_nanos {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_nanos(u64::deserialize(deserializer)?))
    }
}
