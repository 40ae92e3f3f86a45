//! # eventrate
//!
//! Events-over-time rate values for throttling and scheduler configuration.
//!
//! ## Overview
//!
//! The crate ships one value type, [`Rate`], representing "N events per
//! time span T" (e.g. "100 events per hour"). It parses and renders the
//! compact textual form used in flat configuration (environment variables,
//! CLI flags), normalizes an unset time base, and derives the
//! events-per-second figure consumers such as rate limiters work with.
//!
//! ## Quick start
//!
//! ```
//! use eventrate::Rate;
//! use std::time::Duration;
//!
//! // "100 events per hour"
//! let rate: Rate = "100/1h".parse()?;
//! assert_eq!(rate.events, 100.0);
//! assert_eq!(rate.over_time, Duration::from_secs(3600));
//! assert!((rate.events_per_second() - 100.0 / 3600.0).abs() < 1e-12);
//!
//! // A bare number is an already-per-second figure (no time basis).
//! let rate: Rate = "12.5".parse()?;
//! assert_eq!(rate.events_per_second(), 12.5);
//! assert!(rate.over_time.is_zero());
//! # Ok::<(), eventrate::RateParseError>(())
//! ```
//!
//! ## Text format
//!
//! - **Bare number**: anything `f64` parses (`"100"`, `"2.5"`, `"1e3"`).
//!   The time base stays at the zero sentinel.
//! - **Fraction**: `<count>/<duration>` where the count is a whole number
//!   of at most 52 bits and the duration uses the compound grammar
//!   (`"300ms"`, `"1.5h"`, `"2h45m"`) handled by [`parse_duration`] and
//!   [`format_duration`].
//!
//! ## Serde
//!
//! With the default-on `serde` feature, `Rate` embeds in structured
//! configuration documents under the keys `events` (float) and `over_time`
//! (integer nanoseconds), each omitted when zero.

mod error;
mod rate;

pub mod duration;

pub use duration::{ParseDurationError, format_duration, parse_duration};
pub use error::{EventsError, RateParseError};
pub use rate::Rate;
