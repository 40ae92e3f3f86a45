use std::num::ParseIntError;

use thiserror::Error;

use crate::duration::ParseDurationError;

/// Failure parsing a [`Rate`](crate::Rate) from its textual form.
///
/// Every variant carries the full input under scrutiny so a configuration
/// loader can print a one-line diagnostic naming the failing part.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RateParseError {
    /// Neither a bare number nor exactly two `/`-separated parts.
    #[error("value {value:?} does not match rate syntax")]
    Malformed { value: String },

    /// The events part of a fraction-form value failed to parse.
    #[error("events part of rate value {value:?} failed to parse: {source}")]
    Events {
        value: String,
        source: EventsError,
    },

    /// The over-time part of a fraction-form value failed to parse.
    #[error("over-time part of rate value {value:?} failed to parse: {source}")]
    OverTime {
        value: String,
        source: ParseDurationError,
    },
}

/// Why the events part of a fraction-form rate was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventsError {
    /// Not a base-10 unsigned integer.
    #[error(transparent)]
    Int(#[from] ParseIntError),

    /// The count needs more than 52 bits and would round when widened to
    /// the `f64` events field.
    #[error("{0} does not fit in 52 bits")]
    OutOfRange(u64),
}
