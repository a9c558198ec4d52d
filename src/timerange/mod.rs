//! Datetime range resolution
//!
//! Converts user-entered time expressions into an absolute (start, end) pair.
//! Expressions may be absolute (`2024/03/11 14:00:00`, or any partial form of
//! it, with missing components inherited from a bounding timestamp) or
//! relative (`+1:30:00`, `-0:10:00`), offset from a bound or from the other
//! resolved endpoint depending on the sign.

use chrono::{DateTime, Duration, FixedOffset, Timelike};
use thiserror::Error;

mod format;
mod resolver;
mod triplet;

pub use format::FormatConfig;
pub use resolver::RangeResolver;
pub use triplet::Triplet;

/// Errors raised while resolving a time range
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    /// Input could not be split into date and time parts
    #[error("Couldn't parse date and time from '{input}' (splitting on '{separator}')")]
    DateTimeSplit { input: String, separator: char },

    /// A date or time part had the wrong number of components
    #[error("Error splitting entries: '{input}' with '{separator}'")]
    ComponentSplit { input: String, separator: char },

    /// A component was not a number
    #[error("Expected a number in '{input}', got: {value}")]
    InvalidNumber { input: String, value: String },

    /// A relative expression used a calendar-ambiguous unit
    #[error("Can't specify relative {unit}, since this can result in undefined dates. Use days instead")]
    AmbiguousRelativeUnit { unit: &'static str },

    /// An absolute expression produced a date that does not exist
    #[error("Date {year:04}/{month:02}/{day:02} does not exist")]
    InvalidDate { year: i64, month: i64, day: i64 },

    /// An absolute expression produced an out-of-range time of day
    #[error("Time {hour:02}:{minute:02}:{second:02} is out of range")]
    InvalidTime { hour: i64, minute: i64, second: i64 },

    /// The resolved start landed after the resolved end
    #[error("The provided start time occurs after the provided end time (start: {start}, end: {end})")]
    StartAfterEnd { start: String, end: String },
}

/// Fallback (start, end) window used when the user provides no explicit value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingRange {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl BoundingRange {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self { start, end }
    }

    /// Truncate the bounds to whole seconds (start floored, end ceiled),
    /// since user input and display only work at second precision
    pub fn rounded(&self) -> Self {
        Self {
            start: floor_to_second(self.start),
            end: ceil_to_second(self.end),
        }
    }
}

/// A resolved absolute (start, end) pair, each value carrying the timezone
/// of the corresponding bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl ResolvedRange {
    pub fn duration(&self) -> Duration {
        self.end.signed_duration_since(self.start)
    }
}

/// Which endpoint stays put when a range is clamped to a maximum span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClampAnchor {
    /// Keep the start, pull the end backward
    Start,
    /// Keep the end, push the start forward
    End,
}

/// Limit a resolved range so its span does not exceed `max_span`.
///
/// Ranges already within the limit are returned unchanged.
pub fn clamp_span(range: ResolvedRange, max_span: Duration, anchor: ClampAnchor) -> ResolvedRange {
    if range.duration() <= max_span {
        return range;
    }

    match anchor {
        ClampAnchor::End => ResolvedRange {
            start: range.end - max_span,
            end: range.end,
        },
        ClampAnchor::Start => ResolvedRange {
            start: range.start,
            end: range.start + max_span,
        },
    }
}

/// Drop any sub-second component
pub fn floor_to_second(value: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    value.with_nanosecond(0).unwrap_or(value)
}

/// Round up to the next whole second if a sub-second component is present
pub fn ceil_to_second(value: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let floored = floor_to_second(value);
    if floored == value {
        value
    } else {
        floored + Duration::seconds(1)
    }
}
