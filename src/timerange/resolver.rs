//! Range resolution against a bounding window

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike,
};

use super::format::FormatConfig;
use super::triplet::{parse_integer, parse_real, split_components, Triplet};
use super::{BoundingRange, RangeError, ResolvedRange};

/// Relativity marker parsed off the front of a user string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Absolute,
    Positive,
    Negative,
}

/// One endpoint after parsing: either a fully-built absolute value, or a
/// duration waiting to be applied by the adjustment pipeline
#[derive(Debug, Clone, Copy)]
struct Endpoint {
    sign: Sign,
    value: NaiveDateTime,
    delta: Duration,
}

/// The four relative-adjustment steps. Order matters: a negative start
/// resolves against the end value *after* any negative-end trim, and a
/// positive end resolves against the start value *after* either start
/// adjustment. This supports phrasing like "end 30 minutes before the
/// window closes, start 1 hour before that".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Adjustment {
    /// `-` end: subtract from the bounding end
    TrimEnd,
    /// `+` start: add to the bounding start
    AdvanceStart,
    /// `-` start: subtract from the resolved end
    BackfillStart,
    /// `+` end: add to the resolved start
    ExtendEnd,
}

pub(crate) const ADJUSTMENT_ORDER: [Adjustment; 4] = [
    Adjustment::TrimEnd,
    Adjustment::AdvanceStart,
    Adjustment::BackfillStart,
    Adjustment::ExtendEnd,
];

/// Resolves a pair of user-entered time expressions into an absolute
/// (start, end) range, using a [`FormatConfig`] for separators and display.
#[derive(Debug, Clone, Default)]
pub struct RangeResolver {
    config: FormatConfig,
}

impl RangeResolver {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Resolve `start_input` and `end_input` against the bounding window.
    ///
    /// Empty inputs resolve to the corresponding bound unchanged. The
    /// returned values carry the timezone offsets of their bounds, and are
    /// validated to satisfy `start <= end`.
    pub fn resolve(
        &self,
        start_input: &str,
        end_input: &str,
        bounds: &BoundingRange,
    ) -> Result<ResolvedRange, RangeError> {
        let start = self.parse_endpoint(start_input, &bounds.start)?;
        let end = self.parse_endpoint(end_input, &bounds.end)?;

        let (start_value, end_value) = apply_adjustments(
            start,
            end,
            bounds.start.naive_local(),
            bounds.end.naive_local(),
        );

        let resolved = ResolvedRange {
            start: attach_offset(start_value, *bounds.start.offset()),
            end: attach_offset(end_value, *bounds.end.offset()),
        };

        if resolved.end < resolved.start {
            let display = self.config.display_format(&resolved.start, &resolved.end);
            return Err(RangeError::StartAfterEnd {
                start: resolved.start.format(display).to_string(),
                end: resolved.end.format(display).to_string(),
            });
        }

        Ok(resolved)
    }

    /// Parse one endpoint: detect the sign, split date from time, extract
    /// components, and produce either an absolute value or a pending delta
    fn parse_endpoint(
        &self,
        input: &str,
        bound: &DateTime<FixedOffset>,
    ) -> Result<Endpoint, RangeError> {
        let trimmed = input.trim();
        let (sign, rest) = split_sign(trimmed);
        let (date_part, time_part) = self.split_date_time(rest)?;

        match sign {
            Sign::Absolute => {
                let date = match date_part {
                    Some(part) => Triplet::parse(part, self.config.date_separator())?,
                    None => Triplet::EMPTY,
                };
                let time = match time_part {
                    Some(part) => Triplet::parse(part, self.config.time_separator())?,
                    None => Triplet::EMPTY,
                };
                Ok(Endpoint {
                    sign,
                    value: complete_from_base(&bound.naive_local(), &date, &time)?,
                    delta: Duration::zero(),
                })
            }
            Sign::Positive | Sign::Negative => Ok(Endpoint {
                sign,
                value: bound.naive_local(),
                delta: self.build_delta(date_part, time_part)?,
            }),
        }
    }

    /// Build a duration from the raw relative components, with absent
    /// components as zero. Year and month slots are checked before the day
    /// value is touched and rejected when nonzero: a calendar offset in
    /// those units has no fixed length.
    fn build_delta(
        &self,
        date_part: Option<&str>,
        time_part: Option<&str>,
    ) -> Result<Duration, RangeError> {
        let mut days = 0.0;
        if let Some(part) = date_part {
            let [years, months, day_value] = split_components(part, self.config.date_separator())?;
            if months.map(|v| parse_integer(v, part)).transpose()?.unwrap_or(0) != 0 {
                return Err(RangeError::AmbiguousRelativeUnit { unit: "months" });
            }
            if years.map(|v| parse_integer(v, part)).transpose()?.unwrap_or(0) != 0 {
                return Err(RangeError::AmbiguousRelativeUnit { unit: "years" });
            }
            days = day_value.map(|v| parse_real(v, part)).transpose()?.unwrap_or(0.0);
        }

        let mut hours = 0.0;
        let mut minutes = 0.0;
        let mut seconds = 0.0;
        if let Some(part) = time_part {
            let [h, m, s] = split_components(part, self.config.time_separator())?;
            hours = h.map(|v| parse_integer(v, part)).transpose()?.unwrap_or(0) as f64;
            minutes = m.map(|v| parse_integer(v, part)).transpose()?.unwrap_or(0) as f64;
            seconds = s.map(|v| parse_real(v, part)).transpose()?.unwrap_or(0.0);
        }

        let total_seconds = days * 86_400.0 + hours * 3_600.0 + minutes * 60.0 + seconds;
        Ok(Duration::microseconds(
            (total_seconds * 1_000_000.0).round() as i64,
        ))
    }

    /// Split a (sign-stripped) expression into date and time substrings.
    ///
    /// Two parts mean date then time. A single part is a date when it
    /// contains the date separator, otherwise a time. Empty input means
    /// neither is present.
    fn split_date_time<'a>(
        &self,
        input: &'a str,
    ) -> Result<(Option<&'a str>, Option<&'a str>), RangeError> {
        if input.is_empty() {
            return Ok((None, None));
        }

        let parts: Vec<&str> = input.split(self.config.datetime_separator()).collect();
        match parts.as_slice() {
            [single] => {
                if single.contains(self.config.date_separator()) {
                    Ok((Some(single), None))
                } else {
                    Ok((None, Some(single)))
                }
            }
            [date, time] => Ok((Some(date), Some(time))),
            _ => Err(RangeError::DateTimeSplit {
                input: input.to_string(),
                separator: self.config.datetime_separator(),
            }),
        }
    }
}

/// Run the four adjustment steps in their fixed order, returning the final
/// naive (start, end) values
fn apply_adjustments(
    start: Endpoint,
    end: Endpoint,
    bound_start: NaiveDateTime,
    bound_end: NaiveDateTime,
) -> (NaiveDateTime, NaiveDateTime) {
    let mut start_value = start.value;
    let mut end_value = end.value;

    for step in ADJUSTMENT_ORDER {
        match step {
            Adjustment::TrimEnd => {
                if end.sign == Sign::Negative {
                    end_value = bound_end - end.delta;
                }
            }
            Adjustment::AdvanceStart => {
                if start.sign == Sign::Positive {
                    start_value = bound_start + start.delta;
                }
            }
            Adjustment::BackfillStart => {
                if start.sign == Sign::Negative {
                    start_value = end_value - start.delta;
                }
            }
            Adjustment::ExtendEnd => {
                if end.sign == Sign::Positive {
                    end_value = start_value + end.delta;
                }
            }
        }
    }

    (start_value, end_value)
}

fn split_sign(input: &str) -> (Sign, &str) {
    if let Some(rest) = input.strip_prefix('+') {
        (Sign::Positive, rest)
    } else if let Some(rest) = input.strip_prefix('-') {
        (Sign::Negative, rest)
    } else {
        (Sign::Absolute, input)
    }
}

/// Build an absolute value by overwriting the provided components on the
/// base timestamp. Missing components inherit from the base; fractional
/// fine components are truncated to whole units.
fn complete_from_base(
    base: &NaiveDateTime,
    date: &Triplet,
    time: &Triplet,
) -> Result<NaiveDateTime, RangeError> {
    let year = date.coarse.unwrap_or(base.year() as i64);
    let month = date.middle.unwrap_or(base.month() as i64);
    let day = date
        .fine
        .map(|v| v.trunc() as i64)
        .unwrap_or(base.day() as i64);

    let hour = time.coarse.unwrap_or(base.hour() as i64);
    let minute = time.middle.unwrap_or(base.minute() as i64);
    let second = time
        .fine
        .map(|v| v.trunc() as i64)
        .unwrap_or(base.second() as i64);

    let invalid_date = RangeError::InvalidDate { year, month, day };
    let resolved_date = i32::try_from(year)
        .ok()
        .zip(u32::try_from(month).ok())
        .zip(u32::try_from(day).ok())
        .and_then(|((y, m), d)| NaiveDate::from_ymd_opt(y, m, d))
        .ok_or(invalid_date)?;

    let invalid_time = RangeError::InvalidTime {
        hour,
        minute,
        second,
    };
    let resolved_time = u32::try_from(hour)
        .ok()
        .zip(u32::try_from(minute).ok())
        .zip(u32::try_from(second).ok())
        .and_then(|((h, m), s)| NaiveTime::from_hms_opt(h, m, s))
        .ok_or(invalid_time)?;

    Ok(resolved_date.and_time(resolved_time))
}

/// Re-attach a fixed offset to a naive local value
fn attach_offset(naive: NaiveDateTime, offset: FixedOffset) -> DateTime<FixedOffset> {
    DateTime::from_naive_utc_and_offset(naive - offset, offset)
}
