//! Separator configuration and display formats

use chrono::{DateTime, FixedOffset};

/// Separator characters for date/time input and display, plus the
/// strftime-style format strings derived from them.
///
/// The formats are rebuilt whenever a config is constructed, so a resolver
/// handed this value always parses and prints with matching separators.
/// Configs are immutable; callers needing different separators build a
/// second config rather than mutating a shared one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    date_separator: char,
    time_separator: char,
    datetime_separator: char,
    date_format: String,
    time_format: String,
    datetime_format: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::new('/', ':', ' ')
    }
}

impl FormatConfig {
    /// Build a config from separator characters, deriving the format strings
    pub fn new(date_separator: char, time_separator: char, datetime_separator: char) -> Self {
        let date_format = format!("%Y{0}%m{0}%d", date_separator);
        let time_format = format!("%H{0}%M{0}%S", time_separator);
        let datetime_format = format!("{}{}{}", date_format, datetime_separator, time_format);

        Self {
            date_separator,
            time_separator,
            datetime_separator,
            date_format,
            time_format,
            datetime_format,
        }
    }

    pub fn date_separator(&self) -> char {
        self.date_separator
    }

    pub fn time_separator(&self) -> char {
        self.time_separator
    }

    pub fn datetime_separator(&self) -> char {
        self.datetime_separator
    }

    /// Date-only display format (e.g. `%Y/%m/%d`)
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Time-only display format (e.g. `%H:%M:%S`)
    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    /// Combined date and time display format
    pub fn datetime_format(&self) -> &str {
        &self.datetime_format
    }

    /// Pick the display format for a pair of values: the combined format
    /// when they fall on different calendar dates, time-only otherwise
    pub fn display_format(&self, a: &DateTime<FixedOffset>, b: &DateTime<FixedOffset>) -> &str {
        if a.date_naive() == b.date_naive() {
            self.time_format()
        } else {
            self.datetime_format()
        }
    }

    /// Format a single value with the combined date and time format
    pub fn format_datetime(&self, value: &DateTime<FixedOffset>) -> String {
        value.format(self.datetime_format()).to_string()
    }
}
