//! Date-time and duration arguments.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDateTime, TimeDelta};

use super::{ArgParameters, Culture, MessageArg};

// ============================================================================
// TIME ARG
// ============================================================================

/// A date-time value. Accepts `format` (a `strftime` pattern) and `culture`.
///
/// Without `format` the culture's general date-time pattern is used. An
/// invalid pattern falls back to the same default.
///
/// ```text
/// {at}                         -> 03/14/2024 09:26:53
/// {at|format=%Y-%m-%d}         -> 2024-03-14
/// {at|culture=pl-PL}           -> 14.03.2024 09:26:53
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeArg {
    name: String,
    value: NaiveDateTime,
}

impl TimeArg {
    /// Creates a date-time argument.
    pub fn new(name: impl Into<String>, value: NaiveDateTime) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The raw value.
    #[must_use]
    pub fn value(&self) -> NaiveDateTime {
        self.value
    }
}

impl MessageArg for TimeArg {
    fn name(&self) -> &str {
        &self.name
    }

    fn allowed_parameters(&self) -> &'static [&'static str] {
        &["format", "culture"]
    }

    fn render(&self, parameters: ArgParameters<'_>) -> String {
        let culture = Culture::from_parameter(parameters.get("culture"));
        let fallback = culture.date_time_pattern();
        let pattern = parameters.get("format").unwrap_or(fallback);

        format_date_time(self.value, pattern)
            .or_else(|| format_date_time(self.value, fallback))
            .unwrap_or_else(|| self.value.to_string())
    }
}

fn format_date_time(value: NaiveDateTime, pattern: &str) -> Option<String> {
    let items = StrftimeItems::new(pattern);
    if items.clone().any(|item| matches!(item, Item::Error)) {
        return None;
    }

    // Naive values cannot render offset specifiers; that surfaces as fmt::Error.
    let mut out = String::new();
    write!(out, "{}", value.format_with_items(items)).ok()?;
    Some(out)
}

// ============================================================================
// DURATION ARG
// ============================================================================

/// A duration value. Accepts `format` and `culture`.
///
/// The default rendering is `[-][d.]hh:mm:ss[<sep>fffffff]` where `<sep>` is
/// the culture's decimal separator and the fraction (100ns resolution)
/// appears only when non-zero. A custom `format` uses these tokens:
///
/// | Token       | Meaning                                   |
/// |-------------|-------------------------------------------|
/// | `d`..       | whole days, padded to the token length    |
/// | `h`, `hh`   | hours of the day                          |
/// | `m`, `mm`   | minutes of the hour                       |
/// | `s`, `ss`   | seconds of the minute                     |
/// | `f`..`fffffff` | second fraction, truncated to the token length |
/// | `\x`, `'..'`| literal text                              |
///
/// Any other character is copied through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationArg {
    name: String,
    value: TimeDelta,
}

impl DurationArg {
    /// Creates a duration argument.
    pub fn new(name: impl Into<String>, value: TimeDelta) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The raw value.
    #[must_use]
    pub fn value(&self) -> TimeDelta {
        self.value
    }
}

impl MessageArg for DurationArg {
    fn name(&self) -> &str {
        &self.name
    }

    fn allowed_parameters(&self) -> &'static [&'static str] {
        &["format", "culture"]
    }

    fn render(&self, parameters: ArgParameters<'_>) -> String {
        let culture = Culture::from_parameter(parameters.get("culture"));
        let parts = DurationParts::from(self.value);
        match parameters.get("format") {
            Some(format) if !format.is_empty() => parts.custom(format),
            _ => parts.standard(culture),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct DurationParts {
    negative: bool,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    /// Hundreds of nanoseconds.
    ticks: i64,
}

impl From<TimeDelta> for DurationParts {
    fn from(value: TimeDelta) -> Self {
        let negative = value < TimeDelta::zero();
        let abs = value.abs();
        let total_seconds = abs.num_seconds();
        let nanos = i64::from(abs.subsec_nanos());

        Self {
            negative,
            days: total_seconds / 86_400,
            hours: (total_seconds / 3_600) % 24,
            minutes: (total_seconds / 60) % 60,
            seconds: total_seconds % 60,
            ticks: nanos / 100,
        }
    }
}

impl DurationParts {
    fn standard(self, culture: Culture) -> String {
        let mut out = String::new();
        if self.negative {
            out.push('-');
        }
        if self.days > 0 {
            out.push_str(&format!("{}.", self.days));
        }
        out.push_str(&format!(
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        ));
        if self.ticks > 0 {
            out.push_str(&format!("{}{:07}", culture.decimal_separator(), self.ticks));
        }
        out
    }

    fn custom(self, format: &str) -> String {
        let mut out = String::with_capacity(format.len() + 8);
        let mut chars = format.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                'd' | 'h' | 'm' | 's' | 'f' => {
                    let mut width = 1;
                    while chars.peek() == Some(&c) {
                        chars.next();
                        width += 1;
                    }
                    self.push_token(&mut out, c, width);
                }
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '\'' | '"' => {
                    for literal in chars.by_ref() {
                        if literal == c {
                            break;
                        }
                        out.push(literal);
                    }
                }
                '-' if out.is_empty() && self.negative => out.push('-'),
                '-' if out.is_empty() => {}
                other => out.push(other),
            }
        }
        out
    }

    fn push_token(self, out: &mut String, token: char, width: usize) {
        let part = match token {
            'd' => format!("{:0width$}", self.days),
            'h' => format!("{:0width$}", self.hours, width = width.min(2)),
            'm' => format!("{:0width$}", self.minutes, width = width.min(2)),
            's' => format!("{:0width$}", self.seconds, width = width.min(2)),
            _ => {
                let digits = format!("{:07}", self.ticks);
                digits[..width.min(7)].to_string()
            }
        };
        out.push_str(&part);
    }
}

// ============================================================================
// TESTS
// ============================================================================
