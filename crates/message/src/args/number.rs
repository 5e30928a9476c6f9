//! Numeric argument and number formatting.
//!
//! The `format` parameter accepts either a standard format or a custom
//! pattern:
//!
//! | Format  | Meaning                                   | `1234.5` (invariant) |
//! |---------|-------------------------------------------|----------------------|
//! | *empty* | plain value                               | `1234.5`             |
//! | `F<n>`  | fixed-point, `n` decimals (default 2)     | `1234.50`            |
//! | `N<n>`  | grouped fixed-point (default 2)           | `1,234.50`           |
//! | `D<n>`  | integer, zero-padded to `n` digits        | integers only        |
//! | `P<n>`  | percent of the value (default 2)          | `123,450.00 %`       |
//! | `X<n>`  | hexadecimal, `x` for lowercase            | integers only        |
//! | `E<n>`  | scientific, `n` decimals (default 6)      | `1.234500E+003`      |
//! | `#,##0.00` | custom pattern (`0`, `#`, `,`, `.`, `%`) | `1,234.50`        |
//!
//! Formats that do not apply to the value (e.g. `D` on a float) fall back
//! to the plain rendering.

use super::{ArgParameters, Culture, MessageArg};

// ============================================================================
// NUMBER
// ============================================================================

/// A numeric value carried by [`NumberArg`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Any integer type.
    Integer(i128),
    /// Any floating-point type.
    Float(f64),
}

impl Number {
    /// The value as `f64`.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

macro_rules! number_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(value: $t) -> Self {
                    Number::Integer(value as i128)
                }
            }
        )*
    };
}

number_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<i128> for Number {
    fn from(value: i128) -> Self {
        Number::Integer(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(f64::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

// ============================================================================
// NUMBER ARG
// ============================================================================

/// A numeric value. Accepts `format` and `culture`.
///
/// ```text
/// {min}                           -> 1234.5
/// {min|format=N2}                 -> 1,234.50
/// {min|format=N2,culture=pl-PL}   -> 1 234,50
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NumberArg {
    name: String,
    value: Number,
}

impl NumberArg {
    /// Creates a numeric argument.
    pub fn new(name: impl Into<String>, value: impl Into<Number>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The raw value.
    #[must_use]
    pub fn value(&self) -> Number {
        self.value
    }
}

impl MessageArg for NumberArg {
    fn name(&self) -> &str {
        &self.name
    }

    fn allowed_parameters(&self) -> &'static [&'static str] {
        &["format", "culture"]
    }

    fn render(&self, parameters: ArgParameters<'_>) -> String {
        let culture = Culture::from_parameter(parameters.get("culture"));
        format_number(self.value, parameters.get("format").unwrap_or(""), culture)
    }
}

// ============================================================================
// FORMATTING
// ============================================================================

/// Formats a number with a format string and culture.
#[must_use]
pub fn format_number(value: Number, format: &str, culture: Culture) -> String {
    let format = format.trim();
    if format.is_empty() {
        return plain(value, culture);
    }

    if let Some(standard) = StandardFormat::parse(format) {
        return standard.apply(value, culture);
    }

    match CustomPattern::parse(format) {
        Some(pattern) => pattern.apply(value, culture),
        None => plain(value, culture),
    }
}

fn plain(value: Number, culture: Culture) -> String {
    match value {
        Number::Integer(i) => i.to_string(),
        Number::Float(f) if f.is_nan() => "NaN".to_string(),
        Number::Float(f) if f.is_infinite() => {
            if f < 0.0 {
                "-Infinity".to_string()
            } else {
                "Infinity".to_string()
            }
        }
        Number::Float(f) => f
            .to_string()
            .replace('.', &culture.decimal_separator().to_string()),
    }
}

#[derive(Debug, Clone, Copy)]
struct StandardFormat {
    kind: char,
    lowercase: bool,
    precision: Option<usize>,
}

impl StandardFormat {
    fn parse(format: &str) -> Option<Self> {
        let mut chars = format.chars();
        let first = chars.next()?;
        let kind = first.to_ascii_uppercase();
        if !matches!(kind, 'F' | 'N' | 'D' | 'P' | 'X' | 'E') {
            return None;
        }

        let rest = chars.as_str();
        let precision = if rest.is_empty() {
            None
        } else if rest.len() <= 2 && rest.bytes().all(|b| b.is_ascii_digit()) {
            rest.parse().ok()
        } else {
            return None;
        };

        Some(Self {
            kind,
            lowercase: first.is_ascii_lowercase(),
            precision,
        })
    }

    fn apply(self, value: Number, culture: Culture) -> String {
        if let Number::Float(f) = value
            && !f.is_finite()
        {
            return plain(value, culture);
        }

        match self.kind {
            'F' => fixed(value, self.precision.unwrap_or(2), false, culture),
            'N' => fixed(value, self.precision.unwrap_or(2), true, culture),
            'D' => match value {
                Number::Integer(i) => {
                    let digits = pad_left(&i.unsigned_abs().to_string(), self.precision.unwrap_or(0));
                    if i < 0 { format!("-{digits}") } else { digits }
                }
                Number::Float(_) => plain(value, culture),
            },
            'P' => {
                let scaled = Number::Float(value.as_f64() * 100.0);
                let mut out = fixed(scaled, self.precision.unwrap_or(2), true, culture);
                out.push_str(culture.percent_suffix());
                out
            }
            'X' => match value {
                Number::Integer(i) => {
                    // Negatives use 64-bit two's complement when they fit.
                    let hex = match i64::try_from(i) {
                        Ok(narrow) => format!("{narrow:X}"),
                        Err(_) => format!("{i:X}"),
                    };
                    let hex = if self.lowercase { hex.to_lowercase() } else { hex };
                    pad_left(&hex, self.precision.unwrap_or(0))
                }
                Number::Float(_) => plain(value, culture),
            },
            _ => scientific(
                value.as_f64(),
                self.precision.unwrap_or(6),
                !self.lowercase,
                culture,
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CustomPattern {
    grouping: bool,
    min_integer: usize,
    min_fraction: usize,
    max_fraction: usize,
    percent: bool,
}

impl CustomPattern {
    fn parse(pattern: &str) -> Option<Self> {
        if !pattern.chars().all(|c| matches!(c, '0' | '#' | ',' | '.' | '%')) {
            return None;
        }
        if !pattern.chars().any(|c| c == '0' || c == '#') {
            return None;
        }

        let (integer, fraction) = pattern.split_once('.').unwrap_or((pattern, ""));
        let count = |s: &str, c: char| s.chars().filter(|x| *x == c).count();

        Some(Self {
            grouping: integer.contains(','),
            min_integer: count(integer, '0'),
            min_fraction: count(fraction, '0'),
            max_fraction: count(fraction, '0') + count(fraction, '#'),
            percent: pattern.contains('%'),
        })
    }

    fn apply(self, value: Number, culture: Culture) -> String {
        let mut number = value.as_f64();
        if !number.is_finite() {
            return plain(value, culture);
        }
        if self.percent {
            number *= 100.0;
        }

        let rendered = format!("{:.*}", self.max_fraction, number.abs());
        let (integer, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));

        let mut fraction = fraction.to_string();
        while fraction.len() > self.min_fraction && fraction.ends_with('0') {
            fraction.pop();
        }

        let integer = if integer == "0" && self.min_integer == 0 {
            String::new()
        } else {
            pad_left(integer, self.min_integer)
        };

        let negative = number < 0.0 && has_nonzero_digit(&integer, &fraction);
        let mut out = compose(negative, &integer, &fraction, self.grouping, culture);
        if self.percent {
            out.push('%');
        }
        out
    }
}

fn fixed(value: Number, decimals: usize, grouping: bool, culture: Culture) -> String {
    match value {
        Number::Integer(i) => compose(
            i < 0,
            &i.unsigned_abs().to_string(),
            &"0".repeat(decimals),
            grouping,
            culture,
        ),
        Number::Float(f) => {
            let rendered = format!("{:.*}", decimals, f.abs());
            let (integer, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
            let negative = f < 0.0 && has_nonzero_digit(integer, fraction);
            compose(negative, integer, fraction, grouping, culture)
        }
    }
}

fn scientific(value: f64, precision: usize, upper: bool, culture: Culture) -> String {
    let rendered = format!("{:.*e}", precision, value);
    let (mantissa, exponent) = rendered.split_once('e').unwrap_or((rendered.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let mantissa = mantissa.replace('.', &culture.decimal_separator().to_string());
    let sign = if exponent < 0 { '-' } else { '+' };
    let marker = if upper { 'E' } else { 'e' };
    format!("{mantissa}{marker}{sign}{:03}", exponent.unsigned_abs())
}

fn compose(negative: bool, integer: &str, fraction: &str, grouping: bool, culture: Culture) -> String {
    let mut out = String::with_capacity(integer.len() + fraction.len() + 4);
    if negative {
        out.push('-');
    }
    if grouping {
        out.push_str(&group_digits(integer, culture.group_separator()));
    } else {
        out.push_str(integer);
    }
    if !fraction.is_empty() {
        out.push(culture.decimal_separator());
        out.push_str(fraction);
    }
    out
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

fn pad_left(digits: &str, width: usize) -> String {
    if digits.len() >= width {
        digits.to_string()
    } else {
        format!("{}{digits}", "0".repeat(width - digits.len()))
    }
}

fn has_nonzero_digit(integer: &str, fraction: &str) -> bool {
    integer
        .bytes()
        .chain(fraction.bytes())
        .any(|b| b.is_ascii_digit() && b != b'0')
}

// ============================================================================
// TESTS
// ============================================================================
