//! Text validators
//!
//! Length is measured in Unicode scalar values (chars), not bytes.

use regex::Regex;
use verity_message::{NumberArg, TextArg, ValidationError};

use crate::foundation::{ValidRule, valid};

#[inline]
fn char_count<V: AsRef<str> + ?Sized>(value: &V) -> usize {
    value.as_ref().chars().count()
}

// ============================================================================
// EMPTINESS
// ============================================================================

/// Text must not be empty.
pub fn not_empty<V>() -> ValidRule<V>
where
    V: AsRef<str> + ?Sized + 'static,
{
    valid(|v: &V| !v.as_ref().is_empty()).with_error("Texts.NotEmpty")
}

/// Text must contain at least one non-whitespace character.
pub fn not_whitespace<V>() -> ValidRule<V>
where
    V: AsRef<str> + ?Sized + 'static,
{
    valid(|v: &V| !v.as_ref().trim().is_empty()).with_error("Texts.NotWhiteSpace")
}

// ============================================================================
// LENGTH
// ============================================================================

/// Text must have at least `min` characters.
///
/// # Examples
///
/// ```rust,ignore
/// let spec = Specification::<User>::builder()
///     .field("Password", |u| u.password.as_str(), Chain::new().rule(min_length(6)))
///     .build()?;
/// ```
pub fn min_length<V>(min: usize) -> ValidRule<V>
where
    V: AsRef<str> + ?Sized + 'static,
{
    valid(move |v: &V| char_count(v) >= min)
        .with_error(ValidationError::new("Texts.MinLength").with_arg(NumberArg::new("min", min)))
}

/// Text must have at most `max` characters.
pub fn max_length<V>(max: usize) -> ValidRule<V>
where
    V: AsRef<str> + ?Sized + 'static,
{
    valid(move |v: &V| char_count(v) <= max)
        .with_error(ValidationError::new("Texts.MaxLength").with_arg(NumberArg::new("max", max)))
}

/// Text must have exactly `length` characters.
pub fn exact_length<V>(length: usize) -> ValidRule<V>
where
    V: AsRef<str> + ?Sized + 'static,
{
    valid(move |v: &V| char_count(v) == length).with_error(
        ValidationError::new("Texts.ExactLength").with_arg(NumberArg::new("length", length)),
    )
}

/// Text must have between `min` and `max` characters, inclusive.
pub fn length_between<V>(min: usize, max: usize) -> ValidRule<V>
where
    V: AsRef<str> + ?Sized + 'static,
{
    valid(move |v: &V| (min..=max).contains(&char_count(v))).with_error(
        ValidationError::new("Texts.LengthBetween")
            .with_arg(NumberArg::new("min", min))
            .with_arg(NumberArg::new("max", max)),
    )
}

// ============================================================================
// CONTENT
// ============================================================================

/// Text must match `pattern` somewhere; anchor the pattern to match the
/// whole value.
pub fn matches<V>(pattern: Regex) -> ValidRule<V>
where
    V: AsRef<str> + ?Sized + 'static,
{
    let error =
        ValidationError::new("Texts.Matches").with_arg(TextArg::new("pattern", pattern.as_str()));
    valid(move |v: &V| pattern.is_match(v.as_ref())).with_error(error)
}

/// Text must contain `needle`.
pub fn contains<V>(needle: impl Into<String>) -> ValidRule<V>
where
    V: AsRef<str> + ?Sized + 'static,
{
    let needle = needle.into();
    let error = ValidationError::new("Texts.Contains").with_arg(TextArg::new("value", &*needle));
    valid(move |v: &V| v.as_ref().contains(needle.as_str())).with_error(error)
}
