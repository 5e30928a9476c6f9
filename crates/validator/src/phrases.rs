//! Built-in English phrases
//!
//! Covers the global required/default errors and every built-in rule in
//! [`validators`](crate::validators).

use verity_message::{Translation, TranslationResult};

/// Name of the built-in English translation.
pub const ENGLISH: &str = "English";

/// Phrase key → template pairs of the English translation.
pub const ENGLISH_PHRASES: &[(&str, &str)] = &[
    ("Global.Required", "Required"),
    ("Global.Error", "Error"),
    ("Texts.NotEmpty", "Text value should not be empty"),
    ("Texts.NotWhiteSpace", "Text value should not consist of white spaces only"),
    ("Texts.MinLength", "Text value should have minimum {min} characters"),
    ("Texts.MaxLength", "Text value should have maximum {max} characters"),
    ("Texts.ExactLength", "Text value should have exactly {length} characters"),
    (
        "Texts.LengthBetween",
        "Text value should have between {min} and {max} characters",
    ),
    ("Texts.Matches", "Text value should match the pattern {pattern}"),
    ("Texts.Contains", "Text value should contain {value}"),
    ("Numbers.Min", "Number should be greater than or equal to {min}"),
    ("Numbers.Max", "Number should be less than or equal to {max}"),
    ("Numbers.Between", "Number should be between {min} and {max}"),
    ("Collections.MinItems", "Collection should have minimum {min} items"),
    ("Collections.MaxItems", "Collection should have maximum {max} items"),
    ("Collections.NotEmpty", "Collection should not be empty"),
    ("Booleans.True", "Value should be true"),
    ("Booleans.False", "Value should be false"),
];

/// Builds the English translation.
///
/// # Errors
///
/// Never fails for the built-in catalog; the result type follows
/// [`Translation::new`].
pub fn english() -> TranslationResult<Translation> {
    Translation::new(ENGLISH, ENGLISH_PHRASES.iter().copied())
}
