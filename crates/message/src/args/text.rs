//! Text argument.

use super::{ArgParameters, MessageArg};

/// A text value. Accepts `case=upper|lower`; anything else renders the
/// value unchanged.
///
/// ```text
/// {name}              -> Alice
/// {name|case=upper}   -> ALICE
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextArg {
    name: String,
    value: String,
}

impl TextArg {
    /// Creates a text argument.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The raw value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl MessageArg for TextArg {
    fn name(&self) -> &str {
        &self.name
    }

    fn allowed_parameters(&self) -> &'static [&'static str] {
        &["case"]
    }

    fn render(&self, parameters: ArgParameters<'_>) -> String {
        match parameters.get("case") {
            Some("upper") => self.value.to_uppercase(),
            Some("lower") => self.value.to_lowercase(),
            _ => self.value.clone(),
        }
    }
}
