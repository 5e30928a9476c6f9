//! Enumeration argument.

use super::{ArgParameters, MessageArg};

/// An enum variant. Accepts `format`:
///
/// - `G` (default): the variant name
/// - `D`: the discriminant
/// - `X`: the discriminant as hex, 8 digits (16 when it does not fit `i32`)
/// - `F`: `Type.Variant`
///
/// ```text
/// {status}            -> Archived
/// {status|format=D}   -> 3
/// {status|format=X}   -> 00000003
/// {status|format=F}   -> Status.Archived
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumArg {
    name: String,
    type_name: String,
    variant: String,
    discriminant: i64,
}

impl EnumArg {
    /// Creates an enum argument from its parts.
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        variant: impl Into<String>,
        discriminant: i64,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            variant: variant.into(),
            discriminant,
        }
    }

    /// The variant name.
    #[must_use]
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// The enum type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The discriminant value.
    #[must_use]
    pub fn discriminant(&self) -> i64 {
        self.discriminant
    }

    fn hex(&self) -> String {
        match i32::try_from(self.discriminant) {
            Ok(narrow) => format!("{narrow:08X}"),
            Err(_) => format!("{:016X}", self.discriminant),
        }
    }
}

impl MessageArg for EnumArg {
    fn name(&self) -> &str {
        &self.name
    }

    fn allowed_parameters(&self) -> &'static [&'static str] {
        &["format"]
    }

    fn render(&self, parameters: ArgParameters<'_>) -> String {
        match parameters.get("format").map(str::trim) {
            Some("D" | "d") => self.discriminant.to_string(),
            Some("X" | "x") => self.hex(),
            Some("F" | "f") => format!("{}.{}", self.type_name, self.variant),
            _ => self.variant.clone(),
        }
    }
}
