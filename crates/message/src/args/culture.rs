//! Cultures used by number and time arguments.

/// Formatting culture selected with the `culture` placeholder parameter.
///
/// Only separators and the general date-time pattern vary between
/// cultures. Unknown culture tags fall back to [`Culture::Invariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Culture {
    /// Culture-neutral formatting (default).
    #[default]
    Invariant,
    /// English (United States).
    EnUs,
    /// English (United Kingdom).
    EnGb,
    /// Polish.
    PlPl,
    /// German.
    DeDe,
    /// French.
    FrFr,
}

impl Culture {
    /// Parses a culture tag such as `en-US` or `pl_pl` (case-insensitive).
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        let normalized = tag.trim().replace('_', "-").to_ascii_lowercase();
        match normalized.as_str() {
            "" | "invariant" => Some(Self::Invariant),
            "en-us" | "en" => Some(Self::EnUs),
            "en-gb" => Some(Self::EnGb),
            "pl-pl" | "pl" => Some(Self::PlPl),
            "de-de" | "de" => Some(Self::DeDe),
            "fr-fr" | "fr" => Some(Self::FrFr),
            _ => None,
        }
    }

    /// Resolves an optional `culture` parameter value.
    #[must_use]
    pub fn from_parameter(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }

    /// Canonical tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Invariant => "invariant",
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
            Self::PlPl => "pl-PL",
            Self::DeDe => "de-DE",
            Self::FrFr => "fr-FR",
        }
    }

    /// Decimal separator.
    #[must_use]
    pub const fn decimal_separator(self) -> char {
        match self {
            Self::Invariant | Self::EnUs | Self::EnGb => '.',
            Self::PlPl | Self::DeDe | Self::FrFr => ',',
        }
    }

    /// Digit group separator.
    #[must_use]
    pub const fn group_separator(self) -> char {
        match self {
            Self::Invariant | Self::EnUs | Self::EnGb => ',',
            Self::DeDe => '.',
            Self::PlPl | Self::FrFr => '\u{a0}',
        }
    }

    /// Suffix appended by the `P` (percent) number format.
    #[must_use]
    pub const fn percent_suffix(self) -> &'static str {
        match self {
            Self::EnUs | Self::EnGb => "%",
            Self::Invariant | Self::PlPl | Self::DeDe | Self::FrFr => " %",
        }
    }

    /// General date-time pattern (`strftime` syntax).
    #[must_use]
    pub const fn date_time_pattern(self) -> &'static str {
        match self {
            Self::Invariant => "%m/%d/%Y %H:%M:%S",
            Self::EnUs => "%-m/%-d/%Y %-I:%M:%S %p",
            Self::EnGb | Self::FrFr => "%d/%m/%Y %H:%M:%S",
            Self::PlPl | Self::DeDe => "%d.%m.%Y %H:%M:%S",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("en-US", Culture::EnUs)]
    #[case("EN-us", Culture::EnUs)]
    #[case("pl_PL", Culture::PlPl)]
    #[case("de", Culture::DeDe)]
    #[case("invariant", Culture::Invariant)]
    fn test_parse(#[case] tag: &str, #[case] expected: Culture) {
        assert_eq!(Culture::parse(tag), Some(expected));
    }

    #[test]
    fn test_unknown_falls_back_to_invariant() {
        assert_eq!(Culture::parse("xx-YY"), None);
        assert_eq!(Culture::from_parameter(Some("xx-YY")), Culture::Invariant);
        assert_eq!(Culture::from_parameter(None), Culture::Invariant);
    }
}
