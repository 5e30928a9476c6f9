//! Message template parsing and rendering
//!
//! A template is plain text with `{name}` or `{name|key=value,key=value}`
//! placeholders. Parsing never fails: anything that is not a well-formed
//! placeholder stays in the output as literal text.
//!
//! A comma-separated segment without `=` continues the previous value, so
//! number patterns such as `{amount|format=#,##0.00}` keep their commas.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::args::{ArgParameters, MessageArg};

/// A template part - either literal text or a placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    /// Literal text copied to the output.
    Static(Arc<str>),
    /// A placeholder resolved against message arguments.
    Placeholder(Placeholder),
}

/// A parsed `{name|parameters}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The placeholder exactly as written, braces included.
    raw: Arc<str>,
    name: Arc<str>,
    parameters: Vec<(String, String)>,
}

impl Placeholder {
    /// Argument name referenced by the placeholder.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The source text of the placeholder, braces included.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parsed parameters.
    #[must_use]
    pub fn parameters(&self) -> ArgParameters<'_> {
        ArgParameters::new(&self.parameters)
    }

    /// Parses the text between braces. Returns `None` when malformed.
    fn parse(inner: &str) -> Option<Self> {
        let (name, parameters) = match inner.split_once('|') {
            Some((name, rest)) => (name.trim(), Some(rest)),
            None => (inner.trim(), None),
        };

        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.')
        {
            return None;
        }

        let parameters = match parameters {
            Some(rest) => parse_parameters(rest)?,
            None => Vec::new(),
        };

        Some(Self {
            raw: Arc::from(format!("{{{inner}}}")),
            name: Arc::from(name),
            parameters,
        })
    }

    fn render(&self, args: &[Arc<dyn MessageArg>]) -> Option<String> {
        let arg = args.iter().find(|arg| arg.name() == &*self.name)?;
        let parameters = self.parameters();
        if !parameters.accepted_by(arg.allowed_parameters()) {
            trace!(
                placeholder = &*self.raw,
                "Placeholder carries parameters the argument does not accept"
            );
            return None;
        }
        Some(arg.render(parameters))
    }
}

fn parse_parameters(source: &str) -> Option<Vec<(String, String)>> {
    let mut pairs: Vec<(String, String)> = Vec::new();

    for segment in source.split(',') {
        match segment.split_once('=') {
            Some((key, value)) => {
                let key = key.trim();
                if key.is_empty() {
                    return None;
                }
                pairs.push((key.to_string(), value.to_string()));
            }
            None => {
                let (_, value) = pairs.last_mut()?;
                value.push(',');
                value.push_str(segment);
            }
        }
    }

    Some(pairs)
}

// ============================================================================
// TEMPLATE
// ============================================================================

/// A parsed message template.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use verity_message::{MessageArg, NumberArg, Template};
///
/// let template = Template::parse("Must be at least {min|format=N1}");
/// let args: Vec<Arc<dyn MessageArg>> = vec![Arc::new(NumberArg::new("min", 1500))];
/// assert_eq!(template.render(&args), "Must be at least 1,500.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: Arc<str>,
    parts: Vec<TemplatePart>,
}

impl Template {
    /// Parses a template. Malformed placeholders are kept as literal text.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let placeholder = after
                .find(['{', '}'])
                .filter(|&close| after.as_bytes()[close] == b'}')
                .and_then(|close| Placeholder::parse(&after[..close]).map(|p| (p, close)));

            match placeholder {
                Some((placeholder, close)) => {
                    if !literal.is_empty() {
                        parts.push(TemplatePart::Static(Arc::from(std::mem::take(&mut literal))));
                    }
                    parts.push(TemplatePart::Placeholder(placeholder));
                    rest = &after[close + 1..];
                }
                None => {
                    literal.push('{');
                    rest = after;
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            parts.push(TemplatePart::Static(Arc::from(literal)));
        }

        Self {
            source: Arc::from(source),
            parts,
        }
    }

    /// The original source string.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed parts.
    #[must_use]
    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    /// Iterates over placeholders in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.parts.iter().filter_map(|part| match part {
            TemplatePart::Placeholder(p) => Some(p),
            TemplatePart::Static(_) => None,
        })
    }

    /// Renders the template with the given arguments.
    ///
    /// A placeholder stays as written when no argument has its name or
    /// when it carries a parameter the argument does not accept.
    #[must_use]
    pub fn render(&self, args: &[Arc<dyn MessageArg>]) -> String {
        let mut result = String::with_capacity(self.source.len());

        for part in &self.parts {
            match part {
                TemplatePart::Static(text) => result.push_str(text),
                TemplatePart::Placeholder(placeholder) => match placeholder.render(args) {
                    Some(rendered) => result.push_str(&rendered),
                    None => result.push_str(placeholder.raw()),
                },
            }
        }

        result
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{NumberArg, TextArg};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn args() -> Vec<Arc<dyn MessageArg>> {
        vec![
            Arc::new(NumberArg::new("min", 1234.5)),
            Arc::new(TextArg::new("name", "Alice")),
        ]
    }

    #[test]
    fn test_parse_parts() {
        let template = Template::parse("Hi {name|case=upper}!");
        assert_eq!(template.parts().len(), 3);
        let placeholder = template.placeholders().next().expect("one placeholder");
        assert_eq!(placeholder.name(), "name");
        assert_eq!(placeholder.parameters().get("case"), Some("upper"));
        assert_eq!(placeholder.raw(), "{name|case=upper}");
    }

    #[test]
    fn test_comma_continues_previous_value() {
        let template = Template::parse("{min|format=#,##0.00,culture=de-DE}");
        let placeholder = template.placeholders().next().expect("one placeholder");
        assert_eq!(placeholder.parameters().get("format"), Some("#,##0.00"));
        assert_eq!(placeholder.parameters().get("culture"), Some("de-DE"));
    }

    #[rstest]
    #[case("At least {min} chars", "At least 1234.5 chars")]
    #[case("{min|format=N2}", "1,234.50")]
    #[case("{min|format=#,##0.00}", "1,234.50")]
    #[case("Hello {name|case=lower}", "Hello alice")]
    #[case("{unknown} stays", "{unknown} stays")]
    #[case("{name|format=N2}", "{name|format=N2}")]
    #[case("{} and { name", "{} and { name")]
    #[case("{min|oops}", "{min|oops}")]
    #[case("{{name}}", "{Alice}")]
    #[case("no placeholders", "no placeholders")]
    #[case("", "")]
    fn test_render(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(Template::parse(source).render(&args()), expected);
    }

    #[test]
    fn test_display_is_source() {
        let template = Template::parse("{min|format=N2} left");
        assert_eq!(template.to_string(), "{min|format=N2} left");
    }
}
