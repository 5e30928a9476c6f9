//! The validation error message type.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::args::{ArgParameters, MessageArg};
use crate::template::Template;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A validation error: a message template plus named arguments.
///
/// The template is either a phrase key (`"Texts.MinLength"`) resolved by a
/// [`Translator`](crate::Translator), or a literal message. Argument names
/// are unique; adding an argument whose name is already present replaces
/// the old one in place.
///
/// Errors are cheap to clone: arguments are shared behind `Arc`.
///
/// # Examples
///
/// ```rust,ignore
/// use verity_message::{NumberArg, TextArg, ValidationError};
///
/// let error = ValidationError::new("Must be between {min} and {max}")
///     .with_arg(NumberArg::new("min", 1))
///     .with_arg(NumberArg::new("max", 10));
///
/// assert_eq!(error.to_string(), "Must be between 1 and 10");
/// ```
#[derive(Clone)]
pub struct ValidationError {
    template: Cow<'static, str>,
    /// Typically 0-2 args.
    args: SmallVec<[Arc<dyn MessageArg>; 2]>,
}

impl ValidationError {
    /// Creates an error with a template and no arguments.
    pub fn new(template: impl Into<Cow<'static, str>>) -> Self {
        Self {
            template: template.into(),
            args: SmallVec::new(),
        }
    }

    /// Adds an argument, replacing any argument with the same name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_arg(self, arg: impl MessageArg + 'static) -> Self {
        self.with_shared_arg(Arc::new(arg))
    }

    /// Adds an already shared argument, replacing any with the same name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_shared_arg(mut self, arg: Arc<dyn MessageArg>) -> Self {
        match self.args.iter_mut().find(|a| a.name() == arg.name()) {
            Some(slot) => *slot = arg,
            None => self.args.push(arg),
        }
        self
    }

    /// Returns a copy with a different template and the same arguments.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_template(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.template = template.into();
        self
    }

    /// The template or phrase key.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// All arguments in insertion order.
    #[must_use]
    pub fn args(&self) -> &[Arc<dyn MessageArg>] {
        &self.args
    }

    /// Looks up an argument by name.
    #[must_use]
    pub fn arg(&self, name: &str) -> Option<&dyn MessageArg> {
        self.args
            .iter()
            .find(|a| a.name() == name)
            .map(|a| a.as_ref())
    }

    /// Renders the template itself, without any phrase lookup.
    #[must_use]
    pub fn render_template(&self) -> String {
        Template::parse(&self.template).render(&self.args)
    }
}

impl fmt::Debug for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ValidationError");
        s.field("template", &self.template);
        if !self.args.is_empty() {
            s.field("args", &self.args.as_slice());
        }
        s.finish()
    }
}

/// Equal when templates match and every argument has the same name and the
/// same default rendering.
impl PartialEq for ValidationError {
    fn eq(&self, other: &Self) -> bool {
        self.template == other.template
            && self.args.len() == other.args.len()
            && self.args.iter().zip(other.args.iter()).all(|(a, b)| {
                a.name() == b.name()
                    && a.render(ArgParameters::empty()) == b.render(ArgParameters::empty())
            })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_template())
    }
}

impl From<&'static str> for ValidationError {
    fn from(template: &'static str) -> Self {
        Self::new(template)
    }
}

impl From<String> for ValidationError {
    fn from(template: String) -> Self {
        Self::new(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{NumberArg, TextArg};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_has_no_args() {
        let error = ValidationError::new("Global.Error");
        assert_eq!(error.template(), "Global.Error");
        assert!(error.args().is_empty());
    }

    #[test]
    fn test_duplicate_arg_replaces_in_place() {
        let error = ValidationError::new("{a} {b}")
            .with_arg(TextArg::new("a", "first"))
            .with_arg(TextArg::new("b", "second"))
            .with_arg(TextArg::new("a", "third"));

        assert_eq!(error.args().len(), 2);
        assert_eq!(error.args()[0].name(), "a");
        assert_eq!(error.to_string(), "third second");
    }

    #[test]
    fn test_with_template_keeps_args() {
        let error = ValidationError::new("Texts.MinLength")
            .with_arg(NumberArg::new("min", 3))
            .with_template("At least {min}");
        assert_eq!(error.to_string(), "At least 3");
        assert!(error.arg("min").is_some());
        assert!(error.arg("max").is_none());
    }

    #[test]
    fn test_equality_uses_rendered_args() {
        let a = ValidationError::new("x").with_arg(NumberArg::new("n", 1));
        let b = ValidationError::new("x").with_arg(NumberArg::new("n", 1u8));
        let c = ValidationError::new("x").with_arg(NumberArg::new("n", 2));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, ValidationError::new("x"));
    }

    #[test]
    fn test_debug_lists_template() {
        let debug = format!("{:?}", ValidationError::new("Global.Required"));
        assert!(debug.contains("Global.Required"));
    }
}
