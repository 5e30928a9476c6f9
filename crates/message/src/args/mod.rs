//! Typed message arguments
//!
//! Every argument attached to a [`ValidationError`](crate::ValidationError)
//! implements [`MessageArg`]: it has a name, declares the placeholder
//! parameters it understands, and renders itself from those parameters.
//!
//! | Argument        | Parameters            |
//! |-----------------|-----------------------|
//! | [`TextArg`]     | `case`                |
//! | [`NumberArg`]   | `format`, `culture`   |
//! | [`TimeArg`]     | `format`, `culture`   |
//! | [`DurationArg`] | `format`, `culture`   |
//! | [`EnumArg`]     | `format`              |

mod culture;
mod enumeration;
mod number;
mod text;
mod time;

pub use culture::Culture;
pub use enumeration::EnumArg;
pub use number::{Number, NumberArg};
pub use text::TextArg;
pub use time::{DurationArg, TimeArg};

use std::fmt;

// ============================================================================
// MESSAGE ARG TRAIT
// ============================================================================

/// A named, typed value that can be substituted into a message template.
///
/// # Examples
///
/// ```rust,ignore
/// use verity_message::{ArgParameters, MessageArg};
///
/// #[derive(Debug)]
/// struct Flag { name: String, value: bool }
///
/// impl MessageArg for Flag {
///     fn name(&self) -> &str { &self.name }
///     fn allowed_parameters(&self) -> &'static [&'static str] { &["style"] }
///     fn render(&self, parameters: ArgParameters<'_>) -> String {
///         match (parameters.get("style"), self.value) {
///             (Some("yesno"), true) => "yes".into(),
///             (Some("yesno"), false) => "no".into(),
///             (_, value) => value.to_string(),
///         }
///     }
/// }
/// ```
pub trait MessageArg: fmt::Debug + Send + Sync {
    /// The placeholder name this argument answers to.
    fn name(&self) -> &str;

    /// Parameter names accepted inside `{name|param=value}`.
    ///
    /// A placeholder carrying any other parameter is left unresolved.
    fn allowed_parameters(&self) -> &'static [&'static str];

    /// Renders the value using the parsed placeholder parameters.
    fn render(&self, parameters: ArgParameters<'_>) -> String;
}

// ============================================================================
// ARG PARAMETERS
// ============================================================================

/// Parameters parsed from a placeholder, in declaration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgParameters<'a> {
    pairs: &'a [(String, String)],
}

impl<'a> ArgParameters<'a> {
    /// Wraps parsed `(key, value)` pairs.
    #[must_use]
    pub fn new(pairs: &'a [(String, String)]) -> Self {
        Self { pairs }
    }

    /// No parameters, as for a bare `{name}` placeholder.
    #[must_use]
    pub fn empty() -> ArgParameters<'static> {
        ArgParameters { pairs: &[] }
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over parameter keys.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    /// Returns true if no parameters were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns true if every key is accepted by `allowed`.
    #[must_use]
    pub fn accepted_by(&self, allowed: &[&str]) -> bool {
        self.keys().all(|key| allowed.contains(&key))
    }
}
