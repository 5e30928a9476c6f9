//! # verity-message
//!
//! Validation error messages for the Verity validation engine.
//!
//! A [`ValidationError`] is an immutable message template plus an ordered set
//! of named, typed arguments. Templates reference arguments through
//! placeholders:
//!
//! ```text
//! Text value should have minimum {min} characters
//! Must be after {date|format=%Y-%m-%d}
//! Allowed range is {min|format=N2,culture=pl-PL} to {max|format=N2,culture=pl-PL}
//! ```
//!
//! Rendering goes through a [`Translator`]: the template is first looked up
//! as a phrase key in the selected [`Translation`], and falls back to the
//! template itself when no phrase exists. Placeholders are then resolved
//! against the error's arguments, each argument type applying its own
//! formatting parameters.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use verity_message::prelude::*;
//!
//! let error = ValidationError::new("Texts.MinLength").with_arg(NumberArg::new("min", 6));
//!
//! let mut translators = TranslatorsRepository::new();
//! translators.add(Translation::new(
//!     "English",
//!     [("Texts.MinLength", "Text value should have minimum {min} characters")],
//! )?)?;
//!
//! let english = translators.translator("English").unwrap();
//! assert_eq!(english.render(&error), "Text value should have minimum 6 characters");
//!
//! // No translation selected: the template renders as written.
//! assert_eq!(translators.default_translator().render(&error), "Texts.MinLength");
//! ```

pub mod args;
mod error;
mod message;
pub mod template;
mod translation;

pub use args::{
    ArgParameters, Culture, DurationArg, EnumArg, MessageArg, Number, NumberArg, TextArg, TimeArg,
};
pub use error::{TranslationError, TranslationResult};
pub use message::ValidationError;
pub use template::{Placeholder, Template, TemplatePart};
pub use translation::{Translation, Translator, TranslatorsRepository};

/// Common imports for building and rendering messages.
pub mod prelude {
    pub use crate::{
        ArgParameters, Culture, DurationArg, EnumArg, MessageArg, Number, NumberArg, TextArg,
        TimeArg, Translation, TranslationError, Translator, TranslatorsRepository,
        ValidationError,
    };
}
