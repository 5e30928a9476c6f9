//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use verity_validator::prelude::*;
//! ```

// ============================================================================
// FOUNDATION
// ============================================================================

pub use crate::foundation::{
    Chain, Command, ErrorsCollection, NullRootPolicy, Rule, Specification, SpecificationRegistry,
    ValidationOptions, ValidationOverrides, ValidationResult, ValidationStrategy, relative, valid,
};

// ============================================================================
// COMBINATORS AND VALIDATORS
// ============================================================================

pub use crate::combinators::{Items, each, each_nullable, model, nullable, registered_model};
pub use crate::validators::{
    between, contains, exact_length, is_false, is_true, length_between, matches, max, max_items,
    max_length, min, min_items, min_length, not_empty, not_empty_collection, not_whitespace,
};

// ============================================================================
// CONTEXT, ERRORS AND MESSAGES
// ============================================================================

pub use crate::context::{ValidationContext, ValidationContextBuilder};
pub use crate::error::{ValidatorError, ValidatorResult};
pub use verity_message::{
    NumberArg, TextArg, TimeArg, Translation, Translator, TranslatorsRepository, ValidationError,
};
