//! Configuration and programmer errors.
//!
//! Failures of the validated data never appear here: they are collected in
//! an [`ErrorsCollection`](crate::foundation::ErrorsCollection). A
//! [`ValidatorError`] means the validation setup itself is wrong and the
//! call was aborted.

use verity_message::TranslationError;

use crate::foundation::{Command, RuleKind};

/// A fatal validation setup error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidatorError {
    /// A command was applied more than once to one chain.
    #[error("command '{command}' is applied more than once in scope '{scope}'")]
    DuplicateCommand {
        /// The repeated command.
        command: Command,
        /// Scope that owns the chain.
        scope: String,
    },

    /// A command was applied to a chain that cannot honour it.
    #[error("command '{command}' is not supported in scope '{scope}'")]
    CommandNotSupported {
        /// The rejected command.
        command: Command,
        /// Scope that owns the chain.
        scope: String,
    },

    /// A nullable chain contains a rule other than `Valid`/`ValidRelative`.
    #[error("rule '{rule}' is not allowed inside the nullable chain of scope '{scope}'")]
    DisallowedNullableRule {
        /// Kind of the rejected rule.
        rule: RuleKind,
        /// Scope that owns the chain.
        scope: String,
    },

    /// A collection-item or nullable chain tried to rename its member.
    #[error("nested chain in scope '{scope}' must not override the member name")]
    NestedChainRenamed {
        /// Scope that owns the chain.
        scope: String,
    },

    /// A member scope was declared or renamed with an empty name.
    #[error("member name must not be empty")]
    EmptyMemberName,

    /// No specification is registered for a model type.
    #[error("no specification is registered for type '{type_name}'")]
    SpecificationNotFound {
        /// Name of the model type.
        type_name: &'static str,
    },

    /// The walk went deeper than the configured maximum.
    #[error("maximum validation depth of {max_depth} exceeded")]
    MaxDepthExceeded {
        /// Configured maximum depth.
        max_depth: usize,
    },

    /// A null root model under the `fail` null-root policy.
    #[error("model of type '{type_name}' is null")]
    NullModel {
        /// Name of the model type.
        type_name: &'static str,
    },

    /// Validation options failed to load or are out of range.
    #[error("invalid validation options: {message}")]
    InvalidOptions {
        /// Description of the problem.
        message: String,
    },

    /// A translation could not be registered or found.
    #[error(transparent)]
    Translation(#[from] TranslationError),
}

/// Result type for validation setup and execution.
pub type ValidatorResult<T> = Result<T, ValidatorError>;
