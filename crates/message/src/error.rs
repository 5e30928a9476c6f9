//! Error types for translation setup.

/// Errors raised while registering or loading translations.
///
/// These are configuration mistakes. Rendering itself never fails: unknown
/// phrases and unresolvable placeholders fall back to the raw text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TranslationError {
    /// A translation was created with an empty or blank name.
    #[error("translation name must not be empty")]
    EmptyName,

    /// A translation with the same name is already registered.
    #[error("translation '{name}' is already registered")]
    DuplicateTranslation {
        /// Name of the rejected translation.
        name: String,
    },

    /// The requested translation does not exist.
    #[error("translation '{name}' is not registered")]
    UnknownTranslation {
        /// Name that was looked up.
        name: String,
    },

    /// A phrase dictionary could not be loaded.
    #[error("invalid phrase dictionary for translation '{name}': {message}")]
    InvalidDictionary {
        /// Name of the translation being loaded.
        name: String,
        /// Description of the problem.
        message: String,
    },
}

/// Result type for translation operations.
pub type TranslationResult<T> = Result<T, TranslationError>;
