//! The outcome of a validation call.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use verity_message::Translator;

use crate::error::ValidatorResult;
use crate::foundation::{ErrorsCollection, ValidationStrategy};
use crate::report::{self, ListReport};

/// Errors found for one model, plus when and where they were produced.
///
/// # Examples
///
/// ```rust,ignore
/// let result = context.validate(Some(&user))?;
/// if !result.is_valid() {
///     let english = context.translator("English")?;
///     println!("{}", result.list(english)?);
/// }
/// ```
#[derive(Debug)]
pub struct ValidationResult<'a, M> {
    model: Option<&'a M>,
    errors: ErrorsCollection,
    strategy: ValidationStrategy,
    max_depth: usize,
    timestamp: DateTime<Utc>,
    context_id: Uuid,
    merged: bool,
}

impl<M> Clone for ValidationResult<'_, M> {
    fn clone(&self) -> Self {
        Self {
            model: self.model,
            errors: self.errors.clone(),
            strategy: self.strategy,
            max_depth: self.max_depth,
            timestamp: self.timestamp,
            context_id: self.context_id,
            merged: self.merged,
        }
    }
}

impl<'a, M> ValidationResult<'a, M> {
    pub(crate) fn new(
        model: Option<&'a M>,
        errors: ErrorsCollection,
        strategy: ValidationStrategy,
        max_depth: usize,
        context_id: Uuid,
    ) -> Self {
        Self {
            model,
            errors,
            strategy,
            max_depth,
            timestamp: Utc::now(),
            context_id,
            merged: false,
        }
    }

    /// The validated model.
    #[must_use]
    pub fn model(&self) -> Option<&'a M> {
        self.model
    }

    /// The error tree.
    #[must_use]
    pub fn errors(&self) -> &ErrorsCollection {
        &self.errors
    }

    /// Takes the error tree.
    #[must_use]
    pub fn into_errors(self) -> ErrorsCollection {
        self.errors
    }

    /// Returns true if no errors were found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Strategy the walk used.
    #[must_use]
    pub fn strategy(&self) -> ValidationStrategy {
        self.strategy
    }

    /// When the result was produced.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Identifier of the producing context.
    #[must_use]
    pub fn context_id(&self) -> Uuid {
        self.context_id
    }

    /// Returns true if this result came from [`merge`](Self::merge).
    #[must_use]
    pub fn is_merged(&self) -> bool {
        self.merged
    }

    /// Combines two results for the same model into a new, merged result.
    ///
    /// Keeps this result's model, strategy and context; the depth limit is
    /// the larger of the two.
    #[must_use]
    pub fn merge(&self, other: &ValidationResult<'_, M>) -> Self {
        Self {
            model: self.model,
            errors: ErrorsCollection::merge([&self.errors, &other.errors]),
            strategy: self.strategy,
            max_depth: self.max_depth.max(other.max_depth),
            timestamp: Utc::now(),
            context_id: self.context_id,
            merged: true,
        }
    }

    /// Flat `path: message` report.
    pub fn list(&self, translator: Translator<'_>) -> ValidatorResult<ListReport> {
        report::list(&self.errors, translator, self.max_depth)
    }

    /// Nested JSON report.
    pub fn tree(&self, translator: Translator<'_>) -> ValidatorResult<serde_json::Value> {
        report::tree(&self.errors, translator, self.max_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_message::ValidationError;

    fn result_with(key: &str, template: &'static str) -> ValidationResult<'static, ()> {
        let mut errors = ErrorsCollection::new();
        errors.add_member_error(key, ValidationError::new(template));
        ValidationResult::new(None, errors, ValidationStrategy::Complete, 10, Uuid::new_v4())
    }

    #[test]
    fn test_fresh_result() {
        let result = ValidationResult::<()>::new(
            None,
            ErrorsCollection::new(),
            ValidationStrategy::Complete,
            10,
            Uuid::nil(),
        );
        assert!(result.is_valid());
        assert!(!result.is_merged());
        assert_eq!(result.context_id(), Uuid::nil());
    }

    #[test]
    fn test_merge_is_tagged_and_keeps_inputs() {
        let a = result_with("Name", "a");
        let b = result_with("Age", "b");

        let merged = a.merge(&b);
        assert!(merged.is_merged());
        assert!(!a.is_merged());
        assert_eq!(merged.context_id(), a.context_id());
        assert_eq!(merged.errors().error_count(), 2);
        assert_eq!(a.errors().error_count(), 1);
    }
}
