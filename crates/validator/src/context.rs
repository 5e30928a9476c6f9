//! The validation entry point.
//!
//! A [`ValidationContext`] owns everything a validation needs: the
//! specification registry, the translations and the options. Build one
//! with [`ValidationContext::builder`], then validate any registered model
//! type as often as needed, from any thread.

use std::any::type_name;

use tracing::debug;
use uuid::Uuid;
use verity_message::{Translation, TranslationError, Translator, TranslatorsRepository};

use crate::error::ValidatorResult;
use crate::executor;
use crate::foundation::{
    ExecutionContext, Specification, SpecificationRegistry, ValidationOptions, ValidationOverrides,
    ValidationResult, ValidationStrategy,
};
use crate::phrases;

// ============================================================================
// VALIDATION CONTEXT
// ============================================================================

/// Registered specifications, translations and options.
///
/// # Examples
///
/// ```rust,ignore
/// let context = ValidationContext::builder()
///     .specification(user_specification()?)
///     .build()?;
///
/// let result = context.validate(Some(&user))?;
/// if !result.is_valid() {
///     println!("{}", result.list(context.translator("English")?)?);
/// }
/// ```
#[derive(Debug)]
pub struct ValidationContext {
    id: Uuid,
    registry: SpecificationRegistry,
    translators: TranslatorsRepository,
    options: ValidationOptions,
}

impl ValidationContext {
    /// Starts building a context.
    #[must_use]
    pub fn builder() -> ValidationContextBuilder {
        ValidationContextBuilder::new()
    }

    /// Identifier stamped on every result of this context.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Default options.
    #[must_use]
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// The specification registry.
    #[must_use]
    pub fn registry(&self) -> &SpecificationRegistry {
        &self.registry
    }

    /// The translations.
    #[must_use]
    pub fn translators(&self) -> &TranslatorsRepository {
        &self.translators
    }

    /// Translator for a registered translation.
    ///
    /// # Errors
    ///
    /// [`TranslationError::UnknownTranslation`] if `name` is not registered.
    pub fn translator(&self, name: &str) -> ValidatorResult<Translator<'_>> {
        self.translators.translator(name).ok_or_else(|| {
            TranslationError::UnknownTranslation {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Translator that renders templates as written.
    #[must_use]
    pub fn default_translator(&self) -> Translator<'_> {
        self.translators.default_translator()
    }

    /// Validates a model with the default options.
    ///
    /// # Errors
    ///
    /// Configuration failures only: no specification for `M` or a nested
    /// type, depth exceeded, or a `None` model under
    /// [`NullRootPolicy::Fail`](crate::foundation::NullRootPolicy::Fail).
    pub fn validate<'m, M: 'static>(
        &self,
        model: Option<&'m M>,
    ) -> ValidatorResult<ValidationResult<'m, M>> {
        self.validate_with(model, ValidationOverrides::new())
    }

    /// Validates a model with per-call overrides.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn validate_with<'m, M: 'static>(
        &self,
        model: Option<&'m M>,
        overrides: ValidationOverrides,
    ) -> ValidatorResult<ValidationResult<'m, M>> {
        let specification = self.registry.resolve::<M>()?;
        let cx = ExecutionContext::new(&self.options, overrides, &self.registry);
        let errors = executor::execute(&specification, model, &cx, 0)?;

        debug!(
            model = type_name::<M>(),
            strategy = ?cx.strategy(),
            errors = errors.error_count(),
            depth = errors.depth(),
            "Validation completed"
        );

        Ok(ValidationResult::new(
            model,
            errors,
            cx.strategy(),
            cx.max_depth(),
            self.id,
        ))
    }

    /// Every error the specification of `M` can report, without a model.
    ///
    /// Runs the Force strategy: no accessor or predicate is invoked.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn error_surface<M: 'static>(&self) -> ValidatorResult<ValidationResult<'static, M>> {
        self.validate_with(
            None,
            ValidationOverrides::new().strategy(ValidationStrategy::Force),
        )
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for [`ValidationContext`].
///
/// The English translation is registered unless one with the same name is
/// added explicitly.
#[derive(Debug, Default)]
pub struct ValidationContextBuilder {
    options: ValidationOptions,
    registry: SpecificationRegistry,
    translations: Vec<Translation>,
}

impl ValidationContextBuilder {
    /// Creates a builder with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default options.
    #[must_use = "builder methods must be chained or built"]
    pub fn options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    /// Registers a built specification.
    #[must_use = "builder methods must be chained or built"]
    pub fn specification<M: 'static>(mut self, specification: Specification<M>) -> Self {
        self.registry.register(specification);
        self
    }

    /// Registers a specification built on first use.
    #[must_use = "builder methods must be chained or built"]
    pub fn specification_with<M, F>(mut self, factory: F) -> Self
    where
        M: 'static,
        F: Fn() -> ValidatorResult<Specification<M>> + Send + Sync + 'static,
    {
        self.registry.register_with(factory);
        self
    }

    /// Adds a translation.
    #[must_use = "builder methods must be chained or built"]
    pub fn translation(mut self, translation: Translation) -> Self {
        self.translations.push(translation);
        self
    }

    /// Builds the context.
    ///
    /// # Errors
    ///
    /// Invalid options or duplicate translation names.
    pub fn build(self) -> ValidatorResult<ValidationContext> {
        self.options.validate()?;

        let mut translators = TranslatorsRepository::new();
        if !self.translations.iter().any(|t| t.name() == phrases::ENGLISH) {
            translators.add(phrases::english()?)?;
        }
        for translation in self.translations {
            translators.add(translation)?;
        }

        let id = Uuid::new_v4();
        debug!(
            context = %id,
            specifications = self.registry.len(),
            translations = translators.len(),
            "Validation context built"
        );

        Ok(ValidationContext {
            id,
            registry: self.registry,
            translators,
            options: self.options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidatorError;
    use crate::foundation::{Chain, NullRootPolicy};
    use crate::validators::{min, not_empty};

    struct Ticket {
        title: String,
        seats: u32,
    }

    fn ticket_spec() -> ValidatorResult<Specification<Ticket>> {
        Specification::<Ticket>::builder()
            .field("Title", |t| t.title.as_str(), Chain::new().rule(not_empty()))
            .field("Seats", |t| &t.seats, Chain::new().rule(min(1)))
            .build()
    }

    fn context() -> ValidationContext {
        ValidationContext::builder()
            .specification_with(ticket_spec)
            .build()
            .expect("valid context")
    }

    #[test]
    fn test_english_is_registered_by_default() {
        let context = context();
        assert_eq!(context.translators().names().collect::<Vec<_>>(), vec!["English"]);
        assert!(context.translator("English").is_ok());
        assert_eq!(
            context.translator("Klingon").map(|_| ()),
            Err(ValidatorError::Translation(TranslationError::UnknownTranslation {
                name: "Klingon".into()
            }))
        );
    }

    #[test]
    fn test_validate_stamps_result() {
        let context = context();
        let ticket = Ticket {
            title: String::new(),
            seats: 0,
        };
        let result = context.validate(Some(&ticket)).expect("no fatal error");
        assert!(!result.is_valid());
        assert_eq!(result.errors().error_count(), 2);
        assert_eq!(result.context_id(), context.id());
        assert_eq!(result.strategy(), ValidationStrategy::Complete);
        assert!(!result.is_merged());
    }

    #[test]
    fn test_unregistered_model_fails() {
        let context = ValidationContext::builder().build().expect("valid context");
        let result = context.validate(Some(&1_u8));
        assert!(matches!(
            result,
            Err(ValidatorError::SpecificationNotFound { .. })
        ));
    }

    #[test]
    fn test_null_root_override() {
        let context = context();
        let overrides = ValidationOverrides::new().null_root_policy(NullRootPolicy::Required);
        let result = context
            .validate_with::<Ticket>(None, overrides)
            .expect("null handled");
        assert_eq!(result.errors().errors().len(), 1);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = ValidationOptions {
            max_depth: 0,
            ..ValidationOptions::default()
        };
        assert!(matches!(
            ValidationContext::builder().options(options).build(),
            Err(ValidatorError::InvalidOptions { .. })
        ));
    }
}
