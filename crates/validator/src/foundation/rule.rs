//! The rule model.
//!
//! A [`Rule`] is a closed set of five variants executed through one entry
//! point. `Valid` and `ValidRelative` hold predicates directly; the three
//! nested variants delegate to chains or specifications of other types
//! through a type-erased [`Nested`] adapter built by the functions in
//! [`combinators`](crate::combinators).

use std::fmt;
use std::sync::Arc;

use verity_message::ValidationError;

use crate::error::ValidatorResult;
use crate::foundation::{ErrorsCollection, ExecutionContext};

// ============================================================================
// SUBJECT
// ============================================================================

/// What a rule is executed against.
pub enum Subject<'a, V: ?Sized, M> {
    /// A present value and the model that owns it.
    Present {
        /// The value under validation.
        value: &'a V,
        /// The enclosing model.
        model: &'a M,
    },
    /// Force mode: no instance data, every rule fails.
    Forced,
}

impl<V: ?Sized, M> Clone for Subject<'_, V, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: ?Sized, M> Copy for Subject<'_, V, M> {}

impl<V: ?Sized, M> fmt::Debug for Subject<'_, V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present { .. } => f.write_str("Present"),
            Self::Forced => f.write_str("Forced"),
        }
    }
}

// ============================================================================
// RULE KIND
// ============================================================================

/// The variant of a [`Rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Predicate over the value.
    Valid,
    /// Predicate over the whole model.
    ValidRelative,
    /// Chain applied to the inner value of an `Option`.
    ValidNullable,
    /// Nested model specification.
    ValidModel,
    /// Chain applied to every collection item.
    ValidCollection,
}

impl RuleKind {
    /// Stable name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "Valid",
            Self::ValidRelative => "ValidRelative",
            Self::ValidNullable => "ValidNullable",
            Self::ValidModel => "ValidModel",
            Self::ValidCollection => "ValidCollection",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PREDICATE RULES
// ============================================================================

/// A predicate over the validated value.
///
/// Without an explicit error the context default error is reported.
pub struct ValidRule<V: ?Sized> {
    predicate: Arc<dyn Fn(&V) -> bool + Send + Sync>,
    error: Option<ValidationError>,
}

impl<V: ?Sized> ValidRule<V> {
    /// Sets the error reported when the predicate fails.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_error(mut self, error: impl Into<ValidationError>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// The rule's own error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Evaluates the predicate.
    #[must_use]
    pub fn test(&self, value: &V) -> bool {
        (self.predicate)(value)
    }
}

impl<V: ?Sized> Clone for ValidRule<V> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            error: self.error.clone(),
        }
    }
}

impl<V: ?Sized> fmt::Debug for ValidRule<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidRule")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// A predicate over the whole model, reported at the enclosing scope.
pub struct RelativeRule<M> {
    predicate: Arc<dyn Fn(&M) -> bool + Send + Sync>,
    error: Option<ValidationError>,
}

impl<M> RelativeRule<M> {
    /// Sets the error reported when the predicate fails.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_error(mut self, error: impl Into<ValidationError>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// The rule's own error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }
}

impl<M> Clone for RelativeRule<M> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            error: self.error.clone(),
        }
    }
}

impl<M> fmt::Debug for RelativeRule<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelativeRule")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// Creates a rule from a predicate over the value.
///
/// # Examples
///
/// ```rust,ignore
/// let even = valid(|n: &i32| n % 2 == 0).with_error("Must be even");
/// ```
pub fn valid<V, F>(predicate: F) -> ValidRule<V>
where
    V: ?Sized,
    F: Fn(&V) -> bool + Send + Sync + 'static,
{
    ValidRule {
        predicate: Arc::new(predicate),
        error: None,
    }
}

/// Creates a rule from a predicate over the whole model.
///
/// # Examples
///
/// ```rust,ignore
/// let confirmed = relative(|u: &User| u.password == u.password_confirmation)
///     .with_error("Passwords do not match");
/// ```
pub fn relative<M, F>(predicate: F) -> RelativeRule<M>
where
    F: Fn(&M) -> bool + Send + Sync + 'static,
{
    RelativeRule {
        predicate: Arc::new(predicate),
        error: None,
    }
}

// ============================================================================
// NESTED RULES
// ============================================================================

/// Execution contract of the nested rule variants.
pub(crate) trait NestedRule<V: ?Sized, M>: Send + Sync {
    /// Runs the rule and returns the errors it reports at the member node.
    fn execute(
        &self,
        subject: Subject<'_, V, M>,
        cx: &ExecutionContext<'_>,
        depth: usize,
    ) -> ValidatorResult<ErrorsCollection>;

    /// Build-time checks of the nested chain.
    fn check(&self, scope: &str) -> ValidatorResult<()>;
}

/// Type-erased body of a nested rule.
pub struct Nested<V: ?Sized, M>(Arc<dyn NestedRule<V, M>>);

impl<V: ?Sized, M> Nested<V, M> {
    pub(crate) fn new(rule: impl NestedRule<V, M> + 'static) -> Self {
        Self(Arc::new(rule))
    }
}

impl<V: ?Sized, M> Clone for Nested<V, M> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<V: ?Sized, M> fmt::Debug for Nested<V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Nested")
    }
}

// ============================================================================
// RULE
// ============================================================================

/// An executable rule for values of type `V` inside models of type `M`.
pub enum Rule<V: ?Sized, M> {
    /// Predicate over the value.
    Valid(ValidRule<V>),
    /// Predicate over the whole model.
    ValidRelative(RelativeRule<M>),
    /// Chain over the inner value of an `Option`.
    ValidNullable(Nested<V, M>),
    /// Nested model specification, one level deeper.
    ValidModel(Nested<V, M>),
    /// Chain over every collection item, one level deeper.
    ValidCollection(Nested<V, M>),
}

impl<V: ?Sized, M> Rule<V, M> {
    /// The variant of this rule.
    #[must_use]
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Valid(_) => RuleKind::Valid,
            Self::ValidRelative(_) => RuleKind::ValidRelative,
            Self::ValidNullable(_) => RuleKind::ValidNullable,
            Self::ValidModel(_) => RuleKind::ValidModel,
            Self::ValidCollection(_) => RuleKind::ValidCollection,
        }
    }

    /// Executes the rule, attaching its errors to `node`.
    ///
    /// Returns true if the rule failed.
    pub(crate) fn execute(
        &self,
        subject: Subject<'_, V, M>,
        cx: &ExecutionContext<'_>,
        depth: usize,
        node: &mut ErrorsCollection,
    ) -> ValidatorResult<bool> {
        // Force fails every rule whatever subject the caller holds.
        let subject = if cx.is_forced() {
            Subject::Forced
        } else {
            subject
        };
        match self {
            Self::Valid(rule) => {
                let passed = match subject {
                    Subject::Present { value, .. } => rule.test(value),
                    Subject::Forced => false,
                };
                if !passed {
                    node.add_error(rule.error().unwrap_or(cx.default_error()).clone());
                }
                Ok(!passed)
            }
            Self::ValidRelative(rule) => {
                let passed = match subject {
                    Subject::Present { model, .. } => (rule.predicate)(model),
                    Subject::Forced => false,
                };
                if !passed {
                    node.add_error(rule.error().unwrap_or(cx.default_error()).clone());
                }
                Ok(!passed)
            }
            Self::ValidNullable(nested) | Self::ValidModel(nested) | Self::ValidCollection(nested) => {
                let errors = nested.0.execute(subject, cx, depth)?;
                let failed = !errors.is_empty();
                node.absorb(errors);
                Ok(failed)
            }
        }
    }

    /// Build-time checks of nested chains.
    pub(crate) fn check(&self, scope: &str) -> ValidatorResult<()> {
        match self {
            Self::Valid(_) | Self::ValidRelative(_) => Ok(()),
            Self::ValidNullable(nested) | Self::ValidModel(nested) | Self::ValidCollection(nested) => {
                nested.0.check(scope)
            }
        }
    }
}

impl<V: ?Sized, M> Clone for Rule<V, M> {
    fn clone(&self) -> Self {
        match self {
            Self::Valid(rule) => Self::Valid(rule.clone()),
            Self::ValidRelative(rule) => Self::ValidRelative(rule.clone()),
            Self::ValidNullable(nested) => Self::ValidNullable(nested.clone()),
            Self::ValidModel(nested) => Self::ValidModel(nested.clone()),
            Self::ValidCollection(nested) => Self::ValidCollection(nested.clone()),
        }
    }
}

impl<V: ?Sized, M> fmt::Debug for Rule<V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rule").field(&self.kind()).finish()
    }
}

impl<V: ?Sized, M> From<ValidRule<V>> for Rule<V, M> {
    fn from(rule: ValidRule<V>) -> Self {
        Self::Valid(rule)
    }
}

impl<V: ?Sized, M> From<RelativeRule<M>> for Rule<V, M> {
    fn from(rule: RelativeRule<M>) -> Self {
        Self::ValidRelative(rule)
    }
}
