//! MODEL combinator - validates a member with another model's specification

use std::sync::Arc;

use crate::error::ValidatorResult;
use crate::executor;
use crate::foundation::{
    ErrorsCollection, ExecutionContext, Nested, NestedRule, Rule, Specification, Subject,
};

// ============================================================================
// MODEL RULE
// ============================================================================

enum Source<T> {
    /// A specification supplied with the rule.
    Inline(Arc<Specification<T>>),
    /// Resolved from the registry while executing.
    Registered,
}

struct ModelRule<T> {
    source: Source<T>,
}

impl<T: 'static, M> NestedRule<T, M> for ModelRule<T> {
    fn execute(
        &self,
        subject: Subject<'_, T, M>,
        cx: &ExecutionContext<'_>,
        depth: usize,
    ) -> ValidatorResult<ErrorsCollection> {
        let next = depth + 1;
        let model = match subject {
            Subject::Present { value, .. } => Some(value),
            // Specification cycles have no data to end them in Force mode.
            Subject::Forced if next > cx.max_depth() => return Ok(ErrorsCollection::new()),
            Subject::Forced => None,
        };

        let specification = match &self.source {
            Source::Inline(specification) => Arc::clone(specification),
            Source::Registered => cx.registry().resolve::<T>()?,
        };
        executor::execute(&specification, model, cx, next)
    }

    fn check(&self, _scope: &str) -> ValidatorResult<()> {
        Ok(())
    }
}

/// Validates the member with a given specification, one level deeper.
///
/// The nested errors are attached under the member's key.
///
/// # Examples
///
/// ```rust,ignore
/// let address = Arc::new(address_specification()?);
///
/// let spec = Specification::<Person>::builder()
///     .member("Address", |p| p.address.as_ref(), Chain::new().rule(model(address)))
///     .build()?;
/// ```
pub fn model<T: 'static, M>(specification: Arc<Specification<T>>) -> Rule<T, M> {
    Rule::ValidModel(Nested::new(ModelRule {
        source: Source::Inline(specification),
    }))
}

/// Validates the member with the specification registered for `T`.
///
/// The registry is consulted while validating, so `T` may be registered
/// after this rule is built, and specifications may refer to each other.
///
/// # Examples
///
/// ```rust,ignore
/// let spec = Specification::<Employee>::builder()
///     .member("Manager", |e| e.manager.as_deref(), Chain::new().rule(registered_model()).optional())
///     .build()?;
/// ```
pub fn registered_model<T: 'static, M>() -> Rule<T, M> {
    Rule::ValidModel(Nested::new(ModelRule {
        source: Source::Registered,
    }))
}
