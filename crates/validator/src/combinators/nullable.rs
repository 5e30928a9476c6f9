//! NULLABLE combinator - runs a chain on the inner value of an `Option`

use crate::error::ValidatorResult;
use crate::foundation::{
    Chain, ErrorsCollection, ExecutionContext, Nested, NestedRule, Rule, Subject,
};

struct NullableRule<T, M> {
    chain: Chain<T, M>,
}

impl<T, M> NestedRule<Option<T>, M> for NullableRule<T, M> {
    fn execute(
        &self,
        subject: Subject<'_, Option<T>, M>,
        cx: &ExecutionContext<'_>,
        depth: usize,
    ) -> ValidatorResult<ErrorsCollection> {
        match subject {
            Subject::Present {
                value: Some(value),
                model,
            } => self.chain.execute(Subject::Present { value, model }, cx, depth),
            Subject::Present { value: None, .. } => Ok(ErrorsCollection::new()),
            Subject::Forced => self.chain.execute(Subject::Forced, cx, depth),
        }
    }

    fn check(&self, scope: &str) -> ValidatorResult<()> {
        self.chain.check_nullable(scope)
    }
}

/// Runs `chain` on `Some` values and skips `None`.
///
/// The chain may only hold `Valid` and `ValidRelative` rules and must not
/// rename the member; both are checked when the specification is built.
///
/// # Examples
///
/// ```rust,ignore
/// let spec = Specification::<Order>::builder()
///     .field("Discount", |o| &o.discount, Chain::new().rule(nullable(Chain::new().rule(max(50)))))
///     .build()?;
/// ```
pub fn nullable<T: 'static, M: 'static>(chain: Chain<T, M>) -> Rule<Option<T>, M> {
    Rule::ValidNullable(Nested::new(NullableRule { chain }))
}
