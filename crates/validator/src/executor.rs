//! The recursive specification walker.

use std::any::type_name;

use crate::error::{ValidatorError, ValidatorResult};
use crate::foundation::{ErrorsCollection, ExecutionContext, NullRootPolicy, Specification};

/// Applies a specification to a model and returns its error tree.
///
/// Scopes run in declaration order. Nested models and collection items
/// recurse with `depth + 1`; going past the context's maximum depth aborts
/// the walk with [`ValidatorError::MaxDepthExceeded`] instead of returning
/// a partial tree.
///
/// A `None` model follows the context's [`NullRootPolicy`]. In Force mode
/// the model is ignored entirely: no accessor or predicate is invoked and
/// every rule reports its error.
///
/// # Errors
///
/// Depth exceeded, a null model under [`NullRootPolicy::Fail`], or a nested
/// model type without a registered specification.
pub fn execute<M>(
    specification: &Specification<M>,
    model: Option<&M>,
    cx: &ExecutionContext<'_>,
    depth: usize,
) -> ValidatorResult<ErrorsCollection> {
    cx.check_depth(depth)?;

    let model = if cx.is_forced() {
        None
    } else {
        match model {
            Some(model) => Some(model),
            None => return null_root::<M>(cx),
        }
    };

    let mut root = ErrorsCollection::new();
    for scope in specification.scopes() {
        scope.execute(model, cx, depth, &mut root)?;
    }
    Ok(root)
}

fn null_root<M>(cx: &ExecutionContext<'_>) -> ValidatorResult<ErrorsCollection> {
    match cx.null_root_policy() {
        NullRootPolicy::Fail => Err(ValidatorError::NullModel {
            type_name: type_name::<M>(),
        }),
        NullRootPolicy::Required => Ok(ErrorsCollection::from_error(cx.required_error().clone())),
        NullRootPolicy::Accept => Ok(ErrorsCollection::new()),
    }
}
