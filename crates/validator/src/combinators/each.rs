//! EACH combinator - runs a chain on every item of a collection
//!
//! Items are validated one level deeper than the collection and their
//! errors are attached under the item index (`"0"`, `"1"`, ...). In Force
//! mode a single virtual item is reported under the context's force key.

use crate::error::ValidatorResult;
use crate::foundation::{
    Chain, ErrorsCollection, ExecutionContext, Nested, NestedRule, Rule, Slot, Subject,
};

// ============================================================================
// ITEMS
// ============================================================================

/// A contiguous collection whose items can be validated one by one.
pub trait Items {
    /// Item type.
    type Item;

    /// The items in order.
    fn items(&self) -> &[Self::Item];
}

impl<T> Items for [T] {
    type Item = T;

    fn items(&self) -> &[T] {
        self
    }
}

impl<T> Items for Vec<T> {
    type Item = T;

    fn items(&self) -> &[T] {
        self
    }
}

impl<T, const N: usize> Items for [T; N] {
    type Item = T;

    fn items(&self) -> &[T] {
        self
    }
}

impl<T> Items for Box<[T]> {
    type Item = T;

    fn items(&self) -> &[T] {
        self
    }
}

// ============================================================================
// EACH RULES
// ============================================================================

struct EachRule<T, M> {
    chain: Chain<T, M>,
}

impl<V, T, M> NestedRule<V, M> for EachRule<T, M>
where
    V: Items<Item = T> + ?Sized,
    T: 'static,
{
    fn execute(
        &self,
        subject: Subject<'_, V, M>,
        cx: &ExecutionContext<'_>,
        depth: usize,
    ) -> ValidatorResult<ErrorsCollection> {
        let items = match subject {
            Subject::Present { value, model } => Some((value.items().iter().map(Some), model)),
            Subject::Forced => None,
        };
        execute_items(&self.chain, items, false, cx, depth)
    }

    fn check(&self, scope: &str) -> ValidatorResult<()> {
        self.chain.check_nested(scope)
    }
}

struct EachNullableRule<T, M> {
    chain: Chain<T, M>,
}

impl<V, T, M> NestedRule<V, M> for EachNullableRule<T, M>
where
    V: Items<Item = Option<T>> + ?Sized,
    T: 'static,
{
    fn execute(
        &self,
        subject: Subject<'_, V, M>,
        cx: &ExecutionContext<'_>,
        depth: usize,
    ) -> ValidatorResult<ErrorsCollection> {
        let items = match subject {
            Subject::Present { value, model } => {
                Some((value.items().iter().map(Option::as_ref), model))
            }
            Subject::Forced => None,
        };
        execute_items(&self.chain, items, true, cx, depth)
    }

    fn check(&self, scope: &str) -> ValidatorResult<()> {
        self.chain.check_nested(scope)
    }
}

/// `items` is `None` in Force mode.
fn execute_items<'a, T: 'a, M: 'a>(
    chain: &Chain<T, M>,
    items: Option<(impl Iterator<Item = Option<&'a T>>, &'a M)>,
    can_be_absent: bool,
    cx: &ExecutionContext<'_>,
    depth: usize,
) -> ValidatorResult<ErrorsCollection> {
    let next = depth + 1;
    let mut node = ErrorsCollection::new();

    match items {
        None => {
            if next <= cx.max_depth() {
                let errors = chain.execute_slot(Slot::Forced, can_be_absent, cx, next)?;
                node.add_member_errors(cx.force_key(), errors);
            }
        }
        Some((items, model)) => {
            let mut items = items.peekable();
            if items.peek().is_some() {
                cx.check_depth(next)?;
            }
            for (index, item) in items.enumerate() {
                let slot = match item {
                    Some(value) => Slot::Present(value, model),
                    None => Slot::Absent,
                };
                let errors = chain.execute_slot(slot, can_be_absent, cx, next)?;
                node.add_member_errors(index.to_string(), errors);
            }
        }
    }

    Ok(node)
}

/// Runs `chain` on every item, under the item's index.
///
/// The item chain must not rename the member.
///
/// # Examples
///
/// ```rust,ignore
/// let spec = Specification::<Post>::builder()
///     .field("Tags", |p| &p.tags, Chain::new().rule(each(Chain::new().rule(min_length(2)))))
///     .build()?;
/// ```
pub fn each<V, T, M>(chain: Chain<T, M>) -> Rule<V, M>
where
    V: Items<Item = T> + ?Sized,
    T: 'static,
    M: 'static,
{
    Rule::ValidCollection(Nested::new(EachRule { chain }))
}

/// Runs `chain` on every `Some` item; `None` items are absent values and
/// report the required error unless the item chain is optional.
pub fn each_nullable<V, T, M>(chain: Chain<T, M>) -> Rule<V, M>
where
    V: Items<Item = Option<T>> + ?Sized,
    T: 'static,
    M: 'static,
{
    Rule::ValidCollection(Nested::new(EachNullableRule { chain }))
}
