//! Collection size validators

use verity_message::{NumberArg, ValidationError};

use crate::combinators::Items;
use crate::foundation::{ValidRule, valid};

/// Collection must have at least `min` items.
pub fn min_items<V>(min: usize) -> ValidRule<V>
where
    V: Items + ?Sized + 'static,
{
    valid(move |v: &V| v.items().len() >= min).with_error(
        ValidationError::new("Collections.MinItems").with_arg(NumberArg::new("min", min)),
    )
}

/// Collection must have at most `max` items.
pub fn max_items<V>(max: usize) -> ValidRule<V>
where
    V: Items + ?Sized + 'static,
{
    valid(move |v: &V| v.items().len() <= max).with_error(
        ValidationError::new("Collections.MaxItems").with_arg(NumberArg::new("max", max)),
    )
}

/// Collection must not be empty.
pub fn not_empty_collection<V>() -> ValidRule<V>
where
    V: Items + ?Sized + 'static,
{
    valid(|v: &V| !v.items().is_empty()).with_error("Collections.NotEmpty")
}
