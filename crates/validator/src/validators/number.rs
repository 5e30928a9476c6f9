//! Number validators
//!
//! Work for any primitive that converts into a message
//! [`Number`](verity_message::Number).

use verity_message::{Number, NumberArg, ValidationError};

use crate::foundation::{ValidRule, valid};

/// Value must be greater than or equal to `min`.
pub fn min<V>(min: V) -> ValidRule<V>
where
    V: PartialOrd + Copy + Into<Number> + Send + Sync + 'static,
{
    valid(move |v: &V| *v >= min)
        .with_error(ValidationError::new("Numbers.Min").with_arg(NumberArg::new("min", min)))
}

/// Value must be less than or equal to `max`.
pub fn max<V>(max: V) -> ValidRule<V>
where
    V: PartialOrd + Copy + Into<Number> + Send + Sync + 'static,
{
    valid(move |v: &V| *v <= max)
        .with_error(ValidationError::new("Numbers.Max").with_arg(NumberArg::new("max", max)))
}

/// Value must lie within `min..=max`.
///
/// `NaN` never passes.
pub fn between<V>(min: V, max: V) -> ValidRule<V>
where
    V: PartialOrd + Copy + Into<Number> + Send + Sync + 'static,
{
    valid(move |v: &V| *v >= min && *v <= max).with_error(
        ValidationError::new("Numbers.Between")
            .with_arg(NumberArg::new("min", min))
            .with_arg(NumberArg::new("max", max)),
    )
}
