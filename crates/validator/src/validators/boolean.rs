//! Boolean validators

use crate::foundation::{ValidRule, valid};

/// Value must be `true`.
pub fn is_true() -> ValidRule<bool> {
    valid(|v: &bool| *v).with_error("Booleans.True")
}

/// Value must be `false`.
pub fn is_false() -> ValidRule<bool> {
    valid(|v: &bool| !*v).with_error("Booleans.False")
}
