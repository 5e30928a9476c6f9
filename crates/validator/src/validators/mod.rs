//! Built-in rules
//!
//! Thin constructors over [`valid`](crate::foundation::valid): each returns a
//! [`ValidRule`](crate::foundation::ValidRule) whose error is a phrase key
//! from the English dictionary in [`phrases`](crate::phrases), with the
//! limits attached as message arguments.
//!
//! | module         | rules |
//! |----------------|-------|
//! | [`text`]       | `not_empty`, `not_whitespace`, `min_length`, `max_length`, `exact_length`, `length_between`, `matches`, `contains` |
//! | [`number`]     | `min`, `max`, `between` |
//! | [`collection`] | `min_items`, `max_items`, `not_empty_collection` |
//! | [`boolean`]    | `is_true`, `is_false` |

pub mod boolean;
pub mod collection;
pub mod number;
pub mod text;

pub use boolean::{is_false, is_true};
pub use collection::{max_items, min_items, not_empty_collection};
pub use number::{between, max, min};
pub use text::{
    contains, exact_length, length_between, matches, max_length, min_length, not_empty,
    not_whitespace,
};
