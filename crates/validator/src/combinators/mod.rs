//! Nested rule combinators
//!
//! Builders for the three nested [`Rule`](crate::foundation::Rule)
//! variants:
//!
//! - [`nullable`] - chain over the inner value of an `Option`
//! - [`model`] / [`registered_model`] - another model's specification
//! - [`each`] / [`each_nullable`] - chain over every collection item

mod each;
mod model;
mod nullable;

pub use each::{Items, each, each_nullable};
pub use model::{model, registered_model};
pub use nullable::nullable;
