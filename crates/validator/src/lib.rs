//! # verity-validator
//!
//! Declarative model validation. A [`Specification`](foundation::Specification)
//! lists the scopes of a model type: its members, each with an ordered
//! [`Chain`](foundation::Chain) of rules and commands, and model-wide rules.
//! Validating a model walks the specification and produces an
//! [`ErrorsCollection`](foundation::ErrorsCollection) shaped like the model,
//! which reports render through a translation into human text.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use verity_validator::prelude::*;
//!
//! struct User {
//!     name: String,
//!     password: Option<String>,
//!     tags: Vec<Option<String>>,
//! }
//!
//! let spec = Specification::<User>::builder()
//!     .field("Name", |u| u.name.as_str(), Chain::new().rule(not_empty()))
//!     .member("Password", |u| u.password.as_deref(), Chain::new().rule(min_length(6)))
//!     .field("Tags", |u| &u.tags, Chain::new().rule(each_nullable(Chain::new().rule(min_length(2)))))
//!     .build()?;
//!
//! let context = ValidationContext::builder().specification(spec).build()?;
//! let result = context.validate(Some(&user))?;
//! let report = result.tree(context.translator("English")?)?;
//! // {"Password": ["Required"], "Tags": {"1": ["Required"]}}
//! ```
//!
//! ## Strategies
//!
//! - **Complete** - every rule runs, every failure is reported
//! - **FailFast** - a chain stops at its first failing rule
//! - **Force** - no data is read and every rule fails, which lists every
//!   error a specification can produce (see
//!   [`ValidationContext::error_surface`](context::ValidationContext::error_surface))
//!
//! ## Commands
//!
//! A chain carries at most one of each: `optional()`, `single_error(..)`,
//! `with_message(..)` and `named(..)`. Their order of declaration does not
//! matter; repeating one fails when the specification is built.
//!
//! ## Built-in Rules
//!
//! - **Text**: [`min_length`](validators::min_length), [`max_length`](validators::max_length),
//!   [`not_empty`](validators::not_empty), [`matches`](validators::matches)
//! - **Number**: [`min`](validators::min), [`max`](validators::max),
//!   [`between`](validators::between)
//! - **Collection**: [`min_items`](validators::min_items), [`max_items`](validators::max_items)
//! - **Boolean**: [`is_true`](validators::is_true), [`is_false`](validators::is_false)

// ValidatorError carries owned scope names; boxing it buys nothing on the
// cold configuration-error path.
#![allow(clippy::result_large_err)]
// Type-erased accessors and predicates have long but flat types.
#![allow(clippy::type_complexity)]

pub mod combinators;
pub mod context;
pub mod error;
pub mod executor;
pub mod foundation;
pub mod phrases;
pub mod prelude;
pub mod report;
pub mod validators;

pub use context::{ValidationContext, ValidationContextBuilder};
pub use error::{ValidatorError, ValidatorResult};
pub use verity_message as message;
