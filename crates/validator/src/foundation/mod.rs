//! Core building blocks: rules, chains, specifications, the registry,
//! options and the error tree.

mod chain;
mod collection;
mod options;
mod registry;
mod result;
mod rule;
mod specification;

pub use chain::{Chain, Command};
pub(crate) use chain::Slot;
pub use collection::ErrorsCollection;
pub use options::{
    ExecutionContext, NullRootPolicy, ValidationOptions, ValidationOverrides, ValidationStrategy,
};
pub use registry::SpecificationRegistry;
pub use result::ValidationResult;
pub(crate) use rule::NestedRule;
pub use rule::{Nested, RelativeRule, Rule, RuleKind, Subject, ValidRule, relative, valid};
pub use specification::{Specification, SpecificationBuilder};
