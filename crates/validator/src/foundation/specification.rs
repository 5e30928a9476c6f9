//! Specifications and the scope composer.
//!
//! A [`Specification`] is an ordered list of scopes for one model type.
//! Member scopes read a value through an accessor closure and run a chain
//! on it; model scopes run a chain on the whole model and attach their
//! errors at the root. Scope order is error order.

use std::fmt;

use tracing::trace;
use verity_message::ValidationError;

use crate::error::{ValidatorError, ValidatorResult};
use crate::foundation::chain::Slot;
use crate::foundation::{Chain, Command, ErrorsCollection, ExecutionContext, Subject, relative};

// ============================================================================
// SCOPES
// ============================================================================

/// One executable scope of a specification.
pub(crate) trait Scope<M>: Send + Sync {
    /// Name used in build errors and logs.
    fn name(&self) -> &str;

    /// Runs the scope and attaches its errors to `root`.
    ///
    /// `model` is `None` in Force mode.
    fn execute(
        &self,
        model: Option<&M>,
        cx: &ExecutionContext<'_>,
        depth: usize,
        root: &mut ErrorsCollection,
    ) -> ValidatorResult<()>;

    /// Build-time checks.
    fn check(&self) -> ValidatorResult<()>;
}

type OptionalAccessor<M, V> = Box<dyn for<'a> Fn(&'a M) -> Option<&'a V> + Send + Sync>;
type RequiredAccessor<M, V> = Box<dyn for<'a> Fn(&'a M) -> &'a V + Send + Sync>;

enum Accessor<M, V: ?Sized> {
    /// The member may be absent.
    Optional(OptionalAccessor<M, V>),
    /// The member is always present.
    Required(RequiredAccessor<M, V>),
}

struct MemberScope<M, V: ?Sized> {
    name: String,
    accessor: Accessor<M, V>,
    chain: Chain<V, M>,
}

impl<M, V: ?Sized> Scope<M> for MemberScope<M, V> {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(
        &self,
        model: Option<&M>,
        cx: &ExecutionContext<'_>,
        depth: usize,
        root: &mut ErrorsCollection,
    ) -> ValidatorResult<()> {
        let key = self.chain.name().unwrap_or(&self.name);
        trace!(member = key, depth, "Executing member scope");

        let slot = match model {
            None => Slot::Forced,
            Some(model) => match &self.accessor {
                Accessor::Optional(get) => match get(model) {
                    Some(value) => Slot::Present(value, model),
                    None => Slot::Absent,
                },
                Accessor::Required(get) => Slot::Present(get(model), model),
            },
        };

        let can_be_absent = matches!(self.accessor, Accessor::Optional(_));
        let errors = self.chain.execute_slot(slot, can_be_absent, cx, depth)?;
        root.add_member_errors(key, errors);
        Ok(())
    }

    fn check(&self) -> ValidatorResult<()> {
        let renamed = self.chain.name().is_some_and(|name| name.trim().is_empty());
        if self.name.trim().is_empty() || renamed {
            return Err(ValidatorError::EmptyMemberName);
        }
        self.chain.check(&self.name)
    }
}

/// Scope name used for model-level chains in errors and logs.
const MODEL_SCOPE: &str = "<model>";

struct ModelScope<M> {
    chain: Chain<M, M>,
}

impl<M> Scope<M> for ModelScope<M> {
    fn name(&self) -> &str {
        MODEL_SCOPE
    }

    fn execute(
        &self,
        model: Option<&M>,
        cx: &ExecutionContext<'_>,
        depth: usize,
        root: &mut ErrorsCollection,
    ) -> ValidatorResult<()> {
        trace!(depth, "Executing model scope");
        let subject = match model {
            Some(model) => Subject::Present {
                value: model,
                model,
            },
            None => Subject::Forced,
        };
        root.absorb(self.chain.execute(subject, cx, depth)?);
        Ok(())
    }

    fn check(&self) -> ValidatorResult<()> {
        self.chain.check(MODEL_SCOPE)?;
        self.chain
            .check_unsupported(MODEL_SCOPE, &[Command::Optional, Command::Named])
    }
}

// ============================================================================
// SPECIFICATION
// ============================================================================

/// How to validate one model type.
///
/// Immutable once built and safe to share between threads.
///
/// # Examples
///
/// ```rust,ignore
/// use verity_validator::prelude::*;
///
/// struct User { name: String, password: Option<String>, age: u32 }
///
/// let spec = Specification::<User>::builder()
///     .field("Name", |u| u.name.as_str(), Chain::new().rule(not_empty()))
///     .member(
///         "Password",
///         |u| u.password.as_deref(),
///         Chain::new().rule(min_length(6)),
///     )
///     .model_rule(|u| u.age >= 18 || u.password.is_none(), "Minors cannot set a password")
///     .build()?;
/// ```
pub struct Specification<M> {
    scopes: Vec<Box<dyn Scope<M>>>,
}

impl<M: 'static> Specification<M> {
    /// Starts a specification.
    #[must_use]
    pub fn builder() -> SpecificationBuilder<M> {
        SpecificationBuilder { scopes: Vec::new() }
    }
}

impl<M> Specification<M> {
    /// Number of scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Returns true if the specification has no scopes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Scope names in declaration order.
    pub fn scope_names(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(|scope| scope.name())
    }

    pub(crate) fn scopes(&self) -> &[Box<dyn Scope<M>>] {
        &self.scopes
    }
}

impl<M> fmt::Debug for Specification<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification")
            .field("model", &std::any::type_name::<M>())
            .field("scopes", &self.scope_names().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Declares the scopes of a [`Specification`] in order.
pub struct SpecificationBuilder<M> {
    scopes: Vec<Box<dyn Scope<M>>>,
}

impl<M: 'static> SpecificationBuilder<M> {
    /// Declares a member that may be absent.
    ///
    /// An absent member reports the required error unless its chain is
    /// optional.
    #[must_use = "builder methods must be chained or built"]
    pub fn member<V, A>(mut self, name: impl Into<String>, accessor: A, chain: Chain<V, M>) -> Self
    where
        V: ?Sized + 'static,
        A: for<'a> Fn(&'a M) -> Option<&'a V> + Send + Sync + 'static,
    {
        self.scopes.push(Box::new(MemberScope {
            name: name.into(),
            accessor: Accessor::Optional(Box::new(accessor)),
            chain,
        }));
        self
    }

    /// Declares a member that is always present.
    #[must_use = "builder methods must be chained or built"]
    pub fn field<V, A>(mut self, name: impl Into<String>, accessor: A, chain: Chain<V, M>) -> Self
    where
        V: ?Sized + 'static,
        A: for<'a> Fn(&'a M) -> &'a V + Send + Sync + 'static,
    {
        self.scopes.push(Box::new(MemberScope {
            name: name.into(),
            accessor: Accessor::Required(Box::new(accessor)),
            chain,
        }));
        self
    }

    /// Declares a chain over the whole model, reported at the root.
    #[must_use = "builder methods must be chained or built"]
    pub fn model(mut self, chain: Chain<M, M>) -> Self {
        self.scopes.push(Box::new(ModelScope { chain }));
        self
    }

    /// Declares a single model-level predicate with its error.
    #[must_use = "builder methods must be chained or built"]
    pub fn model_rule<F>(self, predicate: F, error: impl Into<ValidationError>) -> Self
    where
        F: Fn(&M) -> bool + Send + Sync + 'static,
    {
        self.model(Chain::new().rule(relative(predicate).with_error(error)))
    }

    /// Checks every scope and builds the specification.
    ///
    /// # Errors
    ///
    /// Fails on duplicate commands, commands a scope does not support,
    /// disallowed rules in nullable chains, renamed nested chains and empty
    /// member names.
    pub fn build(self) -> ValidatorResult<Specification<M>> {
        for scope in &self.scopes {
            scope.check()?;
        }
        Ok(Specification {
            scopes: self.scopes,
        })
    }
}
