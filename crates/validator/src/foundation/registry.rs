//! Specification registry keyed by model type.
//!
//! Registration and resolution are separate phases. Specifications are
//! registered eagerly or as lazy factories; a factory runs on first
//! resolution and its outcome is cached, so every `ValidModel` rule that
//! refers to the same type shares one `Arc<Specification<T>>`. Rules look
//! the registry up while executing, which lets specifications of mutually
//! referencing types be registered in any order.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::error::{ValidatorError, ValidatorResult};
use crate::foundation::Specification;

type Erased = Arc<dyn Any + Send + Sync>;
type Factory = Box<dyn Fn() -> ValidatorResult<Erased> + Send + Sync>;

struct RegistryEntry {
    type_name: &'static str,
    resolved: OnceLock<ValidatorResult<Erased>>,
    factory: Option<Factory>,
}

impl RegistryEntry {
    fn resolve(&self) -> &ValidatorResult<Erased> {
        self.resolved.get_or_init(|| {
            debug!(model = self.type_name, "Building specification from factory");
            match &self.factory {
                Some(factory) => factory(),
                None => Err(ValidatorError::SpecificationNotFound {
                    type_name: self.type_name,
                }),
            }
        })
    }
}

/// Maps model types to their specifications.
///
/// # Examples
///
/// ```rust,ignore
/// let mut registry = SpecificationRegistry::new();
/// registry.register(address_spec);
/// registry.register_with(|| person_specification());
///
/// let person = registry.resolve::<Person>()?;
/// ```
#[derive(Default)]
pub struct SpecificationRegistry {
    entries: HashMap<TypeId, RegistryEntry>,
}

impl SpecificationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a built specification. A previous entry for `T` is replaced.
    pub fn register<T: 'static>(&mut self, specification: Specification<T>) {
        let erased: Erased = Arc::new(specification);
        self.insert::<T>(RegistryEntry {
            type_name: type_name::<T>(),
            resolved: OnceLock::from(Ok(erased)),
            factory: None,
        });
    }

    /// Registers a factory that builds the specification on first use.
    ///
    /// A previous entry for `T` is replaced. A factory error is cached and
    /// returned by every later resolution.
    pub fn register_with<T, F>(&mut self, factory: F)
    where
        T: 'static,
        F: Fn() -> ValidatorResult<Specification<T>> + Send + Sync + 'static,
    {
        let factory: Factory = Box::new(move || factory().map(|spec| Arc::new(spec) as Erased));
        self.insert::<T>(RegistryEntry {
            type_name: type_name::<T>(),
            resolved: OnceLock::new(),
            factory: Some(factory),
        });
    }

    fn insert<T: 'static>(&mut self, entry: RegistryEntry) {
        let replaced = self.entries.insert(TypeId::of::<T>(), entry).is_some();
        debug!(
            model = type_name::<T>(),
            replaced,
            "Registered specification"
        );
    }

    /// Resolves the specification for `T`.
    pub fn resolve<T: 'static>(&self) -> ValidatorResult<Arc<Specification<T>>> {
        let not_found = || ValidatorError::SpecificationNotFound {
            type_name: type_name::<T>(),
        };

        let entry = self.entries.get(&TypeId::of::<T>()).ok_or_else(not_found)?;
        let erased = entry.resolve().clone()?;
        erased
            .downcast::<Specification<T>>()
            .map_err(|_| not_found())
    }

    /// Returns true if a specification for `T` is registered.
    #[must_use]
    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered model types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for SpecificationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.values().map(|entry| entry.type_name))
            .finish()
    }
}
