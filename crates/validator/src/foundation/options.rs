//! Validation options, per-call overrides and the execution context.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use verity_message::ValidationError;

use crate::error::{ValidatorError, ValidatorResult};
use crate::foundation::SpecificationRegistry;

// ============================================================================
// STRATEGY AND NULL POLICY
// ============================================================================

/// How a rule chain is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStrategy {
    /// Run every rule and collect every error.
    #[default]
    Complete,
    /// Stop a chain at its first failing rule.
    FailFast,
    /// Report every rule as failing without evaluating anything.
    Force,
}

/// What happens when the root model is null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullRootPolicy {
    /// Abort with [`ValidatorError::NullModel`].
    #[default]
    Fail,
    /// Report a single root-level required error.
    Required,
    /// Treat the null model as valid.
    Accept,
}

// ============================================================================
// VALIDATION OPTIONS
// ============================================================================

/// Context-wide validation settings.
///
/// Every field has a default, so partial JSON documents load fine:
///
/// ```json
/// { "strategy": "fail_fast", "max_depth": 4 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Chain execution strategy.
    pub strategy: ValidationStrategy,
    /// Null root handling.
    pub null_root_policy: NullRootPolicy,
    /// Deepest nesting level a walk may reach.
    pub max_depth: usize,
    /// Member key of the virtual item reported for collections in Force mode.
    pub collection_force_key: String,
    /// Template of the error used by rules without their own error.
    pub default_error: String,
    /// Template of the error reported for absent required values.
    pub required_error: String,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            strategy: ValidationStrategy::Complete,
            null_root_policy: NullRootPolicy::Fail,
            max_depth: 10,
            collection_force_key: "#".to_string(),
            default_error: "Global.Error".to_string(),
            required_error: "Global.Required".to_string(),
        }
    }
}

impl ValidationOptions {
    /// Loads options from JSON and validates them.
    pub fn from_json(json: &str) -> ValidatorResult<Self> {
        let options: Self =
            serde_json::from_str(json).map_err(|e| ValidatorError::InvalidOptions {
                message: e.to_string(),
            })?;
        options.validate()?;
        Ok(options)
    }

    /// Checks that the options are usable.
    pub fn validate(&self) -> ValidatorResult<()> {
        let invalid = |message: &str| {
            Err(ValidatorError::InvalidOptions {
                message: message.to_string(),
            })
        };

        if self.max_depth == 0 {
            return invalid("max_depth must be greater than zero");
        }
        if self.collection_force_key.is_empty() {
            return invalid("collection_force_key must not be empty");
        }
        if self.default_error.trim().is_empty() {
            return invalid("default_error must not be empty");
        }
        if self.required_error.trim().is_empty() {
            return invalid("required_error must not be empty");
        }
        Ok(())
    }
}

// ============================================================================
// VALIDATION OVERRIDES
// ============================================================================

/// Per-call overrides of [`ValidationOptions`].
///
/// # Examples
///
/// ```rust,ignore
/// let overrides = ValidationOverrides::new()
///     .strategy(ValidationStrategy::FailFast)
///     .max_depth(3);
/// let result = context.validate_with(Some(&user), overrides)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationOverrides {
    strategy: Option<ValidationStrategy>,
    null_root_policy: Option<NullRootPolicy>,
    max_depth: Option<usize>,
}

impl ValidationOverrides {
    /// No overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the strategy.
    #[must_use = "builder methods must be chained or built"]
    pub fn strategy(mut self, strategy: ValidationStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Overrides the null-root policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn null_root_policy(mut self, policy: NullRootPolicy) -> Self {
        self.null_root_policy = Some(policy);
        self
    }

    /// Overrides the maximum depth.
    #[must_use = "builder methods must be chained or built"]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

// ============================================================================
// EXECUTION CONTEXT
// ============================================================================

/// Resolved settings for a single validation call.
///
/// Built from the context options plus per-call overrides and never changed
/// during the walk.
#[derive(Debug, Clone)]
pub struct ExecutionContext<'a> {
    strategy: ValidationStrategy,
    null_root_policy: NullRootPolicy,
    max_depth: usize,
    force_key: &'a str,
    default_error: ValidationError,
    required_error: ValidationError,
    registry: &'a SpecificationRegistry,
}

impl<'a> ExecutionContext<'a> {
    /// Resolves options and overrides against a registry.
    #[must_use]
    pub fn new(
        options: &'a ValidationOptions,
        overrides: ValidationOverrides,
        registry: &'a SpecificationRegistry,
    ) -> Self {
        Self {
            strategy: overrides.strategy.unwrap_or(options.strategy),
            null_root_policy: overrides.null_root_policy.unwrap_or(options.null_root_policy),
            max_depth: overrides.max_depth.unwrap_or(options.max_depth),
            force_key: &options.collection_force_key,
            default_error: ValidationError::new(Cow::Owned(options.default_error.clone())),
            required_error: ValidationError::new(Cow::Owned(options.required_error.clone())),
            registry,
        }
    }

    /// The chain execution strategy.
    #[must_use]
    pub fn strategy(&self) -> ValidationStrategy {
        self.strategy
    }

    /// Returns true in Force mode.
    #[must_use]
    pub fn is_forced(&self) -> bool {
        self.strategy == ValidationStrategy::Force
    }

    /// The null-root policy.
    #[must_use]
    pub fn null_root_policy(&self) -> NullRootPolicy {
        self.null_root_policy
    }

    /// The maximum depth.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Key of the virtual collection item in Force mode.
    #[must_use]
    pub fn force_key(&self) -> &str {
        self.force_key
    }

    /// Error for rules without their own error.
    #[must_use]
    pub fn default_error(&self) -> &ValidationError {
        &self.default_error
    }

    /// Error for absent required values.
    #[must_use]
    pub fn required_error(&self) -> &ValidationError {
        &self.required_error
    }

    /// The specification registry.
    #[must_use]
    pub fn registry(&self) -> &'a SpecificationRegistry {
        self.registry
    }

    /// Fails when `depth` is beyond the maximum.
    pub fn check_depth(&self, depth: usize) -> ValidatorResult<()> {
        if depth > self.max_depth {
            return Err(ValidatorError::MaxDepthExceeded {
                max_depth: self.max_depth,
            });
        }
        Ok(())
    }
}
