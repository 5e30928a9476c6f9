//! Rule chains and their commands.
//!
//! A [`Chain`] is the ordered rule list of one scope plus a set of
//! commands. Commands are flags resolved when the chain runs, so their
//! position relative to the rules does not matter. Applying a command twice
//! is recorded and rejected when the specification is built.

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;
use verity_message::ValidationError;

use crate::error::{ValidatorError, ValidatorResult};
use crate::foundation::{
    ErrorsCollection, ExecutionContext, Rule, RuleKind, Subject, ValidationStrategy,
};

// ============================================================================
// COMMAND
// ============================================================================

/// A chain-level command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Absent values skip the chain instead of reporting the required error.
    Optional,
    /// Any failure collapses the chain's errors into one error.
    SingleError,
    /// Replaces the template of errors reported at the chain's node.
    WithMessage,
    /// Renders the member's errors under another key.
    Named,
}

impl Command {
    /// Stable name of the command.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Optional => "Optional",
            Self::SingleError => "SingleError",
            Self::WithMessage => "WithMessage",
            Self::Named => "Named",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
struct Commands {
    applied: SmallVec<[Command; 4]>,
    duplicates: SmallVec<[Command; 2]>,
    optional: bool,
    single_error: Option<ValidationError>,
    with_message: Option<Cow<'static, str>>,
    named: Option<String>,
}

impl Commands {
    /// Records a command. Returns false when it was already applied.
    fn apply(&mut self, command: Command) -> bool {
        if self.applied.contains(&command) {
            self.duplicates.push(command);
            return false;
        }
        self.applied.push(command);
        true
    }
}

// ============================================================================
// CHAIN
// ============================================================================

/// Ordered rules and commands for values of type `V` in models of type `M`.
///
/// # Examples
///
/// ```rust,ignore
/// let password: Chain<str, User> = Chain::new()
///     .rule(not_empty())
///     .rule(min_length(8))
///     .single_error("Password is too weak")
///     .optional();
/// ```
pub struct Chain<V: ?Sized, M> {
    rules: Vec<Rule<V, M>>,
    commands: Commands,
}

impl<V: ?Sized, M> Chain<V, M> {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            commands: Commands::default(),
        }
    }

    /// Appends a rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule(mut self, rule: impl Into<Rule<V, M>>) -> Self {
        self.rules.push(rule.into());
        self
    }

    /// Lets the value be absent without an error.
    #[must_use = "builder methods must be chained or built"]
    pub fn optional(mut self) -> Self {
        if self.commands.apply(Command::Optional) {
            self.commands.optional = true;
        }
        self
    }

    /// Reports exactly `error` when any rule of the chain fails.
    #[must_use = "builder methods must be chained or built"]
    pub fn single_error(mut self, error: impl Into<ValidationError>) -> Self {
        if self.commands.apply(Command::SingleError) {
            self.commands.single_error = Some(error.into());
        }
        self
    }

    /// Replaces the template of every error the chain reports at its own
    /// node. Arguments are kept.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        if self.commands.apply(Command::WithMessage) {
            self.commands.with_message = Some(template.into());
        }
        self
    }

    /// Renders the member's errors under `name` instead of the member name.
    #[must_use = "builder methods must be chained or built"]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        if self.commands.apply(Command::Named) {
            self.commands.named = Some(name.into());
        }
        self
    }

    /// The rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule<V, M>] {
        &self.rules
    }

    /// Returns true if the chain has the Optional command.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.commands.optional
    }

    /// The name set with [`named`](Self::named).
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.commands.named.as_deref()
    }

    /// Returns true if `command` was applied.
    #[must_use]
    pub fn has_command(&self, command: Command) -> bool {
        self.commands.applied.contains(&command)
    }

    // ------------------------------------------------------------------------
    // BUILD-TIME CHECKS
    // ------------------------------------------------------------------------

    /// Rejects duplicate commands and checks nested chains.
    pub(crate) fn check(&self, scope: &str) -> ValidatorResult<()> {
        if let Some(&command) = self.commands.duplicates.first() {
            return Err(ValidatorError::DuplicateCommand {
                command,
                scope: scope.to_string(),
            });
        }
        self.rules.iter().try_for_each(|rule| rule.check(scope))
    }

    /// Rejects commands in `unsupported`.
    pub(crate) fn check_unsupported(
        &self,
        scope: &str,
        unsupported: &[Command],
    ) -> ValidatorResult<()> {
        match unsupported.iter().find(|c| self.has_command(**c)) {
            Some(&command) => Err(ValidatorError::CommandNotSupported {
                command,
                scope: scope.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Checks a chain nested in a collection or nullable rule.
    pub(crate) fn check_nested(&self, scope: &str) -> ValidatorResult<()> {
        self.check(scope)?;
        if self.has_command(Command::Named) {
            return Err(ValidatorError::NestedChainRenamed {
                scope: scope.to_string(),
            });
        }
        Ok(())
    }

    /// Checks a chain nested in a nullable rule.
    pub(crate) fn check_nullable(&self, scope: &str) -> ValidatorResult<()> {
        self.check_nested(scope)?;
        match self
            .rules
            .iter()
            .map(Rule::kind)
            .find(|kind| !matches!(kind, RuleKind::Valid | RuleKind::ValidRelative))
        {
            Some(rule) => Err(ValidatorError::DisallowedNullableRule {
                rule,
                scope: scope.to_string(),
            }),
            None => Ok(()),
        }
    }

    // ------------------------------------------------------------------------
    // EXECUTION
    // ------------------------------------------------------------------------

    /// Runs the chain for a value that may be absent.
    ///
    /// `Absent` reports the required error unless the chain is optional.
    /// `Forced` reports the required error (when `can_be_absent` and not
    /// optional) followed by the forced chain errors.
    pub(crate) fn execute_slot(
        &self,
        slot: Slot<'_, V, M>,
        can_be_absent: bool,
        cx: &ExecutionContext<'_>,
        depth: usize,
    ) -> ValidatorResult<ErrorsCollection> {
        match slot {
            Slot::Absent if self.is_optional() => Ok(ErrorsCollection::new()),
            Slot::Absent => Ok(ErrorsCollection::from_error(cx.required_error().clone())),
            Slot::Present(value, model) => {
                self.execute(Subject::Present { value, model }, cx, depth)
            }
            Slot::Forced => {
                let mut node = ErrorsCollection::new();
                if can_be_absent && !self.is_optional() {
                    node.add_error(cx.required_error().clone());
                }
                node.absorb(self.execute(Subject::Forced, cx, depth)?);
                Ok(node)
            }
        }
    }

    /// Runs the rules against a subject and applies SingleError, then
    /// WithMessage.
    pub(crate) fn execute(
        &self,
        subject: Subject<'_, V, M>,
        cx: &ExecutionContext<'_>,
        depth: usize,
    ) -> ValidatorResult<ErrorsCollection> {
        let fail_fast = cx.strategy() == ValidationStrategy::FailFast;
        let mut node = ErrorsCollection::new();
        let mut failed = false;

        for rule in &self.rules {
            if rule.execute(subject, cx, depth, &mut node)? {
                failed = true;
                if fail_fast {
                    break;
                }
            }
        }

        if failed && let Some(error) = &self.commands.single_error {
            node = ErrorsCollection::from_error(error.clone());
        }

        if let Some(template) = &self.commands.with_message {
            node.map_errors(|error| error.with_template(template.clone()));
        }

        Ok(node)
    }
}

impl<V: ?Sized, M> Default for Chain<V, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ?Sized, M> Clone for Chain<V, M> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            commands: self.commands.clone(),
        }
    }
}

impl<V: ?Sized, M> fmt::Debug for Chain<V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("rules", &self.rules)
            .field("commands", &self.commands.applied)
            .finish()
    }
}

/// A value slot as seen by a chain.
pub(crate) enum Slot<'a, V: ?Sized, M> {
    /// A present value and its model.
    Present(&'a V, &'a M),
    /// The value is missing.
    Absent,
    /// Force mode.
    Forced,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{SpecificationRegistry, ValidationOptions, ValidationOverrides, valid};
    use pretty_assertions::assert_eq;

    fn fails(template: &'static str) -> Rule<i32, ()> {
        valid(|_: &i32| false).with_error(template).into()
    }

    fn passes() -> Rule<i32, ()> {
        valid(|_: &i32| true).with_error("never").into()
    }

    fn run(chain: &Chain<i32, ()>, strategy: ValidationStrategy) -> Vec<String> {
        let options = ValidationOptions::default();
        let registry = SpecificationRegistry::new();
        let cx = ExecutionContext::new(
            &options,
            ValidationOverrides::new().strategy(strategy),
            &registry,
        );
        let subject = Subject::Present {
            value: &1,
            model: &(),
        };
        chain
            .execute(subject, &cx, 0)
            .expect("no fatal error")
            .errors()
            .iter()
            .map(|e| e.template().to_string())
            .collect()
    }

    #[test]
    fn test_complete_collects_every_failure() {
        let chain = Chain::new()
            .rule(fails("a"))
            .rule(passes())
            .rule(fails("b"));
        assert_eq!(run(&chain, ValidationStrategy::Complete), vec!["a", "b"]);
    }

    #[test]
    fn test_fail_fast_stops_at_first_failure() {
        let chain = Chain::new()
            .rule(passes())
            .rule(fails("a"))
            .rule(fails("b"));
        assert_eq!(run(&chain, ValidationStrategy::FailFast), vec!["a"]);
    }

    #[test]
    fn test_force_fails_every_rule() {
        let chain = Chain::new().rule(passes()).rule(passes());
        assert_eq!(run(&chain, ValidationStrategy::Force), vec!["never", "never"]);
    }

    #[test]
    fn test_single_error_is_order_independent() {
        let before = Chain::new()
            .single_error("summary")
            .rule(fails("a"))
            .rule(fails("b"));
        let after = Chain::new()
            .rule(fails("a"))
            .rule(fails("b"))
            .single_error("summary");

        assert_eq!(run(&before, ValidationStrategy::Complete), vec!["summary"]);
        assert_eq!(run(&after, ValidationStrategy::Complete), vec!["summary"]);
    }

    #[test]
    fn test_single_error_only_on_failure() {
        let chain = Chain::new().rule(passes()).single_error("summary");
        assert!(run(&chain, ValidationStrategy::Complete).is_empty());
    }

    #[test]
    fn test_with_message_applies_after_single_error() {
        let chain = Chain::new()
            .with_message("custom")
            .rule(fails("a"))
            .rule(fails("b"));
        assert_eq!(run(&chain, ValidationStrategy::Complete), vec!["custom", "custom"]);

        let summarized = chain.clone().single_error("summary");
        assert_eq!(run(&summarized, ValidationStrategy::Complete), vec!["custom"]);
    }

    #[test]
    fn test_duplicate_command_rejected_at_check() {
        let chain: Chain<i32, ()> = Chain::new().optional().rule(passes()).optional();
        assert_eq!(
            chain.check("Age"),
            Err(ValidatorError::DuplicateCommand {
                command: Command::Optional,
                scope: "Age".to_string(),
            })
        );
    }

    #[test]
    fn test_first_application_wins() {
        let chain: Chain<i32, ()> = Chain::new().named("First").named("Second");
        assert_eq!(chain.name(), Some("First"));
    }
}
