//! Fluent builder for rule-table states.

use crate::builder::error::BuildError;
use crate::core::{Action, Permission, Status, TransitionContext};
use crate::engine::{EnterHook, Rule, RuleState, SideEffectError};
use std::collections::HashMap;

/// Builder for [`RuleState`].
///
/// Rules are declared one per action; declaring the same action twice is a
/// build error. Everything else (actors, the entry hook) is optional.
///
/// # Example
///
/// ```
/// use lite_sm::{Guard, RuleStateBuilder};
///
/// let state = RuleStateBuilder::new("review")
///     .rule("reject", "draft")
///     .guarded_rule("publish", "published", Guard::new("editors only", || true))
///     .actor("editor-on-call")
///     .build()
///     .unwrap();
/// # let _: lite_sm::RuleState<(), &str, &str> = state;
/// ```
pub struct RuleStateBuilder<O: 'static, S: Status, A: Action> {
    status: S,
    rules: Vec<(A, Rule<S>)>,
    actors: Vec<String>,
    on_enter: Option<EnterHook<O, S, A>>,
}

impl<O: 'static, S: Status, A: Action> RuleStateBuilder<O, S, A> {
    /// Builder for the state identified by `status`.
    pub fn new(status: S) -> Self {
        Self {
            status,
            rules: Vec::new(),
            actors: Vec::new(),
            on_enter: None,
        }
    }

    /// Declare an ungated rule: `action` leads to `destination`.
    pub fn rule(mut self, action: A, destination: S) -> Self {
        self.rules.push((action, Rule::to(destination)));
        self
    }

    /// Declare a permission-gated rule.
    pub fn guarded_rule(
        mut self,
        action: A,
        destination: S,
        permission: impl Permission + 'static,
    ) -> Self {
        self.rules
            .push((action, Rule::to(destination).guarded(permission)));
        self
    }

    /// Declare a rule built elsewhere.
    pub fn rule_entry(mut self, action: A, rule: Rule<S>) -> Self {
        self.rules.push((action, rule));
        self
    }

    /// Add an actor id to notify after this state is entered.
    pub fn actor(mut self, actor: impl Into<String>) -> Self {
        self.actors.push(actor.into());
        self
    }

    /// Set the entry side effect, run after the machine commits this status.
    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut O, &TransitionContext<S, A>) -> Result<(), SideEffectError>
            + Send
            + Sync
            + 'static,
    {
        self.on_enter = Some(Box::new(hook));
        self
    }

    /// Build the state, rejecting duplicate action declarations.
    pub fn build(self) -> Result<RuleState<O, S, A>, BuildError<S, A>> {
        let mut rules = HashMap::with_capacity(self.rules.len());
        for (action, rule) in self.rules {
            if rules.insert(action.clone(), rule).is_some() {
                return Err(BuildError::DuplicateRule {
                    status: self.status.clone(),
                    action,
                });
            }
        }
        Ok(RuleState::from_parts(
            self.status,
            rules,
            self.actors,
            self.on_enter,
        ))
    }
}

impl<O: 'static, S: Status, A: Action> RuleState<O, S, A> {
    /// Start building a rule state for `status`.
    pub fn builder(status: S) -> RuleStateBuilder<O, S, A> {
        RuleStateBuilder::new(status)
    }
}
