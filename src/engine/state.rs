//! State nodes and the canonical rule-table implementation.

use crate::core::{Action, Permission, Status, TransitionContext};
use crate::engine::error::{InvalidAction, Messages, SideEffectError, TransitionError};
use crate::engine::registry::StatusRegistry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Entry side-effect hook carried by a rule state.
///
/// Receives the driven object and the machine's transition context; runs
/// after the machine has committed the destination status.
pub type EnterHook<O, S, A> =
    Box<dyn Fn(&mut O, &TransitionContext<S, A>) -> Result<(), SideEffectError> + Send + Sync>;

/// One rule-table entry: a destination status plus an optional permission.
///
/// Rules are declarative. Nothing moves when a rule is built; the machine
/// consults it during [`StateNode::next`].
pub struct Rule<S: Status> {
    destination: S,
    permission: Option<Arc<dyn Permission>>,
}

impl<S: Status> Rule<S> {
    /// Ungated rule leading to `destination`.
    pub fn to(destination: S) -> Self {
        Self {
            destination,
            permission: None,
        }
    }

    /// Gate this rule with a permission.
    pub fn guarded(mut self, permission: impl Permission + 'static) -> Self {
        self.permission = Some(Arc::new(permission));
        self
    }

    /// Gate this rule with an already-shared permission.
    pub fn guarded_shared(mut self, permission: Arc<dyn Permission>) -> Self {
        self.permission = Some(permission);
        self
    }

    /// The destination status this rule names.
    pub fn destination(&self) -> &S {
        &self.destination
    }

    /// The permission gating this rule, if any.
    pub fn permission(&self) -> Option<&dyn Permission> {
        self.permission.as_deref()
    }
}

impl<S: Status> Clone for Rule<S> {
    fn clone(&self) -> Self {
        Self {
            destination: self.destination.clone(),
            permission: self.permission.clone(),
        }
    }
}

/// Behavior of one state: resolve actions, enumerate them, run entry work.
///
/// The machine drives whole transitions; a state node only answers what a
/// given action means from here. The canonical implementation is the
/// rule-table-driven [`RuleState`], but anything implementing this trait can
/// be registered, so states with computed destinations plug into the same
/// machine.
pub trait StateNode<O: 'static, S: Status, A: Action>: Send + Sync {
    /// The status identifying this node.
    fn status(&self) -> &S;

    /// Resolve `action` into the destination state.
    ///
    /// Resolution checks, in order: that the action is recognized, that the
    /// matched rule's permission (if any) admits the actor, and that the
    /// destination status is registered. Implementations must not mutate
    /// anything; the machine performs the actual move.
    fn next<'r>(
        &self,
        action: &A,
        registry: &'r StatusRegistry<O, S, A>,
        messages: &Messages,
    ) -> Result<&'r dyn StateNode<O, S, A>, TransitionError<S, A>>;

    /// Actions this state can perform.
    ///
    /// With `ignore_permissions` set every known action is returned;
    /// otherwise an action whose permission currently denies is left out.
    fn available_actions(&self, ignore_permissions: bool) -> HashSet<A>;

    /// Actor identifiers to notify after this state is entered.
    fn actors(&self) -> &[String] {
        &[]
    }

    /// Entry side effect, run by the machine after committing this status.
    ///
    /// No-op by default.
    fn side_effect(
        &self,
        obj: &mut O,
        context: &TransitionContext<S, A>,
    ) -> Result<(), SideEffectError> {
        let _ = (obj, context);
        Ok(())
    }
}

/// Rule-table-driven state.
///
/// Holds a map from action to [`Rule`], an optional entry hook and the list
/// of actors to notify on entry. Instances are immutable once built; all
/// per-transition data reaches the hook through the machine's
/// [`TransitionContext`].
///
/// Built with [`RuleStateBuilder`](crate::RuleStateBuilder).
pub struct RuleState<O: 'static, S: Status, A: Action> {
    status: S,
    rules: HashMap<A, Rule<S>>,
    actors: Vec<String>,
    on_enter: Option<EnterHook<O, S, A>>,
}

impl<O: 'static, S: Status, A: Action> RuleState<O, S, A> {
    pub(crate) fn from_parts(
        status: S,
        rules: HashMap<A, Rule<S>>,
        actors: Vec<String>,
        on_enter: Option<EnterHook<O, S, A>>,
    ) -> Self {
        Self {
            status,
            rules,
            actors,
            on_enter,
        }
    }

    /// The rule registered for `action`, if any.
    pub fn rule(&self, action: &A) -> Option<&Rule<S>> {
        self.rules.get(action)
    }
}

impl<O: 'static, S: Status, A: Action> StateNode<O, S, A> for RuleState<O, S, A> {
    fn status(&self) -> &S {
        &self.status
    }

    fn next<'r>(
        &self,
        action: &A,
        registry: &'r StatusRegistry<O, S, A>,
        messages: &Messages,
    ) -> Result<&'r dyn StateNode<O, S, A>, TransitionError<S, A>> {
        let Some(rule) = self.rules.get(action) else {
            return Err(
                InvalidAction::unknown_action(self.status.clone(), action.clone(), messages)
                    .into(),
            );
        };

        if let Some(permission) = rule.permission() {
            permission.test()?;
        }

        match registry.get(rule.destination()) {
            Some(destination) => Ok(destination),
            None => Err(InvalidAction::unregistered_destination(
                self.status.clone(),
                action.clone(),
                rule.destination().clone(),
                messages,
            )
            .into()),
        }
    }

    fn available_actions(&self, ignore_permissions: bool) -> HashSet<A> {
        self.rules
            .iter()
            .filter(|(_, rule)| {
                ignore_permissions || rule.permission().is_none_or(|p| p.can())
            })
            .map(|(action, _)| action.clone())
            .collect()
    }

    fn actors(&self) -> &[String] {
        &self.actors
    }

    fn side_effect(
        &self,
        obj: &mut O,
        context: &TransitionContext<S, A>,
    ) -> Result<(), SideEffectError> {
        match &self.on_enter {
            Some(hook) => hook(obj, context),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::RuleStateBuilder;
    use crate::core::Guard;
    use crate::engine::error::InvalidActionCause;

    type Node = RuleState<(), String, String>;

    fn status(s: &str) -> String {
        s.to_string()
    }

    fn registry_with(states: Vec<Node>) -> StatusRegistry<(), String, String> {
        let mut registry = StatusRegistry::new();
        for state in states {
            registry.register(state).unwrap();
        }
        registry
    }

    fn plain_state(from: &str, action: &str, to: &str) -> Node {
        RuleStateBuilder::new(status(from))
            .rule(status(action), status(to))
            .build()
            .unwrap()
    }

    #[test]
    fn resolves_known_action_to_registered_destination() {
        let registry = registry_with(vec![
            plain_state("green", "turn_yellow", "yellow"),
            plain_state("yellow", "turn_red", "red"),
        ]);
        let messages = Messages::default();

        let green = registry.get(&status("green")).unwrap();
        let next = green
            .next(&status("turn_yellow"), &registry, &messages)
            .unwrap();
        assert_eq!(next.status(), &status("yellow"));
    }

    #[test]
    fn unknown_action_is_invalid() {
        let registry = registry_with(vec![plain_state("green", "turn_yellow", "yellow")]);
        let messages = Messages::default();

        let green = registry.get(&status("green")).unwrap();
        let err = green
            .next(&status("explode"), &registry, &messages)
            .err()
            .unwrap();
        let invalid = err.as_invalid_action().expect("should be invalid-action");
        assert_eq!(invalid.cause, InvalidActionCause::UnknownAction);
        assert_eq!(
            invalid.description,
            "green does not allow the explode operation"
        );
    }

    #[test]
    fn unregistered_destination_is_invalid() {
        // "yellow" is never registered.
        let registry = registry_with(vec![plain_state("green", "turn_yellow", "yellow")]);
        let messages = Messages::default();

        let green = registry.get(&status("green")).unwrap();
        let err = green
            .next(&status("turn_yellow"), &registry, &messages)
            .err()
            .unwrap();
        let invalid = err.as_invalid_action().expect("should be invalid-action");
        assert_eq!(
            invalid.cause,
            InvalidActionCause::UnregisteredDestination {
                destination: status("yellow")
            }
        );
    }

    #[test]
    fn denied_permission_blocks_resolution() {
        let gated = RuleStateBuilder::new(status("draft"))
            .guarded_rule(
                status("approve"),
                status("approved"),
                Guard::deny("not a manager"),
            )
            .build()
            .unwrap();
        let registry = registry_with(vec![gated, plain_state("approved", "archive", "archived")]);
        let messages = Messages::default();

        let draft = registry.get(&status("draft")).unwrap();
        let err = draft
            .next(&status("approve"), &registry, &messages)
            .err()
            .unwrap();
        assert!(matches!(err, TransitionError::PermissionDenied(_)));
    }

    #[test]
    fn permission_is_checked_before_destination_registration() {
        // The rule is both gated shut and aimed at an unregistered status;
        // the permission verdict wins.
        let gated = RuleStateBuilder::new(status("draft"))
            .guarded_rule(status("approve"), status("nowhere"), Guard::deny("no"))
            .build()
            .unwrap();
        let registry = registry_with(vec![gated]);
        let messages = Messages::default();

        let draft = registry.get(&status("draft")).unwrap();
        let err = draft
            .next(&status("approve"), &registry, &messages)
            .err()
            .unwrap();
        assert!(matches!(err, TransitionError::PermissionDenied(_)));
    }

    #[test]
    fn available_actions_reflect_permission_state() {
        let state: Node = RuleStateBuilder::new(status("draft"))
            .rule(status("save"), status("draft"))
            .guarded_rule(status("approve"), status("approved"), Guard::deny("no"))
            .guarded_rule(status("comment"), status("draft"), Guard::allow())
            .build()
            .unwrap();

        let all = state.available_actions(true);
        assert_eq!(all.len(), 3);

        let permitted = state.available_actions(false);
        assert!(permitted.contains(&status("save")));
        assert!(permitted.contains(&status("comment")));
        assert!(!permitted.contains(&status("approve")));
    }

    #[test]
    fn available_actions_is_read_only() {
        let state: Node = plain_state("green", "turn_yellow", "yellow");
        let first = state.available_actions(false);
        let second = state.available_actions(false);
        assert_eq!(first, second);
    }

    #[test]
    fn shared_permission_gates_multiple_rules() {
        let weekday: Arc<dyn Permission> = Arc::new(Guard::deny("weekend"));
        let state: Node = RuleStateBuilder::new(status("open"))
            .rule_entry(
                status("trade"),
                Rule::to(status("open")).guarded_shared(Arc::clone(&weekday)),
            )
            .rule_entry(
                status("close"),
                Rule::to(status("closed")).guarded_shared(weekday),
            )
            .build()
            .unwrap();

        assert!(state.available_actions(false).is_empty());
        assert_eq!(state.available_actions(true).len(), 2);
    }

    #[test]
    fn default_side_effect_is_a_no_op() {
        let state: Node = plain_state("green", "turn_yellow", "yellow");
        let mut obj = ();
        let context = TransitionContext::default();
        assert!(state.side_effect(&mut obj, &context).is_ok());
    }

    #[test]
    fn rule_lookup_exposes_destination() {
        let state: Node = plain_state("green", "turn_yellow", "yellow");
        let rule = state.rule(&status("turn_yellow")).unwrap();
        assert_eq!(rule.destination(), &status("yellow"));
        assert!(rule.permission().is_none());
        assert!(state.rule(&status("missing")).is_none());
    }
}
