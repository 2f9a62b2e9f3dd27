//! Machine-owned context describing the transition in flight.

use crate::core::ident::{Action, Status};

/// Bookkeeping about the most recent transition attempt.
///
/// Owned by the machine and handed by reference to entry side effects, so
/// state nodes stay immutable rule tables while hooks still see where the
/// machine came from and who drove it.
///
/// `last_status` and `last_action` are recorded before a transition is
/// resolved and are not rolled back when the attempt fails; after a failed
/// `next` call they describe the rejected attempt. `actor` is recorded only
/// once the destination is committed, so it always names the actor of the
/// last transition that actually happened.
#[derive(Clone, Debug)]
pub struct TransitionContext<S: Status, A: Action> {
    pub(crate) last_status: Option<S>,
    pub(crate) last_action: Option<A>,
    pub(crate) actor: Option<String>,
}

impl<S: Status, A: Action> TransitionContext<S, A> {
    /// Status occupied when the most recent transition was attempted.
    pub fn last_status(&self) -> Option<&S> {
        self.last_status.as_ref()
    }

    /// Action of the most recent transition attempt.
    pub fn last_action(&self) -> Option<&A> {
        self.last_action.as_ref()
    }

    /// Actor of the most recent committed transition.
    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }
}

impl<S: Status, A: Action> Default for TransitionContext<S, A> {
    fn default() -> Self {
        Self {
            last_status: None,
            last_action: None,
            actor: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let context: TransitionContext<String, String> = TransitionContext::default();
        assert_eq!(context.last_status(), None);
        assert_eq!(context.last_action(), None);
        assert_eq!(context.actor(), None);
    }

    #[test]
    fn accessors_borrow_recorded_values() {
        let context = TransitionContext::<String, String> {
            last_status: Some("green".to_string()),
            last_action: Some("turn_yellow".to_string()),
            actor: Some("operator".to_string()),
        };
        assert_eq!(context.last_status().map(String::as_str), Some("green"));
        assert_eq!(
            context.last_action().map(String::as_str),
            Some("turn_yellow")
        );
        assert_eq!(context.actor(), Some("operator"));
    }
}
