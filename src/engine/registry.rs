//! Explicit mapping from status to state node.

use crate::core::{Action, Status};
use crate::engine::error::SetupError;
use crate::engine::state::StateNode;
use std::collections::HashMap;

/// Registry of every status a machine knows about.
///
/// Populated explicitly before the machine runs its first transition, either
/// by hand or through [`StateMachineBuilder`](crate::StateMachineBuilder).
/// Duplicate statuses are rejected at registration, so wiring mistakes
/// surface during construction rather than mid-transition.
pub struct StatusRegistry<O: 'static, S: Status, A: Action> {
    states: HashMap<S, Box<dyn StateNode<O, S, A>>>,
}

impl<O: 'static, S: Status, A: Action> StatusRegistry<O, S, A> {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    /// Register a state node under its own status.
    pub fn register(&mut self, state: impl StateNode<O, S, A> + 'static) -> Result<(), SetupError<S>> {
        self.register_boxed(Box::new(state))
    }

    /// Register an already-boxed state node.
    pub fn register_boxed(
        &mut self,
        state: Box<dyn StateNode<O, S, A>>,
    ) -> Result<(), SetupError<S>> {
        let status = state.status().clone();
        if self.states.contains_key(&status) {
            return Err(SetupError::DuplicateStatus(status));
        }
        self.states.insert(status, state);
        Ok(())
    }

    /// The node registered for `status`, if any.
    pub fn get(&self, status: &S) -> Option<&dyn StateNode<O, S, A>> {
        self.states.get(status).map(|state| state.as_ref())
    }

    /// Whether `status` has a registered node.
    pub fn contains(&self, status: &S) -> bool {
        self.states.contains_key(status)
    }

    /// Number of registered statuses.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether nothing is registered yet.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterate over the registered statuses, in no particular order.
    pub fn statuses(&self) -> impl Iterator<Item = &S> {
        self.states.keys()
    }
}

impl<O: 'static, S: Status, A: Action> Default for StatusRegistry<O, S, A> {
    fn default() -> Self {
        Self::new()
    }
}
