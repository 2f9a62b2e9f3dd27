//! Builder for wiring complete machines.

use crate::builder::error::BuildError;
use crate::core::{Action, Status};
use crate::engine::{
    Messages, NotifyHook, StateMachine, StateNode, StatusRegistry, TransitionLog,
};

/// Builder for constructing state machines with a fluent API.
///
/// Registers every state, sets the initial status and applies the optional
/// configuration (logger, templates, object label, notify hook) in one pass,
/// so a machine coming out of `build` is ready to drive.
pub struct StateMachineBuilder<O: 'static, S: Status, A: Action> {
    obj: O,
    states: Vec<Box<dyn StateNode<O, S, A>>>,
    initial: Option<S>,
    logger: Option<Box<dyn TransitionLog<S, A>>>,
    messages: Messages,
    notify_hook: Option<NotifyHook>,
    object_label: Option<String>,
}

impl<O: 'static, S: Status, A: Action> StateMachineBuilder<O, S, A> {
    /// Create a builder for a machine driving `obj`.
    pub fn new(obj: O) -> Self {
        Self {
            obj,
            states: Vec::new(),
            initial: None,
            logger: None,
            messages: Messages::default(),
            notify_hook: None,
            object_label: None,
        }
    }

    /// Register a state (a [`RuleState`](crate::RuleState) or any custom node).
    pub fn state(mut self, state: impl StateNode<O, S, A> + 'static) -> Self {
        self.states.push(Box::new(state));
        self
    }

    /// Register a pre-boxed state.
    pub fn boxed_state(mut self, state: Box<dyn StateNode<O, S, A>>) -> Self {
        self.states.push(state);
        self
    }

    /// Set the initial status (required).
    pub fn initial(mut self, status: S) -> Self {
        self.initial = Some(status);
        self
    }

    /// Attach a log sink receiving one record per committed transition.
    pub fn logger(mut self, logger: impl TransitionLog<S, A> + 'static) -> Self {
        self.logger = Some(Box::new(logger));
        self
    }

    /// Replace the message templates wholesale.
    pub fn messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Shorthand replacing only the invalid-action template.
    pub fn invalid_action_template(mut self, template: impl Into<String>) -> Self {
        self.messages = self.messages.invalid_action_template(template);
        self
    }

    /// Hook receiving each actor id registered on a freshly entered state.
    pub fn on_notify<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.notify_hook = Some(Box::new(hook));
        self
    }

    /// Display identity of the driven object, used in log records.
    pub fn object_label(mut self, label: impl Into<String>) -> Self {
        self.object_label = Some(label.into());
        self
    }

    /// Build the machine.
    /// Returns an error if required fields are missing or wiring clashes.
    pub fn build(self) -> Result<StateMachine<O, S, A>, BuildError<S, A>> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut registry = StatusRegistry::new();
        for state in self.states {
            registry.register_boxed(state)?;
        }

        let mut machine = StateMachine::new(self.obj, registry);
        machine.set_messages(self.messages);
        if let Some(label) = self.object_label {
            machine.set_object_label(label);
        }
        if let Some(logger) = self.logger {
            machine.install_logger(logger);
        }
        if let Some(hook) = self.notify_hook {
            machine.install_notify_hook(hook);
        }
        machine.set_initial_state(initial)?;

        Ok(machine)
    }
}
