//! The machine orchestrating transitions over a driven object.

use crate::core::{Action, Status, TransitionContext};
use crate::engine::error::{Messages, SetupError, TransitionError};
use crate::engine::log::{TransitionLog, TransitionRecord};
use crate::engine::registry::StatusRegistry;
use chrono::Utc;
use std::collections::HashSet;

/// Hook invoked with each actor id registered on a freshly entered state.
pub type NotifyHook = Box<dyn FnMut(&str) + Send>;

/// Drives one owned domain object through registered states.
///
/// The machine owns the object, the [`StatusRegistry`], the current status
/// and the [`TransitionContext`]; state nodes stay immutable rule tables.
/// Most embedders assemble machines through
/// [`StateMachineBuilder`](crate::StateMachineBuilder), which registers every
/// state and sets the initial status in one fluent pass. Manual wiring via
/// [`new`](StateMachine::new) plus [`set_initial_state`] is for embedders
/// that build registries dynamically.
///
/// Driving an uninitialized machine is a programming error and panics; all
/// runtime conditions (unknown actions, denied permissions, failed side
/// effects) surface as [`TransitionError`] instead.
///
/// [`set_initial_state`]: StateMachine::set_initial_state
pub struct StateMachine<O: 'static, S: Status, A: Action> {
    obj: O,
    registry: StatusRegistry<O, S, A>,
    current: Option<S>,
    context: TransitionContext<S, A>,
    logger: Option<Box<dyn TransitionLog<S, A>>>,
    messages: Messages,
    notify_hook: Option<NotifyHook>,
    object_label: Option<String>,
}

impl<O: 'static, S: Status, A: Action> StateMachine<O, S, A> {
    /// Machine over `obj` with an explicitly built registry.
    ///
    /// The machine starts uninitialized; call
    /// [`set_initial_state`](StateMachine::set_initial_state) before driving
    /// it.
    pub fn new(obj: O, registry: StatusRegistry<O, S, A>) -> Self {
        Self {
            obj,
            registry,
            current: None,
            context: TransitionContext::default(),
            logger: None,
            messages: Messages::default(),
            notify_hook: None,
            object_label: None,
        }
    }

    /// Set the status the machine starts in.
    ///
    /// Callable exactly once, and only with a registered status.
    pub fn set_initial_state(&mut self, status: S) -> Result<(), SetupError<S>> {
        if self.current.is_some() {
            return Err(SetupError::AlreadyInitialized);
        }
        if !self.registry.contains(&status) {
            return Err(SetupError::UnregisteredInitial(status));
        }
        self.current = Some(status);
        Ok(())
    }

    /// Attach a log sink receiving one record per committed transition.
    pub fn set_logger(&mut self, logger: impl TransitionLog<S, A> + 'static) {
        self.install_logger(Box::new(logger));
    }

    pub(crate) fn install_logger(&mut self, logger: Box<dyn TransitionLog<S, A>>) {
        self.logger = Some(logger);
    }

    /// Replace the message templates.
    pub fn set_messages(&mut self, messages: Messages) {
        self.messages = messages;
    }

    /// Hook receiving each actor id registered on a freshly entered state.
    pub fn set_notify_hook(&mut self, hook: impl FnMut(&str) + Send + 'static) {
        self.install_notify_hook(Box::new(hook));
    }

    pub(crate) fn install_notify_hook(&mut self, hook: NotifyHook) {
        self.notify_hook = Some(hook);
    }

    /// Display identity of the driven object, used in log records.
    pub fn set_object_label(&mut self, label: impl Into<String>) {
        self.object_label = Some(label.into());
    }

    /// Drive the machine with `action`, attributed to `actor`.
    ///
    /// A transition runs in a fixed order:
    ///
    /// 1. the departing status and the action are recorded in the context
    ///    (bookkeeping that persists even when the call fails);
    /// 2. the action is resolved through the current state: an unknown
    ///    action, a denied permission or an unregistered destination fails
    ///    here and the current status is untouched;
    /// 3. the destination status is committed;
    /// 4. `actor` is recorded in the context;
    /// 5. the destination's entry side effect runs against the owned object.
    ///    A failure propagates with the machine already advanced, so the
    ///    caller observing [`TransitionError::SideEffect`] knows the status
    ///    changed but the entry work did not complete;
    /// 6. the notify hook fires once per actor registered on the
    ///    destination, in declaration order;
    /// 7. one log record is emitted, if a sink is configured. Failed
    ///    attempts emit nothing.
    ///
    /// # Panics
    ///
    /// Panics if called before [`set_initial_state`](StateMachine::set_initial_state).
    pub fn next(&mut self, action: A, actor: &str) -> Result<(), TransitionError<S, A>> {
        let current = self
            .current
            .clone()
            .expect("set_initial_state must be called before next");

        self.context.last_status = Some(current.clone());
        self.context.last_action = Some(action.clone());

        let current_node = self
            .registry
            .get(&current)
            .expect("current status is always registered");
        let destination = current_node.next(&action, &self.registry, &self.messages)?;
        let destination_status = destination.status().clone();
        let to_notify = destination.actors().to_vec();

        self.current = Some(destination_status.clone());
        self.context.actor = Some(actor.to_string());

        destination.side_effect(&mut self.obj, &self.context)?;

        for actor_id in &to_notify {
            self.notify_next_actor(actor_id);
        }

        if let Some(logger) = &self.logger {
            let record = TransitionRecord {
                object: self.object_label.clone(),
                actor: actor.to_string(),
                from: current,
                to: destination_status,
                action,
                timestamp: Utc::now(),
            };
            logger.info(&record.message(), &record);
        }

        Ok(())
    }

    /// Actions available from the current state.
    ///
    /// With `ignore_permissions` unset, actions whose permission currently
    /// denies are filtered out. Pure query; the machine does not move.
    ///
    /// # Panics
    ///
    /// Panics if called before [`set_initial_state`](StateMachine::set_initial_state).
    pub fn available_actions(&self, ignore_permissions: bool) -> HashSet<A> {
        let current = self
            .current
            .as_ref()
            .expect("set_initial_state must be called before available_actions");
        self.registry
            .get(current)
            .expect("current status is always registered")
            .available_actions(ignore_permissions)
    }

    /// Invoke the notify hook for one actor id. No-op when no hook is set.
    pub fn notify_next_actor(&mut self, actor: &str) {
        if let Some(hook) = self.notify_hook.as_mut() {
            hook(actor);
        }
    }

    /// Render the configured invalid-action template for `action` rejected
    /// in `status`.
    pub fn describe_invalid_action(&self, action: &A, status: &S) -> String {
        self.messages.describe_invalid_action(status, action)
    }

    /// Status the machine currently occupies, once initialized.
    pub fn current_status(&self) -> Option<&S> {
        self.current.as_ref()
    }

    /// Status occupied before the most recent transition attempt.
    pub fn last_status(&self) -> Option<&S> {
        self.context.last_status()
    }

    /// Action of the most recent transition attempt.
    pub fn last_action(&self) -> Option<&A> {
        self.context.last_action()
    }

    /// The machine-owned transition context.
    pub fn context(&self) -> &TransitionContext<S, A> {
        &self.context
    }

    /// The driven object.
    pub fn obj(&self) -> &O {
        &self.obj
    }

    /// Mutable access to the driven object.
    pub fn obj_mut(&mut self) -> &mut O {
        &mut self.obj
    }

    /// Consume the machine and hand the driven object back.
    pub fn into_obj(self) -> O {
        self.obj
    }

    /// The status registry.
    pub fn registry(&self) -> &StatusRegistry<O, S, A> {
        &self.registry
    }
}
