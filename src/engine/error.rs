//! Error types and message templates for the transition engine.

use crate::core::{Action, PermissionDenied, Status};
use std::fmt::Display;
use thiserror::Error;

/// Stable numeric code carried by every invalid-action error.
pub const INVALID_ACTION_CODE: u32 = 30004;

/// Stable symbolic name carried by every invalid-action error.
pub const INVALID_ACTION_NAME: &str = "invalid-action";

/// Configurable templates for engine-produced messages.
///
/// The invalid-action template understands two placeholders, `{status}` and
/// `{action}`, substituted with the display form of the rejecting status and
/// the rejected action. Swapping the template localizes every invalid-action
/// description the machine produces.
///
/// # Example
///
/// ```
/// use lite_sm::Messages;
///
/// let messages = Messages::default()
///     .invalid_action_template("cannot {action} while {status}");
/// assert_eq!(
///     messages.describe_invalid_action(&"closed", &"ship"),
///     "cannot ship while closed"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Messages {
    invalid_action: String,
}

impl Messages {
    /// Default English invalid-action template.
    pub const DEFAULT_INVALID_ACTION: &'static str =
        "{status} does not allow the {action} operation";

    /// Replace the invalid-action template.
    pub fn invalid_action_template(mut self, template: impl Into<String>) -> Self {
        self.invalid_action = template.into();
        self
    }

    /// Render the invalid-action description for a status/action pair.
    ///
    /// Placeholders are substituted in a single pass over the template, so
    /// identifier text that happens to contain `{status}` or `{action}` is
    /// emitted verbatim rather than re-scanned.
    pub fn describe_invalid_action(&self, status: &impl Display, action: &impl Display) -> String {
        let status = status.to_string();
        let action = action.to_string();
        let template = self.invalid_action.as_str();

        let mut out = String::with_capacity(template.len() + status.len() + action.len());
        let mut rest = template;
        loop {
            let (at, placeholder, value) = match (rest.find("{status}"), rest.find("{action}")) {
                (Some(s), Some(a)) if s < a => (s, "{status}", status.as_str()),
                (Some(s), None) => (s, "{status}", status.as_str()),
                (_, Some(a)) => (a, "{action}", action.as_str()),
                (None, None) => break,
            };
            out.push_str(&rest[..at]);
            out.push_str(value);
            rest = &rest[at + placeholder.len()..];
        }
        out.push_str(rest);
        out
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            invalid_action: Self::DEFAULT_INVALID_ACTION.to_string(),
        }
    }
}

/// What specifically made an action invalid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidActionCause<S: Status> {
    /// The action is not in the current state's rule table.
    UnknownAction,
    /// A rule matched but names a destination no state is registered for.
    UnregisteredDestination {
        /// The destination the rule names.
        destination: S,
    },
}

/// An action the current state cannot perform.
///
/// One externally observable kind covers both an unknown action and a rule
/// whose destination is unregistered; callers that need to tell them apart
/// inspect [`cause`](InvalidAction::cause). The code and name are stable and
/// meant for programmatic handling, the description for humans.
#[derive(Clone, Debug, Error)]
#[error("{code} {name}: {description}", code = INVALID_ACTION_CODE, name = INVALID_ACTION_NAME)]
pub struct InvalidAction<S: Status, A: Action> {
    /// Status that rejected the action.
    pub status: S,
    /// The rejected action.
    pub action: A,
    /// What specifically went wrong.
    pub cause: InvalidActionCause<S>,
    /// Human-readable description rendered from the configured template.
    pub description: String,
}

impl<S: Status, A: Action> InvalidAction<S, A> {
    /// Error for an action missing from the state's rule table.
    pub fn unknown_action(status: S, action: A, messages: &Messages) -> Self {
        let description = messages.describe_invalid_action(&status, &action);
        Self {
            status,
            action,
            cause: InvalidActionCause::UnknownAction,
            description,
        }
    }

    /// Error for a rule whose destination has no registered state.
    pub fn unregistered_destination(
        status: S,
        action: A,
        destination: S,
        messages: &Messages,
    ) -> Self {
        let description = messages.describe_invalid_action(&status, &action);
        Self {
            status,
            action,
            cause: InvalidActionCause::UnregisteredDestination { destination },
            description,
        }
    }

    /// Stable numeric code, [`INVALID_ACTION_CODE`].
    pub fn code(&self) -> u32 {
        INVALID_ACTION_CODE
    }

    /// Stable symbolic name, [`INVALID_ACTION_NAME`].
    pub fn name(&self) -> &'static str {
        INVALID_ACTION_NAME
    }
}

/// Failure raised inside a state's entry side effect.
///
/// Wraps the embedder's error untouched. By the time a side effect runs the
/// machine has already committed the destination status, so observing this
/// error means the machine advanced but the entry work did not complete.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct SideEffectError(Box<dyn std::error::Error + Send + Sync>);

impl SideEffectError {
    /// Wrap any error or message raised by an entry hook.
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(err.into())
    }

    /// Consume the wrapper and hand the underlying error back.
    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync> {
        self.0
    }
}

/// Error surfaced by [`StateMachine::next`](crate::StateMachine::next).
///
/// Every variant forwards the underlying error unchanged; the engine adds no
/// wrapping of its own.
#[derive(Debug, Error)]
pub enum TransitionError<S: Status, A: Action> {
    /// The current state cannot perform the action.
    #[error(transparent)]
    InvalidAction(#[from] InvalidAction<S, A>),

    /// The matched rule's permission refused the actor.
    #[error(transparent)]
    PermissionDenied(#[from] PermissionDenied),

    /// The destination's entry side effect failed after the commit point.
    #[error(transparent)]
    SideEffect(#[from] SideEffectError),
}

impl<S: Status, A: Action> TransitionError<S, A> {
    /// The invalid-action details, when that is what this error is.
    pub fn as_invalid_action(&self) -> Option<&InvalidAction<S, A>> {
        match self {
            Self::InvalidAction(err) => Some(err),
            _ => None,
        }
    }
}

/// Wiring errors raised while assembling a machine by hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError<S: Status> {
    /// A state with this status is already registered.
    #[error("a state for status {0} is already registered")]
    DuplicateStatus(S),

    /// The requested initial status has no registered state.
    #[error("initial status {0} is not registered")]
    UnregisteredInitial(S),

    /// The initial status was already set.
    #[error("initial status is already set")]
    AlreadyInitialized,
}
