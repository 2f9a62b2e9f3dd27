//! The transition engine.
//!
//! This module contains the runtime half of the crate:
//! - `StateNode` and the rule-table-driven `RuleState`
//! - The explicit `StatusRegistry` mapping statuses to nodes
//! - `StateMachine`, which owns the driven object and runs transitions
//! - Transition records, log sinks and the error taxonomy
//!
//! States describe, the machine moves: nodes resolve an action into a
//! destination and the machine performs the commit, side effect,
//! notifications and logging around it.

mod error;
mod log;
mod machine;
mod registry;
mod state;

pub use error::{
    InvalidAction, InvalidActionCause, Messages, SetupError, SideEffectError, TransitionError,
    INVALID_ACTION_CODE, INVALID_ACTION_NAME,
};
pub use log::{TracingLog, TransitionLog, TransitionRecord};
pub use machine::{NotifyHook, StateMachine};
pub use registry::StatusRegistry;
pub use state::{EnterHook, Rule, RuleState, StateNode};
