//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and macros for declaring states and
//! wiring machines with minimal boilerplate while keeping validation at
//! build time.

pub mod error;
pub mod machine;
pub mod macros;
pub mod state;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use state::RuleStateBuilder;

use crate::core::{Action, Permission, Status};
use crate::engine::RuleState;

/// Create a state with a single unconditional rule.
///
/// # Example
///
/// ```
/// use lite_sm::builder::simple_state;
/// use lite_sm::ident_enum;
///
/// ident_enum! {
///     enum Color {
///         Green => "green",
///         Yellow => "yellow",
///     }
/// }
///
/// ident_enum! {
///     enum Turn {
///         TurnYellow => "turn_yellow",
///     }
/// }
///
/// let green = simple_state::<(), _, _>(Color::Green, Turn::TurnYellow, Color::Yellow);
/// ```
pub fn simple_state<O, S, A>(status: S, action: A, destination: S) -> RuleState<O, S, A>
where
    O: 'static,
    S: Status,
    A: Action,
{
    RuleStateBuilder::new(status)
        .rule(action, destination)
        .build()
        .expect("Single-rule state should always build")
}

/// Create a state whose single rule is gated by a permission.
///
/// # Example
///
/// ```
/// use lite_sm::builder::guarded_state;
/// use lite_sm::Guard;
///
/// let open = guarded_state::<(), _, _>(
///     "open",
///     "close",
///     "closed",
///     Guard::new("only during trading hours", || true),
/// );
/// ```
pub fn guarded_state<O, S, A>(
    status: S,
    action: A,
    destination: S,
    permission: impl Permission + 'static,
) -> RuleState<O, S, A>
where
    O: 'static,
    S: Status,
    A: Action,
{
    RuleStateBuilder::new(status)
        .guarded_rule(action, destination, permission)
        .build()
        .expect("Single-rule state should always build")
}
