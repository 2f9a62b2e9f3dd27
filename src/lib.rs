//! Lite SM: a lightweight, embeddable state machine engine
//!
//! Lite SM drives one owned domain object through a set of registered
//! states. States are immutable rule tables mapping actions to destination
//! statuses; the machine owns all mutation, so every move runs through the
//! same pipeline of permission checks, entry side effects, actor
//! notifications and audit logging.
//!
//! # Core Concepts
//!
//! - **Status and Action**: opaque identifiers via the `Status` and `Action`
//!   traits, satisfied by enums, strings and integers alike
//! - **Rule states**: per-state tables declaring which action leads where,
//!   optionally gated by a `Permission`
//! - **Machine**: owns the driven object, the status registry and the
//!   transition context; `next(action, actor)` is the only way to move
//! - **Audit logging**: one structured record per committed transition,
//!   delivered to any `TransitionLog` sink
//!
//! # Example
//!
//! ```rust
//! use lite_sm::{ident_enum, RuleStateBuilder, StateMachineBuilder};
//!
//! ident_enum! {
//!     enum Color {
//!         Red => "red",
//!         Yellow => "yellow",
//!         Green => "green",
//!     }
//! }
//!
//! ident_enum! {
//!     enum Turn {
//!         TurnRed => "turn_red",
//!         TurnYellow => "turn_yellow",
//!         TurnGreen => "turn_green",
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Light {
//!     color: String,
//! }
//!
//! let mut machine = StateMachineBuilder::new(Light::default())
//!     .state(
//!         RuleStateBuilder::new(Color::Green)
//!             .rule(Turn::TurnYellow, Color::Yellow)
//!             .build()
//!             .unwrap(),
//!     )
//!     .state(
//!         RuleStateBuilder::new(Color::Yellow)
//!             .rule(Turn::TurnRed, Color::Red)
//!             .on_enter(|light: &mut Light, _context| {
//!                 light.color = "yellow".to_string();
//!                 Ok(())
//!             })
//!             .build()
//!             .unwrap(),
//!     )
//!     .state(
//!         RuleStateBuilder::new(Color::Red)
//!             .rule(Turn::TurnGreen, Color::Green)
//!             .build()
//!             .unwrap(),
//!     )
//!     .initial(Color::Green)
//!     .build()
//!     .unwrap();
//!
//! machine.next(Turn::TurnYellow, "operator").unwrap();
//! assert_eq!(machine.current_status(), Some(&Color::Yellow));
//! assert_eq!(machine.obj().color, "yellow");
//! ```

pub mod builder;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::builder::{BuildError, RuleStateBuilder, StateMachineBuilder};
pub use crate::core::{Action, Guard, Permission, PermissionDenied, Status, TransitionContext};
pub use crate::engine::{
    EnterHook, InvalidAction, InvalidActionCause, Messages, NotifyHook, Rule, RuleState,
    SetupError, SideEffectError, StateMachine, StateNode, StatusRegistry, TracingLog,
    TransitionError, TransitionLog, TransitionRecord, INVALID_ACTION_CODE, INVALID_ACTION_NAME,
};
