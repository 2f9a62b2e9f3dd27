//! Core identifier and capability types.
//!
//! This module contains the vocabulary the engine is built from:
//! - Status and action identifiers via the `Status` and `Action` traits
//! - Permission checks for gating transitions
//! - The machine-owned transition context handed to side effects
//!
//! Everything here is independent of any particular machine; the engine
//! module assembles these pieces into running state machines.

mod context;
mod ident;
mod permission;

pub use context::TransitionContext;
pub use ident::{Action, Status};
pub use permission::{Guard, Permission, PermissionDenied};
