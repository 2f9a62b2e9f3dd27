//! Permission capabilities gating transitions.
//!
//! A rule may carry a permission; the machine consults it while resolving a
//! transition and refuses to move when the check denies the actor. Checks
//! come in two forms on the same trait: a boolean query used by action
//! introspection and a throwing form used by transition resolution.

use std::fmt;
use thiserror::Error;

/// Error returned by [`Permission::test`] when the check refuses the actor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("permission denied: {reason}")]
pub struct PermissionDenied {
    reason: String,
}

impl PermissionDenied {
    /// Denial carrying the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Why the check refused the actor.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Authorization check attached to a transition rule.
///
/// Implementations must be idempotent and free of side effects beyond the
/// check itself: the engine may consult the same permission many times
/// (during introspection and again during resolution) and expects the same
/// answer for the same ambient conditions.
///
/// [`Guard`] adapts a plain closure; richer embedders implement the trait
/// directly against their own authorization layer.
pub trait Permission: Send + Sync {
    /// Does the current actor hold the capability?
    fn can(&self) -> bool;

    /// Throwing form of the same check.
    fn test(&self) -> Result<(), PermissionDenied>;
}

/// Permission backed by a boolean predicate.
///
/// The reason given at construction is reported when the predicate denies.
///
/// # Example
///
/// ```
/// use lite_sm::{Guard, Permission};
///
/// let business_hours = Guard::new("outside business hours", || true);
/// assert!(business_hours.can());
/// assert!(business_hours.test().is_ok());
///
/// let after_close = Guard::new("outside business hours", || false);
/// assert!(!after_close.can());
/// assert!(after_close.test().is_err());
/// ```
pub struct Guard {
    reason: String,
    predicate: Box<dyn Fn() -> bool + Send + Sync>,
}

impl Guard {
    /// Guard from a predicate and the reason reported on denial.
    pub fn new<F>(reason: impl Into<String>, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self {
            reason: reason.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Guard that always allows.
    pub fn allow() -> Self {
        Self::new("always allowed", || true)
    }

    /// Guard that always denies with the given reason.
    pub fn deny(reason: impl Into<String>) -> Self {
        Self::new(reason, || false)
    }
}

impl Permission for Guard {
    fn can(&self) -> bool {
        (self.predicate)()
    }

    fn test(&self) -> Result<(), PermissionDenied> {
        if self.can() {
            Ok(())
        } else {
            Err(PermissionDenied::new(self.reason.clone()))
        }
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard")
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}
