//! Identifier traits for statuses and actions.
//!
//! A machine never inspects the structure of its statuses or actions; both
//! are opaque identifiers supplied by the embedder and used as lookup keys,
//! log fields and display text. Any type that can be cloned, compared,
//! hashed, printed and serialized qualifies, so integers, strings and enums
//! all work out of the box.

use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Identifier naming one state of a machine.
///
/// Blanket-implemented for every qualifying type; embedders never implement
/// this trait by hand. The [`ident_enum!`](crate::ident_enum) macro generates
/// enums that satisfy it, including a `Display` impl with per-variant labels.
///
/// # Example
///
/// ```
/// use lite_sm::Status;
///
/// fn takes_status<S: Status>(_: S) {}
///
/// takes_status(3_u32);
/// takes_status("submitted".to_string());
/// ```
pub trait Status: Clone + Eq + Hash + Debug + Display + Serialize + Send + Sync + 'static {}

impl<T> Status for T where T: Clone + Eq + Hash + Debug + Display + Serialize + Send + Sync + 'static {}

/// Identifier naming one input event a machine can be driven with.
///
/// Same shape as [`Status`]; the two traits are kept separate so signatures
/// say which role a parameter plays.
pub trait Action: Clone + Eq + Hash + Debug + Display + Serialize + Send + Sync + 'static {}

impl<T> Action for T where T: Clone + Eq + Hash + Debug + Display + Serialize + Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_status<S: Status>() {}
    fn assert_action<A: Action>() {}

    #[test]
    fn primitive_types_qualify() {
        assert_status::<u32>();
        assert_status::<i64>();
        assert_status::<String>();
        assert_action::<u8>();
        assert_action::<String>();
    }

    #[test]
    fn display_enums_qualify() {
        use serde::Serialize;
        use std::fmt;

        #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
        enum Phase {
            Draft,
        }

        impl fmt::Display for Phase {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("draft")
            }
        }

        assert_status::<Phase>();
        assert_action::<Phase>();
        assert_eq!(Phase::Draft.to_string(), "draft");
    }
}
