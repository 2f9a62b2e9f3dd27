//! Build errors for state and machine builders.

use crate::core::{Action, Status};
use crate::engine::SetupError;
use thiserror::Error;

/// Errors that can occur when building states and machines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError<S: Status, A: Action> {
    #[error("Initial status not specified. Call .initial(status) before .build()")]
    MissingInitialState,

    #[error("No states registered. Add at least one state before .build()")]
    NoStates,

    #[error("Duplicate rule for action {action} on status {status}")]
    DuplicateRule { status: S, action: A },

    #[error(transparent)]
    Setup(#[from] SetupError<S>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_tell_the_user_what_to_call() {
        let err: BuildError<String, String> = BuildError::MissingInitialState;
        assert!(err.to_string().contains(".initial(status)"));

        let err: BuildError<String, String> = BuildError::NoStates;
        assert!(err.to_string().contains("at least one state"));
    }

    #[test]
    fn duplicate_rule_names_status_and_action() {
        let err: BuildError<String, String> = BuildError::DuplicateRule {
            status: "draft".to_string(),
            action: "submit".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Duplicate rule for action submit on status draft"
        );
    }

    #[test]
    fn setup_errors_pass_through() {
        let err: BuildError<String, String> =
            SetupError::DuplicateStatus("draft".to_string()).into();
        assert_eq!(
            err.to_string(),
            "a state for status draft is already registered"
        );
    }
}
