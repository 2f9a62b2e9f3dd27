//! Transition records and log sinks.

use crate::core::{Action, Status};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Snapshot of one committed transition, handed to the log sink.
///
/// Serializable so embedders can persist audit trails; [`fields`] renders
/// the record as a JSON object for structured consumers and [`message`]
/// renders the canonical human-readable line.
///
/// [`fields`]: TransitionRecord::fields
/// [`message`]: TransitionRecord::message
#[derive(Clone, Debug, Serialize)]
#[serde(bound = "")]
pub struct TransitionRecord<S: Status, A: Action> {
    /// Display identity of the driven object, when one was configured.
    pub object: Option<String>,
    /// Actor the transition is attributed to.
    pub actor: String,
    /// Status occupied before the transition.
    pub from: S,
    /// Status occupied after the transition.
    pub to: S,
    /// Action that triggered the transition.
    pub action: A,
    /// When the transition committed.
    pub timestamp: DateTime<Utc>,
}

impl<S: Status, A: Action> TransitionRecord<S, A> {
    /// One-line human-readable description of the transition.
    pub fn message(&self) -> String {
        match &self.object {
            Some(object) => format!(
                "{} performed action \"{}\": {}'s state changed from {} to {}",
                self.actor, self.action, object, self.from, self.to
            ),
            None => format!(
                "{} performed action \"{}\": state changed from {} to {}",
                self.actor, self.action, self.from, self.to
            ),
        }
    }

    /// The record as a structured JSON object.
    pub fn fields(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Structured sink receiving one record per committed transition.
///
/// The machine pre-renders the human-readable message; the record carries
/// the same data structured. Implementations decide where both go.
pub trait TransitionLog<S: Status, A: Action>: Send + Sync {
    /// Emit one info-level transition record.
    fn info(&self, message: &str, record: &TransitionRecord<S, A>);
}

/// Sink forwarding records to the `tracing` ecosystem at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLog;

impl<S: Status, A: Action> TransitionLog<S, A> for TracingLog {
    fn info(&self, message: &str, record: &TransitionRecord<S, A>) {
        tracing::info!(
            object = record.object.as_deref(),
            actor = %record.actor,
            from = %record.from,
            to = %record.to,
            action = %record.action,
            "{message}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(object: Option<&str>) -> TransitionRecord<String, String> {
        TransitionRecord {
            object: object.map(str::to_string),
            actor: "operator".to_string(),
            from: "green".to_string(),
            to: "yellow".to_string(),
            action: "turn_yellow".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn message_names_the_object_when_configured() {
        assert_eq!(
            record(Some("intersection-12")).message(),
            "operator performed action \"turn_yellow\": intersection-12's state changed from green to yellow"
        );
    }

    #[test]
    fn message_without_object_stays_well_formed() {
        assert_eq!(
            record(None).message(),
            "operator performed action \"turn_yellow\": state changed from green to yellow"
        );
    }

    #[test]
    fn fields_expose_every_component() {
        let fields = record(Some("intersection-12")).fields().unwrap();
        assert_eq!(fields["object"], "intersection-12");
        assert_eq!(fields["actor"], "operator");
        assert_eq!(fields["from"], "green");
        assert_eq!(fields["to"], "yellow");
        assert_eq!(fields["action"], "turn_yellow");
        assert!(fields["timestamp"].is_string());
    }

    #[test]
    fn records_serialize_for_audit_export() {
        let json = serde_json::to_string(&record(None)).unwrap();
        assert!(json.contains("\"from\":\"green\""));
        assert!(json.contains("\"to\":\"yellow\""));
    }
}
