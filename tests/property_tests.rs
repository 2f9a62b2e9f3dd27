//! Property-based tests for the transition engine.
//!
//! These tests use proptest to verify engine invariants hold across
//! many randomly generated rule tables, chains and identifiers.

use chrono::Utc;
use lite_sm::{
    Guard, InvalidActionCause, Messages, Permission, RuleStateBuilder, StateMachine,
    StateMachineBuilder, StateNode, TransitionError, TransitionRecord,
};
use proptest::prelude::*;
use std::collections::HashSet;

/// Linear machine over statuses `0..len`, each advancing to the next.
fn chain_machine(len: usize) -> StateMachine<(), u32, String> {
    let mut builder = StateMachineBuilder::new(());
    for i in 0..len {
        let mut state = RuleStateBuilder::new(i as u32);
        if i + 1 < len {
            state = state.rule("advance".to_string(), (i + 1) as u32);
        }
        builder = builder.state(state.build().unwrap());
    }
    builder.initial(0).build().unwrap()
}

proptest! {
    #[test]
    fn guard_answers_are_deterministic(threshold in 0..100u32, sample in 0..100u32) {
        let guard = Guard::new("below threshold", move || sample >= threshold);
        prop_assert_eq!(guard.can(), guard.can());
        prop_assert_eq!(guard.can(), guard.test().is_ok());
    }

    #[test]
    fn ignoring_permissions_lists_every_declared_action(
        actions in prop::collection::hash_set("[a-z]{1,8}", 1..8)
    ) {
        let mut state = RuleStateBuilder::<(), u32, String>::new(0);
        for action in &actions {
            state = state.rule(action.clone(), 1);
        }
        let state = state.build().unwrap();

        prop_assert_eq!(state.available_actions(true), actions);
    }

    #[test]
    fn gated_actions_vanish_only_while_denied(
        open in prop::collection::hash_set("[a-h]{1,6}", 1..6),
        closed in prop::collection::hash_set("[i-z]{1,6}", 1..6),
    ) {
        // The two alphabets are disjoint, so the sets never overlap.
        let mut state = RuleStateBuilder::<(), u32, String>::new(0);
        for action in &open {
            state = state.guarded_rule(action.clone(), 1, Guard::allow());
        }
        for action in &closed {
            state = state.guarded_rule(action.clone(), 1, Guard::deny("closed"));
        }
        let state = state.build().unwrap();

        prop_assert_eq!(state.available_actions(false), open.clone());

        let all: HashSet<String> = open.union(&closed).cloned().collect();
        prop_assert_eq!(state.available_actions(true), all);
    }

    #[test]
    fn walking_a_chain_visits_each_status_in_order(len in 2..8usize) {
        let mut machine = chain_machine(len);
        for step in 1..len {
            machine.next("advance".to_string(), "walker").unwrap();
            prop_assert_eq!(machine.current_status(), Some(&(step as u32)));
            prop_assert_eq!(machine.last_status(), Some(&((step - 1) as u32)));
        }
    }

    #[test]
    fn unknown_actions_leave_the_machine_in_place(
        len in 2..6usize,
        bogus in "[0-9]{1,6}",
    ) {
        let mut machine = chain_machine(len);
        machine.next("advance".to_string(), "walker").unwrap();
        let before = machine.current_status().cloned();

        let err = machine.next(bogus, "walker").unwrap_err();
        prop_assert!(matches!(
            &err,
            TransitionError::InvalidAction(inv) if inv.cause == InvalidActionCause::UnknownAction
        ));
        prop_assert_eq!(machine.current_status().cloned(), before);
    }

    #[test]
    fn denied_rules_never_move_the_machine(reason in "[a-z ]{1,20}") {
        let mut machine = StateMachineBuilder::new(())
            .state(
                RuleStateBuilder::new(0u32)
                    .guarded_rule("advance".to_string(), 1, Guard::deny(reason.clone()))
                    .build()
                    .unwrap(),
            )
            .state(RuleStateBuilder::new(1u32).build().unwrap())
            .initial(0)
            .build()
            .unwrap();

        let err = machine.next("advance".to_string(), "walker").unwrap_err();
        prop_assert!(matches!(
            &err,
            TransitionError::PermissionDenied(d) if d.reason() == reason
        ));
        prop_assert_eq!(machine.current_status(), Some(&0));
    }

    #[test]
    fn records_render_both_message_and_fields(
        actor in "[a-z]{1,8}",
        from in 0..50u32,
        to in 0..50u32,
    ) {
        let record: TransitionRecord<u32, String> = TransitionRecord {
            object: None,
            actor: actor.clone(),
            from,
            to,
            action: "advance".to_string(),
            timestamp: Utc::now(),
        };

        let message = record.message();
        prop_assert!(message.contains(&actor));
        prop_assert!(message.contains(&from.to_string()));
        prop_assert!(message.contains(&to.to_string()));

        let fields = record.fields().unwrap();
        prop_assert_eq!(fields["actor"].as_str(), Some(actor.as_str()));
        prop_assert_eq!(fields["from"].as_u64(), Some(from as u64));
        prop_assert_eq!(fields["to"].as_u64(), Some(to as u64));
    }

    #[test]
    fn default_template_mentions_status_and_action(
        status in "[a-z_]{1,10}",
        action in "[a-z_]{1,10}",
    ) {
        let messages = Messages::default();
        let description = messages.describe_invalid_action(&status, &action);
        prop_assert!(description.contains(&status));
        prop_assert!(description.contains(&action));
    }
}
