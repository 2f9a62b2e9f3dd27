//! Order workflow demo: permission-gated approval, actor notification and a
//! custom audit sink.
//!
//! Run with: cargo run --example order_workflow

use lite_sm::{
    ident_enum, Guard, RuleStateBuilder, StateMachineBuilder, TransitionLog, TransitionRecord,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

ident_enum! {
    enum OrderStatus {
        Draft => "draft",
        Submitted => "submitted",
        Approved => "approved",
        Shipped => "shipped",
    }
}

ident_enum! {
    enum OrderAction {
        Submit => "submit",
        Approve => "approve",
        Ship => "ship",
    }
}

#[derive(Debug, Default)]
struct Order {
    total_cents: u64,
    approved_by: Option<String>,
}

/// Audit sink keeping every record in memory.
#[derive(Clone, Default)]
struct AuditTrail {
    records: Arc<Mutex<Vec<TransitionRecord<OrderStatus, OrderAction>>>>,
}

impl TransitionLog<OrderStatus, OrderAction> for AuditTrail {
    fn info(&self, message: &str, record: &TransitionRecord<OrderStatus, OrderAction>) {
        println!("audit: {message}");
        self.records.lock().unwrap().push(record.clone());
    }
}

fn main() {
    let finance_signed_off = Arc::new(AtomicBool::new(false));
    let check = Arc::clone(&finance_signed_off);

    let trail = AuditTrail::default();

    let order = Order {
        total_cents: 129_900,
        approved_by: None,
    };

    let mut machine = StateMachineBuilder::new(order)
        .state(
            RuleStateBuilder::new(OrderStatus::Draft)
                .rule(OrderAction::Submit, OrderStatus::Submitted)
                .build()
                .expect("draft state builds"),
        )
        .state(
            RuleStateBuilder::new(OrderStatus::Submitted)
                .guarded_rule(
                    OrderAction::Approve,
                    OrderStatus::Approved,
                    Guard::new("finance has not signed off", move || {
                        check.load(Ordering::SeqCst)
                    }),
                )
                .build()
                .expect("submitted state builds"),
        )
        .state(
            RuleStateBuilder::new(OrderStatus::Approved)
                .rule(OrderAction::Ship, OrderStatus::Shipped)
                .on_enter(|order: &mut Order, context| {
                    order.approved_by = context.actor().map(str::to_string);
                    Ok(())
                })
                .build()
                .expect("approved state builds"),
        )
        .state(
            RuleStateBuilder::new(OrderStatus::Shipped)
                .actor("warehouse")
                .actor("billing")
                .build()
                .expect("shipped state builds"),
        )
        .initial(OrderStatus::Draft)
        .object_label("order-1047")
        .invalid_action_template("order cannot {action} while {status}")
        .on_notify(|actor| println!("notify: {actor} has work to do"))
        .logger(trail.clone())
        .build()
        .expect("order machine builds");

    machine
        .next(OrderAction::Submit, "alice")
        .expect("draft orders can be submitted");

    // Finance has not signed off yet, so approval is refused and the order
    // stays submitted.
    let refused = machine.next(OrderAction::Approve, "bob").unwrap_err();
    println!("refused: {refused}");
    println!(
        "actions open right now: {:?}",
        machine.available_actions(false)
    );

    finance_signed_off.store(true, Ordering::SeqCst);
    machine
        .next(OrderAction::Approve, "bob")
        .expect("finance signed off");
    println!(
        "order for {} cents approved by: {:?}",
        machine.obj().total_cents,
        machine.obj().approved_by
    );

    // Shipping notifies the actors registered on the shipped state.
    machine
        .next(OrderAction::Ship, "carol")
        .expect("approved orders ship");

    // A shipped order is terminal; the custom template shapes the refusal.
    let done = machine.next(OrderAction::Submit, "alice").unwrap_err();
    println!("refused: {done}");

    let records = trail.records.lock().unwrap();
    println!("audit trail holds {} committed transitions", records.len());
}
