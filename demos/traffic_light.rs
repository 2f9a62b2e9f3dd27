//! Traffic light demo: a three-state cycle with entry side effects and
//! audit logging through `tracing`.
//!
//! Run with: cargo run --example traffic_light

use lite_sm::{ident_enum, RuleStateBuilder, StateMachineBuilder, TracingLog};

ident_enum! {
    enum Color {
        Red => "red",
        Yellow => "yellow",
        Green => "green",
    }
}

ident_enum! {
    enum Turn {
        TurnRed => "turn_red",
        TurnYellow => "turn_yellow",
        TurnGreen => "turn_green",
    }
}

#[derive(Debug, Default)]
struct TrafficLight {
    color: String,
}

fn light_state(
    status: Color,
    action: Turn,
    destination: Color,
    color: &'static str,
) -> lite_sm::RuleState<TrafficLight, Color, Turn> {
    RuleStateBuilder::new(status)
        .rule(action, destination)
        .on_enter(move |light: &mut TrafficLight, _context| {
            light.color = color.to_string();
            Ok(())
        })
        .build()
        .expect("single-rule state always builds")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut machine = StateMachineBuilder::new(TrafficLight::default())
        .state(light_state(Color::Green, Turn::TurnYellow, Color::Yellow, "green"))
        .state(light_state(Color::Yellow, Turn::TurnRed, Color::Red, "yellow"))
        .state(light_state(Color::Red, Turn::TurnGreen, Color::Green, "red"))
        .initial(Color::Green)
        .object_label("intersection-12")
        .logger(TracingLog)
        .build()
        .expect("traffic light machine builds");

    println!("starting at: {:?}", machine.current_status());
    println!("available actions: {:?}", machine.available_actions(true));

    for (action, actor) in [
        (Turn::TurnYellow, "operator"),
        (Turn::TurnRed, "operator"),
        (Turn::TurnGreen, "scheduler"),
    ] {
        machine
            .next(action, actor)
            .expect("cycle transitions are registered");
        println!(
            "light is now {:?} (bulb: {})",
            machine.current_status(),
            machine.obj().color
        );
    }

    // Driving an action the current state does not know fails loudly and
    // leaves the light where it was.
    match machine.next(Turn::TurnRed, "operator") {
        Ok(()) => unreachable!("green does not allow turn_red"),
        Err(err) => println!("rejected: {err}"),
    }
    println!("still at: {:?}", machine.current_status());
}
