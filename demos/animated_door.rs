//! Animated Door
//!
//! This demo feeds an animator-driven machine the notifications a blending
//! animation graph would emit, including an enter that arrives before the
//! previous state's exit.
//!
//! Key concepts:
//! - States keyed by hashed names
//! - Pending-state coalescing
//! - Parameter fan-out to a secondary graph
//!
//! Run with: RUST_LOG=trace cargo run --example animated_door

use statebind::animator::{AnimatorMachine, ParameterStore, StateHash};
use statebind::config::MachineConfig;
use statebind::core::Binding;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Door {
    angle: f32,
    creaks: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Animated Door ===\n");

    let mut machine =
        AnimatorMachine::with_config(ParameterStore::new(), MachineConfig::named("door"));
    let shadow = machine.add_sub_graph(ParameterStore::new());

    let closed = machine
        .register_state(
            "Closed",
            Binding::new(|door: &mut Door| door.angle = 0.0, |_| {}),
        )
        .expect("unique state");
    let opening = machine
        .register_state(
            "Opening",
            Binding::new(|door: &mut Door| door.creaks += 1, |_| {})
                .with_update(|door: &mut Door| door.angle = (door.angle + 15.0).min(90.0)),
        )
        .expect("unique state");
    let open = machine
        .register_state(
            "Open",
            Binding::new(|door: &mut Door| door.angle = 90.0, |_| {}),
        )
        .expect("unique state");

    let mut door = Door::default();

    machine.on_state_entered(closed, &mut door);
    machine.execute_action("open");
    println!(
        "  trigger mirrored to shadow graph: {}",
        machine
            .sub_graph(shadow)
            .is_some_and(|graph| graph.is_triggered("open"))
    );

    // The graph starts blending into Opening before Closed has exited.
    println!("  {:?}", machine.on_state_entered(opening, &mut door));
    machine.update(&mut door);
    println!("  {:?}", machine.on_state_exited(closed, &mut door));

    for _ in 0..4 {
        machine.update(&mut door);
    }
    println!("  after 4 ticks: {door:?}");

    // A stale exit from a state that is no longer current is ignored.
    println!("  {:?}", machine.on_state_exited(StateHash::of("Closed"), &mut door));

    machine.on_state_entered(open, &mut door);
    machine.on_state_exited(opening, &mut door);
    println!("  final state: {} {door:?}", machine.current_state_name());

    println!("\n=== Demo Complete ===");
}
