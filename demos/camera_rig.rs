//! Camera Rig State Machine
//!
//! This demo drives a table-based camera controller for a few frames.
//!
//! Key concepts:
//! - Typed states and actions from plain enums
//! - Enter/update/exit bindings that mutate the owner's context
//! - A state-change observer acting as a debug overlay
//! - Transition logging through `tracing`
//!
//! Run with: RUST_LOG=debug cargo run --example camera_rig

use statebind::builder::TableBuilder;
use statebind::config::MachineConfig;
use statebind::core::Binding;
use statebind::machine::TableMachine;
use statebind::{action_enum, state_enum};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum CameraState {
        Follow,
        Zoom,
        Shake,
    }
}

action_enum! {
    enum CameraAction {
        ZoomIn,
        ZoomOut,
        Impact,
        Settle,
    }
}

#[derive(Debug, Default)]
struct Camera {
    fov: f32,
    offset: f32,
    shake_frames: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Camera Rig State Machine ===\n");

    let table = TableBuilder::new()
        .typed_transition(&CameraAction::ZoomIn, &CameraState::Follow, &CameraState::Zoom)
        .typed_transition(&CameraAction::ZoomOut, &CameraState::Zoom, &CameraState::Follow)
        .typed_transition(&CameraAction::Impact, &CameraState::Follow, &CameraState::Shake)
        .typed_transition(&CameraAction::Settle, &CameraState::Shake, &CameraState::Follow)
        .build()
        .expect("camera table is well formed");

    let config = MachineConfig::named("camera").with_history(Some(32));
    let mut machine = TableMachine::<Camera>::with_config(table, config);

    machine
        .bind(
            &CameraState::Follow,
            Binding::new(|cam: &mut Camera| cam.fov = 60.0, |_| {}),
        )
        .expect("Follow is declared");
    machine
        .bind(
            &CameraState::Zoom,
            Binding::new(
                |cam: &mut Camera| cam.fov = 30.0,
                |cam: &mut Camera| cam.fov = 60.0,
            ),
        )
        .expect("Zoom is declared");
    machine
        .bind(
            &CameraState::Shake,
            Binding::new(
                |cam: &mut Camera| cam.shake_frames = 0,
                |cam: &mut Camera| cam.offset = 0.0,
            )
            .with_update(|cam: &mut Camera| {
                cam.shake_frames += 1;
                cam.offset = if cam.shake_frames % 2 == 0 { 0.5 } else { -0.5 };
            }),
        )
        .expect("Shake is declared");

    let table = std::sync::Arc::clone(machine.table());
    machine.subscribe(move |change| {
        println!(
            "  [overlay] {} -> {}",
            change.from.map_or("(start)", |id| table.state_name(id)),
            table.state_name(change.to)
        );
    });

    let mut camera = Camera::default();
    machine
        .start_in(&CameraState::Follow, &mut camera)
        .expect("all states bound");

    let script = [
        Some(CameraAction::ZoomIn),
        None,
        Some(CameraAction::ZoomOut),
        Some(CameraAction::Impact),
        None,
        None,
        Some(CameraAction::Settle),
        Some(CameraAction::Settle),
    ];

    for (frame, action) in script.iter().enumerate() {
        if let Some(action) = action {
            if let Err(err) = machine.execute(action, &mut camera) {
                println!("  frame {frame}: rejected {action:?}: {err}");
            }
        }
        machine.update(&mut camera);
        println!("  frame {frame}: {:<6} {camera:?}", machine.current_state_name());
    }

    if let Some(history) = machine.history() {
        println!("\nVisited {} states", history.path().len());
    }

    println!("\n=== Demo Complete ===");
}
