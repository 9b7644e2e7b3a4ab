//! Statebind: finite state machines with enter/update/exit bindings
//!
//! Two machines share one callback contract: exactly one state is active at
//! a time, the old state's `on_exit` always runs before the new state's
//! `on_enter`, and `on_update` only ever runs for the active state.
//!
//! - [`machine::TableMachine`] moves through a static [`table::StateTable`]
//!   when its owner executes actions, and is ticked with `update`.
//! - [`animator::AnimatorMachine`] follows an external animation graph that
//!   reports entered and exited states, and mirrors parameter writes to
//!   secondary graphs.
//!
//! Both are single-threaded and synchronous: every callback runs to
//! completion inside the call that triggered it. Callbacks receive the
//! owner's context as `&mut Ctx`.
//!
//! # Example
//!
//! ```rust
//! use statebind::builder::TableBuilder;
//! use statebind::core::Binding;
//! use statebind::machine::TableMachine;
//! use statebind::{action_enum, state_enum};
//!
//! state_enum! {
//!     enum Director { Intro, Gameplay, Results }
//! }
//!
//! action_enum! {
//!     enum DirectorAction { Begin, Finish }
//! }
//!
//! #[derive(Default)]
//! struct Scene {
//!     frames: u32,
//! }
//!
//! let table = TableBuilder::new()
//!     .typed_transition(&DirectorAction::Begin, &Director::Intro, &Director::Gameplay)
//!     .typed_transition(&DirectorAction::Finish, &Director::Gameplay, &Director::Results)
//!     .build()
//!     .unwrap();
//!
//! let mut director = TableMachine::<Scene>::new(table);
//! director.bind(&Director::Intro, Binding::empty()).unwrap();
//! director
//!     .bind(
//!         &Director::Gameplay,
//!         Binding::empty().with_update(|scene: &mut Scene| scene.frames += 1),
//!     )
//!     .unwrap();
//! director.bind(&Director::Results, Binding::empty()).unwrap();
//!
//! let mut scene = Scene::default();
//! director.start_in(&Director::Intro, &mut scene).unwrap();
//! director.execute(&DirectorAction::Begin, &mut scene).unwrap();
//! director.update(&mut scene);
//! director.update(&mut scene);
//!
//! assert_eq!(scene.frames, 2);
//! ```

pub mod animator;
pub mod builder;
pub mod config;
pub mod core;
pub mod error;
pub mod machine;
pub mod snapshot;
pub mod table;

// Re-export commonly used types
pub use animator::{AnimationGraph, AnimatorMachine, StateHash};
pub use builder::TableBuilder;
pub use config::MachineConfig;
pub use core::{Action, ActionId, Binding, State, StateChange, StateId};
pub use error::FsmError;
pub use machine::TableMachine;
pub use table::StateTable;
