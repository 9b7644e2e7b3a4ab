//! Builder API for ergonomic machine construction.
//!
//! This module provides a fluent table builder and the `state_enum!` /
//! `action_enum!` macros that derive typed states and actions from plain
//! enums.

pub mod macros;
pub mod table;

pub use table::TableBuilder;
