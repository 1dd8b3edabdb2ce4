//! Input controls: backend-neutral actions and the movement controls that
//! turn them into camera motion.
//!
//! # Invariants
//! - Controls never see raw window events, only `Action`s.
//! - Camera motion is applied in camera space.

pub mod action;
pub mod controls;

pub use action::Action;
pub use controls::{Controls, ControlsConfig, MovementControls};

pub fn crate_info() -> &'static str {
    "bigday-input v0.1.0"
}
