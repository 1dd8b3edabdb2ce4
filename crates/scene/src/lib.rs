//! Scene layer: the drawable-scene contract and the "miffy's big day" diorama.
//!
//! # Invariants
//! - The registry is built once and never changes afterwards.
//! - Object transforms are recomputed every frame from literal constants.
//! - Controls registration and the first camera set happen exactly once per
//!   display context.
//! - Whether an object group is defined and whether it is drawn are independent.

pub mod layout;
pub mod miffy;
pub mod plan;
pub mod scene;

pub use miffy::MiffyScene;
pub use plan::{DrawPlan, TitleWindow};
pub use scene::DrawableScene;

pub fn crate_info() -> &'static str {
    "bigday-scene v0.1.0"
}
