//! Shared types for the diorama: colors, lights, the animation clock and
//! transform-chain composition.
//!
//! # Invariants
//! - Transform chains post-multiply: every step applies in the object's local frame.
//! - The clock only moves forward through `AnimationClock::advance`.

pub mod transform;
pub mod types;

pub use transform::{Placement, Rotation, TransformChain};
pub use types::{AnimationClock, Color, Light};
