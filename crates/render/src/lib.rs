//! Rendering contract: program state, display context and the renderer trait.
//!
//! # Invariants
//! - Renderers read program state; only scenes and the host loop write it.
//! - Controls are registered at most once per display context.
//!
//! A `RecordingRenderer` implements the contract without a GPU, for headless
//! runs and tests. The wgpu backend lives in `bigday-render-wgpu`.

mod context;
mod program_state;
mod renderer;

pub use context::{ControlsSlot, DisplayContext, Scratchpad};
pub use program_state::ProgramState;
pub use renderer::{DrawCall, DrawRecord, RecordingRenderer, RenderError, Renderer};

pub fn crate_info() -> &'static str {
    "bigday-render v0.1.0"
}
