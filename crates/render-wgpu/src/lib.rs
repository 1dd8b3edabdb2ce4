//! wgpu render backend for scene draw calls.
//!
//! Draw calls are queued during a frame and flushed in a single render pass.
//! Primitive shapes (cube, triangle, square, subdivision sphere) get meshes
//! built on first use; text lines and file meshes have no GPU form here and
//! are skipped.
//!
//! # Invariants
//! - Renderer never mutates program state.
//! - Queued draws are rendered in issue order.

pub mod mesh;
mod gpu;
mod shaders;

pub use gpu::WgpuRenderer;
pub use mesh::{MeshData, MeshKey, Vertex};
