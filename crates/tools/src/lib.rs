//! Developer tooling: read-only inspection of a scene's registry, draw plan
//! and composed object transforms.
//!
//! # Invariants
//! - Inspection never mutates the scene.

mod inspector;

pub use inspector::{ObjectInfo, SceneInspector, SceneSummary};

pub fn crate_info() -> &'static str {
    "bigday-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
