use bigday_assets::SceneRegistry;
use bigday_render::{DisplayContext, ProgramState, RenderError};

/// Contract between a host render loop and a scene.
///
/// The host calls `display` once per frame after advancing the clock.
/// Errors from the renderer are passed straight back to the host.
pub trait DrawableScene {
    fn display(
        &mut self,
        ctx: &mut DisplayContext<'_>,
        state: &mut ProgramState,
    ) -> Result<(), RenderError>;

    /// The scene's fixed shape/material table.
    fn registry(&self) -> &SceneRegistry;

    fn name(&self) -> &str {
        "Scene"
    }
}
