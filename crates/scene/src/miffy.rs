use crate::layout;
use crate::plan::{DrawPlan, TitleWindow};
use crate::scene::DrawableScene;
use bigday_assets::{Material, SceneRegistry, Shape};
use bigday_common::{Color, Light, Placement};
use bigday_input::MovementControls;
use bigday_render::{DisplayContext, DrawCall, ProgramState, RenderError};
use glam::{Mat4, Vec3};

/// "miffy's big day": a flat house in front of a sky, grass and sun backdrop.
///
/// Shapes and materials are fixed at construction. Every frame the composer
/// rebuilds each visible object's transform from `model_transform` and the
/// literal placements in [`layout`], then issues one draw per object.
#[derive(Debug, Clone)]
pub struct MiffyScene {
    registry: SceneRegistry,
    initial_camera_location: Mat4,
    model_transform: Mat4,
    pub plan: DrawPlan,
    pub title_window: TitleWindow,
}

impl MiffyScene {
    pub fn new() -> Self {
        Self::with_plan(DrawPlan::default())
    }

    pub fn with_plan(plan: DrawPlan) -> Self {
        let registry = build_registry();
        tracing::info!(entries = registry.len(), "scene registry built");
        Self {
            registry,
            initial_camera_location: Mat4::look_at_rh(
                layout::CAMERA_EYE,
                layout::CAMERA_TARGET,
                layout::CAMERA_UP,
            ),
            model_transform: Mat4::IDENTITY,
            plan,
            title_window: TitleWindow::default(),
        }
    }

    /// Home view matrix handed to the movement controls.
    pub fn initial_camera_location(&self) -> Mat4 {
        self.initial_camera_location
    }

    /// Shared base every object transform is composed onto.
    pub fn model_transform(&self) -> Mat4 {
        self.model_transform
    }

    /// Transform of `name` for this frame, or `None` if it has no placement.
    pub fn object_transform(&self, name: &str) -> Option<Mat4> {
        layout::placement(name).map(|p| p.compose(self.model_transform))
    }

    pub fn draw_background(
        &self,
        ctx: &mut DisplayContext<'_>,
        state: &ProgramState,
    ) -> Result<(), RenderError> {
        self.draw_object(ctx, state, "sky", &layout::SKY, None)?;
        self.draw_object(ctx, state, "grass", &layout::GRASS, None)?;
        self.draw_object(ctx, state, "sun", &layout::SUN, None)
    }

    pub fn draw_title(
        &self,
        ctx: &mut DisplayContext<'_>,
        state: &ProgramState,
    ) -> Result<(), RenderError> {
        self.draw_object(ctx, state, "text", &layout::TEXT, Some(layout::TITLE))
    }

    pub fn draw_house(
        &self,
        ctx: &mut DisplayContext<'_>,
        state: &ProgramState,
    ) -> Result<(), RenderError> {
        self.draw_object(ctx, state, "house_top", &layout::HOUSE_TOP, None)?;
        self.draw_object(ctx, state, "house_bottom", &layout::HOUSE_BOTTOM, None)
    }

    fn draw_object(
        &self,
        ctx: &mut DisplayContext<'_>,
        state: &ProgramState,
        name: &str,
        placement: &Placement,
        text: Option<&str>,
    ) -> Result<(), RenderError> {
        let entry = self
            .registry
            .get(name)
            .ok_or_else(|| RenderError::UnknownObject(name.to_string()))?;
        let transform = placement.compose(self.model_transform);
        tracing::debug!(name, shape = %entry.shape, "draw");
        ctx.renderer.draw(
            state,
            DrawCall {
                name,
                shape: &entry.shape,
                material: &entry.material,
                transform,
                text,
            },
        )
    }
}

impl Default for MiffyScene {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawableScene for MiffyScene {
    fn display(
        &mut self,
        ctx: &mut DisplayContext<'_>,
        state: &mut ProgramState,
    ) -> Result<(), RenderError> {
        let _span = tracing::info_span!("compose_frame").entered();

        let home = self.initial_camera_location;
        if ctx
            .scratchpad
            .register_controls_once(|| Box::new(MovementControls::new(home)))
        {
            state.set_camera(Mat4::from_translation(Vec3::ZERO));
        }

        let t_sec = state.clock().time_sec();
        let dt_sec = state.clock().delta_sec();
        tracing::trace!(t_sec, dt_sec, "frame clock");

        state.lights = vec![Light::new(
            layout::LIGHT_POSITION,
            layout::LIGHT_COLOR,
            layout::LIGHT_SIZE,
        )];

        if self.plan.house {
            self.draw_house(ctx, state)?;
        }
        if self.plan.background {
            self.draw_background(ctx, state)?;
        }
        if self.plan.title && self.title_window.contains(t_sec) {
            self.draw_title(ctx, state)?;
        }
        Ok(())
    }

    fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    fn name(&self) -> &str {
        "miffy's big day"
    }
}

fn build_registry() -> SceneRegistry {
    let flat = |name: &str, rgb: u32| Material::phong(name).with_ambient(1.0).with_color(Color::hex(rgb));

    SceneRegistry::new()
        .with(
            "text",
            Shape::text_line(layout::TITLE_MAX_CHARS),
            Material::textured_phong("text_image", layout::TEXT_TEXTURE)
                .with_ambient(1.0)
                .with_diffusivity(0.0)
                .with_specularity(0.0),
        )
        .with(
            "miffy",
            Shape::from_file(layout::MIFFY_MESH),
            flat("miffy", 0xffffff)
                .with_diffusivity(0.0)
                .with_specularity(0.0),
        )
        .with("sky", Shape::Cube, flat("sky", 0x29c5f6))
        .with("grass", Shape::Cube, flat("grass", 0x388004))
        .with("sun", Shape::subdivision_sphere(4), flat("sun", 0xffd300))
        .with("house_top", Shape::Triangle, flat("house_top", 0xd0312d))
        .with("house_bottom", Shape::Square, flat("house_bottom", 0xfff8e7))
}
