use crate::program_state::ProgramState;
use crate::renderer::Renderer;
use bigday_input::Controls;

/// One-shot slot for the input controls of a display context.
#[derive(Default)]
pub enum ControlsSlot {
    #[default]
    Vacant,
    Registered(Box<dyn Controls>),
}

impl ControlsSlot {
    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered(_))
    }
}

impl std::fmt::Debug for ControlsSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vacant => f.write_str("Vacant"),
            Self::Registered(c) => write!(f, "Registered({})", c.name()),
        }
    }
}

/// State that outlives a single frame but belongs to the display, not the scene.
#[derive(Debug, Default)]
pub struct Scratchpad {
    controls: ControlsSlot,
    registrations: u32,
}

impl Scratchpad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the controls slot if it is vacant. Returns `true` only on the call
    /// that registered; later calls do not run `init`.
    pub fn register_controls_once<F>(&mut self, init: F) -> bool
    where
        F: FnOnce() -> Box<dyn Controls>,
    {
        if self.controls.is_registered() {
            return false;
        }
        let controls = init();
        tracing::info!(controls = controls.name(), "controls registered");
        self.controls = ControlsSlot::Registered(controls);
        self.registrations += 1;
        true
    }

    pub fn controls(&self) -> &ControlsSlot {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> Option<&mut (dyn Controls + 'static)> {
        match &mut self.controls {
            ControlsSlot::Registered(c) => Some(c.as_mut()),
            ControlsSlot::Vacant => None,
        }
    }

    /// How many times the slot has been filled.
    pub fn registrations(&self) -> u32 {
        self.registrations
    }

    /// Let the registered controls move the camera by the last clock delta.
    pub fn update_controls(&mut self, state: &mut ProgramState) {
        let dt = state.clock().delta_sec() as f32;
        if let Some(controls) = self.controls_mut() {
            let view = controls.update(state.camera_inverse(), dt);
            state.set_camera(view);
        }
    }
}

/// Everything a scene needs from the display for one frame.
pub struct DisplayContext<'a> {
    pub renderer: &'a mut dyn Renderer,
    pub scratchpad: &'a mut Scratchpad,
    pub width: u32,
    pub height: u32,
}

impl<'a> DisplayContext<'a> {
    pub fn new(
        renderer: &'a mut dyn Renderer,
        scratchpad: &'a mut Scratchpad,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            renderer,
            scratchpad,
            width,
            height,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingRenderer;
    use bigday_input::{Action, MovementControls};
    use glam::{Mat4, Vec3};

    #[test]
    fn slot_starts_vacant() {
        let pad = Scratchpad::new();
        assert!(!pad.controls().is_registered());
        assert_eq!(pad.registrations(), 0);
    }

    #[test]
    fn register_runs_once() {
        let mut pad = Scratchpad::new();
        let mut runs = 0;
        for _ in 0..3 {
            pad.register_controls_once(|| {
                runs += 1;
                Box::new(MovementControls::new(Mat4::IDENTITY))
            });
        }
        assert_eq!(runs, 1);
        assert_eq!(pad.registrations(), 1);
        assert!(pad.controls().is_registered());
    }

    #[test]
    fn update_controls_without_registration_is_noop() {
        let mut pad = Scratchpad::new();
        let mut state = ProgramState::new();
        state.advance_clock(1000.0);
        pad.update_controls(&mut state);
        assert_eq!(state.camera_inverse(), Mat4::IDENTITY);
    }

    #[test]
    fn update_controls_moves_camera() {
        let mut pad = Scratchpad::new();
        pad.register_controls_once(|| Box::new(MovementControls::new(Mat4::IDENTITY)));
        pad.controls_mut()
            .unwrap()
            .apply(&Action::thrust(0.0, 0.0, 1.0));

        let mut state = ProgramState::new();
        state.advance_clock(500.0);
        pad.update_controls(&mut state);
        let eye = state.camera_transform().col(3).truncate();
        assert!(eye.abs_diff_eq(Vec3::new(0.0, 0.0, -5.0), 1e-5));
    }

    #[test]
    fn aspect_guards_zero_height() {
        let mut renderer = RecordingRenderer::new();
        let mut pad = Scratchpad::new();
        let ctx = DisplayContext::new(&mut renderer, &mut pad, 800, 0);
        assert_eq!(ctx.aspect(), 800.0);
    }
}
