use bigday_common::{AnimationClock, Light};
use glam::Mat4;

/// Per-frame context shared between the host loop, the scene and renderers.
///
/// The host owns it and advances the clock; scenes read the clock and write
/// the light list and camera; renderers only read.
#[derive(Debug, Clone)]
pub struct ProgramState {
    camera_inverse: Mat4,
    camera_transform: Mat4,
    pub projection_transform: Mat4,
    pub lights: Vec<Light>,
    clock: AnimationClock,
}

impl Default for ProgramState {
    fn default() -> Self {
        Self {
            camera_inverse: Mat4::IDENTITY,
            camera_transform: Mat4::IDENTITY,
            projection_transform: Mat4::IDENTITY,
            lights: Vec::new(),
            clock: AnimationClock::new(),
        }
    }
}

impl ProgramState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the view matrix (world -> camera). Its inverse is cached.
    pub fn set_camera(&mut self, view: Mat4) {
        self.camera_inverse = view;
        self.camera_transform = view.inverse();
    }

    /// View matrix (world -> camera).
    pub fn camera_inverse(&self) -> Mat4 {
        self.camera_inverse
    }

    /// Camera pose in world space.
    pub fn camera_transform(&self) -> Mat4 {
        self.camera_transform
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_transform * self.camera_inverse
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// Absolute animation time in milliseconds.
    pub fn animation_time(&self) -> f64 {
        self.clock.time_ms()
    }

    /// Milliseconds since the previous frame.
    pub fn animation_delta_time(&self) -> f64 {
        self.clock.delta_ms()
    }

    /// Host-side: move the clock forward before composing a frame.
    pub fn advance_clock(&mut self, delta_ms: f64) {
        self.clock.advance(delta_ms);
    }
}
