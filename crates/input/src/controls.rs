use crate::action::Action;
use glam::{Mat4, Vec3};

/// Something that reacts to actions by moving the camera.
///
/// `update` receives the current view matrix (world -> camera) and returns
/// the next one.
pub trait Controls {
    fn apply(&mut self, action: &Action);

    fn update(&mut self, view: Mat4, dt: f32) -> Mat4;

    fn name(&self) -> &str {
        "controls"
    }
}

/// Speed and look sensitivity for [`MovementControls`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlsConfig {
    /// Units per second at full thrust.
    pub speed: f32,
    /// Radians per pixel of pointer motion.
    pub sensitivity: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            sensitivity: 0.003,
        }
    }
}

/// Fly-style controls: continuous thrust plus pointer look.
///
/// Motion happens in camera space, so "forward" always follows the view.
/// Look deltas are consumed by the next `update`.
#[derive(Debug, Clone)]
pub struct MovementControls {
    config: ControlsConfig,
    home: Mat4,
    thrust: Vec3,
    look: (f32, f32),
    reset_requested: bool,
}

impl MovementControls {
    /// `home` is the view matrix restored by [`Action::ResetView`].
    pub fn new(home: Mat4) -> Self {
        Self::with_config(home, ControlsConfig::default())
    }

    pub fn with_config(home: Mat4, config: ControlsConfig) -> Self {
        Self {
            config,
            home,
            thrust: Vec3::ZERO,
            look: (0.0, 0.0),
            reset_requested: false,
        }
    }

    pub fn home(&self) -> Mat4 {
        self.home
    }

    pub fn thrust(&self) -> Vec3 {
        self.thrust
    }

    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }
}

impl Controls for MovementControls {
    fn apply(&mut self, action: &Action) {
        match *action {
            Action::Thrust(t) => self.thrust = t.clamp(Vec3::NEG_ONE, Vec3::ONE),
            Action::Look { dx, dy } => {
                self.look.0 += dx;
                self.look.1 += dy;
            }
            Action::ResetView => self.reset_requested = true,
            Action::Noop => {}
        }
    }

    fn update(&mut self, view: Mat4, dt: f32) -> Mat4 {
        if std::mem::take(&mut self.reset_requested) {
            self.look = (0.0, 0.0);
            tracing::debug!("camera reset to home");
            return self.home;
        }

        let (dx, dy) = std::mem::take(&mut self.look);
        let turn = Mat4::from_rotation_x(dy * self.config.sensitivity)
            * Mat4::from_rotation_y(dx * self.config.sensitivity);

        // Camera looks down -Z, so forward thrust moves along -Z in camera space.
        let step = Vec3::new(self.thrust.x, self.thrust.y, -self.thrust.z) * self.config.speed * dt;
        let shift = Mat4::from_translation(-step);

        turn * shift * view
    }

    fn name(&self) -> &str {
        "movement"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn eye(view: Mat4) -> Vec3 {
        view.inverse().col(3).truncate()
    }

    #[test]
    fn idle_controls_keep_view() {
        let mut c = MovementControls::new(Mat4::IDENTITY);
        let view = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(c.update(view, 0.016), view);
    }

    #[test]
    fn forward_thrust_moves_along_view_direction() {
        let mut c = MovementControls::new(Mat4::IDENTITY);
        c.apply(&Action::thrust(0.0, 0.0, 1.0));
        let view = c.update(Mat4::IDENTITY, 1.0);
        assert!(eye(view).abs_diff_eq(Vec3::new(0.0, 0.0, -10.0), 1e-5));
    }

    #[test]
    fn thrust_persists_across_updates() {
        let mut c = MovementControls::new(Mat4::IDENTITY);
        c.apply(&Action::thrust(1.0, 0.0, 0.0));
        let view = c.update(Mat4::IDENTITY, 0.5);
        let view = c.update(view, 0.5);
        assert!(eye(view).abs_diff_eq(Vec3::new(10.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn look_delta_is_consumed_once() {
        let mut c = MovementControls::new(Mat4::IDENTITY);
        c.apply(&Action::Look { dx: 100.0, dy: 0.0 });
        let once = c.update(Mat4::IDENTITY, 0.016);
        assert_ne!(once, Mat4::IDENTITY);
        let twice = c.update(once, 0.016);
        assert!(twice.abs_diff_eq(once, 1e-6));
    }

    #[test]
    fn reset_restores_home() {
        let home = Mat4::look_at_rh(Vec3::new(0.0, 10.0, 20.0), Vec3::ZERO, Vec3::Y);
        let mut c = MovementControls::new(home);
        c.apply(&Action::thrust(0.0, 1.0, 1.0));
        let moved = c.update(home, 1.0);
        assert_ne!(moved, home);

        c.apply(&Action::ResetView);
        assert_eq!(c.update(moved, 1.0), home);
    }

    #[test]
    fn custom_speed_scales_motion() {
        let config = ControlsConfig {
            speed: 2.0,
            ..ControlsConfig::default()
        };
        let mut c = MovementControls::with_config(Mat4::IDENTITY, config);
        c.apply(&Action::thrust(0.0, 1.0, 0.0));
        let view = c.update(Mat4::IDENTITY, 1.0);
        assert!(view.inverse().col(3).abs_diff_eq(Vec4::new(0.0, 2.0, 0.0, 1.0), 1e-5));
    }
}
