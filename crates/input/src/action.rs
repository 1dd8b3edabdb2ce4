use glam::Vec3;

/// A high-level input action produced by the host.
///
/// Desktop key and mouse handling map onto these; controls never see raw
/// window events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Set the continuous thrust direction in camera space:
    /// x = right, y = up, z = forward. Each axis is clamped to -1..=1.
    Thrust(Vec3),
    /// Turn the view by a pointer delta in pixels.
    Look { dx: f32, dy: f32 },
    /// Return the camera to its home pose.
    ResetView,
    /// No-op (used for input mapping that hasn't been bound yet).
    Noop,
}

impl Action {
    /// Thrust with every axis clamped to -1..=1.
    pub fn thrust(x: f32, y: f32, z: f32) -> Self {
        Self::Thrust(Vec3::new(x, y, z).clamp(Vec3::NEG_ONE, Vec3::ONE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thrust_is_clamped() {
        let a = Action::thrust(3.0, -2.0, 0.5);
        assert_eq!(a, Action::Thrust(Vec3::new(1.0, -1.0, 0.5)));
    }

    #[test]
    fn look_is_constructible() {
        let a = Action::Look { dx: 4.0, dy: -2.0 };
        assert!(matches!(a, Action::Look { .. }));
    }

    #[test]
    fn reset_and_noop() {
        assert!(matches!(Action::ResetView, Action::ResetView));
        assert!(matches!(Action::Noop, Action::Noop));
    }
}
