use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Builder for `base · op₁ · op₂ · …` matrix chains.
///
/// Each call post-multiplies the accumulated matrix, so operations apply to
/// the object in reverse call order: in `scale().translate()` the translation
/// is itself scaled. Order is significant and never rearranged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformChain(Mat4);

impl TransformChain {
    pub fn new() -> Self {
        Self(Mat4::IDENTITY)
    }

    pub fn from_base(base: Mat4) -> Self {
        Self(base)
    }

    pub fn scale(self, x: f32, y: f32, z: f32) -> Self {
        self.then(Mat4::from_scale(Vec3::new(x, y, z)))
    }

    pub fn translate(self, x: f32, y: f32, z: f32) -> Self {
        self.then(Mat4::from_translation(Vec3::new(x, y, z)))
    }

    /// Rotate by `angle` radians about `(x, y, z)`. The axis is normalized and
    /// must not be zero-length.
    pub fn rotate(self, angle: f32, x: f32, y: f32, z: f32) -> Self {
        self.then(Mat4::from_axis_angle(Vec3::new(x, y, z).normalize(), angle))
    }

    pub fn then(self, m: Mat4) -> Self {
        Self(self.0 * m)
    }

    pub fn matrix(self) -> Mat4 {
        self.0
    }
}

impl Default for TransformChain {
    fn default() -> Self {
        Self::new()
    }
}

impl From<TransformChain> for Mat4 {
    fn from(chain: TransformChain) -> Self {
        chain.0
    }
}

/// Rotation of `angle` radians about `axis`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub angle: f32,
    pub axis: Vec3,
}

impl Rotation {
    pub const fn about_z(angle: f32) -> Self {
        Self {
            angle,
            axis: Vec3::Z,
        }
    }
}

/// Literal placement of one object: `scale → translate → rotate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub scale: Vec3,
    pub translation: Vec3,
    pub rotation: Option<Rotation>,
}

impl Placement {
    pub const fn new(scale: Vec3, translation: Vec3) -> Self {
        Self {
            scale,
            translation,
            rotation: None,
        }
    }

    pub const fn rotated(self, rotation: Rotation) -> Self {
        Self {
            rotation: Some(rotation),
            ..self
        }
    }

    /// Compose this placement onto `base`.
    pub fn compose(&self, base: Mat4) -> Mat4 {
        let s = self.scale;
        let t = self.translation;
        let chain = TransformChain::from_base(base)
            .scale(s.x, s.y, s.z)
            .translate(t.x, t.y, t.z);
        match self.rotation {
            Some(r) => chain.rotate(r.angle, r.axis.x, r.axis.y, r.axis.z).matrix(),
            None => chain.matrix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn empty_chain_is_identity() {
        assert_eq!(TransformChain::new().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn scale_then_translate_scales_the_offset() {
        let m = TransformChain::new()
            .scale(2.0, 2.0, 2.0)
            .translate(1.0, 0.0, 0.0)
            .matrix();
        assert_eq!(m.col(3), Vec4::new(2.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn translate_then_scale_keeps_the_offset() {
        let m = TransformChain::new()
            .translate(1.0, 0.0, 0.0)
            .scale(2.0, 2.0, 2.0)
            .matrix();
        assert_eq!(m.col(3), Vec4::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn chain_respects_base() {
        let base = Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0));
        let m = TransformChain::from_base(base)
            .translate(1.0, 0.0, 0.0)
            .matrix();
        assert_eq!(m.col(3), Vec4::new(1.0, 5.0, 0.0, 1.0));
    }

    #[test]
    fn rotation_axis_is_normalized() {
        let a = TransformChain::new().rotate(1.0, 0.0, 0.0, 5.0).matrix();
        let b = TransformChain::new().rotate(1.0, 0.0, 0.0, 1.0).matrix();
        assert!(a.abs_diff_eq(b, 1e-6));
    }

    #[test]
    fn zero_angle_rotation_is_identity() {
        let m = TransformChain::new().rotate(0.0, 0.0, 0.0, 1.0).matrix();
        assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn placement_without_rotation_matches_chain() {
        let p = Placement::new(Vec3::new(2.0, 2.0, 0.0), Vec3::new(0.0, 0.75, -6.0));
        let expected = TransformChain::new()
            .scale(2.0, 2.0, 0.0)
            .translate(0.0, 0.75, -6.0)
            .matrix();
        assert_eq!(p.compose(Mat4::IDENTITY), expected);
    }

    #[test]
    fn placement_applies_rotation_last() {
        let p = Placement::new(Vec3::ONE, Vec3::new(1.0, 0.0, 0.0))
            .rotated(Rotation::about_z(std::f32::consts::FRAC_PI_2));
        let m = p.compose(Mat4::IDENTITY);
        // Rotation happens in the object frame, so the offset is untouched.
        assert!(m.col(3).abs_diff_eq(Vec4::new(1.0, 0.0, 0.0, 1.0), 1e-6));
        let x_axis = m.transform_vector3(Vec3::X);
        assert!(x_axis.abs_diff_eq(Vec3::Y, 1e-6));
    }
}
