use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Linear RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color(pub Vec4);

impl Color {
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self(Vec4::new(r, g, b, a))
    }

    /// Opaque color from a packed `0xRRGGBB` value, e.g. `Color::hex(0x29c5f6)`.
    pub const fn hex(rgb: u32) -> Self {
        let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
        let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
        let b = (rgb & 0xff) as f32 / 255.0;
        Self::rgba(r, g, b, 1.0)
    }

    pub fn to_array(self) -> [f32; 4] {
        self.0.to_array()
    }

    /// `#rrggbb` form, alpha dropped.
    pub fn to_hex_string(self) -> String {
        let c = (self.0.truncate().clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
        format!("#{:02x}{:02x}{:02x}", c.x as u8, c.y as u8, c.z as u8)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A point (w = 1) or directional (w = 0) light.
///
/// `size` controls distance falloff: larger lights reach further.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec4,
    pub color: Color,
    pub size: f32,
}

impl Light {
    pub fn new(position: Vec4, color: Color, size: f32) -> Self {
        Self {
            position,
            color,
            size,
        }
    }
}

/// Animation clock owned by the host loop.
///
/// Scenes only read it; the host advances it once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationClock {
    time_ms: f64,
    delta_ms: f64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `delta_ms` milliseconds. Negative deltas are clamped to zero.
    pub fn advance(&mut self, delta_ms: f64) {
        let delta_ms = delta_ms.max(0.0);
        self.time_ms += delta_ms;
        self.delta_ms = delta_ms;
    }

    /// Absolute animation time in milliseconds.
    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }

    /// Time elapsed during the last advance, in milliseconds.
    pub fn delta_ms(&self) -> f64 {
        self.delta_ms
    }

    pub fn time_sec(&self) -> f64 {
        self.time_ms / 1000.0
    }

    pub fn delta_sec(&self) -> f64 {
        self.delta_ms / 1000.0
    }
}
