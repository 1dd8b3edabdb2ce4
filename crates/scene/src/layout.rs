//! Literal layout constants for the diorama.

use bigday_common::{Color, Placement, Rotation};
use glam::{Vec3, Vec4};

pub const SKY: Placement = Placement::new(Vec3::new(2.0, 2.0, 0.0), Vec3::new(0.0, 0.75, -6.0));
pub const GRASS: Placement = Placement::new(Vec3::new(2.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -4.0));
pub const SUN: Placement = Placement::new(Vec3::new(0.1, 0.15, 0.3), Vec3::new(6.0, 4.0, -2.0));
pub const TEXT: Placement =
    Placement::new(Vec3::new(0.06, 0.06, 0.06), Vec3::new(-10.0, 0.4, -1.0));
pub const HOUSE_TOP: Placement =
    Placement::new(Vec3::new(0.5, 0.8, 0.0), Vec3::new(0.0, 0.89, -2.0))
        .rotated(Rotation::about_z(10.21));
pub const HOUSE_BOTTOM: Placement =
    Placement::new(Vec3::new(0.35, 0.35, 0.0), Vec3::new(0.0, -0.57, -2.0))
        .rotated(Rotation::about_z(0.0));

pub const TITLE: &str = "miffy's big day";
pub const TITLE_MAX_CHARS: usize = 35;

pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 10.0, 20.0);
pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;
pub const CAMERA_UP: Vec3 = Vec3::Y;

pub const LIGHT_POSITION: Vec4 = Vec4::new(10.0, 10.0, 10.0, 1.0);
pub const LIGHT_COLOR: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
pub const LIGHT_SIZE: f32 = 1000.0;

pub const MIFFY_MESH: &str = "assets/miffy.obj";
pub const TEXT_TEXTURE: &str = "assets/text.png";

/// Placement of a drawable object by registry name. `miffy` has none: it is
/// defined but never placed.
pub fn placement(name: &str) -> Option<Placement> {
    match name {
        "sky" => Some(SKY),
        "grass" => Some(GRASS),
        "sun" => Some(SUN),
        "text" => Some(TEXT),
        "house_top" => Some(HOUSE_TOP),
        "house_bottom" => Some(HOUSE_BOTTOM),
        _ => None,
    }
}
