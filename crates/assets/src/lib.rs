//! Shape and material descriptors, and the scene registry that pairs them.
//!
//! Descriptors are plain data. Renderers turn them into GPU resources by
//! kind, never by identity, so two `Shape::Cube` values draw the same mesh.
//!
//! # Invariants
//! - Every registry entry holds exactly one shape and one material.
//! - Registry iteration order is sorted by name.

use bigday_common::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Drawable geometry descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Axis-aligned cube spanning -1..1 on every axis.
    Cube,
    /// Right triangle in the z = 0 plane with corners (0,0), (1,0), (0,1).
    Triangle,
    /// Square in the z = 0 plane spanning -1..1.
    Square,
    /// Unit sphere built by recursively subdividing a tetrahedron.
    SubdivisionSphere { subdivisions: u32 },
    /// A single line of text, at most `max_chars` glyphs.
    TextLine { max_chars: usize },
    /// Mesh loaded by the backend from a file path.
    FromFile { path: String },
}

impl Shape {
    pub fn subdivision_sphere(subdivisions: u32) -> Self {
        Self::SubdivisionSphere { subdivisions }
    }

    pub fn text_line(max_chars: usize) -> Self {
        Self::TextLine { max_chars }
    }

    pub fn from_file(path: impl Into<String>) -> Self {
        Self::FromFile { path: path.into() }
    }

    /// Short lowercase name of the geometry kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Triangle => "triangle",
            Self::Square => "square",
            Self::SubdivisionSphere { .. } => "subdivision_sphere",
            Self::TextLine { .. } => "text_line",
            Self::FromFile { .. } => "from_file",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubdivisionSphere { subdivisions } => {
                write!(f, "{}({subdivisions})", self.kind())
            }
            Self::TextLine { max_chars } => write!(f, "{}({max_chars})", self.kind()),
            Self::FromFile { path } => write!(f, "{}({path})", self.kind()),
            _ => f.write_str(self.kind()),
        }
    }
}

/// Lighting model a material is shaded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShadingModel {
    Phong,
    TexturedPhong,
}

/// Reference to an image resolved by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureRef {
    pub path: String,
}

/// Shading model plus its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub shading: ShadingModel,
    pub ambient: f32,
    pub diffusivity: f32,
    pub specularity: f32,
    pub smoothness: f32,
    pub color: Color,
    pub texture: Option<TextureRef>,
}

impl Material {
    /// Phong material with the framework defaults: no ambient, full diffuse
    /// and specular, smoothness 40, white.
    pub fn phong(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shading: ShadingModel::Phong,
            ambient: 0.0,
            diffusivity: 1.0,
            specularity: 1.0,
            smoothness: 40.0,
            color: Color::WHITE,
            texture: None,
        }
    }

    pub fn textured_phong(name: impl Into<String>, texture: impl Into<String>) -> Self {
        Self {
            shading: ShadingModel::TexturedPhong,
            texture: Some(TextureRef {
                path: texture.into(),
            }),
            ..Self::phong(name)
        }
    }

    pub fn with_ambient(mut self, ambient: f32) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_diffusivity(mut self, diffusivity: f32) -> Self {
        self.diffusivity = diffusivity;
        self
    }

    pub fn with_specularity(mut self, specularity: f32) -> Self {
        self.specularity = specularity;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// One registry slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub shape: Shape,
    pub material: Material,
}

/// Fixed name -> (shape, material) table.
///
/// Built once by the scene; afterwards only read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneRegistry {
    entries: BTreeMap<String, RegistryEntry>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing any previous one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, shape: Shape, material: Material) {
        let name = name.into();
        tracing::debug!(%name, %shape, material = %material.name, "registry entry");
        self.entries
            .insert(name, RegistryEntry { shape, material });
    }

    /// Builder form of [`SceneRegistry::insert`].
    pub fn with(mut self, name: impl Into<String>, shape: Shape, material: Material) -> Self {
        self.insert(name, shape, material);
        self
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    pub fn shape(&self, name: &str) -> Option<&Shape> {
        self.entries.get(name).map(|e| &e.shape)
    }

    pub fn material(&self, name: &str) -> Option<&Material> {
        self.entries.get(name).map(|e| &e.material)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegistryEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn crate_info() -> &'static str {
    "bigday-assets v0.1.0"
}
