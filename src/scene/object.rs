use serde::{Deserialize, Serialize};

use crate::materials::MaterialTag;
use crate::shape::ShapeId;

/// An RGB display color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Color of parts registered without a material.
    pub const DEFAULT: Self = Self::rgb(0.8, 0.8, 0.8);
}

/// How a scene object is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    FlatLines,
    Shaded,
    Wireframe,
    Points,
}

/// A named part of a scene.
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Unique label within the scene.
    pub label: String,
    pub shape: ShapeId,
    pub material: Option<MaterialTag>,
    pub color: Color,
    pub display_mode: DisplayMode,
}

impl SceneObject {
    pub(super) fn new(label: String, shape: ShapeId, material: Option<MaterialTag>) -> Self {
        let color = material.map_or(Color::DEFAULT, |tag| tag.record().color);
        Self {
            label,
            shape,
            material,
            color,
            display_mode: DisplayMode::default(),
        }
    }
}
