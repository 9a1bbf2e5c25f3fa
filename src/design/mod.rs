//! Parametric generators.
//!
//! Each generator takes an immutable parameter struct and a
//! [`SceneBuilder`](crate::scene::SceneBuilder), builds its primitives,
//! assembles them with booleans in a fixed order and registers the parts
//! and the final solid in the scene.

mod fallback;
pub mod fusion_drive;
pub mod nozzle;
mod parts;
pub mod satellite;
pub mod shield_probe;
pub mod spaceship;

pub use fallback::{or_fallback, BuildLog, BuildNote, Built};
pub use parts::Axis;

use crate::shape::ShapeId;

/// Result of running one generator.
#[derive(Debug, Clone)]
pub struct DesignBuild {
    /// Label of the final fused object in the scene.
    pub final_label: String,
    pub final_shape: ShapeId,
    /// Unfused collection of the same parts, when the design makes one.
    pub compound: Option<ShapeId>,
    /// Named sub-assemblies that went into the final fuse.
    pub subassemblies: Vec<(String, ShapeId)>,
    pub log: BuildLog,
}
