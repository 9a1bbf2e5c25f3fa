mod evaluate;
pub mod primitive;

pub use primitive::Primitive;

use slotmap::SlotMap;

use crate::error::{GeometryError, Result, SceneError};
use crate::math::{Isometry3, Point2};
use crate::operations::query::Aabb;

slotmap::new_key_type! {
    /// Handle to a solid (or compound) in a [`ShapeStore`].
    pub struct ShapeId;
    /// Handle to a planar face in a [`ShapeStore`].
    pub struct FaceId;
}

/// Boolean combination kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    /// Fuse.
    Union,
    /// Cut.
    Subtract,
    /// Common.
    Intersect,
}

impl BooleanOp {
    /// The operation's conventional CAD name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Union => "fuse",
            Self::Subtract => "cut",
            Self::Intersect => "common",
        }
    }
}

/// How a shape is built from primitives and other shapes.
#[derive(Debug, Clone)]
pub enum ShapeKind {
    Primitive {
        primitive: Primitive,
        placement: Isometry3,
    },
    Transformed {
        child: ShapeId,
        placement: Isometry3,
    },
    Boolean {
        op: BooleanOp,
        lhs: ShapeId,
        rhs: ShapeId,
    },
    /// Positive distance grows the solid, negative shrinks it.
    Offset {
        child: ShapeId,
        distance: f64,
    },
    /// Plain collection, no boolean merge.
    Compound(Vec<ShapeId>),
}

/// A stored shape with its cached bounding box.
#[derive(Debug, Clone)]
pub struct ShapeData {
    pub kind: ShapeKind,
    pub bbox: Aabb,
}

impl ShapeData {
    #[must_use]
    pub fn is_compound(&self) -> bool {
        matches!(self.kind, ShapeKind::Compound(_))
    }
}

/// A planar polygonal face.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// Outline in the face's local XY plane.
    pub outline: Vec<Point2>,
    /// Maps local XY onto the face plane; local +Z is the face normal.
    pub frame: Isometry3,
}

/// Central arena that owns all shapes and faces.
///
/// Shapes are immutable once inserted; operations create new shapes that
/// reference their operands by ID.
#[derive(Debug, Default)]
pub struct ShapeStore {
    shapes: SlotMap<ShapeId, ShapeData>,
    faces: SlotMap<FaceId, FaceData>,
}

impl ShapeStore {
    /// Creates a new, empty shape store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a shape, computing its bounding box from its operands.
    ///
    /// # Errors
    ///
    /// Returns an error if an operand is missing or a compound is empty.
    pub fn add_shape(&mut self, kind: ShapeKind) -> Result<ShapeId> {
        let bbox = self.bounds_of(&kind)?;
        Ok(self.shapes.insert(ShapeData { kind, bbox }))
    }

    /// Returns a reference to the shape data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn shape(&self, id: ShapeId) -> std::result::Result<&ShapeData, SceneError> {
        self.shapes
            .get(id)
            .ok_or_else(|| SceneError::EntityNotFound("shape".into()))
    }

    /// Inserts a face and returns its ID.
    pub fn add_face(&mut self, data: FaceData) -> FaceId {
        self.faces.insert(data)
    }

    /// Returns a reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn face(&self, id: FaceId) -> std::result::Result<&FaceData, SceneError> {
        self.faces
            .get(id)
            .ok_or_else(|| SceneError::EntityNotFound("face".into()))
    }

    /// Number of shapes in the store.
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    fn bounds_of(&self, kind: &ShapeKind) -> Result<Aabb> {
        let bbox = match kind {
            ShapeKind::Primitive {
                primitive,
                placement,
            } => primitive.local_bounds().transformed(placement),
            ShapeKind::Transformed { child, placement } => {
                self.shape(*child)?.bbox.transformed(placement)
            }
            ShapeKind::Boolean { op, lhs, rhs } => {
                let a = self.shape(*lhs)?.bbox;
                let b = self.shape(*rhs)?.bbox;
                match op {
                    BooleanOp::Union => a.union(&b),
                    BooleanOp::Subtract => a,
                    BooleanOp::Intersect => a.intersection(&b).ok_or_else(|| {
                        GeometryError::Degenerate("common of disjoint boxes".into())
                    })?,
                }
            }
            ShapeKind::Offset { child, distance } => {
                let bbox = self.shape(*child)?.bbox;
                if *distance > 0.0 {
                    bbox.expanded(*distance)
                } else {
                    bbox
                }
            }
            ShapeKind::Compound(children) => {
                let mut iter = children.iter();
                let first = iter
                    .next()
                    .ok_or_else(|| GeometryError::Degenerate("empty compound".into()))?;
                let mut bbox = self.shape(*first)?.bbox;
                for child in iter {
                    bbox = bbox.union(&self.shape(*child)?.bbox);
                }
                bbox
            }
        };
        Ok(bbox)
    }
}
