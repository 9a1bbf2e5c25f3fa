use crate::error::{OperationError, Result};
use crate::math::TOLERANCE;
use crate::operations::query::EdgeLengths;
use crate::shape::{Primitive, ShapeId, ShapeKind, ShapeStore};

/// Selects which edges a [`Fillet`] rounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeFilter {
    All,
    /// Edges strictly longer than `min` and strictly shorter than `max`.
    LengthBetween { min: f64, max: f64 },
}

impl EdgeFilter {
    fn accepts(self, length: f64) -> bool {
        match self {
            Self::All => true,
            Self::LengthBetween { min, max } => length > min && length < max,
        }
    }
}

/// Rounds the edges of a solid with a constant radius.
///
/// Only sharp boxes and cylinders with every edge selected can be rounded.
/// Anything else fails, and callers are expected to keep the unrounded
/// solid.
pub struct Fillet {
    shape: ShapeId,
    radius: f64,
    filter: EdgeFilter,
}

impl Fillet {
    /// Creates a new `Fillet` over all edges.
    #[must_use]
    pub fn new(shape: ShapeId, radius: f64) -> Self {
        Self {
            shape,
            radius,
            filter: EdgeFilter::All,
        }
    }

    /// Restricts the fillet to edges accepted by `filter`.
    #[must_use]
    pub fn with_filter(mut self, filter: EdgeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Executes the fillet, creating the rounded solid in the shape store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for a non-positive radius or
    /// an empty edge selection, [`OperationError::Failed`] when the radius
    /// does not fit, and [`OperationError::Unsupported`] for partial edge
    /// selections or shapes other than a sharp box or cylinder.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<ShapeId> {
        let r = self.radius;
        if !(r > TOLERANCE) {
            return Err(OperationError::InvalidInput(format!("fillet radius must be positive, got {r}")).into());
        }
        let edges = EdgeLengths::new(self.shape).execute(store)?;
        let selected = edges.iter().filter(|len| self.filter.accepts(**len)).count();
        if selected == 0 {
            return Err(OperationError::InvalidInput("no edges selected for fillet".into()).into());
        }
        if selected < edges.len() {
            return Err(OperationError::Unsupported(format!(
                "fillet on {selected} of {} edges",
                edges.len()
            ))
            .into());
        }

        let ShapeKind::Primitive {
            primitive,
            placement,
        } = &store.shape(self.shape)?.kind
        else {
            return Err(OperationError::Unsupported("fillet on a composite solid".into()).into());
        };
        let rounded = match primitive {
            Primitive::Box { size, fillet } if *fillet < TOLERANCE => {
                if 2.0 * r >= size.min() {
                    return Err(OperationError::Failed(format!(
                        "fillet radius {r} too large for box edge {}",
                        size.min()
                    ))
                    .into());
                }
                Primitive::Box {
                    size: *size,
                    fillet: r,
                }
            }
            Primitive::Cylinder {
                radius,
                height,
                fillet,
            } if *fillet < TOLERANCE => {
                if r >= *radius || 2.0 * r >= *height {
                    return Err(OperationError::Failed(format!(
                        "fillet radius {r} too large for cylinder r = {radius}, h = {height}"
                    ))
                    .into());
                }
                Primitive::Cylinder {
                    radius: *radius,
                    height: *height,
                    fillet: r,
                }
            }
            other => {
                return Err(OperationError::Unsupported(format!("fillet on {}", other.name())).into());
            }
        };
        let placement = *placement;
        store.add_shape(ShapeKind::Primitive {
            primitive: rounded,
            placement,
        })
    }
}
