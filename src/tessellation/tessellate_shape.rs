use crate::error::{Result, TessellationError};
use crate::shape::{ShapeId, ShapeKind, ShapeStore};

use super::marching::{march, Grid};
use super::{TessellationParams, TriangleMesh};

/// Tessellates a solid into a triangle mesh.
///
/// Compounds are tessellated member by member and concatenated, so
/// overlapping members keep their own surfaces.
pub struct TessellateShape {
    shape: ShapeId,
    params: TessellationParams,
}

impl TessellateShape {
    /// Creates a new `TessellateShape` operation.
    #[must_use]
    pub fn new(shape: ShapeId, params: TessellationParams) -> Self {
        Self { shape, params }
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid, the shape is missing,
    /// or no surface is found.
    pub fn execute(&self, store: &ShapeStore) -> Result<TriangleMesh> {
        if !(self.params.deflection > 0.0) || self.params.max_cells_per_axis == 0 {
            return Err(TessellationError::InvalidParameters(format!(
                "deflection {} with {} cells per axis",
                self.params.deflection, self.params.max_cells_per_axis
            ))
            .into());
        }
        let mesh = self.tessellate(store, self.shape)?;
        if mesh.is_empty() {
            return Err(TessellationError::Failed("shape has no surface".into()).into());
        }
        Ok(mesh)
    }

    fn tessellate(&self, store: &ShapeStore, id: ShapeId) -> Result<TriangleMesh> {
        let data = store.shape(id)?;
        if let ShapeKind::Compound(children) = &data.kind {
            let mut mesh = TriangleMesh::default();
            for child in children {
                mesh.merge(self.tessellate(store, *child)?);
            }
            return Ok(mesh);
        }
        #[allow(clippy::cast_precision_loss)]
        let cell = self
            .params
            .deflection
            .max(data.bbox.max_extent() / self.params.max_cells_per_axis as f64);
        let grid = Grid::covering(&data.bbox, cell);
        tracing::debug!(cell, dims = ?grid.dims, "tessellating shape");
        let mut mesh = march(store, id, &grid)?;
        mesh.compute_normals();
        Ok(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::operations::boolean::Subtract;
    use crate::operations::creation::{MakeBox, MakeCompound, MakeCylinder};
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    #[test]
    fn box_mesh_volume_matches() {
        let mut store = ShapeStore::new();
        let solid = MakeBox::new(Point3::origin(), Vector3::new(10.0, 10.0, 10.0))
            .execute(&mut store)
            .unwrap();
        let mesh = TessellateShape::new(solid, TessellationParams::with_deflection(0.5))
            .execute(&store)
            .unwrap();
        assert_relative_eq!(mesh.volume(), 1000.0, max_relative = 0.05);
    }

    #[test]
    fn tube_mesh_is_closed() {
        let mut store = ShapeStore::new();
        let outer = MakeCylinder::new(Point3::origin(), 5.0, Vector3::z(), 8.0)
            .execute(&mut store)
            .unwrap();
        let inner = MakeCylinder::new(Point3::new(0.0, 0.0, -1.0), 3.0, Vector3::z(), 10.0)
            .execute(&mut store)
            .unwrap();
        let tube = Subtract::new(outer, inner).execute(&mut store).unwrap();
        let mesh = TessellateShape::new(tube, TessellationParams::with_deflection(0.4))
            .execute(&store)
            .unwrap();

        // Every undirected edge is shared by exactly two triangles.
        let mut uses: HashMap<(u32, u32), usize> = HashMap::new();
        for [a, b, c] in &mesh.indices {
            for (u, v) in [(*a, *b), (*b, *c), (*c, *a)] {
                *uses.entry((u.min(v), u.max(v))).or_default() += 1;
            }
        }
        assert!(uses.values().all(|n| *n == 2));
        assert!(mesh.volume() > 0.0);
    }

    #[test]
    fn compound_meshes_are_concatenated() {
        let mut store = ShapeStore::new();
        let a = MakeBox::new(Point3::origin(), Vector3::new(2.0, 2.0, 2.0))
            .execute(&mut store)
            .unwrap();
        let b = MakeBox::new(Point3::new(5.0, 0.0, 0.0), Vector3::new(2.0, 2.0, 2.0))
            .execute(&mut store)
            .unwrap();
        let params = TessellationParams::with_deflection(0.25);
        let single = TessellateShape::new(a, params).execute(&store).unwrap();
        let compound = MakeCompound::new(vec![a, b]).execute(&mut store).unwrap();
        let both = TessellateShape::new(compound, params).execute(&store).unwrap();
        assert_eq!(both.triangle_count(), 2 * single.triangle_count());
    }

    #[test]
    fn zero_deflection_is_rejected() {
        let mut store = ShapeStore::new();
        let solid = MakeBox::new(Point3::origin(), Vector3::new(1.0, 1.0, 1.0))
            .execute(&mut store)
            .unwrap();
        let result = TessellateShape::new(solid, TessellationParams::with_deflection(0.0)).execute(&store);
        assert!(result.is_err());
    }
}
