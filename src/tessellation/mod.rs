mod marching;
mod tessellate_shape;

pub use tessellate_shape::TessellateShape;

use crate::math::{Point3, Vector3};

/// Parameters controlling tessellation quality.
#[derive(Debug, Clone, Copy)]
pub struct TessellationParams {
    /// Target deviation from the true surface; used as the sampling cell size.
    pub deflection: f64,
    /// Upper bound on cells along the longest bounding-box axis.
    pub max_cells_per_axis: usize,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            deflection: 0.5,
            max_cells_per_axis: 128,
        }
    }
}

impl TessellationParams {
    /// Parameters with the given deflection and the default cell cap.
    #[must_use]
    pub fn with_deflection(deflection: f64) -> Self {
        Self {
            deflection,
            ..Self::default()
        }
    }
}

/// A triangle mesh approximation of a surface.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle, counter-clockwise
    /// seen from outside).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Appends another mesh, offsetting its indices.
    pub fn merge(&mut self, other: TriangleMesh) {
        #[allow(clippy::cast_possible_truncation)]
        let base = self.vertices.len() as u32;
        self.vertices.extend(other.vertices);
        self.normals.extend(other.normals);
        self.indices
            .extend(other.indices.into_iter().map(|[a, b, c]| [a + base, b + base, c + base]));
    }

    /// Corner positions of triangle `i`.
    #[must_use]
    pub fn triangle(&self, i: usize) -> [Point3; 3] {
        let [a, b, c] = self.indices[i];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Enclosed volume by the signed tetrahedron method.
    #[must_use]
    pub fn volume(&self) -> f64 {
        let mut signed = 0.0;
        for i in 0..self.indices.len() {
            let [v0, v1, v2] = self.triangle(i);
            signed += v0.coords.dot(&v1.coords.cross(&v2.coords));
        }
        signed / 6.0
    }

    /// Recomputes vertex normals as the normalized sum of adjacent
    /// triangle normals.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vector3::zeros(); self.vertices.len()];
        for i in 0..self.indices.len() {
            let [v0, v1, v2] = self.triangle(i);
            let n = (v1 - v0).cross(&(v2 - v0));
            for idx in self.indices[i] {
                normals[idx as usize] += n;
            }
        }
        self.normals = normals
            .into_iter()
            .map(|n| n.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::z))
            .collect();
    }
}
