//! Marching tetrahedra over a sampled signed distance field.

use std::collections::HashMap;

use crate::error::Result;
use crate::math::{Point3, Vector3};
use crate::operations::query::Aabb;
use crate::shape::{ShapeId, ShapeStore};

use super::TriangleMesh;

/// Cells per block edge; blocks the distance bound proves empty are skipped.
const BLOCK: usize = 8;

/// Cube corner offsets, x varying fastest on each face.
const CORNERS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// Six tetrahedra sharing the 0–6 diagonal. Neighbouring cubes split their
/// shared faces along the same diagonal, so the surface has no cracks.
const TETS: [[usize; 4]; 6] = [
    [0, 5, 1, 6],
    [0, 1, 2, 6],
    [0, 2, 3, 6],
    [0, 3, 7, 6],
    [0, 7, 4, 6],
    [0, 4, 5, 6],
];

/// A regular sampling lattice.
#[derive(Debug, Clone)]
pub(super) struct Grid {
    pub origin: Point3,
    pub cell: f64,
    /// Cell counts along x, y, z.
    pub dims: [usize; 3],
}

impl Grid {
    /// Lattice covering `bbox` with one spare cell on every side.
    pub fn covering(bbox: &Aabb, cell: f64) -> Self {
        let pad = Vector3::repeat(cell);
        let extent = bbox.extent() + pad * 2.0;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let dims = [0, 1, 2].map(|i| ((extent[i] / cell).ceil() as usize).max(1));
        Self {
            origin: bbox.min - pad,
            cell,
            dims,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn point(&self, i: usize, j: usize, k: usize) -> Point3 {
        self.origin + Vector3::new(i as f64, j as f64, k as f64) * self.cell
    }

    fn vertex_key(&self, i: usize, j: usize, k: usize) -> u64 {
        let nx = self.dims[0] as u64 + 1;
        let ny = self.dims[1] as u64 + 1;
        i as u64 + nx * (j as u64 + ny * k as u64)
    }
}

#[derive(Debug, Clone, Copy)]
struct Corner {
    key: u64,
    point: Point3,
    value: f64,
}

#[derive(Default)]
struct MeshBuilder {
    mesh: TriangleMesh,
    edge_vertices: HashMap<(u64, u64), u32>,
}

impl MeshBuilder {
    /// Surface vertex on the lattice edge between `a` and `b`, shared by
    /// every triangle that crosses that edge.
    fn edge_vertex(&mut self, a: Corner, b: Corner) -> u32 {
        let key = (a.key.min(b.key), a.key.max(b.key));
        if let Some(index) = self.edge_vertices.get(&key) {
            return *index;
        }
        let t = a.value / (a.value - b.value);
        let point = a.point + (b.point - a.point) * t;
        #[allow(clippy::cast_possible_truncation)]
        let index = self.mesh.vertices.len() as u32;
        self.mesh.vertices.push(point);
        self.edge_vertices.insert(key, index);
        index
    }

    /// Pushes a triangle wound so its normal points along `outward`.
    fn emit(&mut self, mut tri: [u32; 3], outward: &Vector3) {
        let [a, b, c] = tri.map(|i| self.mesh.vertices[i as usize]);
        if (b - a).cross(&(c - a)).dot(outward) < 0.0 {
            tri.swap(1, 2);
        }
        self.mesh.indices.push(tri);
    }

    fn add_tet(&mut self, tet: [Corner; 4]) {
        let mut inside = [tet[0]; 4];
        let mut outside = [tet[0]; 4];
        let (mut n_in, mut n_out) = (0, 0);
        for corner in tet {
            if corner.value < 0.0 {
                inside[n_in] = corner;
                n_in += 1;
            } else {
                outside[n_out] = corner;
                n_out += 1;
            }
        }
        if n_in == 0 || n_out == 0 {
            return;
        }
        let outward = centroid(&outside[..n_out]) - centroid(&inside[..n_in]);

        match n_in {
            1 => {
                let a = inside[0];
                let tri = [
                    self.edge_vertex(a, outside[0]),
                    self.edge_vertex(a, outside[1]),
                    self.edge_vertex(a, outside[2]),
                ];
                self.emit(tri, &outward);
            }
            3 => {
                let a = outside[0];
                let tri = [
                    self.edge_vertex(inside[0], a),
                    self.edge_vertex(inside[1], a),
                    self.edge_vertex(inside[2], a),
                ];
                self.emit(tri, &outward);
            }
            _ => {
                let (a, b) = (inside[0], inside[1]);
                let (c, d) = (outside[0], outside[1]);
                let ac = self.edge_vertex(a, c);
                let ad = self.edge_vertex(a, d);
                let bd = self.edge_vertex(b, d);
                let bc = self.edge_vertex(b, c);
                self.emit([ac, ad, bd], &outward);
                self.emit([ac, bd, bc], &outward);
            }
        }
    }
}

fn centroid(corners: &[Corner]) -> Vector3 {
    let sum: Vector3 = corners.iter().map(|c| c.point.coords).sum();
    #[allow(clippy::cast_precision_loss)]
    let n = corners.len() as f64;
    sum / n
}

/// Extracts the zero level set of the shape's distance field on `grid`.
pub(super) fn march(store: &ShapeStore, id: ShapeId, grid: &Grid) -> Result<TriangleMesh> {
    let mut builder = MeshBuilder::default();
    let blocks = grid.dims.map(|n| n.div_ceil(BLOCK));
    let mut values: Vec<f64> = Vec::new();

    for bk in 0..blocks[2] {
        for bj in 0..blocks[1] {
            for bi in 0..blocks[0] {
                let lo = [bi * BLOCK, bj * BLOCK, bk * BLOCK];
                let hi = [0, 1, 2].map(|a| (lo[a] + BLOCK).min(grid.dims[a]));
                let bounds = Aabb::new(grid.point(lo[0], lo[1], lo[2]), grid.point(hi[0], hi[1], hi[2]));
                let d = store.signed_distance(id, &bounds.center())?;
                if d.abs() > bounds.extent().norm() * 0.5 {
                    continue;
                }

                let n = [0, 1, 2].map(|a| hi[a] - lo[a] + 1);
                values.clear();
                for k in 0..n[2] {
                    for j in 0..n[1] {
                        for i in 0..n[0] {
                            let p = grid.point(lo[0] + i, lo[1] + j, lo[2] + k);
                            values.push(store.signed_distance(id, &p)?);
                        }
                    }
                }
                let local = |i: usize, j: usize, k: usize| i + n[0] * (j + n[1] * k);

                for k in 0..n[2] - 1 {
                    for j in 0..n[1] - 1 {
                        for i in 0..n[0] - 1 {
                            let corners = CORNERS.map(|[di, dj, dk]| {
                                let (gi, gj, gk) = (lo[0] + i + di, lo[1] + j + dj, lo[2] + k + dk);
                                Corner {
                                    key: grid.vertex_key(gi, gj, gk),
                                    point: grid.point(gi, gj, gk),
                                    value: values[local(i + di, j + dj, k + dk)],
                                }
                            });
                            let n_in = corners.iter().filter(|c| c.value < 0.0).count();
                            if n_in == 0 || n_in == 8 {
                                continue;
                            }
                            for tet in &TETS {
                                builder.add_tet(tet.map(|c| corners[c]));
                            }
                        }
                    }
                }
            }
        }
    }
    Ok(builder.mesh)
}
