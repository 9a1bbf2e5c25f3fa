//! Binary STL export

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::{ExportError, Result};
use crate::math::Vector3;
use crate::scene::Scene;
use crate::tessellation::{TessellateShape, TessellationParams, TriangleMesh};

/// Writes a mesh as binary STL.
///
/// # Errors
///
/// Returns [`ExportError::Empty`] for a mesh without triangles and
/// [`ExportError::Io`] if the file cannot be written.
pub fn write_stl(mesh: &TriangleMesh, path: &Path) -> Result<()> {
    if mesh.is_empty() {
        return Err(ExportError::Empty(path.display().to_string()).into());
    }
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    #[allow(clippy::cast_possible_truncation)]
    let to_f32 = |v: [f64; 3]| [v[0] as f32, v[1] as f32, v[2] as f32];
    let triangles: Vec<stl_io::Triangle> = (0..mesh.triangle_count())
        .map(|i| {
            let [a, b, c] = mesh.triangle(i);
            let normal = (b - a)
                .cross(&(c - a))
                .try_normalize(0.0)
                .unwrap_or_else(Vector3::zeros);
            stl_io::Triangle {
                normal: stl_io::Normal::new(to_f32(normal.into())),
                vertices: [a, b, c].map(|p| stl_io::Vertex::new(to_f32(p.coords.into()))),
            }
        })
        .collect();

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    stl_io::write_stl(&mut writer, triangles.iter()).map_err(io_err)?;
    Ok(())
}

/// Tessellates a scene object and writes `<dir>/<label>.stl`, creating
/// `dir` if needed.
///
/// # Errors
///
/// Returns an error if the object does not exist, tessellation fails or
/// the file cannot be written.
pub fn export_stl(
    scene: &Scene,
    label: &str,
    dir: &Path,
    params: TessellationParams,
) -> Result<PathBuf> {
    let object = scene.object(label)?;
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mesh = TessellateShape::new(object.shape, params).execute(scene.store())?;
    let path = dir.join(format!("{label}.stl"));
    write_stl(&mesh, &path)?;
    tracing::info!(
        path = %path.display(),
        triangles = mesh.triangle_count(),
        "exported STL"
    );
    Ok(path)
}
