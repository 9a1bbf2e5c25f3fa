mod make_box;
mod make_compound;
mod make_cone;
mod make_cylinder;
mod make_face;
mod make_loft;
mod make_torus;

pub use make_box::MakeBox;
pub use make_compound::MakeCompound;
pub use make_cone::MakeCone;
pub use make_cylinder::MakeCylinder;
pub use make_face::MakeFace;
pub use make_loft::{CircleSection, MakeLoft};
pub use make_torus::MakeTorus;

use crate::error::{OperationError, Result};
use crate::math::{rotation_from_z, Isometry3, Point3, Vector3};
use crate::shape::{Primitive, ShapeId, ShapeKind, ShapeStore};

/// Inserts a primitive whose local +Z is mapped onto `axis` and whose local
/// origin lands on `base`.
fn insert_axial(
    store: &mut ShapeStore,
    primitive: Primitive,
    base: Point3,
    axis: &Vector3,
    what: &str,
) -> Result<ShapeId> {
    let rotation = rotation_from_z(axis)
        .ok_or_else(|| OperationError::InvalidInput(format!("{what} axis must be non-zero")))?;
    let placement = Isometry3::from_parts(base.coords.into(), rotation);
    store.add_shape(ShapeKind::Primitive {
        primitive,
        placement,
    })
}
