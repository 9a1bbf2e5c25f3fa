mod bounding_box;
mod classify;
mod edges;
mod volume;

pub use bounding_box::{Aabb, BoundingBox};
pub use classify::{ClassifyPoint, PointClassification};
pub use edges::EdgeLengths;
pub use volume::Volume;
