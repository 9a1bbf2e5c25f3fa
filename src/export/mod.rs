//! File exports: binary STL meshes and plain-text reports.

mod report;
mod stl;

pub use report::write_report;
pub use stl::{export_stl, write_stl};
