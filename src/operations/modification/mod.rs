mod fillet;
mod offset;

pub use fillet::{EdgeFilter, Fillet};
pub use offset::Offset;
