mod extrude;
mod sweep;

pub use extrude::Extrude;
pub use sweep::{CirclePath, Sweep};
