pub mod analysis;
pub mod config;
pub mod design;
pub mod error;
pub mod export;
pub mod materials;
pub mod math;
pub mod operations;
pub mod pipeline;
pub mod scene;
pub mod shape;
pub mod tessellation;

pub use error::{ForgeError, Result};
