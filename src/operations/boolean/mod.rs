mod engine;
mod intersect;
mod subtract;
mod union;

pub use engine::fuse_all;
pub use intersect::Intersect;
pub use subtract::Subtract;
pub use union::Union;
