mod place;
mod translate;

pub use place::Place;
pub use translate::Translate;
