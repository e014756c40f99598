pub mod place;
pub mod portal;

pub use place::{PlacePrediction, Suggestion};
pub use portal::Portal;
