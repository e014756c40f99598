pub mod outside_click;
pub mod places;
pub mod script_registry;

pub use places::{SuggestionOutcome, SuggestionProvider};
