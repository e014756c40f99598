pub mod use_location_suggestions;
pub mod use_script;

pub use use_location_suggestions::use_location_suggestions;
pub use use_script::use_script;
