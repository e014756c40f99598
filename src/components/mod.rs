pub mod accommodation_dashboard;
pub mod admin_dashboard;
pub mod app;
pub mod location_autocomplete;
pub mod navbar;
pub mod transport_dashboard;
pub mod traveler_dashboard;

pub use accommodation_dashboard::AccommodationDashboard;
pub use admin_dashboard::AdminDashboard;
pub use app::App;
pub use location_autocomplete::LocationAutocomplete;
pub use navbar::Navbar;
pub use transport_dashboard::TransportDashboard;
pub use traveler_dashboard::TravelerDashboard;
