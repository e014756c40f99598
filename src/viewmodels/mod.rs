pub mod autocomplete_viewmodel;

pub use autocomplete_viewmodel::AutocompleteViewModel;
