pub mod catalog;
pub mod podcast_search;
pub mod profile_analyzer;
pub mod profile_source;
pub mod providers;
pub mod recommendations;

pub use catalog::CatalogService;
pub use profile_source::{MockProfileSource, ProfileSource};
