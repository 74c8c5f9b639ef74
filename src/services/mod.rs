pub mod providers;
pub mod title_search;

pub use providers::{CatalogProvider, TmdbProvider};
pub use title_search::search_titles;
