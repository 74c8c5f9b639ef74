//! Client-side browsing core: search-as-you-type, the shared selection and
//! recommendation paging. Everything here runs on the page's event loop; the
//! only shared mutable piece is the [`SelectionStore`].

pub mod debouncer;
pub mod page;
pub mod paginator;
pub mod recommendations;
pub mod search;
pub mod selection;

pub use debouncer::Debouncer;
pub use page::BrowsePage;
pub use paginator::{page_count, window, PageWindow};
pub use recommendations::{RecommendationPager, Subject};
pub use search::{SearchEngine, SearchEvent, SearchPhase, SearchSettings};
pub use selection::{SelectionState, SelectionStore};
