use std::sync::Arc;

use crate::{
    browse::{RecommendationPager, SearchEngine, SearchSettings, SelectionStore},
    services::providers::CatalogProvider,
};

/// Browsing surfaces of one page, wired to a single selection store
pub struct BrowsePage {
    selection: SelectionStore,
    pub search: SearchEngine,
    pub recommendations: RecommendationPager,
}

impl BrowsePage {
    pub fn new(
        provider: Arc<dyn CatalogProvider>,
        settings: SearchSettings,
        page_size: usize,
    ) -> Self {
        let selection = SelectionStore::new();
        let search = SearchEngine::new(Arc::clone(&provider), selection.clone(), settings);
        let recommendations =
            RecommendationPager::with_page_size(provider, selection.clone(), page_size);

        Self {
            selection,
            search,
            recommendations,
        }
    }

    /// The store the overlay renderer reads
    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    /// Tears the page down; pending searches never fire afterwards
    pub fn close(mut self) {
        self.search.teardown();
    }
}
