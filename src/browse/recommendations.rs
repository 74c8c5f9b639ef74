//! Recommendation cards and keyword tags of a detail page.

use std::sync::Arc;

use crate::{
    browse::{
        paginator::{self, DEFAULT_PAGE_SIZE},
        selection::SelectionStore,
    },
    models::{Keyword, MediaKind, Title, TitleId},
    services::providers::CatalogProvider,
};

/// Title whose recommendations are listed; identifies the backing list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject {
    pub id: TitleId,
    pub kind: MediaKind,
}

/// Paged recommendations for one subject title.
///
/// The page index goes back to 1 whenever the subject changes. Fetch
/// failures are logged; a failed reload of the same subject keeps the
/// lists from the previous load.
pub struct RecommendationPager {
    provider: Arc<dyn CatalogProvider>,
    selection: SelectionStore,
    page_size: usize,

    subject: Option<Subject>,
    recommendations: Vec<Title>,
    keywords: Vec<Keyword>,
    page_index: usize,
}

impl RecommendationPager {
    pub fn new(provider: Arc<dyn CatalogProvider>, selection: SelectionStore) -> Self {
        Self::with_page_size(provider, selection, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(
        provider: Arc<dyn CatalogProvider>,
        selection: SelectionStore,
        page_size: usize,
    ) -> Self {
        Self {
            provider,
            selection,
            page_size: page_size.max(1),
            subject: None,
            recommendations: Vec::new(),
            keywords: Vec::new(),
            page_index: 1,
        }
    }

    /// Loads recommendations and keywords for `id`.
    pub async fn load(&mut self, id: TitleId, kind: MediaKind) {
        let subject = Subject { id, kind };
        if self.subject != Some(subject) {
            self.subject = Some(subject);
            self.page_index = 1;
            self.recommendations.clear();
            self.keywords.clear();
        }

        let (recommendations, keywords) = tokio::join!(
            self.provider.recommendations_for(id, kind),
            self.provider.keywords_for(id, kind),
        );

        match recommendations {
            Ok(titles) => self.recommendations = titles,
            Err(e) => {
                tracing::error!(error = %e, title_id = %id, kind = %kind, "Error fetching recommendations");
            }
        }

        match keywords {
            Ok(keywords) => self.keywords = keywords,
            Err(e) => {
                tracing::error!(error = %e, title_id = %id, kind = %kind, "Error fetching keywords");
            }
        }
    }

    pub fn subject(&self) -> Option<Subject> {
        self.subject
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn recommendations(&self) -> &[Title] {
        &self.recommendations
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        paginator::page_count(self.recommendations.len(), self.page_size)
    }

    /// Cards on the active page
    pub fn current_page(&self) -> &[Title] {
        paginator::window(&self.recommendations, self.page_index, self.page_size)
    }

    /// Jumps to `page_index`; out-of-range pages simply show nothing
    pub fn set_page(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    pub fn next_page(&mut self) {
        if self.page_index < self.page_count() {
            self.page_index += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page_index > 1 {
            self.page_index -= 1;
        }
    }

    /// Selects the card at `index` on the active page. Returns false when
    /// there is no such card.
    pub fn pick(&self, index: usize) -> bool {
        match self.current_page().get(index) {
            Some(title) => {
                self.selection.select(title.clone());
                true
            }
            None => false,
        }
    }
}
