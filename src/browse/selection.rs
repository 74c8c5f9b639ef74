//! Page-scoped "selected title + overlay visible" state.

use std::sync::Arc;
use tokio::sync::watch;

use crate::models::Title;

/// Snapshot of the shared selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub selected_title: Option<Title>,
    pub overlay_visible: bool,
}

/// Shared handle to the one selection cell of a page.
///
/// Create it once per page and hand clones to every browsing surface; all
/// clones write through the same cell. Writes are serialized by the watch
/// channel, and subscribers are woken whenever either field changes.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    tx: Arc<watch::Sender<SelectionState>>,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SelectionState::default());
        Self { tx: Arc::new(tx) }
    }

    /// Makes `title` the current selection and opens the overlay.
    pub fn select(&self, title: Title) {
        tracing::debug!(title_id = %title.id, kind = %title.media_kind, "Title selected");
        self.tx.send_if_modified(|state| {
            let changed = !state.overlay_visible || state.selected_title.as_ref() != Some(&title);
            state.selected_title = Some(title);
            state.overlay_visible = true;
            changed
        });
    }

    /// Shows or hides the overlay; the selection itself is kept.
    pub fn set_overlay_visible(&self, visible: bool) {
        self.tx.send_if_modified(|state| {
            let changed = state.overlay_visible != visible;
            state.overlay_visible = visible;
            changed
        });
    }

    pub fn read(&self) -> SelectionState {
        self.tx.borrow().clone()
    }

    /// Receiver for renderers that redraw on every change
    pub fn subscribe(&self) -> watch::Receiver<SelectionState> {
        self.tx.subscribe()
    }

    /// True when both handles point at the same cell
    pub fn same_store(&self, other: &SelectionStore) -> bool {
        Arc::ptr_eq(&self.tx, &other.tx)
    }
}
