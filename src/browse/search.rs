//! Search-as-you-type over the remote catalog.
//!
//! Keystrokes update the raw query immediately and restart the debouncer.
//! When the debouncer fires, the settled query is either sent to the
//! provider (long enough) or clears the results (too short). Every request
//! carries a sequence number and only the response for the latest one is
//! ever applied, so a slow early request cannot overwrite a later result.

use std::{sync::Arc, time::Duration};
use tokio::sync::mpsc;

use crate::{
    browse::{debouncer::Debouncer, selection::SelectionStore},
    error::AppResult,
    models::Title,
    services::{providers::CatalogProvider, title_search::search_titles},
};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub debounce: Duration,
    /// Queries with fewer characters never issue a request
    pub min_query_len: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Input not focused
    Idle,
    /// Keystrokes arriving, debounce window open
    Typing,
    /// Request in flight for the settled query
    Pending,
    /// Latest settled query handled
    Settled,
}

/// What a call to [`SearchEngine::next_event`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Requested { seq: u64, query: String },
    /// Settled query below the minimum length; results emptied, no request
    Cleared,
    /// Settled query equals the previous one
    Unchanged,
    Applied { seq: u64, results: usize },
    /// Response for a superseded request, ignored
    Discarded { seq: u64 },
    /// Request failed; previous results kept
    Failed { seq: u64 },
}

#[derive(Debug)]
struct SearchResponse {
    seq: u64,
    query: String,
    result: AppResult<Vec<Title>>,
}

/// State of the search box and its results panel.
///
/// Input handlers (`on_query_changed`, `on_blur`, ...) are synchronous. The
/// owning event loop also awaits [`SearchEngine::next_event`], which resolves
/// when the debouncer fires or a response arrives.
pub struct SearchEngine {
    provider: Arc<dyn CatalogProvider>,
    selection: SelectionStore,
    settings: SearchSettings,

    phase: SearchPhase,
    focused: bool,
    raw: String,
    debounced: String,
    results: Vec<Title>,
    show_results: bool,

    debouncer: Debouncer<String>,
    next_seq: u64,
    latest_seq: u64,
    awaiting: Option<u64>,
    responses_tx: mpsc::UnboundedSender<SearchResponse>,
    responses_rx: mpsc::UnboundedReceiver<SearchResponse>,
}

impl SearchEngine {
    pub fn new(
        provider: Arc<dyn CatalogProvider>,
        selection: SelectionStore,
        settings: SearchSettings,
    ) -> Self {
        let (responses_tx, responses_rx) = mpsc::unbounded_channel();
        Self {
            provider,
            selection,
            settings,
            phase: SearchPhase::Idle,
            focused: false,
            raw: String::new(),
            debounced: String::new(),
            results: Vec::new(),
            show_results: false,
            debouncer: Debouncer::new(),
            next_seq: 1,
            latest_seq: 0,
            awaiting: None,
            responses_tx,
            responses_rx,
        }
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn raw_query(&self) -> &str {
        &self.raw
    }

    pub fn debounced_query(&self) -> &str {
        &self.debounced
    }

    pub fn results(&self) -> &[Title] {
        &self.results
    }

    /// Whether the results panel should be drawn under the input
    pub fn results_panel_visible(&self) -> bool {
        self.show_results && self.shows_panel(&self.raw)
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    /// Sequence number of the most recently issued request (0 before any)
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    fn long_enough(&self, query: &str) -> bool {
        query.chars().count() >= self.settings.min_query_len
    }

    /// Whitespace-only text never searches, so it never opens the panel
    fn shows_panel(&self, query: &str) -> bool {
        !query.trim().is_empty() && self.long_enough(query)
    }

    fn set_phase(&mut self, phase: SearchPhase) {
        if self.focused {
            self.phase = phase;
        }
    }

    /// Keystroke: new raw text, restart the debounce window.
    pub fn on_query_changed(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.focused = true;
        self.show_results = self.shows_panel(&text);
        self.raw = text.clone();
        self.debouncer.schedule(text, self.settings.debounce);
        self.set_phase(SearchPhase::Typing);
    }

    /// A result was picked: select it and close the panel.
    pub fn on_result_picked(&mut self, title: Title) {
        self.selection.select(title);
        self.show_results = false;
    }

    /// Input lost focus. Query and results are kept for the next focus.
    pub fn on_blur(&mut self) {
        self.show_results = false;
        self.focused = false;
        self.phase = SearchPhase::Idle;
    }

    /// Input focused or clicked again; re-shows the existing results.
    pub fn on_focus(&mut self) {
        self.focused = true;
        self.show_results = true;
        if self.phase == SearchPhase::Idle {
            self.phase = if self.debouncer.is_pending() {
                SearchPhase::Typing
            } else if self.awaiting.is_some() {
                SearchPhase::Pending
            } else {
                SearchPhase::Settled
            };
        }
    }

    /// Stops the debouncer and orphans any in-flight request. Call when the
    /// owning view goes away.
    pub fn teardown(&mut self) {
        self.debouncer.cancel();
        self.latest_seq = self.take_seq();
        self.awaiting = None;
        self.on_blur();
    }

    fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Waits for the debouncer or a response and applies it.
    ///
    /// Never resolves while nothing is scheduled or in flight. Cancel safe,
    /// so it can sit in a `tokio::select!` next to input events.
    pub async fn next_event(&mut self) -> SearchEvent {
        tokio::select! {
            query = self.debouncer.fired() => self.on_debounce_fired(query),
            Some(response) = self.responses_rx.recv() => self.on_response(response),
        }
    }

    fn on_debounce_fired(&mut self, query: String) -> SearchEvent {
        if query == self.debounced {
            let phase = if self.awaiting.is_some() {
                SearchPhase::Pending
            } else {
                SearchPhase::Settled
            };
            self.set_phase(phase);
            return SearchEvent::Unchanged;
        }
        self.debounced = query.clone();

        if query.trim().is_empty() || !self.long_enough(&query) {
            self.results.clear();
            self.latest_seq = self.take_seq();
            self.awaiting = None;
            self.set_phase(SearchPhase::Settled);
            return SearchEvent::Cleared;
        }

        let seq = self.take_seq();
        self.latest_seq = seq;
        self.awaiting = Some(seq);
        self.set_phase(SearchPhase::Pending);

        tracing::debug!(seq, query = %query, "Issuing catalog search");

        let provider = Arc::clone(&self.provider);
        let tx = self.responses_tx.clone();
        let request_query = query.clone();
        tokio::spawn(async move {
            let result = search_titles(provider.as_ref(), &request_query).await;
            // The engine may be gone; nothing to deliver to then
            let _ = tx.send(SearchResponse {
                seq,
                query: request_query,
                result,
            });
        });

        SearchEvent::Requested { seq, query }
    }

    fn on_response(&mut self, response: SearchResponse) -> SearchEvent {
        let SearchResponse { seq, query, result } = response;

        if seq != self.latest_seq {
            tracing::debug!(
                seq,
                latest = self.latest_seq,
                query = %query,
                "Discarding stale search response"
            );
            return SearchEvent::Discarded { seq };
        }
        self.awaiting = None;

        match result {
            Ok(titles) => {
                let count = titles.len();
                self.results = titles;
                if self.focused && self.shows_panel(&self.raw) {
                    self.show_results = true;
                }
                self.set_phase(SearchPhase::Settled);
                SearchEvent::Applied { seq, results: count }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    seq,
                    query = %query,
                    provider = self.provider.name(),
                    "Catalog search failed, keeping previous results"
                );
                self.set_phase(SearchPhase::Settled);
                SearchEvent::Failed { seq }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        models::{ApiRecord, Keyword, MediaKind, TitleDetails, TitleId},
        services::providers::MockCatalogProvider,
    };
    use std::{collections::HashMap, sync::Mutex};
    use tokio::time::{advance, Instant};

    /// Answers each query with one person and one movie named after the
    /// query, after a per-query delay.
    #[derive(Default)]
    struct ScriptedProvider {
        delays: HashMap<String, Duration>,
        failing: Vec<String>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn with_delay(mut self, query: &str, delay: Duration) -> Self {
            self.delays.insert(query.to_string(), delay);
            self
        }

        fn failing_on(mut self, query: &str) -> Self {
            self.failing.push(query.to_string());
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn movie_named(query: &str) -> Title {
        Title::new(query.len() as u64, query, MediaKind::Movie)
    }

    #[async_trait::async_trait]
    impl CatalogProvider for ScriptedProvider {
        async fn search(&self, query: &str) -> AppResult<Vec<ApiRecord>> {
            self.calls.lock().unwrap().push(query.to_string());
            let delay = self
                .delays
                .get(query)
                .copied()
                .unwrap_or(Duration::from_millis(50));
            tokio::time::sleep(delay).await;

            if self.failing.iter().any(|q| q == query) {
                return Err(AppError::ExternalApi("status 503".to_string()));
            }

            let person = serde_json::json!({"id": 1, "media_type": "person", "name": "Someone"});
            let movie = serde_json::json!({"id": query.len(), "media_type": "movie", "title": query});
            Ok(vec![
                serde_json::from_value(person).unwrap(),
                serde_json::from_value(movie).unwrap(),
            ])
        }

        async fn recommendations_for(&self, _: TitleId, _: MediaKind) -> AppResult<Vec<Title>> {
            Err(AppError::NotFound("not scripted".to_string()))
        }

        async fn keywords_for(&self, _: TitleId, _: MediaKind) -> AppResult<Vec<Keyword>> {
            Err(AppError::NotFound("not scripted".to_string()))
        }

        async fn title_details(&self, _: TitleId, _: MediaKind) -> AppResult<TitleDetails> {
            Err(AppError::NotFound("not scripted".to_string()))
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn engine_with(provider: Arc<ScriptedProvider>) -> SearchEngine {
        SearchEngine::new(provider, SelectionStore::new(), SearchSettings::default())
    }

    /// Types `text` one character at a time, `gap` apart
    async fn type_slowly(engine: &mut SearchEngine, prefix: &str, text: &str, gap: Duration) {
        let mut typed = prefix.to_string();
        for ch in text.chars() {
            typed.push(ch);
            engine.on_query_changed(typed.clone());
            advance(gap).await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_bat_issues_one_request_and_drops_people() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut engine = engine_with(provider.clone());
        let started = Instant::now();

        engine.on_query_changed("bat");
        assert_eq!(engine.phase(), SearchPhase::Typing);
        assert!(engine.results_panel_visible());

        let event = engine.next_event().await;
        assert_eq!(event, SearchEvent::Requested { seq: 1, query: "bat".to_string() });
        assert!(started.elapsed() >= DEFAULT_DEBOUNCE);
        assert_eq!(engine.phase(), SearchPhase::Pending);

        let event = engine.next_event().await;
        assert_eq!(event, SearchEvent::Applied { seq: 1, results: 1 });
        assert_eq!(engine.phase(), SearchPhase::Settled);
        assert_eq!(engine.results(), &[movie_named("bat")]);
        assert_eq!(provider.calls(), vec!["bat"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_within_window_sends_final_text_once() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut engine = engine_with(provider.clone());

        engine.on_query_changed("b");
        advance(Duration::from_millis(100)).await;
        type_slowly(&mut engine, "b", "atman", Duration::from_millis(80)).await;

        let event = engine.next_event().await;
        assert_eq!(event, SearchEvent::Requested { seq: 1, query: "batman".to_string() });
        engine.next_event().await;

        assert_eq!(provider.calls(), vec!["batman"]);
        assert_eq!(engine.debounced_query(), "batman");
        assert_eq!(engine.raw_query(), "batman");
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_never_hits_network() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_search().times(0);
        let mut engine =
            SearchEngine::new(Arc::new(provider), SelectionStore::new(), SearchSettings::default());

        engine.on_query_changed("ba");
        assert!(!engine.results_panel_visible());

        assert_eq!(engine.next_event().await, SearchEvent::Cleared);
        assert!(engine.results().is_empty());
        assert_eq!(engine.phase(), SearchPhase::Settled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_query_hides_panel_and_skips_network() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_search().times(0);
        let mut engine =
            SearchEngine::new(Arc::new(provider), SelectionStore::new(), SearchSettings::default());

        engine.on_query_changed("   ");
        assert!(!engine.results_panel_visible());

        assert_eq!(engine.next_event().await, SearchEvent::Cleared);
        assert!(engine.results().is_empty());
        assert!(!engine.results_panel_visible());
        assert_eq!(engine.phase(), SearchPhase::Settled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_clears_previous_results() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut engine = engine_with(provider.clone());

        engine.on_query_changed("bat");
        engine.next_event().await;
        engine.next_event().await;
        assert_eq!(engine.results().len(), 1);

        engine.on_query_changed("ba");
        assert_eq!(engine.next_event().await, SearchEvent::Cleared);
        assert!(engine.results().is_empty());
        assert_eq!(provider.calls(), vec!["bat"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_response_for_earlier_query_is_discarded() {
        let provider = Arc::new(
            ScriptedProvider::default()
                .with_delay("batman", Duration::from_secs(2))
                .with_delay("superman", Duration::from_millis(100)),
        );
        let mut engine = engine_with(provider.clone());

        engine.on_query_changed("batman");
        assert_eq!(
            engine.next_event().await,
            SearchEvent::Requested { seq: 1, query: "batman".to_string() }
        );

        engine.on_query_changed("superman");
        assert_eq!(
            engine.next_event().await,
            SearchEvent::Requested { seq: 2, query: "superman".to_string() }
        );

        assert_eq!(engine.next_event().await, SearchEvent::Applied { seq: 2, results: 1 });
        assert_eq!(engine.next_event().await, SearchEvent::Discarded { seq: 1 });

        assert_eq!(engine.results(), &[movie_named("superman")]);
        assert_eq!(engine.latest_seq(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_invalidates_in_flight_request() {
        let provider =
            Arc::new(ScriptedProvider::default().with_delay("bat", Duration::from_secs(2)));
        let mut engine = engine_with(provider.clone());

        engine.on_query_changed("bat");
        engine.next_event().await;

        engine.on_query_changed("");
        assert_eq!(engine.next_event().await, SearchEvent::Cleared);
        assert_eq!(engine.next_event().await, SearchEvent::Discarded { seq: 1 });
        assert!(engine.results().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_previous_results() {
        let provider = Arc::new(ScriptedProvider::default().failing_on("zzz"));
        let mut engine = engine_with(provider.clone());

        engine.on_query_changed("bat");
        engine.next_event().await;
        engine.next_event().await;

        engine.on_query_changed("zzz");
        assert_eq!(
            engine.next_event().await,
            SearchEvent::Requested { seq: 2, query: "zzz".to_string() }
        );
        assert_eq!(engine.next_event().await, SearchEvent::Failed { seq: 2 });

        assert_eq!(engine.results(), &[movie_named("bat")]);
        assert_eq!(engine.phase(), SearchPhase::Settled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_returning_to_settled_text_is_unchanged() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut engine = engine_with(provider.clone());

        engine.on_query_changed("bat");
        engine.next_event().await;
        engine.next_event().await;

        engine.on_query_changed("batm");
        advance(Duration::from_millis(100)).await;
        engine.on_query_changed("bat");

        assert_eq!(engine.next_event().await, SearchEvent::Unchanged);
        assert_eq!(engine.phase(), SearchPhase::Settled);
        assert_eq!(provider.calls(), vec!["bat"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blur_hides_panel_and_focus_restores_it() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut engine = engine_with(provider);

        engine.on_query_changed("bat");
        engine.next_event().await;
        engine.next_event().await;
        assert!(engine.results_panel_visible());

        engine.on_blur();
        assert_eq!(engine.phase(), SearchPhase::Idle);
        assert!(!engine.results_panel_visible());
        assert_eq!(engine.raw_query(), "bat");
        assert_eq!(engine.results().len(), 1);

        engine.on_focus();
        assert!(engine.results_panel_visible());
        assert_eq!(engine.phase(), SearchPhase::Settled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refocus_while_request_in_flight_is_pending() {
        let provider =
            Arc::new(ScriptedProvider::default().with_delay("bat", Duration::from_secs(2)));
        let mut engine = engine_with(provider);

        engine.on_query_changed("bat");
        engine.next_event().await;
        engine.on_blur();
        assert_eq!(engine.phase(), SearchPhase::Idle);

        engine.on_focus();
        assert_eq!(engine.phase(), SearchPhase::Pending);

        assert_eq!(engine.next_event().await, SearchEvent::Applied { seq: 1, results: 1 });
        assert_eq!(engine.phase(), SearchPhase::Settled);
        assert!(engine.results_panel_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_after_blur_does_not_reopen_panel() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut engine = engine_with(provider);

        engine.on_query_changed("bat");
        engine.next_event().await;
        engine.on_blur();

        assert_eq!(engine.next_event().await, SearchEvent::Applied { seq: 1, results: 1 });
        assert_eq!(engine.phase(), SearchPhase::Idle);
        assert!(!engine.results_panel_visible());
        assert_eq!(engine.results().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_picking_result_selects_and_closes_panel() {
        let provider = Arc::new(ScriptedProvider::default());
        let selection = SelectionStore::new();
        let mut engine =
            SearchEngine::new(provider, selection.clone(), SearchSettings::default());

        engine.on_query_changed("bat");
        engine.next_event().await;
        engine.next_event().await;

        let picked = engine.results()[0].clone();
        engine.on_result_picked(picked.clone());

        let state = selection.read();
        assert_eq!(state.selected_title, Some(picked));
        assert!(state.overlay_visible);
        assert!(!engine.results_panel_visible());
        assert!(engine.selection().same_store(&selection));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_pick_replaces_overlay_title() {
        let selection = SelectionStore::new();
        let mut engine = SearchEngine::new(
            Arc::new(ScriptedProvider::default()),
            selection.clone(),
            SearchSettings::default(),
        );

        engine.on_result_picked(movie_named("X"));
        engine.on_result_picked(movie_named("Y"));

        assert_eq!(selection.read().selected_title, Some(movie_named("Y")));
        assert!(selection.read().overlay_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_pending_search() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_search().times(0);
        let mut engine =
            SearchEngine::new(Arc::new(provider), SelectionStore::new(), SearchSettings::default());

        engine.on_query_changed("bat");
        engine.teardown();

        let waited = tokio::time::timeout(Duration::from_secs(5), engine.next_event()).await;
        assert!(waited.is_err());
        assert_eq!(engine.phase(), SearchPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_settings() {
        let provider = Arc::new(ScriptedProvider::default());
        let settings = SearchSettings {
            debounce: Duration::from_millis(100),
            min_query_len: 2,
        };
        let mut engine = SearchEngine::new(provider.clone(), SelectionStore::new(), settings);
        let started = Instant::now();

        engine.on_query_changed("up");
        assert_eq!(
            engine.next_event().await,
            SearchEvent::Requested { seq: 1, query: "up".to_string() }
        );
        assert!(started.elapsed() < DEFAULT_DEBOUNCE);
    }
}
