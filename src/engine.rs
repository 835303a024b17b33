//! The list state engine: full coin list + selected filters + search query,
//! reduced to the visible list.
//!
//! All mutation goes through `&mut self`, so a single owner serializes every
//! read-modify-write of the lists. The only suspension point is the repository
//! call, which [`ListEngine::begin_load`] hands back as a detached future; its
//! result must come back through [`ListEngine::finish_load`] on the owner's
//! control flow. Overlapping loads are not guarded: whichever completion is
//! handed back last wins.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::api::{CoinRepository, Endpoint, NetworkError};
use crate::filters::FilterSet;
use crate::types::CoinRecord;

pub type LoadResult = Result<Vec<CoinRecord>, NetworkError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// `visible_coins()` should be re-read.
    ListChanged,
    Error(String),
    LoadingChanged(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Errored,
}

pub struct ListEngine {
    repository: Arc<dyn CoinRepository>,
    endpoint: Endpoint,
    all_coins: Vec<CoinRecord>,
    visible_coins: Vec<CoinRecord>,
    selected_filters: FilterSet,
    search_query: String,
    load_state: LoadState,
    last_error: Option<String>,
    reapply_on_load: bool,
    subscribers: Vec<UnboundedSender<EngineEvent>>,
}

impl ListEngine {
    pub fn new(repository: Arc<dyn CoinRepository>) -> Self {
        Self {
            repository,
            endpoint: Endpoint::Coins,
            all_coins: Vec::new(),
            visible_coins: Vec::new(),
            selected_filters: FilterSet::new(),
            search_query: String::new(),
            load_state: LoadState::Idle,
            last_error: None,
            reapply_on_load: false,
            subscribers: Vec::new(),
        }
    }

    /// When set, a successful load re-applies the current filters and query
    /// instead of showing the raw payload.
    pub fn with_reapply_on_load(mut self, reapply: bool) -> Self {
        self.reapply_on_load = reapply;
        self
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<EngineEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn visible_coins(&self) -> &[CoinRecord] {
        &self.visible_coins
    }

    pub fn all_coins(&self) -> &[CoinRecord] {
        &self.all_coins
    }

    pub fn selected_filters(&self) -> &FilterSet {
        &self.selected_filters
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Marks the engine as loading and returns the fetch to run.
    ///
    /// The returned future owns everything it needs, so it can be awaited
    /// inline or moved onto another task.
    pub fn begin_load(&mut self) -> impl Future<Output = LoadResult> + Send + 'static {
        info!(endpoint = ?self.endpoint, "loading coins");
        self.load_state = LoadState::Loading;
        self.emit(EngineEvent::LoadingChanged(true));

        let repository = Arc::clone(&self.repository);
        let endpoint = self.endpoint;
        async move { repository.fetch(endpoint).await }
    }

    pub fn finish_load(&mut self, result: LoadResult) {
        match result {
            Ok(coins) => {
                info!(count = coins.len(), "coins loaded");
                self.all_coins = coins;
                if self.reapply_on_load {
                    self.visible_coins = self.compute_visible();
                } else {
                    self.visible_coins = self.all_coins.clone();
                }
                self.load_state = LoadState::Loaded;
                self.last_error = None;
                self.emit(EngineEvent::LoadingChanged(false));
                self.emit(EngineEvent::ListChanged);
            }
            Err(e) => {
                let msg = e.to_string();
                warn!(error = %msg, "coin load failed");
                self.load_state = LoadState::Errored;
                self.last_error = Some(msg.clone());
                self.emit(EngineEvent::LoadingChanged(false));
                self.emit(EngineEvent::Error(msg));
            }
        }
    }

    pub async fn load_coins(&mut self) {
        let fetch = self.begin_load();
        let result = fetch.await;
        self.finish_load(result);
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.refresh_visible();
    }

    pub fn apply_filters(&mut self, kinds: FilterSet) {
        self.selected_filters = kinds;
        self.refresh_visible();
    }

    fn refresh_visible(&mut self) {
        self.visible_coins = self.compute_visible();
        debug!(
            filters = ?self.selected_filters,
            query = %self.search_query,
            visible = self.visible_coins.len(),
            total = self.all_coins.len(),
            "visible coins recomputed"
        );
        self.emit(EngineEvent::ListChanged);
    }

    fn compute_visible(&self) -> Vec<CoinRecord> {
        let filtered = filter_coins(&self.all_coins, &self.selected_filters);
        search_coins(&filtered, &self.search_query)
    }

    fn emit(&mut self, event: EngineEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

/// Coins satisfying every selected filter, in their original order.
pub fn filter_coins(coins: &[CoinRecord], kinds: &FilterSet) -> Vec<CoinRecord> {
    coins
        .iter()
        .filter(|c| kinds.iter().all(|k| k.matches(c)))
        .cloned()
        .collect()
}

pub fn search_coins(coins: &[CoinRecord], query: &str) -> Vec<CoinRecord> {
    coins
        .iter()
        .filter(|c| c.matches_query(query))
        .cloned()
        .collect()
}
