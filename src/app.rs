use std::time::Instant;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::debug;

use coinsift::{CoinRecord, EngineEvent, FilterCatalog, FilterSet, ListEngine, LoadResult};

use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Searching,
}

pub struct App {
    pub engine: ListEngine,
    pub filters: FilterCatalog,
    pub theme: Theme,
    pub input_mode: InputMode,
    pub query_buf: String,
    pub selected: usize,
    pub scroll_offset: usize,
    pub page_height: usize,
    pub chip_cursor: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub last_refresh: Option<Instant>,
    pub last_refresh_display: String,
    pub quit: bool,
    engine_events: UnboundedReceiver<EngineEvent>,
    filter_events: UnboundedReceiver<FilterSet>,
}

impl App {
    pub fn new(mut engine: ListEngine, theme: Theme) -> Self {
        let mut filters = FilterCatalog::new();
        let engine_events = engine.subscribe();
        let filter_events = filters.subscribe();
        Self {
            engine,
            filters,
            theme,
            input_mode: InputMode::Normal,
            query_buf: String::new(),
            selected: 0,
            scroll_offset: 0,
            page_height: 20,
            chip_cursor: 0,
            loading: false,
            error: None,
            last_refresh: None,
            last_refresh_display: String::new(),
            quit: false,
            engine_events,
            filter_events,
        }
    }

    pub fn visible_coins(&self) -> &[CoinRecord] {
        self.engine.visible_coins()
    }

    /// Starts a fetch on a background task; the result arrives on `tx`.
    pub fn start_load(&mut self, tx: &UnboundedSender<LoadResult>) {
        let fetch = self.engine.begin_load();
        let tx = tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(fetch.await);
        });
    }

    pub fn finish_load(&mut self, result: LoadResult) {
        if result.is_ok() {
            self.last_refresh = Some(Instant::now());
            self.error = None;
        }
        self.engine.finish_load(result);
    }

    /// Routes filter selections into the engine, then applies engine events.
    pub fn pump_events(&mut self) {
        while let Ok(kinds) = self.filter_events.try_recv() {
            self.engine.apply_filters(kinds);
        }
        while let Ok(event) = self.engine_events.try_recv() {
            match event {
                EngineEvent::ListChanged => self.clamp_selection(),
                EngineEvent::Error(msg) => self.error = Some(msg),
                EngineEvent::LoadingChanged(loading) => self.loading = loading,
            }
        }
    }

    pub fn toggle_chip(&mut self, index: usize) {
        if let Some(id) = self.filters.entry_at(index).map(|e| e.id) {
            self.chip_cursor = index;
            let selected = self.filters.toggle(id);
            debug!(?selected, "filter chips changed");
        }
    }

    pub fn toggle_chip_at_cursor(&mut self) {
        self.toggle_chip(self.chip_cursor);
    }

    pub fn move_chip_cursor(&mut self, forward: bool) {
        let len = self.filters.entries().len();
        if forward {
            self.chip_cursor = (self.chip_cursor + 1) % len;
        } else {
            self.chip_cursor = (self.chip_cursor + len - 1) % len;
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query_buf.push(c);
        self.engine.set_search_query(self.query_buf.clone());
    }

    pub fn pop_query_char(&mut self) {
        if self.query_buf.pop().is_some() {
            self.engine.set_search_query(self.query_buf.clone());
        }
    }

    pub fn select_next(&mut self) {
        let len = self.visible_coins().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
        self.adjust_scroll();
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.adjust_scroll();
    }

    pub fn clamp_selection(&mut self) {
        let len = self.visible_coins().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
        self.adjust_scroll();
    }

    pub fn adjust_scroll(&mut self) {
        if self.page_height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + self.page_height {
            self.scroll_offset = self.selected - self.page_height + 1;
        }
    }

    pub fn update_refresh_display(&mut self) {
        if let Some(inst) = self.last_refresh {
            let secs = inst.elapsed().as_secs();
            if secs < 60 {
                self.last_refresh_display = format!("{}s ago", secs);
            } else {
                self.last_refresh_display = format!("{}m ago", secs / 60);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use coinsift::{CoinKind, CoinRepository, Endpoint, FilterKind, LoadState, NetworkError};

    use super::*;

    struct FixedRepository(LoadResult);

    #[async_trait]
    impl CoinRepository for FixedRepository {
        async fn fetch(&self, _endpoint: Endpoint) -> LoadResult {
            self.0.clone()
        }
    }

    fn coins() -> Vec<CoinRecord> {
        vec![
            CoinRecord::new("Bitcoin", "BTC", true, false, CoinKind::Coin),
            CoinRecord::new("Tether", "USDT", true, true, CoinKind::Token),
            CoinRecord::new("Dogecoin", "DOGE", false, false, CoinKind::Coin),
        ]
    }

    fn app_with(result: LoadResult) -> App {
        let engine = ListEngine::new(Arc::new(FixedRepository(result)));
        App::new(engine, Theme::default())
    }

    #[tokio::test]
    async fn background_load_reaches_the_engine() {
        let mut app = app_with(Ok(coins()));
        let (tx, mut rx) = mpsc::unbounded_channel();

        app.start_load(&tx);
        app.pump_events();
        assert!(app.loading);

        let result = rx.recv().await.unwrap();
        app.finish_load(result);
        app.pump_events();

        assert!(!app.loading);
        assert!(app.last_refresh.is_some());
        assert_eq!(app.visible_coins().len(), 3);
        assert_eq!(app.engine.load_state(), LoadState::Loaded);
    }

    #[tokio::test]
    async fn failed_load_surfaces_error() {
        let mut app = app_with(Err(NetworkError::DecodingFailure("eof".into())));
        app.engine.load_coins().await;
        app.pump_events();

        assert_eq!(
            app.error.as_deref(),
            Some(NetworkError::DecodingFailure("eof".into()).to_string().as_str())
        );
        assert!(app.last_refresh.is_none());
    }

    #[tokio::test]
    async fn chip_toggles_flow_into_engine() {
        let mut app = app_with(Ok(coins()));
        app.engine.load_coins().await;
        app.pump_events();

        app.toggle_chip(0);
        app.toggle_chip(2);
        app.pump_events();

        assert_eq!(
            app.engine.selected_filters(),
            &FilterSet::from([FilterKind::Active, FilterKind::TokenOnly])
        );
        assert_eq!(app.visible_coins().len(), 1);
        assert_eq!(app.visible_coins()[0].symbol, "USDT");

        app.clear_filters();
        app.pump_events();
        assert_eq!(app.visible_coins().len(), 3);
    }

    #[tokio::test]
    async fn typing_narrows_and_clamps_selection() {
        let mut app = app_with(Ok(coins()));
        app.engine.load_coins().await;
        app.pump_events();
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 2);

        for c in "coin".chars() {
            app.push_query_char(c);
        }
        app.pump_events();
        assert_eq!(app.visible_coins().len(), 2);
        assert_eq!(app.selected, 1);

        app.pop_query_char();
        app.pop_query_char();
        app.pop_query_char();
        app.pop_query_char();
        app.pop_query_char();
        app.pump_events();
        assert_eq!(app.engine.search_query(), "");
        assert_eq!(app.visible_coins().len(), 3);
    }

    #[test]
    fn chip_cursor_wraps() {
        let mut app = app_with(Ok(Vec::new()));
        app.move_chip_cursor(false);
        assert_eq!(app.chip_cursor, 4);
        app.move_chip_cursor(true);
        assert_eq!(app.chip_cursor, 0);
    }

    #[test]
    fn out_of_range_chip_is_ignored() {
        let mut app = app_with(Ok(Vec::new()));
        app.toggle_chip(9);
        app.pump_events();
        assert!(app.engine.selected_filters().is_empty());
        assert_eq!(app.chip_cursor, 0);
    }
}
