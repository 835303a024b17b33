//! Filter chips and their selection state.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::types::{FilterKind, FILTER_KINDS};

pub type FilterSet = BTreeSet<FilterKind>;

static NEXT_ENTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one filter entry. Unique across every catalog in the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(u64);

impl EntryId {
    fn next() -> Self {
        Self(NEXT_ENTRY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    pub id: EntryId,
    pub kind: FilterKind,
    pub selected: bool,
}

impl FilterEntry {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

pub struct FilterCatalog {
    entries: Vec<FilterEntry>,
    subscribers: Vec<UnboundedSender<FilterSet>>,
}

impl Default for FilterCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterCatalog {
    pub fn new() -> Self {
        let entries = FILTER_KINDS
            .iter()
            .map(|&kind| FilterEntry {
                id: EntryId::next(),
                kind,
                selected: false,
            })
            .collect();
        Self {
            entries,
            subscribers: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[FilterEntry] {
        &self.entries
    }

    pub fn entry_at(&self, index: usize) -> Option<&FilterEntry> {
        self.entries.get(index)
    }

    /// Every successful toggle sends the new selection on this channel.
    pub fn subscribe(&mut self) -> UnboundedReceiver<FilterSet> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn selected_kinds(&self) -> FilterSet {
        self.entries
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.kind)
            .collect()
    }

    /// Flips the entry with `id`. An unknown id changes nothing and emits nothing.
    pub fn toggle(&mut self, id: EntryId) -> FilterSet {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            debug!(?id, "toggle for unknown filter entry ignored");
            return self.selected_kinds();
        };
        entry.selected = !entry.selected;
        debug!(kind = ?entry.kind, selected = entry.selected, "filter toggled");

        let selected = self.selected_kinds();
        self.publish(&selected);
        selected
    }

    pub fn clear(&mut self) -> FilterSet {
        for entry in &mut self.entries {
            entry.selected = false;
        }
        let selected = self.selected_kinds();
        self.publish(&selected);
        selected
    }

    fn publish(&mut self, selected: &FilterSet) {
        self.subscribers.retain(|tx| tx.send(selected.clone()).is_ok());
    }
}
