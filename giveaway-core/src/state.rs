use std::sync::Arc;

use tracing::info;

use crate::client::RemoteDataClient;
use crate::error::ValidationError;
use crate::fetch::RequestId;
use crate::filters::{FilterStore, ListQuery, WorthQuery};
use crate::giveaways::GiveawayStore;
use crate::models::{GiveawayId, GiveawaySummary};
use crate::saved::{SavedCollectionStore, SavedEntry};
use crate::storage::PersistedState;
use crate::theme::ThemeStore;
use crate::view::{derive_view, ViewRow};

/// The whole client state, passed around explicitly by its owner.
pub struct AppState {
    pub giveaways: GiveawayStore,
    pub filters: FilterStore,
    pub saved: SavedCollectionStore,
    pub theme: ThemeStore,
}

impl AppState {
    pub fn new(client: Arc<dyn RemoteDataClient>) -> Self {
        Self {
            giveaways: GiveawayStore::new(client),
            filters: FilterStore::new(),
            saved: SavedCollectionStore::new(),
            theme: ThemeStore::default(),
        }
    }

    /// Rebuilds state from a snapshot. Duplicate ids in the snapshot keep
    /// their first occurrence.
    pub fn restore(client: Arc<dyn RemoteDataClient>, snapshot: PersistedState) -> Self {
        let mut state = Self::new(client);
        for entry in snapshot.saved {
            state.saved.save(entry);
        }
        state.theme = ThemeStore::new(snapshot.is_dark);
        info!(saved = state.saved.len(), is_dark = snapshot.is_dark, "state restored");
        state
    }

    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            saved: self.saved.entries().to_vec(),
            is_dark: self.theme.is_dark(),
        }
    }

    /// Requests the list for the current filters. Invalid filter values are
    /// rejected before anything is sent.
    pub fn refresh_list(&mut self) -> Result<RequestId, ValidationError> {
        let query = ListQuery::from_criteria(self.filters.criteria())?;
        Ok(self.giveaways.request_list(&query))
    }

    pub fn refresh_worth(&mut self) -> Result<RequestId, ValidationError> {
        let query = WorthQuery::from_criteria(self.filters.criteria())?;
        Ok(self.giveaways.request_worth(&query))
    }

    pub fn open_detail(&mut self, id: GiveawayId) -> RequestId {
        self.giveaways.request_detail(id)
    }

    /// Rows to render; empty until the list is ready.
    pub fn view(&self) -> Vec<ViewRow<'_>> {
        match self.giveaways.list().ready() {
            Some(list) => derive_view(list, self.filters.criteria(), &self.saved.ids()),
            None => Vec::new(),
        }
    }

    /// Flips the bookmark for `id`. Saving needs the giveaway to be loaded in
    /// the list or the detail; returns `None` when it is neither saved nor
    /// loaded, otherwise whether it is saved afterwards.
    pub fn toggle_saved_by_id(&mut self, id: GiveawayId) -> Option<bool> {
        if self.saved.contains(id) {
            self.saved.remove(id);
            return Some(false);
        }
        let entry = self.loaded_summary(id).map(SavedEntry::from)?;
        Some(self.saved.toggle_saved(entry))
    }

    fn loaded_summary(&self, id: GiveawayId) -> Option<&GiveawaySummary> {
        let from_list = self
            .giveaways
            .list()
            .ready()
            .and_then(|list| list.iter().find(|summary| summary.id == id));
        from_list.or_else(|| {
            self.giveaways
                .detail()
                .ready()
                .map(|detail| &detail.summary)
                .filter(|summary| summary.id == id)
        })
    }
}
