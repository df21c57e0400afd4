use std::collections::HashSet;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{GiveawayDetail, GiveawayId, GiveawaySummary, Worth};

/// Bookmark row. Holds just enough of a summary to render the saved list
/// without the catalog being loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedEntry {
    pub id: GiveawayId,
    pub title: String,
    pub thumbnail: String,
    pub platforms: Vec<String>,
    pub worth: Worth,
    #[serde(rename = "type")]
    pub kind: String,
    pub end_date: Option<NaiveDateTime>,
    pub saved_at: DateTime<Utc>,
}

impl From<&GiveawaySummary> for SavedEntry {
    fn from(summary: &GiveawaySummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title.clone(),
            thumbnail: summary.thumbnail.clone(),
            platforms: summary.platforms.clone(),
            worth: summary.worth.clone(),
            kind: summary.kind.clone(),
            end_date: summary.end_date,
            saved_at: Utc::now(),
        }
    }
}

impl From<&GiveawayDetail> for SavedEntry {
    fn from(detail: &GiveawayDetail) -> Self {
        SavedEntry::from(&detail.summary)
    }
}

/// Insertion-ordered bookmark collection with set semantics on `id`.
#[derive(Debug, Clone, Default)]
pub struct SavedCollectionStore {
    // insertion order; ids are unique
    items: Vec<SavedEntry>,
}

impl SavedCollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `entry` unless an entry with the same id is already saved.
    /// Returns whether the collection changed.
    pub fn save(&mut self, entry: SavedEntry) -> bool {
        if self.contains(entry.id) {
            debug!(id = %entry.id, "giveaway already saved");
            return false;
        }
        debug!(id = %entry.id, "saving giveaway");
        self.items.push(entry);
        true
    }

    /// Returns whether an entry was removed.
    pub fn remove(&mut self, id: GiveawayId) -> bool {
        let before = self.items.len();
        self.items.retain(|existing| existing.id != id);
        let removed = self.items.len() != before;
        if removed {
            debug!(%id, "removed saved giveaway");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Saves `entry` if absent, removes it otherwise, in one step.
    /// Returns `true` when the entry is saved afterwards.
    pub fn toggle_saved(&mut self, entry: SavedEntry) -> bool {
        if self.remove(entry.id) {
            false
        } else {
            self.items.push(entry);
            true
        }
    }

    pub fn contains(&self, id: GiveawayId) -> bool {
        self.items.iter().any(|existing| existing.id == id)
    }

    pub fn entries(&self) -> &[SavedEntry] {
        &self.items
    }

    pub fn ids(&self) -> HashSet<GiveawayId> {
        self.items.iter().map(|entry| entry.id).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
