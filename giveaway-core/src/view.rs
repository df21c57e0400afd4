use std::collections::HashSet;

use crate::filters::FilterCriteria;
use crate::models::{GiveawayId, GiveawaySummary};

/// One row of the rendered catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRow<'a> {
    pub summary: &'a GiveawaySummary,
    pub is_saved: bool,
}

/// Projects the loaded list through the search text and annotates each row
/// with its bookmark state. Source order is kept; nothing is mutated.
pub fn derive_view<'a>(
    list: &'a [GiveawaySummary],
    criteria: &FilterCriteria,
    saved_ids: &HashSet<GiveawayId>,
) -> Vec<ViewRow<'a>> {
    let needle = criteria.search.to_lowercase();
    list.iter()
        .filter(|summary| needle.is_empty() || summary.title.to_lowercase().contains(&needle))
        .map(|summary| ViewRow {
            summary,
            is_saved: saved_ids.contains(&summary.id),
        })
        .collect()
}
