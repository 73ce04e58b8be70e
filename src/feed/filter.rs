//! Watchlist filtering.
//!
//! A single set-intersection predicate: an item survives when any of its
//! topic keys appears in the watchlist. Input order is preserved and no
//! item is ever duplicated.

use std::collections::HashSet;

use crate::types::NewsItem;

/// Select the items whose topic keys intersect the watchlist.
///
/// An empty watchlist yields an empty result, never the unfiltered feed.
/// The caller is responsible for surfacing that as a visible empty state
/// rather than an error.
pub fn filter_feed<'a>(items: &'a [NewsItem], watchlist: &HashSet<String>) -> Vec<&'a NewsItem> {
    if watchlist.is_empty() {
        return Vec::new();
    }
    items
        .iter()
        .filter(|item| item.matches_watchlist(watchlist))
        .collect()
}
