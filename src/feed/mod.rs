//! The render pipeline core: watchlist filtering and view-model building.
//!
//! Both halves are pure — no I/O, no ambient state. Preferences arrive
//! as explicit parameters and cards are derived fresh on every pass.

pub mod builder;
pub mod filter;

pub use builder::build_card;
pub use filter::filter_feed;

use crate::types::{NewsItem, RenderedCard, UserPreferences};

/// Run the full filter → build pass over a fetched batch.
///
/// Items surviving the watchlist filter are built into cards in source
/// order. An empty watchlist produces an empty feed by contract.
pub fn render_pass(items: &[NewsItem], prefs: &UserPreferences) -> Vec<RenderedCard> {
    filter_feed(items, &prefs.watchlist)
        .into_iter()
        .map(|item| build_card(item, prefs.audience))
        .collect()
}
