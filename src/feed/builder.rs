//! View-model building.
//!
//! Normalizes one raw `NewsItem` plus the selected audience tier into a
//! render-ready `RenderedCard`: explanation selection, sentiment class,
//! badges, and the impact/percent metric string.

use crate::types::{AudienceLevel, NewsItem, RenderedCard};

/// Build the display card for one item at the given audience tier.
pub fn build_card(item: &NewsItem, level: AudienceLevel) -> RenderedCard {
    let explanation_text = item.explanations.as_ref().map(|exp| match level {
        AudienceLevel::Beginner => exp.beginner.clone(),
        AudienceLevel::Expert => exp.expert.clone(),
        // Intermediate is a synthetic mix: beginner text first, a single
        // space, then the expert text.
        AudienceLevel::Intermediate => format!("{} {}", exp.beginner, exp.expert),
    });

    // A commentary block is attached only when present and non-empty;
    // there is no placeholder.
    let commentary = item
        .expert_commentary
        .as_ref()
        .filter(|c| !c.quote.is_empty())
        .cloned();

    RenderedCard {
        id: item.id.clone(),
        headline: item.headline.clone(),
        source: item.source.clone(),
        timestamp: item.timestamp.to_string(),
        sentiment: item.sentiment,
        direction: item.sentiment.direction(),
        badges: item.topics.clone(),
        explanation_label: level.label().to_string(),
        needs_insight: explanation_text.is_none(),
        explanation_text,
        metric_display: metric_display(item),
        commentary,
        link: item.link.clone(),
    }
}

/// The right-column metric: impact score when present, otherwise the
/// percent-change string as-is. The "N/A" sentinel propagates verbatim
/// and is never reinterpreted as zero.
fn metric_display(item: &NewsItem) -> String {
    if let Some(score) = item.impact_score {
        return format!("{score}/100");
    }
    match &item.price_change_percent {
        Some(pct) => pct.clone(),
        None => "N/A".to_string(),
    }
}
