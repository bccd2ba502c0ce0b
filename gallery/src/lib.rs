//! Results view aggregations over saved posters.
//!
//! Everything here is a pure function of the poster list: filter to canvas
//! posters, group them by reason, page the groups, and summarize one reason
//! (colors used, shape mix, strongest sliders).


use std::collections::HashMap;

use posters::{Poster, ShapeKind, SliderParams};
use serde::Serialize;

/// Reasons shown per results page.
pub const REASONS_PER_PAGE: usize = 5;

/// Colors kept in a reason's color chart.
pub const TOP_COLORS: usize = 6;

/// Sliders kept in a reason's featured list.
pub const TOP_SLIDERS: usize = 4;

/// Color reported when no poster carries one.
pub const FALLBACK_COLOR: &str = "#000000";

/// All posters of one reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReasonGroup {
    pub name: String,
    pub posters: Vec<Poster>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorCount {
    pub color: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShapeShare {
    pub kind: ShapeKind,
    pub count: usize,
    /// Rounded share of all shapes, `[0, 100]`.
    pub percentage: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SliderAverage {
    /// Stored slider name, e.g. `shapeSize`.
    pub name: &'static str,
    pub average: usize,
}

/// Summary of one reason's posters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasonAnalytics {
    /// Most used colors, most frequent first.
    pub colors: Vec<ColorCount>,
    /// One entry per shape kind, in toolbar order.
    pub shapes: Vec<ShapeShare>,
    pub highest_shape_percentage: usize,
    /// Sliders with the highest average raw value, highest first.
    pub featured_sliders: Vec<SliderAverage>,
}

impl ReasonAnalytics {
    /// Whether `share` is the (non-zero) leading shape kind.
    #[must_use]
    pub fn is_leading(&self, share: &ShapeShare) -> bool {
        share.percentage > 0 && share.percentage == self.highest_shape_percentage
    }
}

/// `numerator / denominator` rounded half up. `denominator` must be non-zero.
fn rounded_ratio(numerator: usize, denominator: usize) -> usize {
    (2 * numerator + denominator) / (2 * denominator)
}

/// Canvas posters, optionally limited to one emotion (case-insensitive).
///
/// `None` or an empty emotion keeps every canvas poster.
#[must_use]
pub fn canvas_posters(posters: &[Poster], emotion: Option<&str>) -> Vec<Poster> {
    let emotion = emotion.filter(|e| !e.is_empty());
    posters
        .iter()
        .filter(|p| p.is_canvas())
        .filter(|p| emotion.is_none_or(|e| p.emotion.eq_ignore_ascii_case(e)))
        .cloned()
        .collect()
}

/// Group posters by reason, skipping posters without one. Groups are sorted
/// by name (case-insensitive); posters keep their input order.
#[must_use]
pub fn group_by_reason(posters: Vec<Poster>) -> Vec<ReasonGroup> {
    let mut groups: Vec<ReasonGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for poster in posters {
        if poster.reason.is_empty() {
            continue;
        }
        match index.get(&poster.reason) {
            Some(&i) => groups[i].posters.push(poster),
            None => {
                index.insert(poster.reason.clone(), groups.len());
                groups.push(ReasonGroup { name: poster.reason.clone(), posters: vec![poster] });
            }
        }
    }
    groups.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    groups
}

/// Split `items` into pages of `per_page` (at least 1).
#[must_use]
pub fn paginate<T: Clone>(items: &[T], per_page: usize) -> Vec<Vec<T>> {
    items.chunks(per_page.max(1)).map(<[T]>::to_vec).collect()
}

/// Color counts, most frequent first; ties keep first appearance.
fn color_counts(posters: &[Poster]) -> Vec<ColorCount> {
    let mut counts: Vec<ColorCount> = Vec::new();
    for poster in posters.iter().filter(|p| !p.color.is_empty()) {
        match counts.iter_mut().find(|c| c.color == poster.color) {
            Some(entry) => entry.count += 1,
            None => counts.push(ColorCount { color: poster.color.clone(), count: 1 }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The color used by the most posters; the earliest wins ties.
#[must_use]
pub fn most_used_color(posters: &[Poster]) -> String {
    color_counts(posters)
        .into_iter()
        .next()
        .map_or_else(|| FALLBACK_COLOR.to_owned(), |c| c.color)
}

/// Summarize one reason's posters.
#[must_use]
pub fn reason_analytics(posters: &[Poster]) -> ReasonAnalytics {
    let mut colors = color_counts(posters);
    colors.truncate(TOP_COLORS);

    let kinds: Vec<ShapeKind> = posters.iter().flat_map(|p| p.shapes.iter().map(|s| s.kind)).collect();
    let shapes: Vec<ShapeShare> = ShapeKind::ALL
        .into_iter()
        .map(|kind| {
            let count = kinds.iter().filter(|k| **k == kind).count();
            let percentage = if kinds.is_empty() { 0 } else { rounded_ratio(count * 100, kinds.len()) };
            ShapeShare { kind, count, percentage }
        })
        .collect();
    let highest_shape_percentage = shapes.iter().map(|s| s.percentage).max().unwrap_or(0);

    ReasonAnalytics { colors, shapes, highest_shape_percentage, featured_sliders: featured_sliders(posters) }
}

fn featured_sliders(posters: &[Poster]) -> Vec<SliderAverage> {
    if posters.is_empty() {
        return Vec::new();
    }
    let mut totals = SliderParams::default().entries().map(|(name, _)| (name, 0usize));
    for poster in posters {
        for (total, (_, value)) in totals.iter_mut().zip(poster.slider_params.entries()) {
            total.1 += usize::from(value);
        }
    }
    let mut averages: Vec<SliderAverage> = totals
        .into_iter()
        .map(|(name, total)| SliderAverage { name, average: rounded_ratio(total, posters.len()) })
        .collect();
    averages.sort_by(|a, b| b.average.cmp(&a.average));
    averages.truncate(TOP_SLIDERS);
    averages
}
