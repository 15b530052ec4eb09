use std::cmp::Ordering;

use crate::models::ScoredItem;

/// Key a result list can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Score,
    FuzzyScore,
    AnnScore,
    Title,
    Year,
}

impl SortKey {
    /// Parses the value of the sort dropdown; unknown values are rejected
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "score" => Some(SortKey::Score),
            "fuzzy_score" => Some(SortKey::FuzzyScore),
            "ann_score" => Some(SortKey::AnnScore),
            "title" => Some(SortKey::Title),
            "year" => Some(SortKey::Year),
            _ => None,
        }
    }
}

/// Returns a new list ordered by `key`.
///
/// Numeric keys sort descending (best first) with missing fields ranked
/// as 0; titles sort ascending. The sort is stable, so equal-key items
/// keep their original relative order.
pub fn sort_items(items: &[ScoredItem], key: SortKey) -> Vec<ScoredItem> {
    let mut sorted = items.to_vec();
    match key {
        SortKey::Title => sorted.sort_by(|a, b| a.title.cmp(&b.title)),
        _ => sorted.sort_by(|a, b| descending(numeric_key(a, key), numeric_key(b, key))),
    }
    sorted
}

fn numeric_key(item: &ScoredItem, key: SortKey) -> f64 {
    match key {
        SortKey::FuzzyScore => item.fuzzy_score.unwrap_or(0.0),
        SortKey::AnnScore => item.ann_score.unwrap_or(0.0),
        SortKey::Year => item.year.map(f64::from).unwrap_or(0.0),
        // Score follows the same precedence chain the UI displays
        _ => item.display_score().value(),
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
