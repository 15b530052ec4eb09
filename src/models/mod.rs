use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod preferences;

pub use preferences::{ComplementaryWeights, PreferenceVector, CORE_GENRES};

/// A single scored result entry as returned by the service.
///
/// Score fields vary by endpoint and model generation; all of them are
/// optional on the wire and resolved through [`ScoredItem::display_score`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoredItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuzzy_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ann_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hybrid_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl ScoredItem {
    /// Resolves the score to display, tagged with its source field
    pub fn display_score(&self) -> DisplayScore {
        if let Some(predicted) = self.predicted_rating {
            DisplayScore::Predicted(predicted)
        } else if let Some(hybrid) = self.hybrid_score {
            DisplayScore::Hybrid(hybrid)
        } else if let Some(score) = self.score {
            DisplayScore::Base(score)
        } else {
            DisplayScore::Unscored
        }
    }
}

/// The score shown for a result, tagged by which field supplied it.
///
/// Precedence: `predicted_rating` over `hybrid_score` over `score`;
/// an item carrying none of them displays as 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayScore {
    Predicted(f64),
    Hybrid(f64),
    Base(f64),
    Unscored,
}

impl DisplayScore {
    pub fn value(&self) -> f64 {
        match self {
            DisplayScore::Predicted(v) | DisplayScore::Hybrid(v) | DisplayScore::Base(v) => *v,
            DisplayScore::Unscored => 0.0,
        }
    }
}

/// One page of the browsable catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogPage {
    pub movies: Vec<ScoredItem>,
    pub pagination: Pagination,
}

/// Pagination block reported alongside every catalog page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total_movies: u64,
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Catalog page held by the session, stamped at fetch time
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub page: CatalogPage,
    pub fetched_at: DateTime<Utc>,
}

/// Popularity weighting level for advanced preferences
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PopularityWeight {
    Low,
    Medium,
    High,
}

/// Optional advanced controls.
///
/// A field is serialized only when its source control produced a value;
/// an unset control never appears as `null`, `false`, or `0`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AdvancedPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity_weight: Option<PopularityWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_friendly: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_violence: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitles_ok: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub award_winners: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuzzy_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ann_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diversity: Option<f64>,
}

/// Outbound body for POST /recommend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationRequest {
    pub user_preferences: PreferenceVector,
    pub num_recommendations: u32,
    pub watched_movies: Vec<String>,
    pub advanced_preferences: AdvancedPreferences,
}

/// Report from GET /health
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub dataset_stats: Option<DatasetStats>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DatasetStats {
    #[serde(default)]
    pub movies: u64,
    #[serde(default)]
    pub ratings: u64,
    #[serde(default)]
    pub users: u64,
}
