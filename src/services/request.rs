use crate::{
    error::{AppError, AppResult},
    models::{
        AdvancedPreferences, ComplementaryWeights, PopularityWeight, PreferenceVector,
        RecommendationRequest,
    },
};

pub const DEFAULT_NUM_RECOMMENDATIONS: u32 = 10;

/// Assembles a [`RecommendationRequest`] from a normalized preference
/// vector and whatever advanced controls the user actually set.
///
/// Setters are only called for controls that produced a value, so an
/// untouched control never reaches the outbound request.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    preferences: PreferenceVector,
    advanced: AdvancedPreferences,
    watched_movies: Vec<String>,
    num_recommendations: u32,
}

impl RequestBuilder {
    pub fn new(preferences: PreferenceVector) -> Self {
        Self {
            preferences,
            advanced: AdvancedPreferences::default(),
            watched_movies: Vec::new(),
            num_recommendations: DEFAULT_NUM_RECOMMENDATIONS,
        }
    }

    /// Requested result count; non-positive input falls back to the default
    pub fn num_recommendations(mut self, count: i64) -> Self {
        self.num_recommendations = u32::try_from(count)
            .ok()
            .filter(|c| *c > 0)
            .unwrap_or(DEFAULT_NUM_RECOMMENDATIONS);
        self
    }

    /// Free-text watch history: comma-separated titles, trimmed, empties dropped
    pub fn watch_history(mut self, raw: &str) -> Self {
        self.watched_movies = raw
            .split(',')
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .map(str::to_string)
            .collect();
        self
    }

    pub fn min_year(mut self, year: i32) -> Self {
        self.advanced.min_year = Some(year);
        self
    }

    pub fn max_year(mut self, year: i32) -> Self {
        self.advanced.max_year = Some(year);
        self
    }

    pub fn min_rating(mut self, rating: f64) -> Self {
        self.advanced.min_rating = Some(rating);
        self
    }

    pub fn popularity_weight(mut self, weight: PopularityWeight) -> Self {
        self.advanced.popularity_weight = Some(weight);
        self
    }

    // Flag setters record only a checked box; an unchecked box stays absent.

    pub fn family_friendly(mut self, checked: bool) -> Self {
        if checked {
            self.advanced.family_friendly = Some(true);
        }
        self
    }

    pub fn no_violence(mut self, checked: bool) -> Self {
        if checked {
            self.advanced.no_violence = Some(true);
        }
        self
    }

    pub fn subtitles_ok(mut self, checked: bool) -> Self {
        if checked {
            self.advanced.subtitles_ok = Some(true);
        }
        self
    }

    pub fn award_winners(mut self, checked: bool) -> Self {
        if checked {
            self.advanced.award_winners = Some(true);
        }
        self
    }

    /// Model-blend weights from the linked slider pair, as fractions
    pub fn blend_weights(mut self, weights: ComplementaryWeights) -> Self {
        let (fuzzy, ann) = weights.fractions();
        self.advanced.fuzzy_weight = Some(fuzzy);
        self.advanced.ann_weight = Some(ann);
        self
    }

    /// Diversity slider percentage, stored as a fraction in [0, 1]
    pub fn diversity_pct(mut self, pct: i64) -> Self {
        self.advanced.diversity = Some(pct.clamp(0, 100) as f64 / 100.0);
        self
    }

    /// Validates and produces the outbound request.
    ///
    /// An empty preference vector cannot occur after normalization, but is
    /// still rejected here so a bad caller can never reach the network
    /// with an empty preference object.
    pub fn build(self) -> AppResult<RecommendationRequest> {
        if self.preferences.is_empty() {
            return Err(AppError::Validation(
                "preference vector is empty".to_string(),
            ));
        }

        Ok(RecommendationRequest {
            user_preferences: self.preferences,
            num_recommendations: self.num_recommendations,
            watched_movies: self.watched_movies,
            advanced_preferences: self.advanced,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_preferences() -> PreferenceVector {
        PreferenceVector::normalize_raw([])
    }

    #[test]
    fn test_unset_advanced_keys_are_absent_from_json() {
        let request = RequestBuilder::new(default_preferences())
            .min_year(1990)
            .family_friendly(true)
            .build()
            .unwrap();

        let json = serde_json::to_value(&request).unwrap();
        let advanced = &json["advanced_preferences"];
        assert_eq!(advanced["min_year"], 1990);
        assert_eq!(advanced["family_friendly"], true);
        for absent in [
            "max_year",
            "min_rating",
            "popularity_weight",
            "no_violence",
            "subtitles_ok",
            "award_winners",
            "fuzzy_weight",
            "ann_weight",
            "diversity",
        ] {
            assert!(
                advanced.get(absent).is_none(),
                "unexpected key in request: {}",
                absent
            );
        }
    }

    #[test]
    fn test_unchecked_flag_never_serializes_as_false() {
        let request = RequestBuilder::new(default_preferences())
            .family_friendly(false)
            .build()
            .unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert!(json["advanced_preferences"].get("family_friendly").is_none());
    }

    #[test]
    fn test_watch_history_splits_trims_and_drops_empties() {
        let request = RequestBuilder::new(default_preferences())
            .watch_history(" The Matrix , , Inception,  ,Heat ")
            .build()
            .unwrap();
        assert_eq!(request.watched_movies, vec!["The Matrix", "Inception", "Heat"]);
    }

    #[test]
    fn test_num_recommendations_default_and_fallback() {
        let request = RequestBuilder::new(default_preferences()).build().unwrap();
        assert_eq!(request.num_recommendations, DEFAULT_NUM_RECOMMENDATIONS);

        let request = RequestBuilder::new(default_preferences())
            .num_recommendations(0)
            .build()
            .unwrap();
        assert_eq!(request.num_recommendations, DEFAULT_NUM_RECOMMENDATIONS);

        let request = RequestBuilder::new(default_preferences())
            .num_recommendations(15)
            .build()
            .unwrap();
        assert_eq!(request.num_recommendations, 15);
    }

    #[test]
    fn test_num_recommendations_out_of_range_falls_back() {
        // A count past u32::MAX must not wrap into a small or zero value.
        let request = RequestBuilder::new(default_preferences())
            .num_recommendations(1i64 << 32)
            .build()
            .unwrap();
        assert_eq!(request.num_recommendations, DEFAULT_NUM_RECOMMENDATIONS);

        let request = RequestBuilder::new(default_preferences())
            .num_recommendations(i64::MIN)
            .build()
            .unwrap();
        assert_eq!(request.num_recommendations, DEFAULT_NUM_RECOMMENDATIONS);
    }

    #[test]
    fn test_blend_weights_emit_complementary_fractions() {
        let mut weights = ComplementaryWeights::default();
        weights.set_fuzzy(70);

        let request = RequestBuilder::new(default_preferences())
            .blend_weights(weights)
            .build()
            .unwrap();
        let advanced = request.advanced_preferences;
        assert!((advanced.fuzzy_weight.unwrap() - 0.7).abs() < f64::EPSILON);
        assert!((advanced.ann_weight.unwrap() - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_diversity_pct_clamped_to_fraction() {
        let request = RequestBuilder::new(default_preferences())
            .diversity_pct(250)
            .build()
            .unwrap();
        assert_eq!(request.advanced_preferences.diversity, Some(1.0));
    }

    #[test]
    fn test_empty_preference_vector_is_rejected() {
        let result = RequestBuilder::new(PreferenceVector::default()).build();
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
