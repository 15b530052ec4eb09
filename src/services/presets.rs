/// Static preset and mood tables.
///
/// These carry no algorithmic behavior; each entry is a genre-weight
/// table (plus, for moods, a bundle of advanced-filter settings) that
/// gets fed through the preference normalizer like any other raw input.
use crate::models::{AdvancedPreferences, PopularityWeight, PreferenceVector};

/// A named genre-weight table applied to the preference sliders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub weights: &'static [(&'static str, f64)],
}

impl Preset {
    /// Normalized preference vector for this preset
    pub fn preferences(&self) -> PreferenceVector {
        PreferenceVector::normalize(self.weights.iter().copied())
    }
}

/// A mood bundles genre weights with advanced-filter settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mood {
    pub name: &'static str,
    pub weights: &'static [(&'static str, f64)],
    pub min_rating: Option<f64>,
    pub popularity_weight: Option<PopularityWeight>,
    pub family_friendly: bool,
    pub no_violence: bool,
    pub award_winners: bool,
    pub diversity_pct: Option<i64>,
}

impl Mood {
    pub fn preferences(&self) -> PreferenceVector {
        PreferenceVector::normalize(self.weights.iter().copied())
    }

    /// Advanced preferences carrying only the settings this mood sets
    pub fn advanced(&self) -> AdvancedPreferences {
        AdvancedPreferences {
            min_rating: self.min_rating,
            popularity_weight: self.popularity_weight,
            family_friendly: self.family_friendly.then_some(true),
            no_violence: self.no_violence.then_some(true),
            award_winners: self.award_winners.then_some(true),
            diversity: self.diversity_pct.map(|pct| pct.clamp(0, 100) as f64 / 100.0),
            ..Default::default()
        }
    }
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "action",
        weights: &[
            ("action", 9.0),
            ("thriller", 8.0),
            ("sci_fi", 7.0),
            ("drama", 4.0),
            ("comedy", 3.0),
            ("romance", 2.0),
            ("horror", 5.0),
            ("adventure", 8.0),
        ],
    },
    Preset {
        name: "comedy",
        weights: &[
            ("comedy", 9.0),
            ("romance", 7.0),
            ("drama", 5.0),
            ("action", 4.0),
            ("sci_fi", 3.0),
            ("thriller", 2.0),
            ("horror", 1.0),
            ("animation", 7.0),
        ],
    },
    Preset {
        name: "drama",
        weights: &[
            ("drama", 9.0),
            ("romance", 7.0),
            ("thriller", 6.0),
            ("action", 4.0),
            ("comedy", 5.0),
            ("sci_fi", 3.0),
            ("horror", 2.0),
            ("crime", 6.0),
        ],
    },
    Preset {
        name: "scifi",
        weights: &[
            ("sci_fi", 9.0),
            ("action", 8.0),
            ("thriller", 7.0),
            ("fantasy", 6.0),
            ("drama", 4.0),
            ("comedy", 3.0),
            ("romance", 2.0),
            ("horror", 5.0),
        ],
    },
    Preset {
        name: "horror",
        weights: &[
            ("horror", 9.0),
            ("thriller", 8.0),
            ("action", 6.0),
            ("sci_fi", 5.0),
            ("drama", 3.0),
            ("comedy", 2.0),
            ("romance", 1.0),
            ("mystery", 7.0),
        ],
    },
    Preset {
        name: "romance",
        weights: &[
            ("romance", 9.0),
            ("drama", 8.0),
            ("comedy", 7.0),
            ("fantasy", 5.0),
            ("action", 3.0),
            ("thriller", 2.0),
            ("sci_fi", 2.0),
            ("horror", 1.0),
        ],
    },
];

pub const MOODS: &[Mood] = &[
    Mood {
        name: "chill",
        weights: &[
            ("comedy", 8.0),
            ("romance", 7.0),
            ("drama", 6.0),
            ("animation", 7.0),
            ("action", 3.0),
            ("thriller", 2.0),
            ("horror", 1.0),
        ],
        min_rating: Some(6.5),
        popularity_weight: Some(PopularityWeight::Medium),
        family_friendly: false,
        no_violence: false,
        award_winners: false,
        diversity_pct: Some(20),
    },
    Mood {
        name: "intense",
        weights: &[
            ("action", 9.0),
            ("thriller", 9.0),
            ("horror", 8.0),
            ("crime", 8.0),
            ("sci_fi", 7.0),
            ("drama", 5.0),
        ],
        min_rating: Some(7.0),
        popularity_weight: Some(PopularityWeight::High),
        family_friendly: false,
        no_violence: false,
        award_winners: false,
        diversity_pct: Some(10),
    },
    Mood {
        name: "family",
        weights: &[
            ("animation", 9.0),
            ("comedy", 8.0),
            ("adventure", 7.0),
            ("fantasy", 7.0),
            ("romance", 4.0),
            ("drama", 5.0),
            ("action", 3.0),
        ],
        min_rating: Some(6.0),
        popularity_weight: None,
        family_friendly: true,
        no_violence: true,
        award_winners: false,
        diversity_pct: Some(25),
    },
    Mood {
        name: "brainy",
        weights: &[
            ("sci_fi", 8.0),
            ("drama", 8.0),
            ("mystery", 7.0),
            ("thriller", 6.0),
            ("crime", 6.0),
            ("documentary", 9.0),
        ],
        min_rating: Some(7.5),
        popularity_weight: None,
        family_friendly: false,
        no_violence: false,
        award_winners: true,
        diversity_pct: Some(30),
    },
];

/// Looks up a preset by name, case-insensitively
pub fn preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Looks up a mood by name, case-insensitively
pub fn mood(name: &str) -> Option<&'static Mood> {
    MOODS.iter().find(|m| m.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CORE_GENRES;

    #[test]
    fn test_preset_lookup_is_case_insensitive() {
        assert!(preset("scifi").is_some());
        assert!(preset("SciFi").is_some());
        assert!(preset("western").is_none());
    }

    #[test]
    fn test_preset_preferences_satisfy_core_invariant() {
        for p in PRESETS {
            let prefs = p.preferences();
            for genre in CORE_GENRES {
                let value = prefs.get(genre).unwrap();
                assert!((0.0..=10.0).contains(&value), "{}: {}", p.name, genre);
            }
        }
    }

    #[test]
    fn test_preset_keeps_non_core_weights() {
        let prefs = preset("action").unwrap().preferences();
        assert_eq!(prefs.get("adventure"), Some(8.0));
    }

    #[test]
    fn test_mood_advanced_carries_only_set_fields() {
        let advanced = mood("family").unwrap().advanced();
        assert_eq!(advanced.family_friendly, Some(true));
        assert_eq!(advanced.no_violence, Some(true));
        assert_eq!(advanced.min_rating, Some(6.0));
        assert_eq!(advanced.diversity, Some(0.25));
        assert_eq!(advanced.award_winners, None);
        assert_eq!(advanced.popularity_weight, None);

        let json = serde_json::to_value(&advanced).unwrap();
        assert!(json.get("award_winners").is_none());
        assert!(json.get("min_year").is_none());
    }

    #[test]
    fn test_mood_lookup() {
        assert_eq!(mood("BRAINY").unwrap().name, "brainy");
        assert!(mood("sleepy").is_none());
    }
}
