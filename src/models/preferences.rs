use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Preference dimensions the service always requires
pub const CORE_GENRES: [&str; 7] = [
    "action", "comedy", "romance", "thriller", "sci_fi", "drama", "horror",
];

/// Injected for any core genre the UI did not produce a usable value for
pub const DEFAULT_WEIGHT: f64 = 5.0;

const MIN_WEIGHT: f64 = 0.0;
const MAX_WEIGHT: f64 = 10.0;

/// Resolves a UI field identifier to its canonical API-facing name
pub fn canonical_field(raw: &str) -> String {
    match raw {
        "sci-fi" | "scifi" => "sci_fi".to_string(),
        other => other.replace('-', "_"),
    }
}

/// Canonical preference vector keyed by API-facing field names.
///
/// Once normalized, every core genre is present and every value lies in
/// [0, 10].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct PreferenceVector(BTreeMap<String, f64>);

impl PreferenceVector {
    /// Normalizes raw UI field/value pairs into a canonical vector.
    ///
    /// Unparseable or out-of-range entries are dropped. Core genres that
    /// are missing after that fall back to the default weight, and all
    /// retained values are clamped into [0, 10] to absorb float drift.
    pub fn normalize_raw<'a, I>(raw: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let parsed = raw
            .into_iter()
            .filter_map(|(field, value)| value.trim().parse::<f64>().ok().map(|v| (field, v)));
        Self::normalize(parsed)
    }

    /// Normalizes already-numeric field/value pairs (preset and mood
    /// tables feed this path).
    pub fn normalize<'a, I>(raw: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut fields = BTreeMap::new();

        for (field, value) in raw {
            if !value.is_finite() || !(MIN_WEIGHT..=MAX_WEIGHT).contains(&value) {
                continue;
            }
            fields.insert(canonical_field(field), value);
        }

        for genre in CORE_GENRES {
            fields.entry(genre.to_string()).or_insert(DEFAULT_WEIGHT);
        }

        for value in fields.values_mut() {
            *value = value.clamp(MIN_WEIGHT, MAX_WEIGHT);
        }

        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<f64> {
        self.0.get(field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Two model-blend percentages constrained to sum to 100.
///
/// Only the fuzzy side is stored; the ANN side is always derived, so
/// repeated edits cannot drift the pair apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplementaryWeights {
    fuzzy_pct: u8,
}

impl Default for ComplementaryWeights {
    fn default() -> Self {
        Self { fuzzy_pct: 50 }
    }
}

impl ComplementaryWeights {
    /// Sets the fuzzy-engine percentage; the ANN side becomes the rest
    pub fn set_fuzzy(&mut self, pct: i64) {
        self.fuzzy_pct = pct.clamp(0, 100) as u8;
    }

    /// Sets the ANN percentage; the fuzzy side becomes the rest
    pub fn set_ann(&mut self, pct: i64) {
        self.fuzzy_pct = 100 - pct.clamp(0, 100) as u8;
    }

    pub fn fuzzy_pct(&self) -> u8 {
        self.fuzzy_pct
    }

    pub fn ann_pct(&self) -> u8 {
        100 - self.fuzzy_pct
    }

    /// Both weights as fractions in [0, 1], summing to 1
    pub fn fractions(&self) -> (f64, f64) {
        (
            f64::from(self.fuzzy_pct) / 100.0,
            f64::from(self.ann_pct()) / 100.0,
        )
    }
}
