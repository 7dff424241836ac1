use crate::error::SearchError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_NUM_RESULTS: usize = 10;
pub const DEFAULT_THRESHOLD: f64 = 0.15;
pub const DEFAULT_MAX_FEATURES: usize = 15_000;

/// Per-query knobs supplied by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    pub num_results: usize,
    pub threshold: f64,
    #[serde(default)]
    pub vectorizer: VectorizerConfig,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { num_results: DEFAULT_NUM_RESULTS, threshold: DEFAULT_THRESHOLD, vectorizer: VectorizerConfig::default() }
    }
}

impl SearchSettings {
    pub fn new(num_results: usize, threshold: f64) -> Self {
        Self { num_results, threshold, ..Self::default() }
    }

    /// Check ranges and return a copy with `num_results` clamped to at least 1.
    pub fn validate(self) -> Result<Self, SearchError> {
        if self.threshold.is_nan() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(SearchError::InvalidSettings(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        let vectorizer = self.vectorizer.validate()?;
        Ok(Self { num_results: self.num_results.max(1), threshold: self.threshold, vectorizer })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Maximum number of vocabulary terms retained after fitting.
    pub max_features: usize,
    /// Inclusive (min, max) n-gram lengths.
    pub ngram_range: (usize, usize),
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self { max_features: DEFAULT_MAX_FEATURES, ngram_range: (1, 2) }
    }
}

impl VectorizerConfig {
    pub fn validate(self) -> Result<Self, SearchError> {
        let (lo, hi) = self.ngram_range;
        if lo == 0 || lo > hi {
            return Err(SearchError::InvalidSettings(format!("invalid ngram range ({lo}, {hi})")));
        }
        if self.max_features == 0 {
            return Err(SearchError::InvalidSettings("max_features must be positive".into()));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_configuration() {
        let s = SearchSettings::default();
        assert_eq!(s.num_results, 10);
        assert_eq!(s.threshold, 0.15);
        assert_eq!(s.vectorizer.max_features, 15_000);
        assert_eq!(s.vectorizer.ngram_range, (1, 2));
    }

    #[test]
    fn validate_clamps_limit_and_rejects_bad_threshold() {
        let s = SearchSettings::new(0, 0.5).validate().unwrap();
        assert_eq!(s.num_results, 1);
        assert!(SearchSettings::new(5, 1.5).validate().is_err());
        assert!(SearchSettings::new(5, -0.1).validate().is_err());
        assert!(SearchSettings::new(5, f64::NAN).validate().is_err());
        assert!(SearchSettings::new(5, 1.0).validate().is_ok());
    }

    #[test]
    fn vectorizer_rejects_empty_ngram_range() {
        let cfg = VectorizerConfig { max_features: 10, ngram_range: (2, 1) };
        assert!(cfg.validate().is_err());
        let cfg = VectorizerConfig { max_features: 0, ngram_range: (1, 1) };
        assert!(cfg.validate().is_err());
    }
}
