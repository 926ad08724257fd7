//! The prediction adapter: validation, reordering, cached failure.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{FelicityError, Result};

use super::scorer::{LinearModel, Scorer};
use super::source::ArtifactSource;

/// A predicted score plus the echo of the validated input vector, in
/// the model's positional order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub score: f64,
    pub features: IndexMap<String, f64>,
}

enum PredictorState {
    Ready(Box<dyn Scorer>),
    /// Load failure, cached for the session. No automatic retry.
    Failed(String),
}

/// Serves predictions against a model loaded once per session.
///
/// Loading happens in [`Predictor::load`]; if it fails, the failure is
/// cached and every later [`predict`](Predictor::predict) call fails
/// fast with `ModelUnavailable` without re-attempting the fetch.
pub struct Predictor {
    state: PredictorState,
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            PredictorState::Ready(_) => "Ready",
            PredictorState::Failed(_) => "Failed",
        };
        f.debug_struct("Predictor").field("state", &state).finish()
    }
}

impl Predictor {
    /// Load the model from an artifact source. Never fails outright:
    /// a fetch or deserialization error becomes a cached failure.
    pub fn load(source: &dyn ArtifactSource) -> Self {
        let state = match Self::try_load(source) {
            Ok(scorer) => {
                info!(
                    source = %source.describe(),
                    features = scorer.feature_names().len(),
                    "prediction model loaded"
                );
                PredictorState::Ready(scorer)
            }
            Err(e) => {
                let message = e.to_string();
                warn!(
                    source = %source.describe(),
                    error = %message,
                    "prediction model unavailable; predictor disabled for this session"
                );
                PredictorState::Failed(message)
            }
        };
        Self { state }
    }

    /// Wrap an already constructed scorer (embedded model, test stub).
    pub fn from_scorer(scorer: impl Scorer + 'static) -> Self {
        Self {
            state: PredictorState::Ready(Box::new(scorer)),
        }
    }

    fn try_load(source: &dyn ArtifactSource) -> Result<Box<dyn Scorer>> {
        let manifest = source.fetch_manifest()?;
        let model = source.fetch_model()?;
        Ok(Box::new(LinearModel::from_artifacts(&manifest, &model)?))
    }

    /// Whether a model is loaded and predictions can be served.
    pub fn available(&self) -> bool {
        matches!(self.state, PredictorState::Ready(_))
    }

    /// The feature names the model expects, in positional order.
    pub fn feature_names(&self) -> Result<&[String]> {
        match &self.state {
            PredictorState::Ready(scorer) => Ok(scorer.feature_names()),
            PredictorState::Failed(message) => {
                Err(FelicityError::ModelUnavailable(message.clone()))
            }
        }
    }

    /// Predict a score for a feature vector.
    ///
    /// The vector may list indicators in any order; values are
    /// reordered into the model's expected positional order before
    /// scoring. Extra keys are ignored. Every expected indicator must
    /// be present or the call fails with `FeatureMismatch` listing all
    /// absent names.
    pub fn predict(&self, features: &IndexMap<String, f64>) -> Result<Prediction> {
        let scorer = match &self.state {
            PredictorState::Ready(scorer) => scorer,
            PredictorState::Failed(message) => {
                return Err(FelicityError::ModelUnavailable(message.clone()))
            }
        };

        let missing: Vec<String> = scorer
            .feature_names()
            .iter()
            .filter(|name| !features.contains_key(name.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(FelicityError::FeatureMismatch { missing });
        }

        let mut ordered = IndexMap::with_capacity(scorer.feature_names().len());
        for name in scorer.feature_names() {
            if let Some(value) = features.get(name.as_str()) {
                ordered.insert(name.clone(), *value);
            }
        }
        let values: Vec<f64> = ordered.values().copied().collect();

        Ok(Prediction {
            score: scorer.score(&values),
            features: ordered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Stub scorer that sums its inputs in manifest order.
    struct SumScorer {
        features: Vec<String>,
    }

    impl SumScorer {
        fn new(names: &[&str]) -> Self {
            Self {
                features: names.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl Scorer for SumScorer {
        fn feature_names(&self) -> &[String] {
            &self.features
        }

        fn score(&self, features: &[f64]) -> f64 {
            features.iter().sum()
        }

        fn name(&self) -> &str {
            "sum-stub"
        }
    }

    /// Source that fails every fetch and counts the attempts.
    struct BrokenSource {
        attempts: Cell<usize>,
    }

    impl ArtifactSource for BrokenSource {
        fn fetch_manifest(&self) -> crate::Result<Vec<u8>> {
            self.attempts.set(self.attempts.get() + 1);
            Err(FelicityError::ModelUnavailable(
                "connection refused".to_string(),
            ))
        }

        fn fetch_model(&self) -> crate::Result<Vec<u8>> {
            self.attempts.set(self.attempts.get() + 1);
            Err(FelicityError::ModelUnavailable(
                "connection refused".to_string(),
            ))
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    fn six_factor_vector() -> IndexMap<String, f64> {
        IndexMap::from([
            ("GDP".to_string(), 1.0),
            ("Social support".to_string(), 1.0),
            ("Life expectancy".to_string(), 0.8),
            ("Freedom".to_string(), 0.5),
            ("Generosity".to_string(), 0.2),
            ("Corruption".to_string(), 0.15),
        ])
    }

    const SIX_FACTORS: &[&str] = &[
        "GDP",
        "Social support",
        "Life expectancy",
        "Freedom",
        "Generosity",
        "Corruption",
    ];

    #[test]
    fn test_predict_sums_in_manifest_order() {
        let predictor = Predictor::from_scorer(SumScorer::new(SIX_FACTORS));
        let prediction = predictor.predict(&six_factor_vector()).unwrap();
        assert!((prediction.score - 3.65).abs() < 1e-9);
    }

    #[test]
    fn test_input_insertion_order_is_irrelevant() {
        let predictor = Predictor::from_scorer(SumScorer::new(SIX_FACTORS));

        let mut reversed = IndexMap::new();
        for (name, value) in six_factor_vector().into_iter().rev() {
            reversed.insert(name, value);
        }

        let a = predictor.predict(&six_factor_vector()).unwrap();
        let b = predictor.predict(&reversed).unwrap();
        assert_eq!(a, b);
        // Echoed vector is in manifest order either way.
        let order: Vec<&str> = b.features.keys().map(|s| s.as_str()).collect();
        assert_eq!(order, SIX_FACTORS);
    }

    #[test]
    fn test_missing_feature_is_feature_mismatch() {
        let predictor = Predictor::from_scorer(SumScorer::new(SIX_FACTORS));
        let mut features = six_factor_vector();
        features.shift_remove("Freedom");

        let err = predictor.predict(&features).unwrap_err();
        match err {
            FelicityError::FeatureMismatch { missing } => {
                assert_eq!(missing, vec!["Freedom".to_string()]);
            }
            other => panic!("expected FeatureMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_features_ignored() {
        let predictor = Predictor::from_scorer(SumScorer::new(SIX_FACTORS));
        let mut features = six_factor_vector();
        features.insert("Dystopia Residual".to_string(), 99.0);

        let prediction = predictor.predict(&features).unwrap();
        assert!((prediction.score - 3.65).abs() < 1e-9);
        assert_eq!(prediction.features.len(), 6);
    }

    #[test]
    fn test_broken_source_fails_once_and_is_cached() {
        let source = BrokenSource {
            attempts: Cell::new(0),
        };
        let predictor = Predictor::load(&source);
        assert!(!predictor.available());
        let attempts_at_load = source.attempts.get();
        assert!(attempts_at_load >= 1);

        // Later predictions fail fast without re-fetching.
        for _ in 0..3 {
            let err = predictor.predict(&six_factor_vector()).unwrap_err();
            assert!(matches!(err, FelicityError::ModelUnavailable(_)));
        }
        assert_eq!(source.attempts.get(), attempts_at_load);
    }
}
