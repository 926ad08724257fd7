//! Scorer trait and the linear regression backing.

use serde::{Deserialize, Serialize};

use crate::error::{FelicityError, Result};

/// A stateless scoring function over a frozen model.
///
/// Implementations must be thread-safe (Send + Sync); the concrete
/// backing (remote artifact, local file, embedded constant) is an
/// injected dependency, so the adapter's contract stays stable
/// regardless of where the model came from.
pub trait Scorer: Send + Sync {
    /// The feature names the model expects, in positional order.
    fn feature_names(&self) -> &[String];

    /// Score a feature vector already ordered per `feature_names`.
    fn score(&self, features: &[f64]) -> f64;

    /// Name of this scorer (for logging/debugging).
    fn name(&self) -> &str;
}

/// The companion manifest listing expected input features in
/// positional order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub features: Vec<String>,
}

/// Serialized parameters of the trained regression.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelParams {
    intercept: f64,
    coefficients: Vec<f64>,
}

/// A linear regression model: score = intercept + coefficients . x.
#[derive(Debug, Clone)]
pub struct LinearModel {
    features: Vec<String>,
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LinearModel {
    /// Deserialize a model from its artifact and manifest bytes.
    ///
    /// The manifest is JSON `{"features": [...]}`; the artifact is
    /// JSON `{"intercept": f, "coefficients": [...]}`. Coefficient
    /// count must match the manifest.
    pub fn from_artifacts(manifest: &[u8], model: &[u8]) -> Result<Self> {
        let manifest: Manifest = serde_json::from_slice(manifest)
            .map_err(|e| FelicityError::ModelUnavailable(format!("malformed manifest: {e}")))?;
        let params: ModelParams = serde_json::from_slice(model)
            .map_err(|e| FelicityError::ModelUnavailable(format!("malformed artifact: {e}")))?;

        if manifest.features.is_empty() {
            return Err(FelicityError::ModelUnavailable(
                "manifest declares no features".to_string(),
            ));
        }
        if params.coefficients.len() != manifest.features.len() {
            return Err(FelicityError::ModelUnavailable(format!(
                "manifest declares {} features but artifact has {} coefficients",
                manifest.features.len(),
                params.coefficients.len()
            )));
        }

        Ok(Self {
            features: manifest.features,
            intercept: params.intercept,
            coefficients: params.coefficients,
        })
    }
}

impl Scorer for LinearModel {
    fn feature_names(&self) -> &[String] {
        &self.features
    }

    fn score(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }

    fn name(&self) -> &str {
        "linear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &[u8] = br#"{"features": ["GDP", "Freedom"]}"#;

    #[test]
    fn test_linear_model_scores_dot_product() {
        let model =
            LinearModel::from_artifacts(MANIFEST, br#"{"intercept": 2.0, "coefficients": [3.0, 0.5]}"#)
                .unwrap();
        assert_eq!(model.score(&[1.0, 2.0]), 6.0);
        assert_eq!(model.feature_names(), &["GDP", "Freedom"]);
    }

    #[test]
    fn test_coefficient_count_must_match_manifest() {
        let err = LinearModel::from_artifacts(
            MANIFEST,
            br#"{"intercept": 0.0, "coefficients": [1.0]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, FelicityError::ModelUnavailable(_)));
    }

    #[test]
    fn test_malformed_artifact_is_model_unavailable() {
        let err = LinearModel::from_artifacts(MANIFEST, b"not json").unwrap_err();
        assert!(matches!(err, FelicityError::ModelUnavailable(_)));
    }

    #[test]
    fn test_empty_manifest_rejected() {
        let err = LinearModel::from_artifacts(
            br#"{"features": []}"#,
            br#"{"intercept": 0.0, "coefficients": []}"#,
        )
        .unwrap_err();
        assert!(matches!(err, FelicityError::ModelUnavailable(_)));
    }
}
