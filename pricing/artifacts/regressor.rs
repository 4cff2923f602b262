use ndarray::{aview1, Array1};
use serde::{Deserialize, Serialize};

use super::{ArtifactError, InferenceError};

/// Node in a fitted regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Interior split: `feature < threshold` descends left, otherwise right.
    Split {
        /// Feature position in the scaled vector.
        feature: usize,
        /// Split threshold in scaled units.
        threshold: f32,
        /// Subtree for `feature < threshold`.
        left: Box<TreeNode>,
        /// Subtree for `feature >= threshold`.
        right: Box<TreeNode>,
    },
    /// Terminal leaf contributing its value to the ensemble sum.
    Leaf {
        /// Leaf contribution.
        value: f32,
    },
}

impl TreeNode {
    fn score(&self, features: &Array1<f32>) -> f32 {
        match self {
            Self::Leaf { value } => *value,
            Self::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if features[*feature] < *threshold {
                    left.score(features)
                } else {
                    right.score(features)
                }
            }
        }
    }

    fn validate(&self, feature_count: usize) -> Result<(), ArtifactError> {
        match self {
            Self::Leaf { value } => {
                if value.is_finite() {
                    Ok(())
                } else {
                    Err(ArtifactError::NonFiniteParameter)
                }
            }
            Self::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= feature_count {
                    return Err(ArtifactError::FeatureOutOfRange {
                        feature: *feature,
                        count: feature_count,
                    });
                }
                if !threshold.is_finite() {
                    return Err(ArtifactError::NonFiniteParameter);
                }
                left.validate(feature_count)?;
                right.validate(feature_count)
            }
        }
    }
}

/// Fitted regressor mapping one scaled feature vector to one price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceRegressor {
    /// Linear model: `dot(weights, x) + bias`.
    Linear {
        /// One weight per feature, in layout order.
        weights: Vec<f32>,
        /// Intercept.
        bias: f32,
    },
    /// Gradient-boosted ensemble: `base_score + sum(tree leaves)`.
    GradientBoosted {
        /// Dimensionality the ensemble was fitted on.
        n_features: usize,
        /// Prediction baseline added to every estimate.
        base_score: f32,
        /// Fitted trees, summed in order.
        trees: Vec<TreeNode>,
    },
}

impl PriceRegressor {
    /// Dimensionality this regressor expects.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        match self {
            Self::Linear { weights, .. } => weights.len(),
            Self::GradientBoosted { n_features, .. } => *n_features,
        }
    }

    /// Short label for display output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Linear { .. } => "linear",
            Self::GradientBoosted { .. } => "gradient_boosted",
        }
    }

    /// Checks every fitted parameter once, at load time.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        match self {
            Self::Linear { weights, bias } => {
                if weights.iter().any(|w| !w.is_finite()) || !bias.is_finite() {
                    return Err(ArtifactError::NonFiniteParameter);
                }
                Ok(())
            }
            Self::GradientBoosted {
                n_features,
                base_score,
                trees,
            } => {
                if !base_score.is_finite() {
                    return Err(ArtifactError::NonFiniteParameter);
                }
                for tree in trees {
                    tree.validate(*n_features)?;
                }
                Ok(())
            }
        }
    }

    /// Scores one scaled feature vector.
    pub fn predict(&self, features: &Array1<f32>) -> Result<f32, InferenceError> {
        let expected = self.feature_count();
        if features.len() != expected {
            return Err(InferenceError::DimensionMismatch {
                expected,
                actual: features.len(),
            });
        }
        match self {
            Self::Linear { weights, bias } => Ok(aview1(weights).dot(features) + bias),
            Self::GradientBoosted {
                base_score, trees, ..
            } => {
                let total: f32 = trees.iter().map(|tree| tree.score(features)).sum();
                Ok(base_score + total)
            }
        }
    }
}
