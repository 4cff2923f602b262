//! Fitted artifact modules: scaler, regressor, and bundle loading.

/// Artifact directory loading and cross-validation.
pub mod bundle;
/// Fitted price regressors.
pub mod regressor;
/// Fitted standardizing scaler.
pub mod scaler;

use thiserror::Error;

use crate::encoding::layout::LayoutError;

/// Errors raised while loading or validating fitted artifacts. Any of
/// these is fatal at startup: the estimator never serves from a bundle
/// that failed validation.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Underlying filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed artifact JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// The trained column list failed validation.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// Scaler mean and scale arrays disagree on length.
    #[error("scaler mean has {mean} entries but scale has {scale}")]
    ScalerShape {
        /// Length of the mean array.
        mean: usize,
        /// Length of the scale array.
        scale: usize,
    },
    /// A scaler mean entry was NaN or infinite.
    #[error("scaler column {index} has a non-finite mean")]
    InvalidMean {
        /// Offending column position.
        index: usize,
    },
    /// A scaler scale entry was zero, NaN, or infinite.
    #[error("scaler column {index} has a zero or non-finite scale")]
    InvalidScale {
        /// Offending column position.
        index: usize,
    },
    /// A regressor weight, bias, threshold, or leaf was NaN or infinite.
    #[error("regressor contains a non-finite parameter")]
    NonFiniteParameter,
    /// A tree split references a feature the bundle does not have.
    #[error("tree split references feature {feature} but only {count} features are fitted")]
    FeatureOutOfRange {
        /// Feature index named by the split.
        feature: usize,
        /// Number of fitted features.
        count: usize,
    },
    /// The three artifacts disagree on dimensionality.
    #[error("artifact dimensions disagree: columns={columns}, scaler={scaler}, regressor={regressor}")]
    DimensionSkew {
        /// Length of the trained column list.
        columns: usize,
        /// Scaler dimensionality.
        scaler: usize,
        /// Regressor input dimensionality.
        regressor: usize,
    },
}

/// Runtime inference failures. These are internal faults: by the time a
/// request reaches the artifacts its vector already matched the layout,
/// so a mismatch here means the deployment is skewed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InferenceError {
    /// The vector length does not match what the artifact was fitted on.
    #[error("feature vector has {actual} entries but the artifact was fitted on {expected}")]
    DimensionMismatch {
        /// Dimensionality the artifact was fitted on.
        expected: usize,
        /// Dimensionality of the incoming vector.
        actual: usize,
    },
    /// The regression arithmetic produced NaN or infinity.
    #[error("regression produced a non-finite estimate")]
    NonFiniteEstimate,
}
