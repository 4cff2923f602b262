use ndarray::Array1;

use super::{ArtifactError, InferenceError};

/// Fitted per-column standardizer applying `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Array1<f32>,
    scale: Array1<f32>,
}

impl StandardScaler {
    /// Builds a scaler from fitted parameters, validating shape and values.
    pub fn new(mean: Vec<f32>, scale: Vec<f32>) -> Result<Self, ArtifactError> {
        if mean.len() != scale.len() {
            return Err(ArtifactError::ScalerShape {
                mean: mean.len(),
                scale: scale.len(),
            });
        }
        for (index, value) in mean.iter().enumerate() {
            if !value.is_finite() {
                return Err(ArtifactError::InvalidMean { index });
            }
        }
        for (index, value) in scale.iter().enumerate() {
            if !value.is_finite() || *value == 0.0 {
                return Err(ArtifactError::InvalidScale { index });
            }
        }
        Ok(Self {
            mean: Array1::from(mean),
            scale: Array1::from(scale),
        })
    }

    /// Dimensionality the scaler was fitted on.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    /// True when the scaler covers no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Standardizes one feature vector.
    pub fn transform(&self, features: &Array1<f32>) -> Result<Array1<f32>, InferenceError> {
        if features.len() != self.mean.len() {
            return Err(InferenceError::DimensionMismatch {
                expected: self.mean.len(),
                actual: features.len(),
            });
        }
        let mut scaled = features.clone();
        scaled -= &self.mean;
        scaled /= &self.scale;
        Ok(scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn transform_centers_and_scales() {
        let scaler = StandardScaler::new(vec![10.0, 0.0], vec![2.0, 1.0]).unwrap();
        let scaled = scaler.transform(&array![14.0, 3.0]).unwrap();
        assert_eq!(scaled, array![2.0, 3.0]);
    }

    #[test]
    fn mismatched_parameter_lengths_are_rejected() {
        let err = StandardScaler::new(vec![1.0], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, ArtifactError::ScalerShape { mean: 1, scale: 2 }));
    }

    #[test]
    fn zero_scale_is_rejected() {
        let err = StandardScaler::new(vec![1.0, 2.0], vec![1.0, 0.0]).unwrap_err();
        assert!(matches!(err, ArtifactError::InvalidScale { index: 1 }));
    }

    #[test]
    fn non_finite_mean_is_rejected() {
        let err = StandardScaler::new(vec![f32::NAN], vec![1.0]).unwrap_err();
        assert!(matches!(err, ArtifactError::InvalidMean { index: 0 }));
    }

    #[test]
    fn wrong_vector_length_is_a_dimension_mismatch() {
        let scaler = StandardScaler::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
        let err = scaler.transform(&array![1.0]).unwrap_err();
        assert_eq!(
            err,
            InferenceError::DimensionMismatch {
                expected: 2,
                actual: 1,
            }
        );
    }
}
