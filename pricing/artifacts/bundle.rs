use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::encoding::layout::FeatureLayout;

use super::regressor::PriceRegressor;
use super::scaler::StandardScaler;
use super::ArtifactError;

/// File holding the trained column list, a JSON array of names.
pub const COLUMNS_FILE: &str = "columns.json";
/// File holding the fitted scaler parameters.
pub const SCALER_FILE: &str = "scaler.json";
/// File holding the fitted regressor.
pub const REGRESSOR_FILE: &str = "regressor.json";

#[derive(Debug, Deserialize)]
struct ScalerFile {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

/// The three fitted artifacts required to serve estimates, loaded and
/// validated as a unit.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    layout: FeatureLayout,
    scaler: StandardScaler,
    regressor: PriceRegressor,
}

impl ArtifactBundle {
    /// Assembles a bundle from already-built parts, cross-checking that
    /// all three agree on dimensionality.
    pub fn new(
        layout: FeatureLayout,
        scaler: StandardScaler,
        regressor: PriceRegressor,
    ) -> Result<Self, ArtifactError> {
        if layout.len() != scaler.len() || layout.len() != regressor.feature_count() {
            return Err(ArtifactError::DimensionSkew {
                columns: layout.len(),
                scaler: scaler.len(),
                regressor: regressor.feature_count(),
            });
        }
        Ok(Self {
            layout,
            scaler,
            regressor,
        })
    }

    /// Loads and validates a bundle from an artifact directory containing
    /// `columns.json`, `scaler.json`, and `regressor.json`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();

        let columns: Vec<String> =
            serde_json::from_str(&fs::read_to_string(dir.join(COLUMNS_FILE))?)?;
        let layout = FeatureLayout::new(columns)?;

        let scaler_file: ScalerFile =
            serde_json::from_str(&fs::read_to_string(dir.join(SCALER_FILE))?)?;
        let scaler = StandardScaler::new(scaler_file.mean, scaler_file.scale)?;

        let regressor: PriceRegressor =
            serde_json::from_str(&fs::read_to_string(dir.join(REGRESSOR_FILE))?)?;
        regressor.validate()?;

        Self::new(layout, scaler, regressor)
    }

    /// Dimensionality shared by all three artifacts.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.layout.len()
    }

    /// The trained column layout.
    #[must_use]
    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    /// The fitted scaler.
    #[must_use]
    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// The fitted regressor.
    #[must_use]
    pub fn regressor(&self) -> &PriceRegressor {
        &self.regressor
    }

    /// Splits the bundle into its parts for pipeline assembly.
    #[must_use]
    pub fn into_parts(self) -> (FeatureLayout, StandardScaler, PriceRegressor) {
        (self.layout, self.scaler, self.regressor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::Path;

    fn write_artifacts(
        dir: &Path,
        columns: serde_json::Value,
        scaler: serde_json::Value,
        regressor: serde_json::Value,
    ) {
        fs::write(dir.join(COLUMNS_FILE), columns.to_string()).unwrap();
        fs::write(dir.join(SCALER_FILE), scaler.to_string()).unwrap();
        fs::write(dir.join(REGRESSOR_FILE), regressor.to_string()).unwrap();
    }

    #[test]
    fn load_reads_a_consistent_bundle() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(
            dir.path(),
            json!(["LotArea", "Street_Grvl", "Street_Pave"]),
            json!({"mean": [9000.0, 0.0, 0.5], "scale": [1000.0, 1.0, 0.5]}),
            json!({"linear": {"weights": [1.0, -2.0, 3.0], "bias": 100.0}}),
        );

        let bundle = ArtifactBundle::load(dir.path()).unwrap();
        assert_eq!(bundle.feature_count(), 3);
        assert_eq!(bundle.layout().position("Street_Pave"), Some(2));
        assert_eq!(bundle.regressor().kind(), "linear");
    }

    #[test]
    fn missing_file_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(COLUMNS_FILE), json!(["LotArea"]).to_string()).unwrap();

        let err = ArtifactBundle::load(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::Io(_)));
    }

    #[test]
    fn malformed_json_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(
            dir.path(),
            json!(["LotArea"]),
            json!({"mean": [0.0], "scale": [1.0]}),
            json!({"linear": {"weights": [1.0], "bias": 0.0}}),
        );
        fs::write(dir.path().join(REGRESSOR_FILE), "{not json").unwrap();

        let err = ArtifactBundle::load(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::Json(_)));
    }

    #[test]
    fn skewed_dimensions_fail_the_load() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(
            dir.path(),
            json!(["LotArea", "Street_Pave"]),
            json!({"mean": [0.0, 0.0], "scale": [1.0, 1.0]}),
            json!({"linear": {"weights": [1.0, 2.0, 3.0], "bias": 0.0}}),
        );

        let err = ArtifactBundle::load(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            ArtifactError::DimensionSkew {
                columns: 2,
                scaler: 2,
                regressor: 3,
            }
        ));
    }

    #[test]
    fn invalid_scaler_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(
            dir.path(),
            json!(["LotArea"]),
            json!({"mean": [0.0], "scale": [0.0]}),
            json!({"linear": {"weights": [1.0], "bias": 0.0}}),
        );

        let err = ArtifactBundle::load(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::InvalidScale { index: 0 }));
    }

    #[test]
    fn duplicate_columns_fail_the_load() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(
            dir.path(),
            json!(["LotArea", "LotArea"]),
            json!({"mean": [0.0, 0.0], "scale": [1.0, 1.0]}),
            json!({"linear": {"weights": [1.0, 2.0], "bias": 0.0}}),
        );

        let err = ArtifactBundle::load(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::Layout(_)));
    }
}
