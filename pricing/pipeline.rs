use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use shared_logging::LogLevel;
use thiserror::Error;
use uuid::Uuid;

use crate::artifacts::bundle::ArtifactBundle;
use crate::artifacts::regressor::PriceRegressor;
use crate::artifacts::scaler::StandardScaler;
use crate::artifacts::InferenceError;
use crate::encoding::encoder::{EncodeError, EncodingWarning, RecordEncoder};
use crate::record::InputRecord;
use crate::schema::attributes::AttributeSchema;
use crate::telemetry::PricingTelemetry;

/// Failure to produce an estimate for one submission.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// The record could not be encoded. The request is at fault.
    #[error("encoding failed: {0}")]
    Encode(#[from] EncodeError),
    /// The fitted artifacts could not score the vector. The deployment
    /// is at fault; the caller only sees a generic failure.
    #[error("inference failed: {0}")]
    Inference(#[from] InferenceError),
}

impl PredictionError {
    /// True when the submission itself caused the failure, false for
    /// internal faults such as skewed artifacts.
    #[must_use]
    pub fn is_request_fault(&self) -> bool {
        matches!(self, Self::Encode(_))
    }
}

/// One completed price estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Valuation {
    /// Request identifier, also attached to log records.
    pub request_id: Uuid,
    /// Estimated sale price.
    pub price: f32,
    /// Degradations observed while encoding the record.
    pub warnings: Vec<EncodingWarning>,
    /// When the estimate was produced.
    pub generated_at: DateTime<Utc>,
    /// Wall-clock time spent producing it, in microseconds.
    pub elapsed_us: u64,
}

impl Valuation {
    /// One-line summary for operator output.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "[valuation] request={} price={:.2} warnings={}",
            self.request_id,
            self.price,
            self.warnings.len()
        )
    }
}

/// End-to-end price estimator over one schema and one artifact bundle.
///
/// Construction takes a bundle that already passed validation, so every
/// stage downstream of encoding agrees on dimensionality from the start.
#[derive(Debug)]
pub struct PriceEstimator {
    encoder: RecordEncoder,
    scaler: StandardScaler,
    regressor: PriceRegressor,
    telemetry: Option<PricingTelemetry>,
}

impl PriceEstimator {
    /// Assembles an estimator from a schema and a validated bundle.
    #[must_use]
    pub fn new(schema: Arc<AttributeSchema>, artifacts: ArtifactBundle) -> Self {
        let (layout, scaler, regressor) = artifacts.into_parts();
        Self {
            encoder: RecordEncoder::new(schema, layout),
            scaler,
            regressor,
            telemetry: None,
        }
    }

    /// Attaches telemetry, builder style.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: PricingTelemetry) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Attaches telemetry to an already-built estimator.
    pub fn set_telemetry(&mut self, telemetry: PricingTelemetry) {
        self.telemetry = Some(telemetry);
    }

    /// Dimensionality of the vectors this estimator scores.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.encoder.layout().len()
    }

    /// The encoder this estimator aligns records with.
    #[must_use]
    pub fn encoder(&self) -> &RecordEncoder {
        &self.encoder
    }

    /// Produces one price estimate for a record.
    ///
    /// Encoding degradations ride along as warnings on the [`Valuation`];
    /// only an incomplete record or an internal artifact fault fails the
    /// request.
    pub fn predict(&self, record: &InputRecord) -> Result<Valuation, PredictionError> {
        let started = Instant::now();
        let request_id = Uuid::new_v4();

        match self.score(record) {
            Ok((price, warnings)) => {
                let valuation = Valuation {
                    request_id,
                    price,
                    warnings,
                    generated_at: Utc::now(),
                    elapsed_us: started.elapsed().as_micros() as u64,
                };
                self.log(
                    request_id,
                    LogLevel::Info,
                    "estimate_complete",
                    json!({
                        "price": valuation.price,
                        "warnings": valuation.warnings.len(),
                        "elapsed_us": valuation.elapsed_us,
                    }),
                );
                for warning in &valuation.warnings {
                    self.log(
                        request_id,
                        LogLevel::Warn,
                        "estimate_degraded",
                        json!({ "detail": warning.to_string() }),
                    );
                }
                Ok(valuation)
            }
            Err(err) => {
                let level = if err.is_request_fault() {
                    LogLevel::Warn
                } else {
                    LogLevel::Error
                };
                self.log(
                    request_id,
                    level,
                    "estimate_failed",
                    json!({ "detail": err.to_string() }),
                );
                Err(err)
            }
        }
    }

    fn score(&self, record: &InputRecord) -> Result<(f32, Vec<EncodingWarning>), PredictionError> {
        let encoded = self.encoder.encode(record)?;
        let scaled = self.scaler.transform(&encoded.values)?;
        let price = self.regressor.predict(&scaled)?;
        if !price.is_finite() {
            return Err(InferenceError::NonFiniteEstimate.into());
        }
        Ok((price, encoded.warnings))
    }

    fn log(&self, request: Uuid, level: LogLevel, message: &str, fields: serde_json::Value) {
        if let Some(telemetry) = &self.telemetry {
            let _ = telemetry.log_request(request, level, message, fields);
        }
    }
}
