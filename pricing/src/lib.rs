#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Homeval pricing core: attribute schema, feature alignment to trained columns, and regression inference.

/// Attribute schema and the built-in housing catalog.
#[path = "../schema/main.rs"]
pub mod schema;

/// Input record assembly.
#[path = "../record.rs"]
pub mod record;

/// Trained column layout and record encoding.
#[path = "../encoding/main.rs"]
pub mod encoding;

/// Fitted artifacts: scaler, regressor, and bundle loading.
#[path = "../artifacts/main.rs"]
pub mod artifacts;

/// End-to-end estimation pipeline.
#[path = "../pipeline.rs"]
pub mod pipeline;

/// Telemetry helpers for logging valuation requests.
#[path = "../telemetry.rs"]
pub mod telemetry;

pub use artifacts::bundle::ArtifactBundle;
pub use artifacts::regressor::{PriceRegressor, TreeNode};
pub use artifacts::scaler::StandardScaler;
pub use artifacts::{ArtifactError, InferenceError};
pub use encoding::encoder::{EncodeError, EncodedRecord, EncodingWarning, RecordEncoder};
pub use encoding::layout::{FeatureLayout, LayoutError};
pub use pipeline::{PredictionError, PriceEstimator, Valuation};
pub use record::InputRecord;
pub use schema::attributes::{
    AttributeDomain, AttributeSchema, AttributeSpec, AttributeValue, FormSection, SchemaError,
};
pub use telemetry::{PricingTelemetry, PricingTelemetryBuilder};
