use std::{fmt, path::PathBuf, sync::Arc};

use anyhow::Result;
use serde_json::Value;
use shared_logging::{JsonLinesLogger, LogLevel, LogRecord};
use uuid::Uuid;

/// Builder configuring telemetry for the valuation pipeline.
pub struct PricingTelemetryBuilder {
    component: String,
    log_path: Option<PathBuf>,
}

impl PricingTelemetryBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            log_path: None,
        }
    }

    /// Sets the JSON Lines log path.
    #[must_use]
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    /// Finalizes the builder.
    pub fn build(self) -> Result<PricingTelemetry> {
        PricingTelemetry::new(self.component, self.log_path)
    }
}

/// Telemetry handle for valuation workflows.
#[derive(Clone)]
pub struct PricingTelemetry {
    inner: Arc<TelemetryInner>,
}

impl fmt::Debug for PricingTelemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PricingTelemetry")
            .field("component", &self.inner.component)
            .finish()
    }
}

struct TelemetryInner {
    component: String,
    logger: Option<JsonLinesLogger>,
}

impl PricingTelemetry {
    fn new(component: impl Into<String>, log_path: Option<PathBuf>) -> Result<Self> {
        let logger = if let Some(path) = log_path {
            Some(JsonLinesLogger::open(path)?)
        } else {
            None
        };
        Ok(Self {
            inner: Arc::new(TelemetryInner {
                component: component.into(),
                logger,
            }),
        })
    }

    /// Returns a builder for this telemetry helper.
    #[must_use]
    pub fn builder(component: impl Into<String>) -> PricingTelemetryBuilder {
        PricingTelemetryBuilder::new(component)
    }

    /// Logs a structured record.
    pub fn log(&self, level: LogLevel, message: &str, fields: Value) -> Result<()> {
        self.write(None, level, message, fields)
    }

    /// Logs a structured record tied to one valuation request.
    pub fn log_request(
        &self,
        request: Uuid,
        level: LogLevel,
        message: &str,
        fields: Value,
    ) -> Result<()> {
        self.write(Some(request), level, message, fields)
    }

    fn write(
        &self,
        request: Option<Uuid>,
        level: LogLevel,
        message: &str,
        fields: Value,
    ) -> Result<()> {
        if let Some(logger) = &self.inner.logger {
            let mut record =
                LogRecord::new(&self.inner.component, level, message).with_fields(fields);
            if let Some(request) = request {
                record = record.with_request(request);
            }
            logger.append(&record)?;
        }
        Ok(())
    }
}
