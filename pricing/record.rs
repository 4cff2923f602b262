use anyhow::{bail, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::attributes::{AttributeSchema, AttributeValue};

/// Flat per-submission record holding exactly one value per attribute.
///
/// Records serialize as a plain JSON object keyed by attribute name, which
/// is also the shape accepted for override files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputRecord {
    values: IndexMap<String, AttributeValue>,
}

impl InputRecord {
    /// Builds a record carrying every schema attribute at its default.
    #[must_use]
    pub fn with_defaults(schema: &AttributeSchema) -> Self {
        let mut values = IndexMap::with_capacity(schema.len());
        for spec in schema.attributes() {
            values.insert(spec.name.clone(), spec.domain.default_value());
        }
        Self { values }
    }

    /// Wraps an already-assembled value map without consulting a schema.
    ///
    /// Completeness is only checked later, at encoding time.
    #[must_use]
    pub fn from_values(values: IndexMap<String, AttributeValue>) -> Self {
        Self { values }
    }

    /// Value lookup by attribute name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    /// Overrides one attribute value. Names absent from the schema are
    /// rejected so typos surface immediately instead of as zero columns.
    pub fn set(
        &mut self,
        schema: &AttributeSchema,
        name: &str,
        value: AttributeValue,
    ) -> Result<()> {
        if !schema.contains(name) {
            bail!("unknown attribute {name}");
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Applies a batch of overrides, for example one merged form section.
    pub fn merge(
        &mut self,
        schema: &AttributeSchema,
        overrides: impl IntoIterator<Item = (String, AttributeValue)>,
    ) -> Result<()> {
        for (name, value) in overrides {
            self.set(schema, &name, value)?;
        }
        Ok(())
    }

    /// Iterates `(name, value)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of values in the record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the record holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
