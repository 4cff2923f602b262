use std::fmt;
use std::sync::Arc;

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::InputRecord;
use crate::schema::attributes::{AttributeDomain, AttributeSchema, AttributeValue};

use super::layout::FeatureLayout;

/// Indicator column name produced for one categorical activation.
#[must_use]
pub fn indicator_name(attribute: &str, category: &str) -> String {
    format!("{attribute}_{category}")
}

/// Degradation observed while encoding. The vector is still produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingWarning {
    /// The chosen category has no indicator column in the layout, so the
    /// attribute contributes nothing to the vector.
    UnknownCategory {
        /// Attribute whose category was not trained.
        attribute: String,
        /// The untrained category label.
        value: String,
    },
    /// The value's shape contradicts the attribute's declared domain, so
    /// the attribute's columns stay zero.
    TypeMismatch {
        /// Attribute whose value had the wrong shape.
        attribute: String,
    },
}

impl fmt::Display for EncodingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCategory { attribute, value } => {
                write!(f, "{attribute}: category {value:?} was not trained on")
            }
            Self::TypeMismatch { attribute } => {
                write!(f, "{attribute}: value does not match the declared domain")
            }
        }
    }
}

/// Failure to encode a record at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// The record lacks a value for a schema attribute.
    #[error("input record is missing attribute {attribute}")]
    SchemaMismatch {
        /// The absent attribute.
        attribute: String,
    },
}

/// Encoded feature vector plus any degradations observed on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRecord {
    /// Feature values, one per layout column, in layout order.
    pub values: Array1<f32>,
    /// Degradations that left columns zero.
    pub warnings: Vec<EncodingWarning>,
}

/// Encodes flat records into the trained column layout.
///
/// Numeric attributes copy straight into their column; categorical
/// attributes activate the single `<attribute>_<category>` indicator for
/// the chosen category. The encoder visits schema attributes in
/// declaration order and writes into a zeroed vector, so the output
/// depends only on the record's values and the layout's column order.
#[derive(Debug, Clone)]
pub struct RecordEncoder {
    schema: Arc<AttributeSchema>,
    layout: FeatureLayout,
}

impl RecordEncoder {
    /// Builds an encoder over a schema and a trained layout.
    #[must_use]
    pub fn new(schema: Arc<AttributeSchema>, layout: FeatureLayout) -> Self {
        Self { schema, layout }
    }

    /// The trained layout this encoder aligns to.
    #[must_use]
    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    /// The schema this encoder reads records against.
    #[must_use]
    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    /// Encodes one record into a vector of exactly `layout.len()` entries.
    ///
    /// Fails only when the record is missing a schema attribute outright;
    /// unknown categories and mismatched value shapes degrade to zeroed
    /// columns with a warning.
    pub fn encode(&self, record: &InputRecord) -> Result<EncodedRecord, EncodeError> {
        let mut values = Array1::zeros(self.layout.len());
        let mut warnings = Vec::new();

        for spec in self.schema.attributes() {
            let value = record
                .get(&spec.name)
                .ok_or_else(|| EncodeError::SchemaMismatch {
                    attribute: spec.name.clone(),
                })?;

            match (&spec.domain, value) {
                (AttributeDomain::Numeric { .. }, AttributeValue::Number(number)) => {
                    // A numeric column absent from the layout was dropped
                    // at training time; the value is discarded.
                    if let Some(position) = self.layout.position(&spec.name) {
                        values[position] = *number;
                    }
                }
                (AttributeDomain::Categorical { .. }, AttributeValue::Text(category)) => {
                    let column = indicator_name(&spec.name, category);
                    if let Some(position) = self.layout.position(&column) {
                        values[position] = 1.0;
                    } else {
                        warnings.push(EncodingWarning::UnknownCategory {
                            attribute: spec.name.clone(),
                            value: category.clone(),
                        });
                    }
                }
                _ => warnings.push(EncodingWarning::TypeMismatch {
                    attribute: spec.name.clone(),
                }),
            }
        }

        Ok(EncodedRecord { values, warnings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::attributes::{AttributeSpec, FormSection};
    use indexmap::IndexMap;

    fn schema() -> Arc<AttributeSchema> {
        let specs = vec![
            AttributeSpec {
                name: "LotArea".to_string(),
                section: FormSection::Lot,
                domain: AttributeDomain::Numeric { default: 9600.0 },
            },
            AttributeSpec {
                name: "Street".to_string(),
                section: FormSection::Lot,
                domain: AttributeDomain::Categorical {
                    default: "Pave".to_string(),
                    options: vec!["Grvl".to_string(), "Pave".to_string()],
                },
            },
            AttributeSpec {
                name: "YearBuilt".to_string(),
                section: FormSection::Structure,
                domain: AttributeDomain::Numeric { default: 2000.0 },
            },
        ];
        Arc::new(AttributeSchema::from_specs(specs).unwrap())
    }

    fn layout(columns: &[&str]) -> FeatureLayout {
        FeatureLayout::new(columns.iter().map(ToString::to_string).collect()).unwrap()
    }

    fn encoder(columns: &[&str]) -> RecordEncoder {
        RecordEncoder::new(schema(), layout(columns))
    }

    #[test]
    fn vector_length_always_matches_the_layout() {
        let encoder = encoder(&["LotArea", "Street_Grvl", "Street_Pave", "YearBuilt"]);
        let record = InputRecord::with_defaults(encoder.schema());
        let encoded = encoder.encode(&record).unwrap();
        assert_eq!(encoded.values.len(), 4);
        assert!(encoded.warnings.is_empty());
    }

    #[test]
    fn values_land_at_layout_positions() {
        let encoder = encoder(&["YearBuilt", "Street_Pave", "LotArea"]);
        let record = InputRecord::with_defaults(encoder.schema());
        let encoded = encoder.encode(&record).unwrap();
        assert_eq!(encoded.values[0], 2000.0);
        assert_eq!(encoded.values[1], 1.0);
        assert_eq!(encoded.values[2], 9600.0);
    }

    #[test]
    fn column_order_follows_the_layout_not_the_record() {
        let record = InputRecord::with_defaults(&schema());
        let forward = encoder(&["LotArea", "YearBuilt"]).encode(&record).unwrap();
        let reversed = encoder(&["YearBuilt", "LotArea"]).encode(&record).unwrap();
        assert_eq!(forward.values[0], reversed.values[1]);
        assert_eq!(forward.values[1], reversed.values[0]);
    }

    #[test]
    fn encoding_is_deterministic() {
        let encoder = encoder(&["LotArea", "Street_Grvl", "Street_Pave", "YearBuilt"]);
        let record = InputRecord::with_defaults(encoder.schema());
        let first = encoder.encode(&record).unwrap();
        let second = encoder.encode(&record).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn chosen_category_activates_exactly_one_indicator() {
        let encoder = encoder(&["Street_Grvl", "Street_Pave"]);
        let mut record = InputRecord::with_defaults(encoder.schema());
        record
            .set(encoder.schema(), "Street", AttributeValue::from("Grvl"))
            .unwrap();
        let encoded = encoder.encode(&record).unwrap();
        assert_eq!(encoded.values[0], 1.0);
        assert_eq!(encoded.values[1], 0.0);
    }

    #[test]
    fn unknown_category_zeroes_the_attribute_and_warns() {
        let encoder = encoder(&["LotArea", "Street_Grvl", "Street_Pave"]);
        let mut record = InputRecord::with_defaults(encoder.schema());
        record
            .set(encoder.schema(), "Street", AttributeValue::from("Dirt"))
            .unwrap();

        let encoded = encoder.encode(&record).unwrap();
        for position in encoder.layout().indicator_positions("Street") {
            assert_eq!(encoded.values[position], 0.0);
        }
        assert_eq!(
            encoded.warnings,
            vec![EncodingWarning::UnknownCategory {
                attribute: "Street".to_string(),
                value: "Dirt".to_string(),
            }]
        );
    }

    #[test]
    fn untrained_numeric_column_is_dropped_silently() {
        let encoder = encoder(&["Street_Grvl", "Street_Pave"]);
        let record = InputRecord::with_defaults(encoder.schema());
        let encoded = encoder.encode(&record).unwrap();
        assert_eq!(encoded.values.len(), 2);
        assert!(encoded.warnings.is_empty());
    }

    #[test]
    fn missing_attribute_is_a_schema_mismatch() {
        let encoder = encoder(&["LotArea", "Street_Pave"]);
        let mut values = IndexMap::new();
        values.insert("LotArea".to_string(), AttributeValue::from(9600.0));
        // Street and YearBuilt never supplied.
        let record = InputRecord::from_values(values);

        let err = encoder.encode(&record).unwrap_err();
        assert_eq!(
            err,
            EncodeError::SchemaMismatch {
                attribute: "Street".to_string(),
            }
        );
    }

    #[test]
    fn mismatched_value_shape_degrades_with_a_warning() {
        let encoder = encoder(&["LotArea", "Street_Grvl", "Street_Pave"]);
        let mut values = IndexMap::new();
        values.insert("LotArea".to_string(), AttributeValue::from("big"));
        values.insert("Street".to_string(), AttributeValue::from(3.0));
        values.insert("YearBuilt".to_string(), AttributeValue::from(2000.0));
        let record = InputRecord::from_values(values);

        let encoded = encoder.encode(&record).unwrap();
        assert_eq!(encoded.values[0], 0.0);
        assert_eq!(
            encoded.warnings,
            vec![
                EncodingWarning::TypeMismatch {
                    attribute: "LotArea".to_string(),
                },
                EncodingWarning::TypeMismatch {
                    attribute: "Street".to_string(),
                },
            ]
        );
    }

    #[test]
    fn changing_one_numeric_value_changes_one_column() {
        let encoder = encoder(&["LotArea", "Street_Grvl", "Street_Pave", "YearBuilt"]);
        let mut record = InputRecord::with_defaults(encoder.schema());
        let before = encoder.encode(&record).unwrap();

        record
            .set(encoder.schema(), "LotArea", AttributeValue::from(12000.0))
            .unwrap();
        let after = encoder.encode(&record).unwrap();

        let changed: Vec<usize> = (0..before.values.len())
            .filter(|&i| before.values[i] != after.values[i])
            .collect();
        assert_eq!(changed, vec![encoder.layout().position("LotArea").unwrap()]);
        assert_eq!(after.values[changed[0]], 12000.0);
    }
}
