use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog;

/// Form section an attribute is presented under.
///
/// Sections only group fields for display; they have no effect on how a
/// record is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormSection {
    /// Lot, zoning, and location fields.
    Lot,
    /// Building structure and exterior fields.
    Structure,
    /// Basement fields.
    Basement,
    /// Living area, garage size, and sale timing fields.
    Areas,
    /// Utilities, garage quality, and miscellaneous fields.
    Amenities,
}

impl FormSection {
    /// Every section in display order.
    pub const ALL: [Self; 5] = [
        Self::Lot,
        Self::Structure,
        Self::Basement,
        Self::Areas,
        Self::Amenities,
    ];

    /// Human-readable section heading.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Lot => "Lot & location",
            Self::Structure => "Structure & exterior",
            Self::Basement => "Basement",
            Self::Areas => "Living areas & sale",
            Self::Amenities => "Utilities, garage & extras",
        }
    }
}

/// Scalar value an attribute can carry in an input record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Numeric measurement or count.
    Number(f32),
    /// Categorical label.
    Text(String),
}

impl AttributeValue {
    /// Numeric payload, if this value is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(_) => None,
        }
    }

    /// Text payload, if this value is a label.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(text) => Some(text.as_str()),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) if number.fract() == 0.0 => write!(f, "{number:.0}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f32> for AttributeValue {
    fn from(number: f32) -> Self {
        Self::Number(number)
    }
}

impl From<&str> for AttributeValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Typed domain of one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttributeDomain {
    /// Free numeric field with a prefill default.
    Numeric {
        /// Value used when the submitter leaves the field untouched.
        default: f32,
    },
    /// Closed categorical field with a prefill default.
    Categorical {
        /// Option used when the submitter leaves the field untouched.
        default: String,
        /// Every label the field can take.
        options: Vec<String>,
    },
}

impl AttributeDomain {
    /// Default value for this domain, as an [`AttributeValue`].
    #[must_use]
    pub fn default_value(&self) -> AttributeValue {
        match self {
            Self::Numeric { default } => AttributeValue::Number(*default),
            Self::Categorical { default, .. } => AttributeValue::Text(default.clone()),
        }
    }

    /// True for numeric domains.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric { .. })
    }

    /// Short label for display output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Numeric { .. } => "numeric",
            Self::Categorical { .. } => "categorical",
        }
    }
}

/// One attribute in the schema: name, display section, and typed domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSpec {
    /// Attribute name as it appears in records and trained column names.
    pub name: String,
    /// Section the attribute is presented under.
    pub section: FormSection,
    /// Typed domain with its default.
    #[serde(flatten)]
    pub domain: AttributeDomain,
}

/// Errors raised while loading or validating a schema table.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The table declared no attributes at all.
    #[error("schema table contains no attributes")]
    Empty,
    /// Two attributes share a name.
    #[error("duplicate attribute {0}")]
    DuplicateAttribute(String),
    /// A numeric default was NaN or infinite.
    #[error("numeric default for attribute {0} is not finite")]
    NonFiniteDefault(String),
    /// A categorical attribute listed no options.
    #[error("categorical attribute {0} has an empty option list")]
    NoOptions(String),
    /// A categorical default was absent from its own option list.
    #[error("default {default:?} for attribute {attribute} is not among its options")]
    DefaultNotListed {
        /// Attribute whose default is invalid.
        attribute: String,
        /// The offending default label.
        default: String,
    },
    /// Underlying filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed schema JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct SchemaTable {
    attributes: Vec<AttributeSpec>,
}

/// Ordered attribute table.
///
/// Iteration order is the declaration order of the table, which fixes both
/// the form layout and the order attributes are visited during encoding.
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    specs: IndexMap<String, AttributeSpec>,
}

impl AttributeSchema {
    /// Builds a schema from a list of specs, validating the table.
    pub fn from_specs(specs: Vec<AttributeSpec>) -> Result<Self, SchemaError> {
        if specs.is_empty() {
            return Err(SchemaError::Empty);
        }
        let mut table = IndexMap::with_capacity(specs.len());
        for spec in specs {
            match &spec.domain {
                AttributeDomain::Numeric { default } => {
                    if !default.is_finite() {
                        return Err(SchemaError::NonFiniteDefault(spec.name));
                    }
                }
                AttributeDomain::Categorical { default, options } => {
                    if options.is_empty() {
                        return Err(SchemaError::NoOptions(spec.name));
                    }
                    if !options.contains(default) {
                        return Err(SchemaError::DefaultNotListed {
                            attribute: spec.name,
                            default: default.clone(),
                        });
                    }
                }
            }
            let name = spec.name.clone();
            if table.insert(name.clone(), spec).is_some() {
                return Err(SchemaError::DuplicateAttribute(name));
            }
        }
        Ok(Self { specs: table })
    }

    /// Loads a schema table from a JSON file of the shape
    /// `{"attributes": [{"name": ..., "section": ..., "kind": ...}, ...]}`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let contents = fs::read_to_string(path)?;
        let table: SchemaTable = serde_json::from_str(&contents)?;
        Self::from_specs(table.attributes)
    }

    /// The built-in housing catalog shipped with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        let specs = catalog::specs();
        let mut table = IndexMap::with_capacity(specs.len());
        for spec in specs {
            table.insert(spec.name.clone(), spec);
        }
        Self { specs: table }
    }

    /// Spec lookup by attribute name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.specs.get(name)
    }

    /// True when the table knows the attribute.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    /// Iterates specs in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.specs.values()
    }

    /// Specs belonging to one display section, in declaration order.
    #[must_use]
    pub fn section(&self, section: FormSection) -> Vec<&AttributeSpec> {
        self.specs
            .values()
            .filter(|spec| spec.section == section)
            .collect()
    }

    /// Number of attributes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// True when the table has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
