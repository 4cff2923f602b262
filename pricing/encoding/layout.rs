use indexmap::IndexSet;
use thiserror::Error;

/// Errors raised while building a feature layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The trained column list was empty.
    #[error("expected column list is empty")]
    EmptyColumns,
    /// The same column name appeared twice.
    #[error("duplicate column {0} in expected column list")]
    DuplicateColumn(String),
}

/// Ordered set of trained column names.
///
/// Feature vectors follow this order exactly; the layout never changes
/// after it is built.
#[derive(Debug, Clone)]
pub struct FeatureLayout {
    columns: IndexSet<String>,
}

impl FeatureLayout {
    /// Builds a layout from a trained column list, rejecting duplicates.
    pub fn new(columns: Vec<String>) -> Result<Self, LayoutError> {
        if columns.is_empty() {
            return Err(LayoutError::EmptyColumns);
        }
        let mut set = IndexSet::with_capacity(columns.len());
        for column in columns {
            if !set.insert(column.clone()) {
                return Err(LayoutError::DuplicateColumn(column));
            }
        }
        Ok(Self { columns: set })
    }

    /// Vector position of a column name, if the column was trained.
    #[must_use]
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.get_index_of(column)
    }

    /// Column name at a vector position.
    #[must_use]
    pub fn name(&self, position: usize) -> Option<&str> {
        self.columns.get_index(position).map(String::as_str)
    }

    /// Iterates column names in vector order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Positions of every indicator column derived from one attribute,
    /// i.e. columns named `<attribute>_<category>`.
    #[must_use]
    pub fn indicator_positions(&self, attribute: &str) -> Vec<usize> {
        let prefix = format!("{attribute}_");
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.starts_with(&prefix))
            .map(|(position, _)| position)
            .collect()
    }

    /// Number of columns, which is also the feature vector length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when the layout has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(columns: &[&str]) -> FeatureLayout {
        FeatureLayout::new(columns.iter().map(ToString::to_string).collect()).unwrap()
    }

    #[test]
    fn positions_follow_list_order() {
        let layout = layout(&["LotArea", "Street_Grvl", "Street_Pave"]);
        assert_eq!(layout.len(), 3);
        assert_eq!(layout.position("LotArea"), Some(0));
        assert_eq!(layout.position("Street_Pave"), Some(2));
        assert_eq!(layout.position("Alley_NA"), None);
        assert_eq!(layout.name(1), Some("Street_Grvl"));
    }

    #[test]
    fn duplicate_columns_are_rejected() {
        let err = FeatureLayout::new(vec![
            "LotArea".to_string(),
            "LotArea".to_string(),
        ])
        .unwrap_err();
        assert_eq!(err, LayoutError::DuplicateColumn("LotArea".to_string()));
    }

    #[test]
    fn empty_list_is_rejected() {
        assert_eq!(
            FeatureLayout::new(Vec::new()).unwrap_err(),
            LayoutError::EmptyColumns
        );
    }

    #[test]
    fn indicator_positions_group_by_attribute() {
        let layout = layout(&[
            "LotArea",
            "Street_Grvl",
            "Street_Pave",
            "Alley_Grvl",
            "Alley_NA",
        ]);
        assert_eq!(layout.indicator_positions("Street"), vec![1, 2]);
        assert_eq!(layout.indicator_positions("Alley"), vec![3, 4]);
        assert!(layout.indicator_positions("LotShape").is_empty());
    }
}
