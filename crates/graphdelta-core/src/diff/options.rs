//! Diff configuration.
//!
//! Hosts typically load [`DiffOptions`] from their own config files; every
//! field has a default so partial documents deserialize.

use serde::{Deserialize, Serialize};

/// How list properties are compared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListCompareAlgorithm {
    /// Element by element, per index
    #[default]
    Simple,
    /// As multisets, ignoring order
    AsSet,
}

/// Options for a diff run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Emit property changes (against defaults) for newly appearing objects
    pub initial_changes: bool,
    pub list_compare: ListCompareAlgorithm,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            initial_changes: true,
            list_compare: ListCompareAlgorithm::Simple,
        }
    }
}

impl DiffOptions {
    pub fn with_initial_changes(mut self, initial_changes: bool) -> Self {
        self.initial_changes = initial_changes;
        self
    }

    pub fn with_list_compare(mut self, list_compare: ListCompareAlgorithm) -> Self {
        self.list_compare = list_compare;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_uses_defaults() {
        let options: DiffOptions = serde_json::from_str(r#"{"list_compare": "as_set"}"#).unwrap();
        assert!(options.initial_changes);
        assert_eq!(options.list_compare, ListCompareAlgorithm::AsSet);

        let empty: DiffOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, DiffOptions::default());
    }
}
