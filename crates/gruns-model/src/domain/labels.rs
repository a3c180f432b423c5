use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{MANAGED_BY_LABEL, MANAGED_BY_TAG};

/// Key–value labels attached to a remote resource, based on [`BTreeMap`].
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(pub BTreeMap<String, String>);

impl Labels {
    /// Create an empty set of labels.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Labels carrying the ownership tag of this tool.
    pub fn managed() -> Self {
        let mut labels = Self::new();
        labels.insert(MANAGED_BY_LABEL, MANAGED_BY_TAG);
        labels
    }

    /// Returns `true` if no labels are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert or overwrite a label.
    ///
    /// Returns `self` for chaining.
    pub fn insert<K, V>(&mut self, key: K, val: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.insert(key.into(), val.into());
        self
    }

    /// Get the value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }

    /// Returns `true` when the resource was created by this tool.
    pub fn is_managed(&self) -> bool {
        self.get(MANAGED_BY_LABEL) == Some(MANAGED_BY_TAG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn managed_labels_are_recognized() {
        assert!(Labels::managed().is_managed());
    }

    #[test]
    fn foreign_tag_is_not_managed() {
        let mut labels = Labels::new();
        labels.insert(MANAGED_BY_LABEL, "terraform");
        assert!(!labels.is_managed());
        assert!(!Labels::new().is_managed());
    }
}
