//! Free-text entity filters.

use std::collections::BTreeSet;

use crate::models::record::Variant;

/// Exact-match set of entity names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityFilter {
    names: BTreeSet<String>,
}

impl EntityFilter {
    /// Split `text` on `separator`; items are trimmed and empty items dropped.
    pub fn parse(text: &str, separator: char) -> Self {
        let names = text
            .split(separator)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        Self { names }
    }

    /// Parse using the variant's separator.
    pub fn for_variant(text: &str, variant: Variant) -> Self {
        Self::parse(text, variant.filter_separator())
    }

    pub fn matches(&self, entity: &str) -> bool {
        self.names.contains(entity)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Selected names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
