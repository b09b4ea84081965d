//! Sort orderings for document lists

use serde::{Deserialize, Serialize};

/// Sort direction for a single order clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

/// One clause of a list's default ordering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrderingItem {
    /// Document field to order by
    pub field: String,
    /// Direction to order in
    pub direction: SortDirection,
}

impl SortOrderingItem {
    /// Ascending clause on a field
    #[inline]
    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending clause on a field
    #[inline]
    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_serializes_lowercase_direction() {
        let clause = SortOrderingItem::desc("releaseDate");
        let json = serde_json::to_value(&clause).unwrap();
        assert_eq!(json["field"], "releaseDate");
        assert_eq!(json["direction"], "desc");
    }

    #[test]
    fn ordering_round_trips() {
        let clause = SortOrderingItem::asc("title");
        let json = serde_json::to_string(&clause).unwrap();
        let back: SortOrderingItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, clause);
    }
}
