use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::column::{ColumnDef, PinSide};
use super::operator::FilterOperator;
use super::row::RowId;
use super::value::FilterValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Single-column sort; a sort is active only when both parts are set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortModel {
    pub field: Option<String>,
    pub direction: Option<SortDirection>,
}

impl SortModel {
    pub fn new(field: &str, direction: SortDirection) -> Self {
        Self {
            field: Some(field.to_string()),
            direction: Some(direction),
        }
    }

    pub fn active(&self) -> Option<(&str, SortDirection)> {
        match (&self.field, self.direction) {
            (Some(field), Some(dir)) => Some((field.as_str(), dir)),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active().is_some()
    }

    /// Header click: asc -> desc -> none; another field starts at asc
    pub fn cycle(&mut self, field: &str) {
        match self.active() {
            Some((current, SortDirection::Asc)) if current == field => {
                self.direction = Some(SortDirection::Desc);
            }
            Some((current, SortDirection::Desc)) if current == field => {
                *self = SortModel::default();
            }
            _ => *self = SortModel::new(field, SortDirection::Asc),
        }
    }
}

/// Mutable state owned by a table instance.
///
/// Only `filters` and `operators` are persisted; pagination, sort and
/// column layout live for the session only.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub filters: BTreeMap<String, FilterValue>,
    pub operators: BTreeMap<String, FilterOperator>,
    pub sort_model: SortModel,
    /// Zero-based page index
    pub page: usize,
    pub rows_per_page: usize,
    /// true = hidden
    pub hidden_cols: BTreeMap<String, bool>,
    pub pinned_left: Vec<String>,
    pub selected_ids: BTreeSet<RowId>,
}

impl TableState {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            filters: BTreeMap::new(),
            operators: BTreeMap::new(),
            sort_model: SortModel::default(),
            page: 0,
            rows_per_page,
            hidden_cols: BTreeMap::new(),
            pinned_left: Vec::new(),
            selected_ids: BTreeSet::new(),
        }
    }

    /// Applies initial pin and visibility defaults from the column list
    pub fn with_column_defaults(mut self, columns: &[ColumnDef]) -> Self {
        for col in columns {
            if col.hidden {
                self.hidden_cols.insert(col.field.clone(), true);
            }
            if col.pinned == Some(PinSide::Left) && !self.pinned_left.contains(&col.field) {
                self.pinned_left.push(col.field.clone());
            }
        }
        self
    }

    /// Fields with a non-empty filter value
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.filters
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn active_filter_count(&self) -> usize {
        self.active_filters().count()
    }

    pub fn is_hidden(&self, field: &str) -> bool {
        self.hidden_cols.get(field).copied().unwrap_or(false)
    }

    pub fn is_pinned(&self, field: &str) -> bool {
        self.pinned_left.iter().any(|f| f == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_cycle() {
        let mut sort = SortModel::default();
        sort.cycle("title");
        assert_eq!(sort.active(), Some(("title", SortDirection::Asc)));
        sort.cycle("title");
        assert_eq!(sort.active(), Some(("title", SortDirection::Desc)));
        sort.cycle("title");
        assert!(!sort.is_active());
        sort.cycle("title");
        sort.cycle("price");
        assert_eq!(sort.active(), Some(("price", SortDirection::Asc)));
    }

    #[test]
    fn test_active_filters_skip_empty_values() {
        let mut st = TableState::new(10);
        st.filters.insert("title".into(), FilterValue::text("abc"));
        st.filters.insert("status".into(), FilterValue::Many(vec![]));
        st.filters.insert("author".into(), FilterValue::text(""));
        assert_eq!(st.active_filter_count(), 1);
    }

    #[test]
    fn test_column_defaults() {
        let cols = vec![
            ColumnDef::text("a", "A"),
            ColumnDef::text("b", "B").pinned_left(),
            ColumnDef::text("c", "C").hidden(),
        ];
        let st = TableState::new(10).with_column_defaults(&cols);
        assert_eq!(st.pinned_left, vec!["b".to_string()]);
        assert!(st.is_hidden("c"));
        assert!(!st.is_hidden("a"));
    }
}
