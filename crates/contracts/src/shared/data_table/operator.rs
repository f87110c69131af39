use serde::{Deserialize, Serialize};

use super::column::{ColumnDef, ColumnType};

/// Comparison rule applied between a column filter value and a cell value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOperator {
    /// Case-insensitive substring match
    #[serde(rename = "contains")]
    Contains,
    /// String equality after coercion
    #[serde(rename = "=")]
    Eq,
    /// Numeric greater than
    #[serde(rename = ">")]
    Gt,
    /// Numeric less than
    #[serde(rename = "<")]
    Lt,
    /// Numeric greater than or equal
    #[serde(rename = ">=")]
    Gte,
    /// Numeric less than or equal
    #[serde(rename = "<=")]
    Lte,
    /// Membership in the filter set
    #[serde(rename = "in")]
    In,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 7] = [
        FilterOperator::Contains,
        FilterOperator::Eq,
        FilterOperator::Gt,
        FilterOperator::Lt,
        FilterOperator::Gte,
        FilterOperator::Lte,
        FilterOperator::In,
    ];

    /// Wire representation used in query strings and persisted state
    pub fn symbol(&self) -> &'static str {
        match self {
            FilterOperator::Contains => "contains",
            FilterOperator::Eq => "=",
            FilterOperator::Gt => ">",
            FilterOperator::Lt => "<",
            FilterOperator::Gte => ">=",
            FilterOperator::Lte => "<=",
            FilterOperator::In => "in",
        }
    }

    /// Get display label for UI
    pub fn label(&self) -> &'static str {
        match self {
            FilterOperator::Contains => "содержит",
            FilterOperator::Eq => "=",
            FilterOperator::Gt => ">",
            FilterOperator::Lt => "<",
            FilterOperator::Gte => "≥",
            FilterOperator::Lte => "≤",
            FilterOperator::In => "в списке",
        }
    }

    pub fn parse(symbol: &str) -> Option<FilterOperator> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Default operator implied by a column type
    pub fn implied_by(column_type: ColumnType) -> FilterOperator {
        match column_type {
            ColumnType::Select => FilterOperator::In,
            ColumnType::Number => FilterOperator::Eq,
            ColumnType::Text => FilterOperator::Contains,
        }
    }

    /// Operators offered in the filter bar for a column type
    pub fn for_column_type(column_type: ColumnType) -> &'static [FilterOperator] {
        match column_type {
            ColumnType::Text => &[FilterOperator::Contains, FilterOperator::Eq],
            ColumnType::Number => &[
                FilterOperator::Eq,
                FilterOperator::Gt,
                FilterOperator::Lt,
                FilterOperator::Gte,
                FilterOperator::Lte,
            ],
            ColumnType::Select => &[FilterOperator::In, FilterOperator::Eq],
        }
    }

    /// Resolution order: explicit per-field override, then the column's
    /// `default_operator`, then the type-implied default.
    pub fn resolve(explicit: Option<FilterOperator>, column: &ColumnDef) -> FilterOperator {
        explicit
            .or(column.default_operator)
            .unwrap_or_else(|| column.implied_operator())
    }
}

impl std::fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_column_defaults_to_eq() {
        let col = ColumnDef::number("score", "Score");
        assert_eq!(FilterOperator::resolve(None, &col), FilterOperator::Eq);
    }

    #[test]
    fn test_explicit_override_wins() {
        let col = ColumnDef::number("score", "Score").with_default_operator(FilterOperator::Gte);
        assert_eq!(FilterOperator::resolve(None, &col), FilterOperator::Gte);
        assert_eq!(
            FilterOperator::resolve(Some(FilterOperator::Gt), &col),
            FilterOperator::Gt
        );
        // the column descriptor itself is untouched
        assert_eq!(col.default_operator, Some(FilterOperator::Gte));
    }

    #[test]
    fn test_implied_defaults() {
        let select = ColumnDef::select("status", "Status", vec![("active", "Active").into()]);
        assert_eq!(FilterOperator::resolve(None, &select), FilterOperator::In);
        let text = ColumnDef::text("title", "Title");
        assert_eq!(FilterOperator::resolve(None, &text), FilterOperator::Contains);
    }

    #[test]
    fn test_serde_uses_symbols() {
        let json = serde_json::to_string(&FilterOperator::Gte).unwrap();
        assert_eq!(json, "\">=\"");
        let op: FilterOperator = serde_json::from_str("\"contains\"").unwrap();
        assert_eq!(op, FilterOperator::Contains);
        assert_eq!(FilterOperator::parse("<="), Some(FilterOperator::Lte));
        assert_eq!(FilterOperator::parse("like"), None);
    }
}
