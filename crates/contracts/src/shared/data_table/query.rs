//! Query string for server mode.
//!
//! Pair order: `page` (1-based), `limit`, `sort_by`/`sort_order` when a sort
//! is active, then `filters[field]`/`operators[field]` for every filterable
//! column with a non-empty value, in column-list order.

use super::column::ColumnDef;
use super::operator::FilterOperator;
use super::state::TableState;

/// Ordered, not yet encoded query pairs
pub fn query_pairs(columns: &[ColumnDef], state: &TableState) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("page".to_string(), state.page.saturating_add(1).to_string()),
        ("limit".to_string(), state.rows_per_page.to_string()),
    ];

    if let Some((field, direction)) = state.sort_model.active() {
        pairs.push(("sort_by".to_string(), field.to_string()));
        pairs.push(("sort_order".to_string(), direction.as_str().to_string()));
    }

    for col in columns.iter().filter(|c| c.filterable) {
        let Some(value) = state.filters.get(&col.field) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        let op = FilterOperator::resolve(state.operators.get(&col.field).copied(), col);
        pairs.push((format!("filters[{}]", col.field), value.to_query_value()));
        pairs.push((format!("operators[{}]", col.field), op.symbol().to_string()));
    }

    pairs
}

pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// URL-encoded query string, without the leading `?`
pub fn compose_query(columns: &[ColumnDef], state: &TableState) -> String {
    encode_pairs(&query_pairs(columns, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data_table::state::{SortDirection, SortModel};
    use crate::shared::data_table::value::FilterValue;

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::text("title", "Title"),
            ColumnDef::number("lessons", "Lessons"),
            ColumnDef::select(
                "status",
                "Status",
                vec![("draft", "Draft").into(), ("published", "Published").into()],
            ),
            ColumnDef::text("notes", "Notes").not_filterable(),
        ]
    }

    #[test]
    fn test_minimal_query() {
        let st = TableState::new(25);
        assert_eq!(compose_query(&columns(), &st), "page=1&limit=25");
    }

    #[test]
    fn test_full_query() {
        let mut st = TableState::new(10);
        st.page = 2;
        st.sort_model = SortModel::new("title", SortDirection::Desc);
        st.filters.insert("title".into(), FilterValue::text("rust basics"));
        st.filters.insert("lessons".into(), FilterValue::text("5"));
        st.operators.insert("lessons".into(), FilterOperator::Gte);
        st.filters
            .insert("status".into(), FilterValue::many(["draft", "published"]));

        let pairs = query_pairs(&columns(), &st);
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "3".to_string()),
                ("limit".to_string(), "10".to_string()),
                ("sort_by".to_string(), "title".to_string()),
                ("sort_order".to_string(), "desc".to_string()),
                ("filters[title]".to_string(), "rust basics".to_string()),
                ("operators[title]".to_string(), "contains".to_string()),
                ("filters[lessons]".to_string(), "5".to_string()),
                ("operators[lessons]".to_string(), ">=".to_string()),
                ("filters[status]".to_string(), "draft,published".to_string()),
                ("operators[status]".to_string(), "in".to_string()),
            ]
        );

        let qs = compose_query(&columns(), &st);
        assert!(qs.starts_with("page=3&limit=10&sort_by=title&sort_order=desc&"));
        assert!(qs.contains("filters%5Btitle%5D=rust%20basics"));
        assert!(qs.contains("operators%5Blessons%5D=%3E%3D"));
        assert!(qs.contains("filters%5Bstatus%5D=draft%2Cpublished"));
    }

    #[test]
    fn test_empty_and_non_filterable_values_skipped() {
        let mut st = TableState::new(10);
        st.filters.insert("title".into(), FilterValue::text(""));
        st.operators.insert("title".into(), FilterOperator::Eq);
        st.filters.insert("notes".into(), FilterValue::text("x"));
        st.filters.insert("unknown".into(), FilterValue::text("y"));
        assert_eq!(compose_query(&columns(), &st), "page=1&limit=10");
    }

    #[test]
    fn test_query_is_deterministic() {
        let mut st = TableState::new(50);
        st.filters.insert("lessons".into(), FilterValue::text("3"));
        st.filters.insert("title".into(), FilterValue::text("a&b"));
        let cols = columns();
        let first = compose_query(&cols, &st);
        for _ in 0..5 {
            assert_eq!(compose_query(&cols, &st), first);
        }
        assert!(first.contains("filters%5Btitle%5D=a%26b"));
    }

    #[test]
    fn test_sort_without_direction_is_omitted() {
        let mut st = TableState::new(10);
        st.sort_model.field = Some("title".into());
        assert!(!compose_query(&columns(), &st).contains("sort_by"));
    }
}
