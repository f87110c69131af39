//! Client mode: filter, then sort, then paginate.

use std::cmp::Ordering;

use super::column::{find_column, ColumnDef, ColumnType};
use super::operator::FilterOperator;
use super::row::TableRow;
use super::state::{SortDirection, TableState};
use super::value::{CellValue, FilterValue};

/// Page of rows produced in client mode
#[derive(Debug)]
pub struct ClientPage<'a, R> {
    pub rows: Vec<&'a R>,
    /// Number of rows that passed the filters
    pub total: usize,
    /// Requested page, clamped to the last one
    pub page: usize,
}

/// Checks a single cell against a filter value
pub fn matches(cell: &CellValue, op: FilterOperator, filter: &FilterValue) -> bool {
    match op {
        FilterOperator::In => {
            let set = filter.items();
            match cell {
                CellValue::List(items) => items.iter().any(|item| set.contains(&item.to_text())),
                single => set.contains(&single.to_text()),
            }
        }
        FilterOperator::Eq => cell.to_text() == filter.to_query_value(),
        FilterOperator::Gt | FilterOperator::Lt | FilterOperator::Gte | FilterOperator::Lte => {
            let (Some(a), Some(b)) = (cell.as_number(), filter.as_number()) else {
                return false;
            };
            match op {
                FilterOperator::Gt => a > b,
                FilterOperator::Lt => a < b,
                FilterOperator::Gte => a >= b,
                _ => a <= b,
            }
        }
        FilterOperator::Contains => cell
            .to_text()
            .to_lowercase()
            .contains(&filter.to_query_value().to_lowercase()),
    }
}

/// Rows passing all active filters; filters on unknown or non-filterable columns are ignored
pub fn filter_rows<'a, R: TableRow>(
    rows: &'a [R],
    columns: &[ColumnDef],
    state: &TableState,
) -> Vec<&'a R> {
    let active: Vec<(&str, FilterOperator, &FilterValue)> = state
        .active_filters()
        .filter_map(|(field, value)| {
            let col = find_column(columns, field).filter(|c| c.filterable)?;
            let op = FilterOperator::resolve(state.operators.get(field).copied(), col);
            Some((field, op, value))
        })
        .collect();

    rows.iter()
        .filter(|row| {
            active
                .iter()
                .all(|(field, op, value)| matches(&row.cell(field), *op, value))
        })
        .collect()
}

/// Case-insensitive first, exact comparison as tie-break
fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Null sorts first regardless of direction. With `numeric` set, numeric
/// strings compare as numbers too.
pub fn compare_cells(
    a: &CellValue,
    b: &CellValue,
    direction: SortDirection,
    numeric: bool,
) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }
    let as_numbers = match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => Some((*x, *y)),
        _ if numeric => a.as_number().zip(b.as_number()),
        _ => None,
    };
    let ord = match as_numbers {
        Some((x, y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        None => locale_cmp(&a.to_text(), &b.to_text()),
    };
    match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

/// Stable sort by the active sort model; no active sort keeps the order
pub fn sort_rows<R: TableRow>(rows: &mut [&R], columns: &[ColumnDef], state: &TableState) {
    let Some((field, direction)) = state.sort_model.active() else {
        return;
    };
    let numeric = find_column(columns, field)
        .map(|c| c.column_type == ColumnType::Number)
        .unwrap_or(false);
    rows.sort_by(|a, b| compare_cells(&a.cell(field), &b.cell(field), direction, numeric));
}

pub fn paginate<T: Copy>(rows: &[T], page: usize, rows_per_page: usize) -> Vec<T> {
    let start = page.saturating_mul(rows_per_page).min(rows.len());
    let end = start.saturating_add(rows_per_page).min(rows.len());
    rows[start..end].to_vec()
}

/// Filter, sort, then cut the page `state.page` (clamped to the last page)
pub fn apply<'a, R: TableRow>(
    rows: &'a [R],
    columns: &[ColumnDef],
    state: &TableState,
) -> ClientPage<'a, R> {
    let mut filtered = filter_rows(rows, columns, state);
    sort_rows(&mut filtered, columns, state);
    let total = filtered.len();
    let pages = page_count(total, state.rows_per_page);
    let page = state.page.min(pages.saturating_sub(1));
    ClientPage {
        rows: paginate(&filtered, page, state.rows_per_page),
        total,
        page,
    }
}

pub fn page_count(total: usize, rows_per_page: usize) -> usize {
    if rows_per_page == 0 {
        return 0;
    }
    total.div_ceil(rows_per_page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data_table::state::SortModel;
    use serde_json::{json, Value};

    fn ids(rows: &[&Value]) -> Vec<i64> {
        rows.iter().map(|r| r["id"].as_i64().unwrap()).collect()
    }

    #[test]
    fn test_filter_precedes_sort_precedes_paginate() {
        let rows = vec![
            json!({"id": 1, "n": 3}),
            json!({"id": 2, "n": 1}),
            json!({"id": 3, "n": 2}),
        ];
        let cols = vec![ColumnDef::number("n", "N")];
        let mut st = TableState::new(1);
        st.filters.insert("n".into(), FilterValue::text("2"));
        st.operators.insert("n".into(), FilterOperator::Gte);
        st.sort_model = SortModel::new("n", SortDirection::Asc);

        let page = apply(&rows, &cols, &st);
        assert_eq!(ids(&page.rows), vec![3]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_number_column_sorts_numeric_strings_as_numbers() {
        let rows = vec![
            json!({"id": 1, "n": "9"}),
            json!({"id": 2, "n": "10"}),
            json!({"id": 3, "n": 100}),
        ];
        let mut st = TableState::new(10);
        st.sort_model = SortModel::new("n", SortDirection::Asc);
        let numbers = vec![ColumnDef::number("n", "N")];
        assert_eq!(ids(&apply(&rows, &numbers, &st).rows), vec![1, 2, 3]);
        // text columns keep string order
        let text = vec![ColumnDef::text("n", "N")];
        assert_eq!(ids(&apply(&rows, &text, &st).rows), vec![2, 3, 1]);
    }

    #[test]
    fn test_apply_clamps_page_past_the_end() {
        let rows = vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})];
        let mut st = TableState::new(2);
        st.page = 7;
        let page = apply(&rows, &[], &st);
        assert_eq!(page.page, 1);
        assert_eq!(ids(&page.rows), vec![3]);
        st.page = 0;
        let empty: Vec<Value> = vec![];
        assert_eq!(apply(&empty, &[], &st).page, 0);
    }

    #[test]
    fn test_in_operator_with_list_cells() {
        let tags = CellValue::from(&json!(["rust", "async"]));
        assert!(matches(&tags, FilterOperator::In, &FilterValue::many(["go", "async"])));
        assert!(!matches(&tags, FilterOperator::In, &FilterValue::many(["go"])));
        let status = CellValue::from(&json!(2));
        assert!(matches(&status, FilterOperator::In, &FilterValue::many([1i64, 2])));
        assert!(matches(&status, FilterOperator::In, &FilterValue::many(["2"])));
    }

    #[test]
    fn test_eq_and_contains() {
        let cell = CellValue::from(&json!("Intro to Rust"));
        assert!(matches(&cell, FilterOperator::Contains, &"RUST".into()));
        assert!(!matches(&cell, FilterOperator::Eq, &"intro to rust".into()));
        assert!(matches(&CellValue::from(&json!(10)), FilterOperator::Eq, &"10".into()));
    }

    #[test]
    fn test_numeric_operator_rejects_non_numbers() {
        let n = CellValue::from(&json!(5));
        assert!(matches(&n, FilterOperator::Gt, &"4".into()));
        assert!(!matches(&n, FilterOperator::Gt, &"abc".into()));
        assert!(!matches(&CellValue::Null, FilterOperator::Lt, &"4".into()));
        assert!(!matches(&CellValue::from("n/a"), FilterOperator::Lte, &"4".into()));
    }

    #[test]
    fn test_all_filters_must_pass() {
        let rows = vec![
            json!({"id": 1, "title": "Rust", "lessons": 10}),
            json!({"id": 2, "title": "Rust advanced", "lessons": 3}),
            json!({"id": 3, "title": "Go", "lessons": 12}),
        ];
        let cols = vec![
            ColumnDef::text("title", "Title"),
            ColumnDef::number("lessons", "Lessons"),
        ];
        let mut st = TableState::new(10);
        st.filters.insert("title".into(), FilterValue::text("rust"));
        st.filters.insert("lessons".into(), FilterValue::text("5"));
        st.operators.insert("lessons".into(), FilterOperator::Gt);
        assert_eq!(ids(&filter_rows(&rows, &cols, &st)), vec![1]);
    }

    #[test]
    fn test_nulls_first_in_both_directions() {
        let rows = vec![
            json!({"id": 1, "n": 2}),
            json!({"id": 2, "n": null}),
            json!({"id": 3, "n": 10}),
        ];
        let cols = vec![ColumnDef::number("n", "N")];
        let mut st = TableState::new(10);
        st.sort_model = SortModel::new("n", SortDirection::Asc);
        assert_eq!(ids(&apply(&rows, &cols, &st).rows), vec![2, 1, 3]);
        st.sort_model = SortModel::new("n", SortDirection::Desc);
        assert_eq!(ids(&apply(&rows, &cols, &st).rows), vec![2, 3, 1]);
    }

    #[test]
    fn test_text_sort_is_case_insensitive_and_stable() {
        let rows = vec![
            json!({"id": 1, "t": "beta"}),
            json!({"id": 2, "t": "Alpha"}),
            json!({"id": 3, "t": "alpha"}),
            json!({"id": 4, "t": "Alpha"}),
        ];
        let cols = vec![ColumnDef::text("t", "T")];
        let mut st = TableState::new(10);
        st.sort_model = SortModel::new("t", SortDirection::Asc);
        assert_eq!(ids(&apply(&rows, &cols, &st).rows), vec![2, 4, 3, 1]);
        st.sort_model = SortModel::default();
        assert_eq!(ids(&apply(&rows, &cols, &st).rows), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_paginate_bounds() {
        let data = [1, 2, 3, 4, 5];
        assert_eq!(paginate(&data, 0, 2), vec![1, 2]);
        assert_eq!(paginate(&data, 2, 2), vec![5]);
        assert!(paginate(&data, 3, 2).is_empty());
    }
}
