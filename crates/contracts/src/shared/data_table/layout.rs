//! Column visibility and pinning.
//!
//! Pinned-left columns go first in the order they appear in the column list,
//! followed by the unpinned ones in column-list order. Unpinning therefore
//! returns a column to its place among the unpinned columns, not necessarily
//! to its original global position.

use super::column::ColumnDef;
use super::state::TableState;

/// Visible columns in render order
pub fn visible_columns<'a>(columns: &'a [ColumnDef], state: &TableState) -> Vec<&'a ColumnDef> {
    let (pinned, unpinned): (Vec<&ColumnDef>, Vec<&ColumnDef>) = columns
        .iter()
        .filter(|c| !state.is_hidden(&c.field))
        .partition(|c| state.is_pinned(&c.field));
    pinned.into_iter().chain(unpinned).collect()
}

/// Columns shown in the filter bar: visible and filterable
pub fn filter_bar_columns<'a>(columns: &'a [ColumnDef], state: &TableState) -> Vec<&'a ColumnDef> {
    visible_columns(columns, state)
        .into_iter()
        .filter(|c| c.filterable)
        .collect()
}

pub fn pin_left(state: &mut TableState, field: &str) {
    if !state.is_pinned(field) {
        state.pinned_left.push(field.to_string());
    }
}

pub fn unpin(state: &mut TableState, field: &str) {
    state.pinned_left.retain(|f| f != field);
}

pub fn set_hidden(state: &mut TableState, field: &str, hidden: bool) {
    if hidden {
        state.hidden_cols.insert(field.to_string(), true);
    } else {
        state.hidden_cols.remove(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::text("a", "A"),
            ColumnDef::text("b", "B"),
            ColumnDef::text("c", "C"),
        ]
    }

    fn fields(cols: Vec<&ColumnDef>) -> Vec<&str> {
        cols.into_iter().map(|c| c.field.as_str()).collect()
    }

    #[test]
    fn test_pin_moves_column_to_front() {
        let cols = columns();
        let mut st = TableState::new(10);
        pin_left(&mut st, "b");
        assert_eq!(fields(visible_columns(&cols, &st)), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_unpin_restores_relative_order() {
        let cols = columns();
        let mut st = TableState::new(10);
        pin_left(&mut st, "c");
        pin_left(&mut st, "a");
        // pinned group keeps column-list order
        assert_eq!(fields(visible_columns(&cols, &st)), vec!["a", "c", "b"]);
        unpin(&mut st, "c");
        assert_eq!(fields(visible_columns(&cols, &st)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_hidden_columns_excluded_from_render_and_filter_bar() {
        let cols = vec![
            ColumnDef::text("a", "A"),
            ColumnDef::text("b", "B").not_filterable(),
            ColumnDef::text("c", "C"),
        ];
        let mut st = TableState::new(10);
        set_hidden(&mut st, "c", true);
        assert_eq!(fields(visible_columns(&cols, &st)), vec!["a", "b"]);
        assert_eq!(fields(filter_bar_columns(&cols, &st)), vec!["a"]);
        set_hidden(&mut st, "c", false);
        assert_eq!(fields(filter_bar_columns(&cols, &st)), vec!["a", "c"]);
    }
}
