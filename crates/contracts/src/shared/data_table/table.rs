//! Headless data table.
//!
//! Owns pagination, sort, filter, column layout and selection state; renders
//! nothing itself. In server mode every change that needs new data is turned
//! into a [`FetchRequest`] for the caller; in client mode the visible rows are
//! derived from the full row set on every [`DataTable::view`].
//!
//! Fetch rules:
//! - `mount` in server mode fetches exactly once (one-shot latch);
//! - with `search_on_button` further fetches happen only on `search`/`clear`;
//! - without it, each change of page, page size, sort, filter or operator
//!   fetches once with the full current query.

use std::collections::BTreeSet;
use std::rc::Rc;

use super::column::{find_column, validate_columns, ColumnDef};
use super::config::DataTableConfig;
use super::error::{DataTableError, Result};
use super::layout;
use super::operator::FilterOperator;
use super::persistence::{FilterPersistence, KeyValueStore, PersistedFilters};
use super::pipeline::{self, page_count};
use super::query;
use super::row::{RowId, TableRow};
use super::state::{SortModel, TableState};
use super::value::FilterValue;

/// Outbound fetch, tagged with a monotonically increasing sequence number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub query: String,
}

type FetchFn = Box<dyn FnMut(FetchRequest)>;
type SelectionFn = Box<dyn FnMut(&BTreeSet<RowId>)>;
type RowFn<R> = Box<dyn FnMut(&R)>;

/// What the presentation layer renders
#[derive(Debug)]
pub struct TableView<'a, R> {
    pub rows: Vec<&'a R>,
    pub total: usize,
    pub page: usize,
    pub page_count: usize,
    pub loading: bool,
}

impl<R> TableView<'_, R> {
    /// "No rows" placeholder is shown
    pub fn is_empty(&self) -> bool {
        !self.loading && self.rows.is_empty()
    }
}

pub struct DataTable<R> {
    config: DataTableConfig,
    columns: Vec<ColumnDef>,
    rows: Vec<R>,
    total_count: usize,
    loading: bool,
    state: TableState,
    persistence: FilterPersistence,
    on_fetch: Option<FetchFn>,
    on_selection_change: Option<SelectionFn>,
    on_row_double_click: Option<RowFn<R>>,
    initial_load_done: bool,
    last_dispatched: u64,
}

impl<R: TableRow> DataTable<R> {
    /// Creates the table and restores persisted filters for `config.table_key`.
    ///
    /// A persisted value that is not valid JSON is reported as
    /// [`DataTableError::CorruptPersistedState`].
    pub fn new(
        config: DataTableConfig,
        columns: Vec<ColumnDef>,
        store: Rc<dyn KeyValueStore>,
    ) -> Result<Self> {
        config.validate()?;
        validate_columns(&columns)?;

        let persistence = FilterPersistence::new(store, &config.namespace, &config.table_key);
        let mut state = TableState::new(config.rows_per_page).with_column_defaults(&columns);
        if let Some(persisted) = persistence.restore()? {
            state.filters = persisted.filters;
            state.operators = persisted.operators;
        }

        Ok(Self {
            config,
            columns,
            rows: Vec::new(),
            total_count: 0,
            loading: false,
            state,
            persistence,
            on_fetch: None,
            on_selection_change: None,
            on_row_double_click: None,
            initial_load_done: false,
            last_dispatched: 0,
        })
    }

    pub fn on_fetch_data(mut self, f: impl FnMut(FetchRequest) + 'static) -> Self {
        self.on_fetch = Some(Box::new(f));
        self
    }

    pub fn on_selection_change(mut self, f: impl FnMut(&BTreeSet<RowId>) + 'static) -> Self {
        self.on_selection_change = Some(Box::new(f));
        self
    }

    pub fn on_row_double_click(mut self, f: impl FnMut(&R) + 'static) -> Self {
        self.on_row_double_click = Some(Box::new(f));
        self
    }

    // ---- inputs -------------------------------------------------------

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
    }

    /// Total across all pages; server mode only
    pub fn set_total_count(&mut self, total: usize) {
        self.total_count = total;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Applies a server response unless a newer fetch has been dispatched since.
    /// Returns `false` for a stale response.
    pub fn receive_page(&mut self, seq: u64, rows: Vec<R>, total: usize) -> bool {
        if seq < self.last_dispatched {
            log::warn!(
                "[{}] dropping stale response #{} (latest #{})",
                self.config.table_key,
                seq,
                self.last_dispatched
            );
            return false;
        }
        self.rows = rows;
        self.total_count = total;
        self.loading = false;
        true
    }

    // ---- fetching -----------------------------------------------------

    /// Initial load in server mode; fires at most once per instance
    pub fn mount(&mut self) {
        if !self.config.server_side || self.initial_load_done {
            return;
        }
        self.initial_load_done = true;
        self.dispatch_fetch();
    }

    pub fn query_string(&self) -> String {
        query::compose_query(&self.columns, &self.state)
    }

    pub fn last_dispatched(&self) -> u64 {
        self.last_dispatched
    }

    fn dispatch_fetch(&mut self) {
        self.last_dispatched += 1;
        let request = FetchRequest {
            seq: self.last_dispatched,
            query: self.query_string(),
        };
        log::debug!(
            "[{}] fetch #{}: {}",
            self.config.table_key,
            request.seq,
            request.query
        );
        if let Some(fetch) = self.on_fetch.as_mut() {
            fetch(request);
        }
    }

    fn is_immediate(&self) -> bool {
        self.config.server_side && !self.config.search_on_button
    }

    /// Page, page size or sort changed
    fn after_view_change(&mut self) {
        if self.is_immediate() {
            self.dispatch_fetch();
        }
    }

    /// Filter or operator changed: persist, then reset the page where the
    /// change takes effect right away
    fn after_filter_change(&mut self) {
        self.persist();
        if !self.config.server_side {
            self.state.page = 0;
        } else if !self.config.search_on_button {
            self.state.page = 0;
            self.dispatch_fetch();
        }
    }

    fn persist(&self) {
        let persisted = PersistedFilters {
            filters: self.state.filters.clone(),
            operators: self.state.operators.clone(),
        };
        if let Err(e) = self.persistence.save(&persisted) {
            log::warn!("failed to persist filters to '{}': {}", self.persistence.key(), e);
        }
    }

    fn column(&self, field: &str) -> Result<&ColumnDef> {
        find_column(&self.columns, field).ok_or_else(|| DataTableError::UnknownColumn(field.to_string()))
    }

    // ---- filters ------------------------------------------------------

    pub fn set_filter(&mut self, field: &str, value: impl Into<FilterValue>) -> Result<()> {
        self.column(field)?;
        self.state.filters.insert(field.to_string(), value.into());
        self.after_filter_change();
        Ok(())
    }

    pub fn clear_filter(&mut self, field: &str) {
        let removed = self.state.filters.remove(field).is_some();
        let removed_op = self.state.operators.remove(field).is_some();
        if removed || removed_op {
            self.after_filter_change();
        }
    }

    pub fn set_operator(&mut self, field: &str, op: FilterOperator) -> Result<()> {
        self.column(field)?;
        self.state.operators.insert(field.to_string(), op);
        self.after_filter_change();
        Ok(())
    }

    /// Operator in effect for a column
    pub fn resolved_operator(&self, field: &str) -> Option<FilterOperator> {
        let col = find_column(&self.columns, field)?;
        Some(FilterOperator::resolve(
            self.state.operators.get(field).copied(),
            col,
        ))
    }

    pub fn active_filter_count(&self) -> usize {
        self.state.active_filter_count()
    }

    /// Explicit Search: back to the first page and fetch once
    pub fn search(&mut self) {
        self.state.page = 0;
        if self.config.server_side {
            self.dispatch_fetch();
        }
    }

    /// Clear: empty filters and operators, first page, fetch once
    pub fn clear(&mut self) {
        self.state.filters.clear();
        self.state.operators.clear();
        self.persist();
        self.state.page = 0;
        if self.config.server_side {
            self.dispatch_fetch();
        }
    }

    // ---- pagination and sort -----------------------------------------

    pub fn set_page(&mut self, page: usize) {
        if self.state.page == page {
            return;
        }
        self.state.page = page;
        self.after_view_change();
    }

    /// Changing the page size returns to the first page
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> Result<()> {
        self.config.check_page_size(rows_per_page)?;
        if self.state.rows_per_page == rows_per_page {
            return Ok(());
        }
        self.state.rows_per_page = rows_per_page;
        self.state.page = 0;
        self.after_view_change();
        Ok(())
    }

    pub fn set_sort(&mut self, model: SortModel) -> Result<()> {
        if let Some(field) = model.field.as_deref() {
            let col = self.column(field)?;
            if !col.sortable {
                return Err(DataTableError::NotSortable(field.to_string()));
            }
        }
        if self.state.sort_model == model {
            return Ok(());
        }
        self.state.sort_model = model;
        self.after_view_change();
        Ok(())
    }

    /// Header click
    pub fn toggle_sort(&mut self, field: &str) -> Result<()> {
        if !self.column(field)?.sortable {
            return Err(DataTableError::NotSortable(field.to_string()));
        }
        self.state.sort_model.cycle(field);
        self.after_view_change();
        Ok(())
    }

    // ---- column layout -----------------------------------------------

    pub fn visible_columns(&self) -> Vec<&ColumnDef> {
        layout::visible_columns(&self.columns, &self.state)
    }

    pub fn filter_bar_columns(&self) -> Vec<&ColumnDef> {
        layout::filter_bar_columns(&self.columns, &self.state)
    }

    pub fn set_column_hidden(&mut self, field: &str, hidden: bool) -> Result<()> {
        self.column(field)?;
        layout::set_hidden(&mut self.state, field, hidden);
        Ok(())
    }

    pub fn toggle_column_visibility(&mut self, field: &str) -> Result<()> {
        let hidden = self.state.is_hidden(field);
        self.set_column_hidden(field, !hidden)
    }

    pub fn show_all_columns(&mut self) {
        self.state.hidden_cols.clear();
    }

    pub fn pin_left(&mut self, field: &str) -> Result<()> {
        self.column(field)?;
        layout::pin_left(&mut self.state, field);
        Ok(())
    }

    pub fn unpin(&mut self, field: &str) {
        layout::unpin(&mut self.state, field);
    }

    // ---- selection and row events ------------------------------------

    pub fn is_selected(&self, id: &str) -> bool {
        self.state.selected_ids.contains(id)
    }

    /// Adds or removes a row id; the callback gets the full set on every toggle
    pub fn toggle_selection(&mut self, id: &str) {
        if !self.config.checkbox_selection {
            return;
        }
        if !self.state.selected_ids.remove(id) {
            self.state.selected_ids.insert(id.to_string());
        }
        self.notify_selection();
    }

    /// Header checkbox: selects every row on the current page
    pub fn select_page(&mut self) {
        if !self.config.checkbox_selection {
            return;
        }
        let ids: Vec<RowId> = self.view().rows.iter().map(|r| r.row_id()).collect();
        self.state.selected_ids.extend(ids);
        self.notify_selection();
    }

    /// Header checkbox off: deselects only the rows on the current page
    pub fn deselect_page(&mut self) {
        if !self.config.checkbox_selection {
            return;
        }
        let ids: Vec<RowId> = self.view().rows.iter().map(|r| r.row_id()).collect();
        let before = self.state.selected_ids.len();
        for id in &ids {
            self.state.selected_ids.remove(id);
        }
        if self.state.selected_ids.len() != before {
            self.notify_selection();
        }
    }

    pub fn clear_selection(&mut self) {
        if !self.config.checkbox_selection || self.state.selected_ids.is_empty() {
            return;
        }
        self.state.selected_ids.clear();
        self.notify_selection();
    }

    fn notify_selection(&mut self) {
        if let Some(cb) = self.on_selection_change.as_mut() {
            cb(&self.state.selected_ids);
        }
    }

    /// Returns `false` when no row has this id
    pub fn double_click(&mut self, id: &str) -> bool {
        let Some(row) = self.rows.iter().find(|r| r.row_id() == id) else {
            return false;
        };
        if let Some(cb) = self.on_row_double_click.as_mut() {
            cb(row);
        }
        true
    }

    // ---- derived view ------------------------------------------------

    /// Rows to render. In client mode a page past the end is clamped to the
    /// last page; in server mode rows are shown as received.
    pub fn view(&self) -> TableView<'_, R> {
        let rows_per_page = self.state.rows_per_page;

        if self.config.server_side {
            return TableView {
                rows: self.rows.iter().collect(),
                total: self.total_count,
                page: self.state.page,
                page_count: page_count(self.total_count, rows_per_page),
                loading: self.loading,
            };
        }

        let client = pipeline::apply(&self.rows, &self.columns, &self.state);
        TableView {
            page_count: page_count(client.total, rows_per_page),
            rows: client.rows,
            total: client.total,
            page: client.page,
            loading: self.loading,
        }
    }
}
