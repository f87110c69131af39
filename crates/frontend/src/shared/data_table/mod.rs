//! Компонент `<DataTable>`: Leptos-обвязка над headless-таблицей из `contracts`.
//!
//! # Пример (серверный режим)
//!
//! ```ignore
//! let response = RwSignal::new(None::<FetchedPage>);
//! view! {
//!     <DataTable
//!         table_key="courses"
//!         columns=course_columns()
//!         server_side=true
//!         response=response
//!         on_fetch_data=Callback::new(move |req: FetchRequest| load_page(req, response))
//!     />
//! }
//! ```
//!
//! Движок живёт в `StoredValue::new_local`, после каждой операции
//! пересчитывается снимок `TableSnapshot`, из которого рендерится разметка.

use std::collections::BTreeSet;
use std::rc::Rc;

use crate::shared::components::{
    ColumnMenu, FilterBar, PaginationControls, SortableHeaderCell, TableCheckbox,
    TableHeaderCheckbox,
};
use crate::shared::local_storage::LocalStorageStore;
use contracts::shared::data_table::{
    ColumnDef, ColumnType, DataTable as TableEngine, DataTableConfig, DataTableError, FetchRequest,
    FilterOperator, FilterValue, KeyValueStore, PersistedFilters, RowId, SortModel, TableRow,
};
use leptos::prelude::*;
use serde_json::Value;
use thaw::*;

/// Ответ сервера на запрос с номером `seq`
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub seq: u64,
    pub rows: Vec<Value>,
    pub total: usize,
}

/// Строка, готовая к отрисовке
#[derive(Debug, Clone, PartialEq)]
struct RenderedRow {
    id: RowId,
    cells: Vec<String>,
}

/// Всё, что нужно разметке, снятое с движка после очередной операции
#[derive(Debug, Clone, PartialEq, Default)]
struct TableSnapshot {
    all_columns: Vec<ColumnDef>,
    visible_columns: Vec<ColumnDef>,
    filter_columns: Vec<ColumnDef>,
    filters: PersistedFilters,
    active_filters: usize,
    sort_model: SortModel,
    hidden: Vec<String>,
    pinned: Vec<String>,
    selected: BTreeSet<RowId>,
    rows: Vec<RenderedRow>,
    page: usize,
    page_count: usize,
    total: usize,
    rows_per_page: usize,
    loading: bool,
    empty: bool,
}

/// Текст ячейки по умолчанию: для select-колонок подпись варианта
fn default_cell_text(column: &ColumnDef, row: &Value) -> String {
    let text = row.cell(&column.field).to_text();
    match column.column_type {
        ColumnType::Select => column.option_label(&text).to_string(),
        _ => text,
    }
}

fn snapshot(
    engine: &TableEngine<Value>,
    format_cell: Option<Callback<(String, Value), String>>,
) -> TableSnapshot {
    let state = engine.state();
    let view = engine.view();
    let visible: Vec<ColumnDef> = engine.visible_columns().into_iter().cloned().collect();

    let rows = view
        .rows
        .iter()
        .map(|row| RenderedRow {
            id: row.row_id(),
            cells: visible
                .iter()
                .map(|col| match format_cell {
                    Some(cb) => cb.run((col.field.clone(), (*row).clone())),
                    None => default_cell_text(col, row),
                })
                .collect(),
        })
        .collect();

    TableSnapshot {
        all_columns: engine.columns().to_vec(),
        filter_columns: engine.filter_bar_columns().into_iter().cloned().collect(),
        visible_columns: visible,
        filters: PersistedFilters {
            filters: state.filters.clone(),
            operators: state.operators.clone(),
        },
        active_filters: engine.active_filter_count(),
        sort_model: state.sort_model.clone(),
        hidden: state
            .hidden_cols
            .iter()
            .filter(|(_, hidden)| **hidden)
            .map(|(field, _)| field.clone())
            .collect(),
        pinned: state.pinned_left.clone(),
        selected: state.selected_ids.clone(),
        rows,
        page: view.page,
        page_count: view.page_count,
        total: view.total,
        rows_per_page: state.rows_per_page,
        loading: view.loading,
        empty: view.is_empty(),
    }
}

/// Создаёт движок; повреждённые сохранённые фильтры удаляются, таблица стартует пустой
fn build_engine(
    config: DataTableConfig,
    columns: Vec<ColumnDef>,
    store: Rc<dyn KeyValueStore>,
) -> Result<TableEngine<Value>, DataTableError> {
    match TableEngine::new(config.clone(), columns.clone(), store.clone()) {
        Err(DataTableError::CorruptPersistedState { key, source }) => {
            log::warn!("Сброс повреждённых фильтров '{}': {}", key, source);
            store.remove(&key)?;
            TableEngine::new(config, columns, store)
        }
        other => other,
    }
}

#[derive(Clone, Copy)]
struct TableHandle {
    engine: StoredValue<TableEngine<Value>, LocalStorage>,
    snapshot: RwSignal<TableSnapshot>,
    format_cell: Option<Callback<(String, Value), String>>,
}

impl TableHandle {
    fn update(&self, f: impl FnOnce(&mut TableEngine<Value>)) {
        let format_cell = self.format_cell;
        self.engine.update_value(|t| f(t));
        let snap = self.engine.with_value(|t| snapshot(t, format_cell));
        if self.snapshot.with_untracked(|s| *s != snap) {
            self.snapshot.set(snap);
        }
    }

    /// То же, что `update`, но ошибку движка только логируем
    fn try_update(&self, f: impl FnOnce(&mut TableEngine<Value>) -> Result<(), DataTableError>) {
        self.update(|t| {
            if let Err(e) = f(t) {
                log::warn!("DataTable: {}", e);
            }
        });
    }
}

#[component]
pub fn DataTable(
    /// Ключ для сохранения фильтров; таблицы с одним ключом делят фильтры
    #[prop(into)]
    table_key: String,

    columns: Vec<ColumnDef>,

    /// Строки: текущая страница (серверный режим) или весь набор (клиентский)
    #[prop(optional, into)]
    rows: MaybeProp<Vec<Value>>,

    /// Всего строк на сервере
    #[prop(optional, into)]
    total_count: MaybeProp<usize>,

    #[prop(optional, into)]
    loading: MaybeProp<bool>,

    /// Ответ на `FetchRequest`; устаревшие ответы отбрасываются
    #[prop(optional, into)]
    response: MaybeProp<FetchedPage>,

    #[prop(optional)]
    server_side: bool,

    #[prop(optional)]
    search_on_button: bool,

    #[prop(optional)]
    checkbox_selection: bool,

    #[prop(optional)]
    page_size_options: Option<Vec<usize>>,

    #[prop(optional)]
    rows_per_page: Option<usize>,

    #[prop(optional)]
    on_fetch_data: Option<Callback<FetchRequest>>,

    #[prop(optional)]
    on_selection_change: Option<Callback<Vec<RowId>>>,

    #[prop(optional)]
    on_row_double_click: Option<Callback<Value>>,

    /// Свой рендер ячейки: (поле, строка) -> текст
    #[prop(optional)]
    format_cell: Option<Callback<(String, Value), String>>,
) -> impl IntoView {
    let mut config = DataTableConfig::new(&table_key);
    config.server_side = server_side;
    config.search_on_button = search_on_button;
    config.checkbox_selection = checkbox_selection;
    if let Some(options) = page_size_options {
        let size = rows_per_page
            .or_else(|| options.first().copied())
            .unwrap_or(config.rows_per_page);
        config = config.with_page_sizes(options, size);
    } else if let Some(size) = rows_per_page {
        config.rows_per_page = size;
    }
    let size_options = config.page_size_options.clone();

    let store: Rc<dyn KeyValueStore> = Rc::new(LocalStorageStore);
    let engine = match build_engine(config, columns, store) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("DataTable '{}' not created: {}", table_key, e);
            return view! {
                <div class="table__error">{format!("Ошибка таблицы: {}", e)}</div>
            }
            .into_any();
        }
    };

    let engine = engine
        .on_fetch_data(move |req| {
            if let Some(cb) = on_fetch_data {
                cb.run(req);
            }
        })
        .on_selection_change(move |ids| {
            if let Some(cb) = on_selection_change {
                cb.run(ids.iter().cloned().collect());
            }
        })
        .on_row_double_click(move |row: &Value| {
            if let Some(cb) = on_row_double_click {
                cb.run(row.clone());
            }
        });

    let initial = snapshot(&engine, format_cell);
    let table = TableHandle {
        engine: StoredValue::new_local(engine),
        snapshot: RwSignal::new(initial),
        format_cell,
    };
    let snap = table.snapshot;

    // Первая загрузка (в серверном режиме ровно один запрос)
    Effect::new(move |_| table.update(|t| t.mount()));

    Effect::new(move |_| {
        if let Some(rows) = rows.get() {
            table.update(|t| t.set_rows(rows));
        }
    });
    Effect::new(move |_| {
        if let Some(total) = total_count.get() {
            table.update(|t| t.set_total_count(total));
        }
    });
    Effect::new(move |_| {
        if let Some(loading) = loading.get() {
            table.update(|t| t.set_loading(loading));
        }
    });
    Effect::new(move |_| {
        if let Some(page) = response.get() {
            table.update(|t| {
                t.receive_page(page.seq, page.rows, page.total);
            });
        }
    });

    let filter_columns = Memo::new(move |_| snap.with(|s| s.filter_columns.clone()));
    let filters = Memo::new(move |_| snap.with(|s| s.filters.clone()));
    let all_columns = Memo::new(move |_| snap.with(|s| s.all_columns.clone()));
    let visible_columns = Memo::new(move |_| snap.with(|s| s.visible_columns.clone()));
    let sort_model = Memo::new(move |_| snap.with(|s| s.sort_model.clone()));
    let hidden = Memo::new(move |_| snap.with(|s| s.hidden.clone()));
    let pinned = Memo::new(move |_| snap.with(|s| s.pinned.clone()));
    let is_expanded = RwSignal::new(true);

    let on_value = Callback::new(move |(field, value): (String, FilterValue)| {
        table.try_update(|t| t.set_filter(&field, value));
    });
    let on_operator = Callback::new(move |(field, op): (String, FilterOperator)| {
        table.try_update(|t| t.set_operator(&field, op));
    });
    let on_search = Callback::new(move |_: ()| table.update(|t| t.search()));
    let on_clear = Callback::new(move |_: ()| table.update(|t| t.clear()));
    let on_page_change = Callback::new(move |page: usize| table.update(|t| t.set_page(page)));
    let on_page_size_change =
        Callback::new(move |size: usize| table.try_update(|t| t.set_rows_per_page(size)));
    let on_sort = Callback::new(move |field: String| table.try_update(|t| t.toggle_sort(&field)));
    let on_toggle_pin = Callback::new(move |field: String| {
        table.try_update(|t| {
            if t.state().is_pinned(&field) {
                t.unpin(&field);
                Ok(())
            } else {
                t.pin_left(&field)
            }
        })
    });
    let on_toggle_visibility = Callback::new(move |field: String| {
        table.try_update(|t| t.toggle_column_visibility(&field))
    });
    let on_show_all = Callback::new(move |_: ()| table.update(|t| t.show_all_columns()));
    let on_toggle_row = Callback::new(move |id: String| table.update(|t| t.toggle_selection(&id)));
    let on_toggle_page = Callback::new(move |check_all: bool| {
        table.update(|t| {
            if check_all {
                t.select_page()
            } else {
                t.deselect_page()
            }
        })
    });

    let column_count = move || {
        let extra = if checkbox_selection { 1 } else { 0 };
        (snap.with(|s| s.visible_columns.len()) + extra).to_string()
    };
    let all_selected = Signal::derive(move || {
        snap.with(|s| !s.rows.is_empty() && s.rows.iter().all(|r| s.selected.contains(&r.id)))
    });

    view! {
        <div class="data-table">
            <FilterBar
                is_expanded=is_expanded
                columns=filter_columns
                filters=filters
                active_filters_count=Signal::derive(move || snap.with(|s| s.active_filters))
                search_on_button=search_on_button
                on_value=on_value
                on_operator=on_operator
                on_search=on_search
                on_clear=on_clear
                toolbar=move || view! {
                    <PaginationControls
                        current_page=Signal::derive(move || snap.with(|s| s.page))
                        total_pages=Signal::derive(move || snap.with(|s| s.page_count))
                        total_count=Signal::derive(move || snap.with(|s| s.total))
                        page_size=Signal::derive(move || snap.with(|s| s.rows_per_page))
                        on_page_change=on_page_change
                        on_page_size_change=on_page_size_change
                        page_size_options=size_options.clone()
                    />
                    <ColumnMenu
                        columns=all_columns
                        hidden=hidden
                        pinned=pinned
                        on_toggle_visibility=on_toggle_visibility
                        on_toggle_pin=on_toggle_pin
                        on_show_all=on_show_all
                    />
                }
            />

            <Table>
                <TableHeader>
                    <TableRow>
                        {checkbox_selection.then(|| view! {
                            <TableHeaderCheckbox all_selected=all_selected on_change=on_toggle_page />
                        })}
                        {move || visible_columns.get().into_iter().map(|col| {
                            let field = col.field.clone();
                            view! {
                                <SortableHeaderCell
                                    label=col.header_name.clone()
                                    field=col.field.clone()
                                    sort_model=sort_model
                                    pinned=Signal::derive(move || pinned.with(|p| p.contains(&field)))
                                    sortable=col.sortable
                                    width=col.width
                                    on_sort=on_sort
                                    on_pin_toggle=on_toggle_pin
                                />
                            }
                        }).collect_view()}
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let (loading, empty, rows) = snap.with(|s| (s.loading, s.empty, s.rows.clone()));
                        if loading {
                            view! {
                                <TableRow>
                                    <TableCell attr:colspan=column_count attr:style="padding: 40px; text-align: center;">
                                        <Flex justify=FlexJustify::Center align=FlexAlign::Center gap=FlexGap::Small>
                                            <Spinner />
                                            "Загрузка..."
                                        </Flex>
                                    </TableCell>
                                </TableRow>
                            }.into_any()
                        } else if empty {
                            view! {
                                <TableRow>
                                    <TableCell attr:colspan=column_count attr:style="padding: 40px; text-align: center; color: var(--colorNeutralForeground3);">
                                        "Нет данных"
                                    </TableCell>
                                </TableRow>
                            }.into_any()
                        } else {
                            rows.into_iter().map(|r| {
                                let id_for_dblclick = r.id.clone();
                                let id_for_check = r.id.clone();
                                view! {
                                    <TableRow
                                        on:dblclick=move |_| table.update(|t| { t.double_click(&id_for_dblclick); })
                                        attr:style="cursor: pointer;"
                                    >
                                        {checkbox_selection.then(|| view! {
                                            <TableCheckbox
                                                row_id=r.id.clone()
                                                checked=Signal::derive(move || snap.with(|s| s.selected.contains(&id_for_check)))
                                                on_toggle=on_toggle_row
                                            />
                                        })}
                                        {r.cells.into_iter().map(|text| view! {
                                            <TableCell>{text}</TableCell>
                                        }).collect_view()}
                                    </TableRow>
                                }
                            }).collect_view().into_any()
                        }
                    }}
                </TableBody>
            </Table>
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::data_table::InMemoryStore;
    use serde_json::json;

    #[test]
    fn test_build_engine_drops_corrupt_state() {
        let store = InMemoryStore::new();
        store.set("datatable_filters_v9_courses", "{oops").unwrap();
        let engine = build_engine(
            DataTableConfig::new("courses"),
            vec![ColumnDef::text("title", "Название")],
            Rc::new(store.clone()),
        );
        assert!(engine.is_ok());
        assert!(store.get("datatable_filters_v9_courses").unwrap().is_none());
    }

    #[test]
    fn test_default_cell_text_uses_option_label() {
        let col = ColumnDef::select("status", "Статус", vec![("draft", "Черновик").into()]);
        assert_eq!(default_cell_text(&col, &json!({"status": "draft"})), "Черновик");
        assert_eq!(default_cell_text(&col, &json!({"status": "other"})), "other");
    }
}
