use crate::lms::a001_course::api;
use crate::shared::data_table::{DataTable, FetchedPage};
use contracts::shared::data_table::{ColumnDef, FetchRequest, FilterOperator, RowId};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

const TABLE_KEY: &str = "lms_a001_course_list";

fn course_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::number("id", "ID").with_width(80).not_filterable(),
        ColumnDef::text("title", "Название").pinned_left(),
        ColumnDef::text("author", "Автор"),
        ColumnDef::select(
            "status",
            "Статус",
            vec![
                ("draft", "Черновик").into(),
                ("published", "Опубликован").into(),
                ("archived", "В архиве").into(),
            ],
        ),
        ColumnDef::number("lessons", "Уроков")
            .with_default_operator(FilterOperator::Gte)
            .with_width(100),
        ColumnDef::number("price", "Цена").with_width(120),
        ColumnDef::text("updated_at", "Изменён").not_filterable().hidden(),
    ]
}

/// Список курсов: пагинация, фильтры и сортировка на сервере
#[component]
pub fn CourseList() -> impl IntoView {
    let response = RwSignal::new(None::<FetchedPage>);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let selected = RwSignal::new(Vec::<RowId>::new());

    let on_fetch = Callback::new(move |req: FetchRequest| {
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            match api::list_courses(&req.query).await {
                Ok(data) => {
                    response.set(Some(FetchedPage {
                        seq: req.seq,
                        rows: data.items,
                        total: data.total_count,
                    }));
                }
                Err(e) => {
                    log::error!("Failed to load courses: {}", e);
                    error.set(Some(e));
                    loading.set(false);
                }
            }
        });
    });

    view! {
        <div class="page">
            <div class="page__header">
                <h2>"Курсы"</h2>
                {move || {
                    let count = selected.with(|s| s.len());
                    (count > 0).then(|| view! {
                        <span class="page__selection">{format!("Выбрано: {}", count)}</span>
                    })
                }}
            </div>
            {move || error.get().map(|e| view! {
                <div class="page__error">{format!("Ошибка загрузки: {}", e)}</div>
            })}
            <DataTable
                table_key=TABLE_KEY
                columns=course_columns()
                server_side=true
                search_on_button=true
                checkbox_selection=true
                response=Signal::derive(move || response.get())
                loading=Signal::derive(move || Some(loading.get()))
                on_fetch_data=on_fetch
                on_selection_change=Callback::new(move |ids: Vec<RowId>| selected.set(ids))
                on_row_double_click=Callback::new(move |row: Value| {
                    log::info!("Открыть курс {}", row["id"]);
                })
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::data_table::column::validate_columns;

    #[test]
    fn test_columns_are_valid() {
        assert!(validate_columns(&course_columns()).is_ok());
    }
}
