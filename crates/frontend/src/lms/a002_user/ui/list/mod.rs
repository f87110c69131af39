use crate::lms::a002_user::api;
use crate::shared::data_table::DataTable;
use contracts::shared::data_table::{ColumnDef, FilterOperator};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

const TABLE_KEY: &str = "lms_a002_user_list";

fn user_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::text("email", "Email").pinned_left(),
        ColumnDef::text("name", "Имя"),
        ColumnDef::select(
            "role",
            "Роль",
            vec![
                ("student", "Студент").into(),
                ("teacher", "Преподаватель").into(),
                ("admin", "Администратор").into(),
            ],
        ),
        ColumnDef::number("courses", "Курсов").with_default_operator(FilterOperator::Gte),
        ColumnDef::text("registered_at", "Регистрация"),
    ]
}

fn format_user_cell(field: &str, row: &Value) -> String {
    match (field, &row[field]) {
        ("registered_at", Value::String(s)) => s.chars().take(10).collect(),
        ("role", Value::String(s)) => match s.as_str() {
            "student" => "Студент".into(),
            "teacher" => "Преподаватель".into(),
            "admin" => "Администратор".into(),
            other => other.to_string(),
        },
        (_, Value::Null) => String::new(),
        (_, Value::String(s)) => s.clone(),
        (_, other) => other.to_string(),
    }
}

/// Список пользователей: загружается один раз, дальше всё на клиенте
#[component]
pub fn UserList() -> impl IntoView {
    let rows = RwSignal::new(None::<Vec<Value>>);
    let loading = RwSignal::new(true);

    spawn_local(async move {
        match api::list_users().await {
            Ok(items) => {
                log::info!("Loaded {} users", items.len());
                rows.set(Some(items));
            }
            Err(e) => log::error!("Failed to load users: {}", e),
        }
        loading.set(false);
    });

    view! {
        <div class="page">
            <div class="page__header">
                <h2>"Пользователи"</h2>
            </div>
            <DataTable
                table_key=TABLE_KEY
                columns=user_columns()
                rows=Signal::derive(move || rows.get())
                loading=Signal::derive(move || Some(loading.get()))
                page_size_options=vec![20, 50, 100]
                format_cell=Callback::new(move |(field, row): (String, Value)| format_user_cell(&field, &row))
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_columns_are_valid() {
        let columns = user_columns();
        assert!(contracts::shared::data_table::column::validate_columns(&columns).is_ok());
        for col in &columns {
            let op = FilterOperator::resolve(None, col);
            assert!(FilterOperator::for_column_type(col.column_type).contains(&op));
        }
    }

    #[test]
    fn test_format_user_cell() {
        let row = json!({"role": "admin", "registered_at": "2024-03-01T10:00:00Z", "courses": 3, "name": null});
        assert_eq!(format_user_cell("role", &row), "Администратор");
        assert_eq!(format_user_cell("registered_at", &row), "2024-03-01");
        assert_eq!(format_user_cell("courses", &row), "3");
        assert_eq!(format_user_cell("name", &row), "");
    }
}
