//! Ячейка заголовка с сортировкой и закреплением колонки
//!
//! # Пример
//!
//! ```ignore
//! <SortableHeaderCell
//!     label="Уроков"
//!     field="lessons"
//!     sort_model=Signal::derive(move || sort.get())
//!     pinned=Signal::derive(move || false)
//!     on_sort=Callback::new(move |field| toggle_sort(field))
//!     on_pin_toggle=Callback::new(move |field| toggle_pin(field))
//! />
//! ```

use crate::shared::icons::icon;
use contracts::shared::data_table::{SortDirection, SortModel};
use leptos::prelude::*;
use thaw::*;

/// Индикатор сортировки для заголовка
pub fn sort_indicator(model: &SortModel, field: &str) -> &'static str {
    match model.active() {
        Some((current, SortDirection::Asc)) if current == field => " ▲",
        Some((current, SortDirection::Desc)) if current == field => " ▼",
        _ => " ⇅",
    }
}

#[component]
pub fn SortableHeaderCell(
    #[prop(into)]
    label: String,

    /// Поле колонки
    #[prop(into)]
    field: String,

    #[prop(into)]
    sort_model: Signal<SortModel>,

    #[prop(into)]
    pinned: Signal<bool>,

    /// Колонка поддерживает сортировку
    #[prop(optional, default = true)]
    sortable: bool,

    #[prop(optional_no_strip)]
    width: Option<u32>,

    on_sort: Callback<String>,

    on_pin_toggle: Callback<String>,
) -> impl IntoView {
    let field_for_click = field.clone();
    let field_for_indicator = field.clone();
    let field_for_pin = field;

    let style = match width {
        Some(w) => format!("width: {}px; white-space: nowrap;", w),
        None => "white-space: nowrap;".to_string(),
    };
    let header_style = if sortable { "cursor: pointer;" } else { "" };

    view! {
        <TableHeaderCell attr:style=style>
            <div class="table__header">
                <span
                    class="table__sortable-header"
                    style=header_style
                    on:click=move |_| {
                        if sortable {
                            on_sort.run(field_for_click.clone());
                        }
                    }
                >
                    {label}
                    {sortable.then(|| view! {
                        <span class="table__sort-indicator">
                            {move || sort_indicator(&sort_model.get(), &field_for_indicator)}
                        </span>
                    })}
                </span>
                <button
                    class=move || {
                        if pinned.get() {
                            "table__pin-btn table__pin-btn--active"
                        } else {
                            "table__pin-btn"
                        }
                    }
                    title=move || if pinned.get() { "Открепить" } else { "Закрепить слева" }
                    on:click=move |e| {
                        e.stop_propagation();
                        on_pin_toggle.run(field_for_pin.clone());
                    }
                >
                    {icon("pin")}
                </button>
            </div>
        </TableHeaderCell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        let model = SortModel::new("title", SortDirection::Desc);
        assert_eq!(sort_indicator(&model, "title"), " ▼");
        assert_eq!(sort_indicator(&model, "lessons"), " ⇅");
        assert_eq!(sort_indicator(&SortModel::default(), "title"), " ⇅");
    }
}
