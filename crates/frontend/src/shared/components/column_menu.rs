use crate::shared::icons::icon;
use contracts::shared::data_table::ColumnDef;
use leptos::prelude::*;

/// Меню колонок: видимость и закрепление слева
#[component]
pub fn ColumnMenu(
    /// Все колонки в исходном порядке
    #[prop(into)]
    columns: Signal<Vec<ColumnDef>>,

    /// Поля скрытых колонок
    #[prop(into)]
    hidden: Signal<Vec<String>>,

    /// Поля закреплённых колонок
    #[prop(into)]
    pinned: Signal<Vec<String>>,

    on_toggle_visibility: Callback<String>,

    on_toggle_pin: Callback<String>,

    on_show_all: Callback<()>,
) -> impl IntoView {
    let is_open = RwSignal::new(false);

    view! {
        <div class="column-menu">
            <button
                class="column-menu__trigger"
                title="Колонки"
                on:click=move |_| is_open.update(|o| *o = !*o)
            >
                {icon("columns")}
            </button>
            <Show when=move || is_open.get()>
                <div class="column-menu__dropdown">
                    {move || columns.get().into_iter().map(|col| {
                        let field = StoredValue::new(col.field.clone());
                        view! {
                            <div class="column-menu__item">
                                <label>
                                    <input
                                        type="checkbox"
                                        prop:checked=move || !hidden.with(|h| h.contains(&field.get_value()))
                                        on:change=move |_| on_toggle_visibility.run(field.get_value())
                                    />
                                    {col.header_name.clone()}
                                </label>
                                <button
                                    class=move || {
                                        if pinned.with(|p| p.contains(&field.get_value())) {
                                            "table__pin-btn table__pin-btn--active"
                                        } else {
                                            "table__pin-btn"
                                        }
                                    }
                                    on:click=move |_| on_toggle_pin.run(field.get_value())
                                >
                                    {icon("pin")}
                                </button>
                            </div>
                        }
                    }).collect_view()}
                    <button class="column-menu__reset" on:click=move |_| on_show_all.run(())>
                        "Показать все"
                    </button>
                </div>
            </Show>
        </div>
    }
}
