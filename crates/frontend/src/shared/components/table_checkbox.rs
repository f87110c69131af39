use leptos::prelude::*;

/// Ячейка с чекбоксом выбора строки.
///
/// Клик не доходит до строки (stop_propagation), поэтому двойной клик по
/// строке и выбор не мешают друг другу.
#[component]
pub fn TableCheckbox(
    /// ID строки, передаётся в `on_toggle`
    #[prop(into)]
    row_id: String,
    #[prop(into)]
    checked: Signal<bool>,
    on_toggle: Callback<String>,
) -> impl IntoView {
    view! {
        <td
            class="table__cell table__cell--checkbox"
            on:click=|e| e.stop_propagation()
            on:dblclick=|e| e.stop_propagation()
        >
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=checked
                on:change=move |_| on_toggle.run(row_id.clone())
            />
        </td>
    }
}

/// Чекбокс в заголовке: отмечен, когда выбрана вся текущая страница
#[component]
pub fn TableHeaderCheckbox(
    #[prop(into)]
    all_selected: Signal<bool>,
    /// true = выбрать страницу, false = снять выбор
    on_change: Callback<bool>,
) -> impl IntoView {
    view! {
        <th class="table__cell table__cell--checkbox">
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=all_selected
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </th>
    }
}
