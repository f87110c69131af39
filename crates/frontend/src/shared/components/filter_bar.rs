use crate::shared::icons::icon;
use contracts::shared::data_table::{
    ColumnDef, ColumnType, FilterOperator, FilterValue, PersistedFilters,
};
use leptos::prelude::*;
use thaw::*;

/// Новое значение для multi-select после клика по варианту
fn toggle_option(current: Option<&FilterValue>, option: &str) -> FilterValue {
    let mut items = current.map(|v| v.items()).unwrap_or_default();
    items.retain(|i| !i.is_empty());
    if let Some(pos) = items.iter().position(|i| i == option) {
        items.remove(pos);
    } else {
        items.push(option.to_string());
    }
    FilterValue::many(items)
}

/// Панель фильтров: по одному полю на каждую видимую фильтруемую колонку.
///
/// Панель сворачивается; в заголовке бейдж с числом активных фильтров и
/// слот `toolbar` (пагинация, меню колонок).
#[component]
pub fn FilterBar(
    #[prop(into)]
    is_expanded: RwSignal<bool>,

    /// Видимые фильтруемые колонки
    #[prop(into)]
    columns: Signal<Vec<ColumnDef>>,

    /// Текущие значения и операторы
    #[prop(into)]
    filters: Signal<PersistedFilters>,

    #[prop(into)]
    active_filters_count: Signal<usize>,

    /// Показать кнопки "Найти"/"Сбросить"
    #[prop(optional)]
    search_on_button: bool,

    on_value: Callback<(String, FilterValue)>,

    on_operator: Callback<(String, FilterOperator)>,

    on_search: Callback<()>,

    on_clear: Callback<()>,

    #[prop(into)]
    toolbar: ViewFn,
) -> impl IntoView {
    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div
                    class="filter-panel-header__left"
                    on:click=move |_| is_expanded.update(|e| *e = !*e)
                >
                    {icon("filter")}
                    <span class="filter-panel__title">"Фильтры"</span>
                    {move || {
                        let count = active_filters_count.get();
                        (count > 0).then(|| view! {
                            <span class="badge badge--primary">{count}</span>
                        })
                    }}
                </div>
                <div class="filter-panel-header__center">
                    {toolbar.run()}
                </div>
            </div>

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">
                    {move || columns.get().into_iter().map(|column| view! {
                        <FilterFieldInput
                            column=column
                            filters=filters
                            on_value=on_value
                            on_operator=on_operator
                        />
                    }).collect_view()}

                    <Flex gap=FlexGap::Small>
                        {search_on_button.then(|| view! {
                            <Button appearance=ButtonAppearance::Primary on_click=move |_| on_search.run(())>
                                {icon("search")}
                                " Найти"
                            </Button>
                        })}
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_clear.run(())>
                            {icon("x")}
                            " Сбросить"
                        </Button>
                    </Flex>
                </div>
            </div>
        </div>
    }
}

/// Оператор и значение фильтра для одной колонки
#[component]
fn FilterFieldInput(
    column: ColumnDef,
    #[prop(into)]
    filters: Signal<PersistedFilters>,
    on_value: Callback<(String, FilterValue)>,
    on_operator: Callback<(String, FilterOperator)>,
) -> impl IntoView {
    let field = StoredValue::new(column.field.clone());
    let column_for_op = column.clone();
    let current_operator = Memo::new(move |_| {
        let explicit = filters.with(|s| s.operators.get(&column_for_op.field).copied());
        FilterOperator::resolve(explicit, &column_for_op)
    });

    let operator_select = view! {
        <select
            class="filter-field__operator"
            on:change=move |ev| {
                if let Some(op) = FilterOperator::parse(&event_target_value(&ev)) {
                    on_operator.run((field.get_value(), op));
                }
            }
        >
            {FilterOperator::for_column_type(column.column_type).iter().map(|&op| view! {
                <option value=op.symbol() selected=move || current_operator.get() == op>
                    {op.label()}
                </option>
            }).collect_view()}
        </select>
    };

    let input = match column.column_type {
        ColumnType::Select => {
            column.value_options.iter().map(|opt| {
                let value = opt.value.clone();
                let value_for_check = opt.value.clone();
                view! {
                    <label class="filter-field__option">
                        <input
                            type="checkbox"
                            prop:checked=move || filters.with(|s| {
                                s.filters
                                    .get(&field.get_value())
                                    .map(|v| v.items().contains(&value_for_check))
                                    .unwrap_or(false)
                            })
                            on:change=move |_| {
                                let next = filters.with_untracked(|s| {
                                    toggle_option(s.filters.get(&field.get_value()), &value)
                                });
                                on_value.run((field.get_value(), next));
                            }
                        />
                        {opt.label.clone()}
                    </label>
                }
            }).collect_view().into_any()
        }
        ColumnType::Text | ColumnType::Number => {
            let input_type = if column.column_type == ColumnType::Number { "number" } else { "text" };
            view! {
                <input
                    type=input_type
                    class="filter-field__input"
                    placeholder=column.header_name.clone()
                    prop:value=move || filters.with(|s| {
                        s.filters
                            .get(&field.get_value())
                            .map(|v| v.to_query_value())
                            .unwrap_or_default()
                    })
                    on:input=move |ev| {
                        on_value.run((field.get_value(), FilterValue::Text(event_target_value(&ev))));
                    }
                />
            }.into_any()
        }
    };

    view! {
        <div class="filter-field">
            <label class="filter-field__label">{column.header_name.clone()}</label>
            {operator_select}
            {input}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_option_adds_and_removes() {
        let v = toggle_option(None, "draft");
        assert_eq!(v.items(), vec!["draft".to_string()]);
        let v = toggle_option(Some(&v), "published");
        assert_eq!(v.items(), vec!["draft".to_string(), "published".to_string()]);
        let v = toggle_option(Some(&v), "draft");
        assert_eq!(v.items(), vec!["published".to_string()]);
    }

    #[test]
    fn test_toggle_option_ignores_empty_text() {
        let v = toggle_option(Some(&FilterValue::text("")), "a");
        assert_eq!(v.items(), vec!["a".to_string()]);
    }
}
