use shared::{
    format_group_date, Category, CriteriaPatch, Expense, ExpenseCriteria, ExpenseGroup,
    ExpenseSort, GroupKeyMode,
};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ExpenseListProps {
    pub groups: Vec<ExpenseGroup>,
    pub criteria: ExpenseCriteria,
    pub categories: Vec<Category>,
    pub loading: bool,
    pub last_page: bool,
    pub error: Option<String>,
    pub on_filter_change: Callback<CriteriaPatch>,
    pub on_change_period: Callback<i32>,
    pub on_load_more: Callback<()>,
    /// `Some` opens the modal for an existing expense, `None` for a new one.
    pub on_select: Callback<Option<Expense>>,
}

/// Grouped expense list with the filter bar and month navigation.
/// Purely presentational; all fetching lives in the `use_expenses` hook.
#[function_component(ExpenseList)]
pub fn expense_list(props: &ExpenseListProps) -> Html {
    let on_name_input = {
        let on_filter_change = props.on_filter_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_filter_change.emit(CriteriaPatch {
                name: Some(input.value()),
                ..Default::default()
            });
        })
    };

    let on_category_change = {
        let on_filter_change = props.on_filter_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let value = select.value();
            let category_ids = if value.is_empty() { Vec::new() } else { vec![value] };
            on_filter_change.emit(CriteriaPatch {
                category_ids: Some(category_ids),
                ..Default::default()
            });
        })
    };

    let on_sort_change = {
        let on_filter_change = props.on_filter_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(sort) = ExpenseSort::parse(&select.value()) {
                on_filter_change.emit(CriteriaPatch {
                    sort: Some(sort),
                    ..Default::default()
                });
            }
        })
    };

    let prev_month = {
        let on_change_period = props.on_change_period.clone();
        Callback::from(move |_: MouseEvent| on_change_period.emit(-1))
    };

    let next_month = {
        let on_change_period = props.on_change_period.clone();
        Callback::from(move |_: MouseEvent| on_change_period.emit(1))
    };

    let on_load_more = {
        let on_load_more = props.on_load_more.clone();
        Callback::from(move |_: MouseEvent| on_load_more.emit(()))
    };

    let on_add = {
        let on_select = props.on_select.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(None))
    };

    let show_date_headers =
        props.criteria.sort.group_key_mode() == GroupKeyMode::Date;
    let current_sort = props.criteria.sort.to_param();

    html! {
        <section class="expense-list-section">
            <div class="month-header">
                <button class="month-nav-btn" onclick={prev_month}>{"‹"}</button>
                <h2 class="month-title">{props.criteria.year_month.display()}</h2>
                <button class="month-nav-btn" onclick={next_month}>{"›"}</button>
            </div>

            <div class="filter-bar">
                <input
                    type="search"
                    class="name-filter"
                    placeholder="Search expenses..."
                    value={props.criteria.name.clone().unwrap_or_default()}
                    oninput={on_name_input}
                />
                <select class="category-filter" onchange={on_category_change}>
                    <option value="" selected={props.criteria.category_ids.is_empty()}>{"All categories"}</option>
                    {for props.categories.iter().map(|category| {
                        let selected = props.criteria.category_ids.contains(&category.id);
                        html! {
                            <option value={category.id.clone()} selected={selected}>{&category.name}</option>
                        }
                    })}
                </select>
                <select class="sort-select" onchange={on_sort_change}>
                    {for [
                        ("date,desc", "Date (newest first)"),
                        ("date,asc", "Date (oldest first)"),
                        ("name,asc", "Name (A-Z)"),
                        ("amount,desc", "Amount (highest first)"),
                    ].iter().map(|(value, label)| {
                        html! {
                            <option value={*value} selected={current_sort == *value}>{*label}</option>
                        }
                    })}
                </select>
                <button class="btn btn-primary" onclick={on_add}>{"Add expense"}</button>
            </div>

            {if let Some(error) = props.error.as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            {if props.loading && props.groups.is_empty() {
                html! { <div class="loading">{"Loading expenses..."}</div> }
            } else if props.groups.is_empty() {
                html! { <div class="empty">{"No expenses for this period"}</div> }
            } else {
                html! {
                    <div class="expense-groups">
                        {for props.groups.iter().map(|group| {
                            html! {
                                <div class="expense-group" key={group.key.clone()}>
                                    {if show_date_headers {
                                        html! { <h3 class="group-header">{format_group_date(&group.key)}</h3> }
                                    } else { html! {} }}
                                    <ul class="expense-rows">
                                        {for group.expenses.iter().map(|expense| {
                                            let on_select = props.on_select.clone();
                                            let selected = expense.clone();
                                            let onclick = Callback::from(move |_: MouseEvent| {
                                                on_select.emit(Some(selected.clone()));
                                            });
                                            html! {
                                                <li class="expense-row" onclick={onclick}>
                                                    <span class="expense-name">{&expense.name}</span>
                                                    <span class="expense-category">
                                                        {expense.category.as_ref().map(|c| c.name.as_str()).unwrap_or("")}
                                                    </span>
                                                    <span class="expense-amount">{format!("{:.2}", expense.amount)}</span>
                                                </li>
                                            }
                                        })}
                                    </ul>
                                </div>
                            }
                        })}
                    </div>
                }
            }}

            {if !props.last_page && !props.groups.is_empty() {
                html! {
                    <button
                        class="btn load-more-btn"
                        onclick={on_load_more}
                        disabled={props.loading}
                    >
                        {if props.loading { "Loading..." } else { "Load more" }}
                    </button>
                }
            } else { html! {} }}
        </section>
    }
}
