use crate::hooks::use_expense_form::{use_expense_form, FormMode, FormOutcome};
use crate::services::api::ApiClient;
use shared::{Category, Expense};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ExpenseModalProps {
    pub is_open: bool,
    /// `Some` edits an existing expense, `None` creates a new one.
    pub expense: Option<Expense>,
    pub categories: Vec<Category>,
    pub on_outcome: Callback<FormOutcome>,
}

/// Modal form for creating, updating and deleting an expense.
#[function_component(ExpenseModal)]
pub fn expense_modal(props: &ExpenseModalProps) -> Html {
    let api_client = ApiClient::new();
    let form = use_expense_form(&api_client, props.on_outcome.clone());

    // Reset form state whenever the modal opens
    use_effect_with((props.is_open, props.expense.clone()), {
        let load = form.actions.load.clone();
        move |(is_open, expense): &(bool, Option<Expense>)| {
            if *is_open {
                load.emit(expense.clone());
            }
            || ()
        }
    });

    if !props.is_open {
        return html! {};
    }

    let submitting = form.state.mode == FormMode::Submitting;
    let is_edit = form.state.form.id.is_some();

    let on_submit = {
        let submit = form.actions.submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit.emit(());
        })
    };

    let on_delete = {
        let remove = form.actions.remove.clone();
        Callback::from(move |_: MouseEvent| remove.emit(()))
    };

    let on_cancel = {
        let cancel = form.actions.cancel.clone();
        Callback::from(move |_: MouseEvent| cancel.emit(()))
    };

    // datetime-local inputs reject timezone suffixes
    let date_value = form
        .state
        .form
        .date
        .trim_end_matches('Z')
        .split('.')
        .next()
        .unwrap_or("")
        .to_string();

    html! {
        <div class="modal-overlay">
            <div class="modal expense-modal">
                <div class="modal-header">
                    <h2>{if is_edit { "Edit Expense" } else { "New Expense" }}</h2>
                    <button class="modal-close-btn" onclick={on_cancel.clone()}>{"×"}</button>
                </div>

                {if let Some(error) = form.state.error.as_ref() {
                    html! { <div class="form-message error">{error}</div> }
                } else { html! {} }}

                <form class="expense-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="expense-name">{"Name"}</label>
                        <input
                            type="text"
                            id="expense-name"
                            placeholder="Groceries, rent, bus ticket..."
                            value={form.state.form.name.clone()}
                            onchange={form.actions.on_name_change.clone()}
                            disabled={submitting}
                        />
                    </div>

                    <div class="form-group">
                        <label for="expense-amount">{"Amount"}</label>
                        <input
                            type="number"
                            id="expense-amount"
                            placeholder="0.00"
                            step="0.01"
                            value={form.state.form.amount_input.clone()}
                            onchange={form.actions.on_amount_change.clone()}
                            disabled={submitting}
                        />
                    </div>

                    <div class="form-group">
                        <label for="expense-date">{"Date"}</label>
                        <input
                            type="datetime-local"
                            id="expense-date"
                            value={date_value}
                            onchange={form.actions.on_date_change.clone()}
                            disabled={submitting}
                        />
                    </div>

                    <div class="form-group">
                        <label for="expense-category">{"Category"}</label>
                        <select
                            id="expense-category"
                            onchange={form.actions.on_category_change.clone()}
                            disabled={submitting}
                        >
                            <option value="" selected={form.state.form.category_id.is_none()}>
                                {"No category"}
                            </option>
                            {for props.categories.iter().map(|category| {
                                let selected = form.state.form.category_id.as_deref()
                                    == Some(category.id.as_str());
                                html! {
                                    <option value={category.id.clone()} selected={selected}>{&category.name}</option>
                                }
                            })}
                        </select>
                    </div>

                    <div class="modal-actions">
                        {if is_edit {
                            html! {
                                <button
                                    type="button"
                                    class="btn btn-danger"
                                    onclick={on_delete}
                                    disabled={submitting}
                                >
                                    {"Delete"}
                                </button>
                            }
                        } else { html! {} }}
                        <button type="button" class="btn" onclick={on_cancel} disabled={submitting}>
                            {"Cancel"}
                        </button>
                        <button type="submit" class="btn btn-primary" disabled={submitting}>
                            {if submitting { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
