mod components;
mod hooks;
mod services;

use components::expense_list::ExpenseList;
use components::expense_modal::ExpenseModal;
use hooks::use_categories::use_categories;
use hooks::use_expense_form::FormOutcome;
use hooks::use_expenses::use_expenses;
use services::api::ApiClient;
use shared::Expense;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    let api_client = ApiClient::new();
    let expenses = use_expenses(&api_client);
    let categories = use_categories(&api_client);

    let modal_open = use_state(|| false);
    let editing_expense = use_state(|| Option::<Expense>::None);
    let toast = use_state(|| Option::<String>::None);

    let on_select = {
        let modal_open = modal_open.clone();
        let editing_expense = editing_expense.clone();
        Callback::from(move |expense: Option<Expense>| {
            editing_expense.set(expense);
            modal_open.set(true);
        })
    };

    // The modal reports an outcome; deciding whether to reload is ours.
    let on_outcome = {
        let modal_open = modal_open.clone();
        let toast = toast.clone();
        let reload = expenses.actions.reload.clone();
        Callback::from(move |outcome: FormOutcome| {
            modal_open.set(false);

            if outcome.refresh_needed() {
                reload.emit(());

                let message = match outcome {
                    FormOutcome::Deleted => "Expense deleted",
                    _ => "Expense saved",
                };
                toast.set(Some(message.to_string()));

                // One-shot notification, cleared after 3 seconds
                let toast_clear = toast.clone();
                spawn_local(async move {
                    gloo::timers::future::TimeoutFuture::new(3000).await;
                    toast_clear.set(None);
                });
            }
        })
    };

    html! {
        <>
            <header class="header">
                <div class="container">
                    <h1>{"Expense Tracker"}</h1>
                </div>
            </header>

            <main class="main">
                <div class="container">
                    {if let Some(message) = (*toast).as_ref() {
                        html! { <div class="form-message success">{message}</div> }
                    } else { html! {} }}

                    {if let Some(error) = categories.state.error.as_ref() {
                        html! { <div class="form-message error">{error}</div> }
                    } else { html! {} }}

                    <ExpenseList
                        groups={expenses.state.groups.clone()}
                        criteria={expenses.state.criteria.clone()}
                        categories={categories.state.categories.clone()}
                        loading={expenses.state.loading}
                        last_page={expenses.state.last_page}
                        error={expenses.state.error.clone()}
                        on_filter_change={expenses.actions.set_filter.clone()}
                        on_change_period={expenses.actions.change_period.clone()}
                        on_load_more={expenses.actions.load_next_page.clone()}
                        on_select={on_select}
                    />
                </div>
            </main>

            <ExpenseModal
                is_open={*modal_open}
                expense={(*editing_expense).clone()}
                categories={categories.state.categories.clone()}
                on_outcome={on_outcome}
            />
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
