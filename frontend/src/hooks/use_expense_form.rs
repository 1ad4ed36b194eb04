use crate::services::api::ExpenseApi;
use crate::services::date_utils;
use crate::services::logging::Logger;
use shared::{Expense, ExpenseForm};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Lifecycle of the edit form. There is no terminal state; the form is
/// reusable across invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Idle,
    Editing,
    Submitting,
}

/// Outcome reported to the caller. The form never touches the expense list
/// itself; the shell decides whether to reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Saved,
    Deleted,
    Cancelled,
}

impl FormOutcome {
    pub fn refresh_needed(self) -> bool {
        !matches!(self, FormOutcome::Cancelled)
    }
}

#[derive(Clone)]
pub struct ExpenseFormState {
    pub form: ExpenseForm,
    pub mode: FormMode,
    pub error: Option<String>,
}

pub struct UseExpenseFormResult {
    pub state: ExpenseFormState,
    pub actions: UseExpenseFormActions,
}

#[derive(Clone)]
pub struct UseExpenseFormActions {
    pub load: Callback<Option<Expense>>,
    pub submit: Callback<()>,
    pub remove: Callback<()>,
    pub cancel: Callback<()>,
    pub on_name_change: Callback<Event>,
    pub on_amount_change: Callback<Event>,
    pub on_date_change: Callback<Event>,
    pub on_category_change: Callback<Event>,
}

/// Bridges a selected expense into editable form state and submits edits
/// back as upsert / delete calls.
///
/// The authoritative form value lives in a `use_mut_ref` cell; the callbacks
/// are created once and would otherwise read the first render's snapshot.
#[hook]
pub fn use_expense_form<A>(
    api_client: &A,
    on_outcome: Callback<FormOutcome>,
) -> UseExpenseFormResult
where
    A: ExpenseApi + Clone + 'static,
{
    let form_cell = use_mut_ref(ExpenseForm::default);
    let form = use_state(ExpenseForm::default);
    let mode = use_state(|| FormMode::Idle);
    let error = use_state(|| None::<String>);

    let load = {
        let form_cell = form_cell.clone();
        let form = form.clone();
        let mode = mode.clone();
        let error = error.clone();

        use_callback((), move |expense: Option<Expense>, _| {
            // Always a copy, never the list's own record.
            let next = match &expense {
                Some(expense) => ExpenseForm::from_expense(expense),
                None => ExpenseForm::new_default(date_utils::now_rfc3339()),
            };
            *form_cell.borrow_mut() = next.clone();
            form.set(next);
            error.set(None);
            mode.set(FormMode::Editing);
        })
    };

    let submit = {
        let api_client = api_client.clone();
        let form_cell = form_cell.clone();
        let mode = mode.clone();
        let error = error.clone();
        let on_outcome = on_outcome.clone();

        use_callback((), move |_, _| {
            // Validation failures never leave the client.
            let expense = match form_cell.borrow().validate() {
                Ok(expense) => expense,
                Err(errors) => {
                    let message = errors
                        .iter()
                        .map(|e| e.to_string())
                        .collect::<Vec<_>>()
                        .join("; ");
                    error.set(Some(message));
                    return;
                }
            };

            let api_client = api_client.clone();
            let mode = mode.clone();
            let error = error.clone();
            let on_outcome = on_outcome.clone();

            error.set(None);
            mode.set(FormMode::Submitting);

            spawn_local(async move {
                match api_client.upsert_expense(&expense).await {
                    Ok(()) => {
                        mode.set(FormMode::Idle);
                        on_outcome.emit(FormOutcome::Saved);
                    }
                    Err(message) => {
                        // Form values stay intact for correction.
                        Logger::error_with_component("use_expense_form", &message);
                        error.set(Some(message));
                        mode.set(FormMode::Editing);
                    }
                }
            });
        })
    };

    let remove = {
        let api_client = api_client.clone();
        let form_cell = form_cell.clone();
        let mode = mode.clone();
        let error = error.clone();
        let on_outcome = on_outcome.clone();

        use_callback((), move |_, _| {
            let Some(id) = form_cell.borrow().id.clone() else {
                return;
            };

            let confirmed = web_sys::window()
                .map(|window| {
                    window
                        .confirm_with_message("Are you sure you want to delete this expense?")
                        .unwrap_or(false)
                })
                .unwrap_or(false);
            if !confirmed {
                // Declining is a no-op, not an error.
                return;
            }

            let api_client = api_client.clone();
            let mode = mode.clone();
            let error = error.clone();
            let on_outcome = on_outcome.clone();

            error.set(None);
            mode.set(FormMode::Submitting);

            spawn_local(async move {
                match api_client.delete_expense(&id).await {
                    Ok(()) => {
                        mode.set(FormMode::Idle);
                        on_outcome.emit(FormOutcome::Deleted);
                    }
                    Err(message) => {
                        Logger::error_with_component("use_expense_form", &message);
                        error.set(Some(message));
                        mode.set(FormMode::Editing);
                    }
                }
            });
        })
    };

    let cancel = {
        let mode = mode.clone();
        let error = error.clone();
        let on_outcome = on_outcome.clone();

        use_callback((), move |_, _| {
            mode.set(FormMode::Idle);
            error.set(None);
            on_outcome.emit(FormOutcome::Cancelled);
        })
    };

    let edit_field = {
        let form_cell = form_cell.clone();
        let form = form.clone();
        move |apply: fn(&mut ExpenseForm, String)| {
            let form_cell = form_cell.clone();
            let form = form.clone();
            move |value: String| {
                let next = {
                    let mut current = form_cell.borrow_mut();
                    apply(&mut current, value);
                    current.clone()
                };
                form.set(next);
            }
        }
    };

    let on_name_change = {
        let edit = edit_field(|form, value| form.name = value);
        let error = error.clone();
        use_callback((), move |e: Event, _| {
            let input: HtmlInputElement = e.target_unchecked_into();
            edit(input.value());
            error.set(None);
        })
    };

    let on_amount_change = {
        let edit = edit_field(|form, value| form.amount_input = value);
        let error = error.clone();
        use_callback((), move |e: Event, _| {
            let input: HtmlInputElement = e.target_unchecked_into();
            edit(input.value());
            error.set(None);
        })
    };

    let on_date_change = {
        let edit = edit_field(|form, value| form.date = value);
        use_callback((), move |e: Event, _| {
            let input: HtmlInputElement = e.target_unchecked_into();
            edit(input.value());
        })
    };

    let on_category_change = {
        let edit = edit_field(|form, value| {
            form.category_id = if value.is_empty() { None } else { Some(value) };
        });
        use_callback((), move |e: Event, _| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            edit(select.value());
        })
    };

    let state = ExpenseFormState {
        form: (*form).clone(),
        mode: *mode,
        error: (*error).clone(),
    };

    let actions = UseExpenseFormActions {
        load,
        submit,
        remove,
        cancel,
        on_name_change,
        on_amount_change,
        on_date_change,
        on_category_change,
    };

    UseExpenseFormResult { state, actions }
}
