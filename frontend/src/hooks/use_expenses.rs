use crate::services::api::ExpenseApi;
use crate::services::date_utils;
use crate::services::logging::Logger;
use gloo::timers::callback::Timeout;
use shared::{apply_page, CriteriaPatch, ExpenseCriteria, ExpenseGroup};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Quiet period before a free-text search fires.
const SEARCH_DEBOUNCE_MS: u32 = 400;

#[derive(Clone)]
pub struct ExpenseListState {
    pub groups: Vec<ExpenseGroup>,
    pub criteria: ExpenseCriteria,
    pub loading: bool,
    pub last_page: bool,
    pub error: Option<String>,
}

pub struct UseExpensesResult {
    pub state: ExpenseListState,
    pub actions: UseExpensesActions,
}

#[derive(Clone)]
pub struct UseExpensesActions {
    pub set_filter: Callback<CriteriaPatch>,
    pub change_period: Callback<i32>,
    pub load_next_page: Callback<()>,
    pub reload: Callback<()>,
}

/// Owns the expense list: search criteria, the accumulated group collection,
/// and the loading / last-page flags.
///
/// The authoritative criteria and group collection live in `use_mut_ref`
/// cells; the callbacks below are created once and would otherwise read the
/// first render's state snapshots. The `use_state` copies exist purely to
/// drive re-rendering.
///
/// Fetches are serialized through a generation counter: every fetch start
/// bumps it, and a completed fetch applies its result only while its captured
/// generation is still current. Superseded responses are discarded, so the
/// group collection never mixes results from racing requests.
#[hook]
pub fn use_expenses<A>(api_client: &A) -> UseExpensesResult
where
    A: ExpenseApi + Clone + 'static,
{
    let criteria_cell = use_mut_ref(|| ExpenseCriteria::new(date_utils::current_year_month()));
    let groups_cell = use_mut_ref(Vec::<ExpenseGroup>::new);

    let criteria = use_state(|| criteria_cell.borrow().clone());
    let groups = use_state(Vec::<ExpenseGroup>::new);
    let loading = use_state(|| false);
    let last_page = use_state(|| false);
    let error = use_state(|| None::<String>);

    let fetch_generation = use_mut_ref(|| 0u32);
    // At most one pending search timer; replacing the handle drops and
    // thereby cancels the previous one.
    let debounce = use_mut_ref(|| None::<Timeout>);

    let fetch = {
        let api_client = api_client.clone();
        let groups_cell = groups_cell.clone();
        let groups = groups.clone();
        let loading = loading.clone();
        let last_page = last_page.clone();
        let error = error.clone();
        let fetch_generation = fetch_generation.clone();

        let criteria_cell = criteria_cell.clone();
        use_callback((), move |snapshot: ExpenseCriteria, _| {
            *fetch_generation.borrow_mut() += 1;
            let generation = *fetch_generation.borrow();

            let api_client = api_client.clone();
            let criteria_cell = criteria_cell.clone();
            let groups_cell = groups_cell.clone();
            let groups = groups.clone();
            let loading = loading.clone();
            let last_page = last_page.clone();
            let error = error.clone();
            let fetch_generation = fetch_generation.clone();

            spawn_local(async move {
                loading.set(true);
                error.set(None);

                let result = api_client.get_expenses(&snapshot).await;

                if *fetch_generation.borrow() != generation {
                    // A newer fetch owns the state now, including the
                    // loading flag. Drop this response entirely.
                    return;
                }

                match result {
                    Ok(page) => {
                        // The page index is committed only here, so a failed
                        // next-page request is retried at the same index.
                        criteria_cell.borrow_mut().page = snapshot.page;
                        let mode = snapshot.sort.group_key_mode();
                        let merged = apply_page(
                            groups_cell.borrow().clone(),
                            page.content,
                            snapshot.page,
                            mode,
                        );
                        *groups_cell.borrow_mut() = merged.clone();
                        groups.set(merged);
                        last_page.set(page.last);
                    }
                    Err(message) => {
                        // Displayed data stays as it was.
                        Logger::error_with_component("use_expenses", &message);
                        error.set(Some(message));
                    }
                }

                loading.set(false);
            });
        })
    };

    let set_filter = {
        let criteria_cell = criteria_cell.clone();
        let criteria = criteria.clone();
        let fetch = fetch.clone();
        let debounce = debounce.clone();

        use_callback((), move |patch: CriteriaPatch, _| {
            let next = {
                let mut current = criteria_cell.borrow_mut();
                current.merge(&patch);
                current.clone()
            };
            criteria.set(next.clone());

            if patch.debounce_search() {
                let fetch = fetch.clone();
                *debounce.borrow_mut() = Some(Timeout::new(SEARCH_DEBOUNCE_MS, move || {
                    fetch.emit(next);
                }));
            } else {
                debounce.borrow_mut().take();
                fetch.emit(next);
            }
        })
    };

    let change_period = {
        let criteria_cell = criteria_cell.clone();
        let criteria = criteria.clone();
        let fetch = fetch.clone();
        let debounce = debounce.clone();

        use_callback((), move |delta_months: i32, _| {
            let next = {
                let mut current = criteria_cell.borrow_mut();
                current.year_month = current.year_month.shift(delta_months);
                current.page = 0;
                current.clone()
            };
            criteria.set(next.clone());
            debounce.borrow_mut().take();
            fetch.emit(next);
        })
    };

    let load_next_page = {
        let criteria_cell = criteria_cell.clone();
        let fetch = fetch.clone();
        let debounce = debounce.clone();

        use_callback((), move |_, _| {
            // A pending search has already merged its text at page 0 but not
            // fetched yet; flush it instead of paging a collection that was
            // never built for it.
            if debounce.borrow_mut().take().is_some() {
                fetch.emit(criteria_cell.borrow().clone());
                return;
            }
            let mut next = criteria_cell.borrow().clone();
            next.page += 1;
            fetch.emit(next);
        })
    };

    let reload = {
        let criteria_cell = criteria_cell.clone();
        let criteria = criteria.clone();
        let fetch = fetch.clone();
        let debounce = debounce.clone();

        use_callback((), move |_, _| {
            let next = {
                let mut current = criteria_cell.borrow_mut();
                current.page = 0;
                current.clone()
            };
            criteria.set(next.clone());
            debounce.borrow_mut().take();
            fetch.emit(next);
        })
    };

    // Initial load; on unmount, invalidate any in-flight fetch and cancel a
    // pending search timer so a dismounted list never applies late results.
    use_effect_with((), {
        let reload = reload.clone();
        let fetch_generation = fetch_generation.clone();
        let debounce = debounce.clone();
        move |_| {
            reload.emit(());
            move || {
                *fetch_generation.borrow_mut() += 1;
                debounce.borrow_mut().take();
            }
        }
    });

    let state = ExpenseListState {
        groups: (*groups).clone(),
        criteria: (*criteria).clone(),
        loading: *loading,
        last_page: *last_page,
        error: (*error).clone(),
    };

    let actions = UseExpensesActions {
        set_filter,
        change_period,
        load_next_page,
        reload,
    };

    UseExpensesResult { state, actions }
}
