use crate::services::api::ExpenseApi;
use crate::services::logging::Logger;
use shared::{Category, CategoryCriteria};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Clone)]
pub struct CategoryState {
    pub categories: Vec<Category>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseCategoriesResult {
    pub state: CategoryState,
    pub actions: UseCategoriesActions,
}

#[derive(Clone)]
pub struct UseCategoriesActions {
    pub refresh: Callback<()>,
}

/// Loads the category options for the filter bar and the expense modal.
/// The list stays usable when this fails; the error is surfaced separately.
#[hook]
pub fn use_categories<A>(api_client: &A) -> UseCategoriesResult
where
    A: ExpenseApi + Clone + 'static,
{
    let categories = use_state(Vec::<Category>::new);
    let loading = use_state(|| false);
    let error = use_state(|| None::<String>);

    let refresh = {
        let api_client = api_client.clone();
        let categories = categories.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let categories = categories.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                loading.set(true);
                error.set(None);

                match api_client.get_all_categories(&CategoryCriteria::default()).await {
                    Ok(result) => {
                        categories.set(result);
                    }
                    Err(message) => {
                        Logger::error_with_component("use_categories", &message);
                        error.set(Some(message));
                    }
                }

                loading.set(false);
            });
        })
    };

    // Load options once on mount
    use_effect_with((), {
        let refresh = refresh.clone();
        move |_| {
            refresh.emit(());
            || ()
        }
    });

    let state = CategoryState {
        categories: (*categories).clone(),
        loading: *loading,
        error: (*error).clone(),
    };

    let actions = UseCategoriesActions { refresh };

    UseCategoriesResult { state, actions }
}
