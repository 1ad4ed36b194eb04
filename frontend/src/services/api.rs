use async_trait::async_trait;
use gloo::net::http::Request;
use shared::{Category, CategoryCriteria, Expense, ExpenseCriteria, Page};

/// Backend operations the hooks depend on. `ApiClient` is the HTTP
/// implementation; tests substitute scripted ones.
#[async_trait(?Send)]
pub trait ExpenseApi {
    /// Fetch one page of expenses matching the given criteria
    async fn get_expenses(&self, criteria: &ExpenseCriteria) -> Result<Page<Expense>, String>;

    /// Create or update an expense. The backend returns no content on success.
    async fn upsert_expense(&self, expense: &Expense) -> Result<(), String>;

    /// Delete an expense by id
    async fn delete_expense(&self, id: &str) -> Result<(), String>;

    /// Fetch the flat category list used for filter and select options
    async fn get_all_categories(&self, criteria: &CategoryCriteria)
        -> Result<Vec<Category>, String>;
}

/// API client for the expense backend.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

fn query_string(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, js_sys::encode_uri_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }
}

#[async_trait(?Send)]
impl ExpenseApi for ApiClient {
    async fn get_expenses(&self, criteria: &ExpenseCriteria) -> Result<Page<Expense>, String> {
        let url = format!(
            "{}/expenses?{}",
            self.base_url,
            query_string(&criteria.query_pairs())
        );

        match Request::get(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Page<Expense>>().await {
                        Ok(page) => Ok(page),
                        Err(e) => Err(format!("Failed to parse expenses: {}", e)),
                    }
                } else {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    Err(error_text)
                }
            }
            Err(e) => Err(format!("Failed to fetch expenses: {}", e)),
        }
    }

    async fn upsert_expense(&self, expense: &Expense) -> Result<(), String> {
        let url = format!("{}/expenses", self.base_url);

        match Request::put(&url)
            .json(expense)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    Ok(())
                } else {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    Err(error_text)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    async fn delete_expense(&self, id: &str) -> Result<(), String> {
        let url = format!("{}/expenses/{}", self.base_url, id);

        match Request::delete(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    Ok(())
                } else {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    Err(error_text)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    async fn get_all_categories(
        &self,
        criteria: &CategoryCriteria,
    ) -> Result<Vec<Category>, String> {
        let url = format!(
            "{}/categories?{}",
            self.base_url,
            query_string(&criteria.query_pairs())
        );

        match Request::get(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Vec<Category>>().await {
                        Ok(categories) => Ok(categories),
                        Err(e) => Err(format!("Failed to parse categories: {}", e)),
                    }
                } else {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    Err(error_text)
                }
            }
            Err(e) => Err(format!("Failed to fetch categories: {}", e)),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
