use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of an expense name, enforced before any upsert is sent.
pub const MAX_NAME_LENGTH: usize = 40;

/// Default page size for expense list requests.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Expense record as served by the backend.
///
/// `category` is populated on reads; an upsert carries `category_id` instead
/// and leaves `category` empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub amount: f64,
    /// RFC 3339 timestamp
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

/// Category reference. Read-only from the expense list's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// One server-returned batch of records plus the last-page indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub last: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    Date,
    Name,
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort specification, rendered on the wire as e.g. "date,desc".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl ExpenseSort {
    pub const DATE_DESC: ExpenseSort = ExpenseSort {
        field: SortField::Date,
        direction: SortDirection::Desc,
    };

    pub const NAME_ASC: ExpenseSort = ExpenseSort {
        field: SortField::Name,
        direction: SortDirection::Asc,
    };

    pub fn to_param(self) -> String {
        let field = match self.field {
            SortField::Date => "date",
            SortField::Name => "name",
            SortField::Amount => "amount",
        };
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        format!("{},{}", field, direction)
    }

    /// Parse a "field,direction" string, e.g. from a sort select element.
    pub fn parse(value: &str) -> Option<ExpenseSort> {
        let (field, direction) = value.split_once(',')?;
        let field = match field {
            "date" => SortField::Date,
            "name" => SortField::Name,
            "amount" => SortField::Amount,
            _ => return None,
        };
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return None,
        };
        Some(ExpenseSort { field, direction })
    }

    /// Grouping key used for display: calendar date when sorting by date,
    /// record identity otherwise.
    pub fn group_key_mode(self) -> GroupKeyMode {
        match self.field {
            SortField::Date => GroupKeyMode::Date,
            _ => GroupKeyMode::Id,
        }
    }
}

/// Active year and month driving the expense list, rendered as "yyyyMM".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based month
    pub month: u32,
}

impl YearMonth {
    /// Shift by the given number of months, wrapping across year boundaries
    /// in both directions.
    pub fn shift(self, delta_months: i32) -> YearMonth {
        let total = self.year * 12 + (self.month as i32 - 1) + delta_months;
        YearMonth {
            year: total.div_euclid(12),
            month: (total.rem_euclid(12) + 1) as u32,
        }
    }

    pub fn to_param(self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }

    /// Display label, e.g. "January 2024".
    pub fn display(self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "January",
    }
}

/// Format a `YYYY-MM-DD` group key for display, e.g. "January 15, 2024".
pub fn format_group_date(key: &str) -> String {
    match chrono::NaiveDate::parse_from_str(key, "%Y-%m-%d") {
        Ok(date) => format!("{} {}, {}", month_name(date.month()), date.day(), date.year()),
        Err(_) => key.to_string(),
    }
}

/// Filter, sort and pagination parameters driving every expense list fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCriteria {
    pub page: u32,
    pub size: u32,
    pub sort: ExpenseSort,
    pub year_month: YearMonth,
    pub name: Option<String>,
    pub category_ids: Vec<String>,
}

impl ExpenseCriteria {
    pub fn new(year_month: YearMonth) -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: ExpenseSort::DATE_DESC,
            year_month,
            name: None,
            category_ids: Vec::new(),
        }
    }

    /// Apply a partial criteria update. Any filter change resets the page
    /// back to 0.
    pub fn merge(&mut self, patch: &CriteriaPatch) {
        if patch.is_empty() {
            return;
        }
        // The raw text is kept so controlled inputs render exactly what was
        // typed; trimming happens when the query is built.
        if let Some(name) = &patch.name {
            self.name = if name.is_empty() {
                None
            } else {
                Some(name.clone())
            };
        }
        if let Some(category_ids) = &patch.category_ids {
            self.category_ids = category_ids.clone();
        }
        if let Some(sort) = patch.sort {
            self.sort = sort;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        self.page = 0;
    }

    /// Query parameters for `GET /expenses`. Empty name and category filters
    /// are omitted rather than sent as empty strings.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sort", self.sort.to_param()),
            ("yearMonth", self.year_month.to_param()),
        ];
        if let Some(name) = self.name.as_deref() {
            let trimmed = name.trim();
            if !trimmed.is_empty() {
                pairs.push(("name", trimmed.to_string()));
            }
        }
        if !self.category_ids.is_empty() {
            pairs.push(("categoryIds", self.category_ids.join(",")));
        }
        pairs
    }
}

/// Partial update to [`ExpenseCriteria`]. `Some("")` for `name` clears the
/// name filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CriteriaPatch {
    pub name: Option<String>,
    pub category_ids: Option<Vec<String>>,
    pub sort: Option<ExpenseSort>,
    pub size: Option<u32>,
}

impl CriteriaPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category_ids.is_none()
            && self.sort.is_none()
            && self.size.is_none()
    }

    /// Free-text search is debounced; everything else fires immediately.
    pub fn debounce_search(&self) -> bool {
        matches!(&self.name, Some(name) if !name.trim().is_empty())
    }
}

/// Parameters for the flat category listing used to populate select options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCriteria {
    pub sort: ExpenseSort,
    pub name: Option<String>,
}

impl Default for CategoryCriteria {
    fn default() -> Self {
        Self {
            sort: ExpenseSort::NAME_ASC,
            name: None,
        }
    }
}

impl CategoryCriteria {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("sort", self.sort.to_param())];
        if let Some(name) = self.name.as_deref() {
            if !name.trim().is_empty() {
                pairs.push(("name", name.to_string()));
            }
        }
        pairs
    }
}

/// How expenses are bucketed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKeyMode {
    /// Group by calendar date (`YYYY-MM-DD`).
    Date,
    /// Every record is its own group.
    Id,
}

/// A display bucket of expenses sharing a key, sorted by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseGroup {
    pub key: String,
    pub expenses: Vec<Expense>,
}

fn group_key(expense: &Expense, mode: GroupKeyMode) -> String {
    match mode {
        GroupKeyMode::Date => expense
            .date
            .split('T')
            .next()
            .unwrap_or(&expense.date)
            .to_string(),
        GroupKeyMode::Id => expense.id.clone().unwrap_or_default(),
    }
}

fn sort_by_name(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}

/// Bucket one fetched page by key, preserving first-encounter order of keys.
/// Each bucket is sorted by name, case-insensitively.
pub fn group_page(expenses: Vec<Expense>, mode: GroupKeyMode) -> Vec<ExpenseGroup> {
    let mut groups: Vec<ExpenseGroup> = Vec::new();
    for expense in expenses {
        let key = group_key(&expense, mode);
        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => group.expenses.push(expense),
            None => groups.push(ExpenseGroup {
                key,
                expenses: vec![expense],
            }),
        }
    }
    for group in &mut groups {
        sort_by_name(&mut group.expenses);
    }
    groups
}

/// Fold newly fetched groups into the displayed collection. Colliding keys
/// merge their records and re-sort by name; new keys append in order.
pub fn merge_groups(
    mut existing: Vec<ExpenseGroup>,
    incoming: Vec<ExpenseGroup>,
) -> Vec<ExpenseGroup> {
    for group in incoming {
        match existing.iter_mut().find(|g| g.key == group.key) {
            Some(hit) => {
                hit.expenses.extend(group.expenses);
                sort_by_name(&mut hit.expenses);
            }
            None => existing.push(group),
        }
    }
    existing
}

/// Apply one fetched page to the accumulated group collection. A page-0
/// fetch replaces the collection; later pages merge into it. An empty page
/// past page 0 leaves the collection untouched.
pub fn apply_page(
    existing: Vec<ExpenseGroup>,
    content: Vec<Expense>,
    page: u32,
    mode: GroupKeyMode,
) -> Vec<ExpenseGroup> {
    let incoming = group_page(content, mode);
    if page == 0 {
        incoming
    } else {
        merge_groups(existing, incoming)
    }
}

/// Client-side validation errors, surfaced inline before any request is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidAmount(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyName => write!(f, "Name is required"),
            ValidationError::NameTooLong(length) => write!(
                f,
                "Name must be at most {} characters (got {})",
                MAX_NAME_LENGTH, length
            ),
            ValidationError::InvalidAmount(raw) => {
                write!(f, "'{}' is not a valid amount", raw)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Editable form state for creating or updating an expense.
///
/// Always built from a copy of the selected record so that edits never leak
/// into the displayed list before submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseForm {
    pub id: Option<String>,
    pub name: String,
    pub amount_input: String,
    pub date: String,
    pub category_id: Option<String>,
}

impl ExpenseForm {
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            id: expense.id.clone(),
            name: expense.name.clone(),
            amount_input: format!("{:.2}", expense.amount),
            date: expense.date.clone(),
            category_id: expense
                .category_id
                .clone()
                .or_else(|| expense.category.as_ref().map(|c| c.id.clone())),
        }
    }

    /// Blank form for a new record, dated now and with no category.
    pub fn new_default(now_rfc3339: String) -> Self {
        Self {
            date: now_rfc3339,
            ..Default::default()
        }
    }

    /// Validate the form and build the upsert body. Returns every violation
    /// found so they can all be surfaced at once.
    pub fn validate(&self) -> Result<Expense, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::EmptyName);
        } else if name.chars().count() > MAX_NAME_LENGTH {
            errors.push(ValidationError::NameTooLong(name.chars().count()));
        }

        let raw_amount = self.amount_input.trim();
        let amount = if raw_amount.is_empty() {
            0.0
        } else {
            match raw_amount.parse::<f64>() {
                Ok(value) => value,
                Err(_) => {
                    errors.push(ValidationError::InvalidAmount(raw_amount.to_string()));
                    0.0
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Expense {
            id: self.id.clone(),
            name: name.to_string(),
            amount,
            date: self.date.clone(),
            category: None,
            category_id: self.category_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: &str, name: &str, date: &str) -> Expense {
        Expense {
            id: Some(id.to_string()),
            name: name.to_string(),
            amount: 10.0,
            date: date.to_string(),
            category: None,
            category_id: None,
        }
    }

    fn names(group: &ExpenseGroup) -> Vec<&str> {
        group.expenses.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_year_month_shift_wraps_forward() {
        let december = YearMonth {
            year: 2023,
            month: 12,
        };
        assert_eq!(
            december.shift(1),
            YearMonth {
                year: 2024,
                month: 1
            }
        );
        assert_eq!(
            december.shift(13),
            YearMonth {
                year: 2025,
                month: 1
            }
        );
    }

    #[test]
    fn test_year_month_shift_wraps_backward() {
        let january = YearMonth {
            year: 2024,
            month: 1,
        };
        assert_eq!(
            january.shift(-1),
            YearMonth {
                year: 2023,
                month: 12
            }
        );
        assert_eq!(
            january.shift(-12),
            YearMonth {
                year: 2023,
                month: 1
            }
        );
    }

    #[test]
    fn test_year_month_param_is_zero_padded() {
        let year_month = YearMonth {
            year: 2024,
            month: 1,
        };
        assert_eq!(year_month.to_param(), "202401");
    }

    #[test]
    fn test_sort_param_round_trip() {
        assert_eq!(ExpenseSort::DATE_DESC.to_param(), "date,desc");
        assert_eq!(ExpenseSort::parse("date,desc"), Some(ExpenseSort::DATE_DESC));
        assert_eq!(ExpenseSort::parse("name,asc"), Some(ExpenseSort::NAME_ASC));
        assert_eq!(ExpenseSort::parse("garbage"), None);
        assert_eq!(ExpenseSort::parse("name,sideways"), None);
    }

    #[test]
    fn test_merge_resets_page_on_any_filter_change() {
        let mut criteria = ExpenseCriteria::new(YearMonth {
            year: 2024,
            month: 1,
        });
        criteria.page = 3;
        criteria.merge(&CriteriaPatch {
            sort: Some(ExpenseSort::NAME_ASC),
            ..Default::default()
        });
        assert_eq!(criteria.page, 0);
        assert_eq!(criteria.sort, ExpenseSort::NAME_ASC);

        criteria.page = 2;
        criteria.merge(&CriteriaPatch {
            name: Some("groceries".to_string()),
            ..Default::default()
        });
        assert_eq!(criteria.page, 0);
        assert_eq!(criteria.name.as_deref(), Some("groceries"));
    }

    #[test]
    fn test_merge_with_empty_patch_keeps_page() {
        let mut criteria = ExpenseCriteria::new(YearMonth {
            year: 2024,
            month: 1,
        });
        criteria.page = 2;
        criteria.merge(&CriteriaPatch::default());
        assert_eq!(criteria.page, 2);
    }

    #[test]
    fn test_empty_name_filter_is_cleared() {
        let mut criteria = ExpenseCriteria::new(YearMonth {
            year: 2024,
            month: 1,
        });
        criteria.merge(&CriteriaPatch {
            name: Some("coffee".to_string()),
            ..Default::default()
        });
        criteria.merge(&CriteriaPatch {
            name: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(criteria.name, None);
    }

    #[test]
    fn test_search_text_kept_raw_but_trimmed_in_query() {
        let mut criteria = ExpenseCriteria::new(YearMonth {
            year: 2024,
            month: 1,
        });
        // A trailing space mid-typing must survive in the criteria, or a
        // re-render of the controlled input would drop it.
        criteria.merge(&CriteriaPatch {
            name: Some("coffee ".to_string()),
            ..Default::default()
        });
        assert_eq!(criteria.name.as_deref(), Some("coffee "));
        assert!(criteria
            .query_pairs()
            .contains(&("name", "coffee".to_string())));

        // Whitespace-only text is kept too but never sent.
        criteria.merge(&CriteriaPatch {
            name: Some("   ".to_string()),
            ..Default::default()
        });
        assert_eq!(criteria.name.as_deref(), Some("   "));
        assert!(criteria
            .query_pairs()
            .iter()
            .all(|(key, _)| *key != "name"));
    }

    #[test]
    fn test_query_pairs_omit_empty_filters() {
        let criteria = ExpenseCriteria::new(YearMonth {
            year: 2024,
            month: 1,
        });
        let pairs = criteria.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("page", "0".to_string()),
                ("size", "25".to_string()),
                ("sort", "date,desc".to_string()),
                ("yearMonth", "202401".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_include_set_filters() {
        let mut criteria = ExpenseCriteria::new(YearMonth {
            year: 2024,
            month: 1,
        });
        criteria.name = Some("coffee".to_string());
        criteria.category_ids = vec!["cat-1".to_string(), "cat-2".to_string()];
        let pairs = criteria.query_pairs();
        assert!(pairs.contains(&("name", "coffee".to_string())));
        assert!(pairs.contains(&("categoryIds", "cat-1,cat-2".to_string())));
    }

    #[test]
    fn test_category_query_defaults_to_name_sort() {
        let criteria = CategoryCriteria::default();
        assert_eq!(criteria.query_pairs(), vec![("sort", "name,asc".to_string())]);

        let searched = CategoryCriteria {
            name: Some("Fo".to_string()),
            ..Default::default()
        };
        assert!(searched.query_pairs().contains(&("name", "Fo".to_string())));
    }

    #[test]
    fn test_debounce_only_for_nonempty_search_text() {
        let with_text = CriteriaPatch {
            name: Some("cof".to_string()),
            ..Default::default()
        };
        assert!(with_text.debounce_search());

        let cleared = CriteriaPatch {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(!cleared.debounce_search());

        let sort_only = CriteriaPatch {
            sort: Some(ExpenseSort::NAME_ASC),
            ..Default::default()
        };
        assert!(!sort_only.debounce_search());
    }

    #[test]
    fn test_group_page_by_date_sorts_within_group_by_name() {
        let page = vec![
            expense("1", "Groceries", "2024-01-15T10:00:00Z"),
            expense("2", "bus ticket", "2024-01-15T12:00:00Z"),
            expense("3", "Cinema", "2024-01-14T20:00:00Z"),
        ];
        let groups = group_page(page, GroupKeyMode::Date);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "2024-01-15");
        assert_eq!(names(&groups[0]), vec!["bus ticket", "Groceries"]);
        assert_eq!(groups[1].key, "2024-01-14");
        assert_eq!(names(&groups[1]), vec!["Cinema"]);
    }

    #[test]
    fn test_group_page_by_id_keeps_one_record_per_group() {
        let page = vec![
            expense("1", "Groceries", "2024-01-15T10:00:00Z"),
            expense("2", "Cinema", "2024-01-15T12:00:00Z"),
        ];
        let groups = group_page(page, GroupKeyMode::Id);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "1");
        assert_eq!(groups[1].key, "2");
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let page = vec![
            expense("1", "Groceries", "2024-01-15T10:00:00Z"),
            expense("2", "bus ticket", "2024-01-15T12:00:00Z"),
            expense("3", "Cinema", "2024-01-14T20:00:00Z"),
        ];
        let groups = group_page(page, GroupKeyMode::Date);
        let flattened: Vec<Expense> = groups
            .iter()
            .flat_map(|g| g.expenses.iter().cloned())
            .collect();
        let regrouped = group_page(flattened, GroupKeyMode::Date);
        assert_eq!(groups, regrouped);
    }

    #[test]
    fn test_merge_overlapping_keys_loses_nothing() {
        let first = group_page(
            vec![
                expense("1", "Lunch", "2024-01-15T10:00:00Z"),
                expense("2", "Coffee", "2024-01-15T11:00:00Z"),
            ],
            GroupKeyMode::Date,
        );
        let second = group_page(
            vec![
                expense("3", "Bus", "2024-01-15T18:00:00Z"),
                expense("4", "Dinner", "2024-01-14T20:00:00Z"),
            ],
            GroupKeyMode::Date,
        );
        let merged = merge_groups(first, second);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].key, "2024-01-15");
        assert_eq!(names(&merged[0]), vec!["Bus", "Coffee", "Lunch"]);
        assert_eq!(merged[1].key, "2024-01-14");
        assert_eq!(names(&merged[1]), vec!["Dinner"]);

        let total: usize = merged.iter().map(|g| g.expenses.len()).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_apply_page_zero_replaces_collection() {
        let existing = group_page(
            vec![expense("1", "Old", "2023-12-01T10:00:00Z")],
            GroupKeyMode::Date,
        );
        let replaced = apply_page(
            existing,
            vec![expense("2", "New", "2024-01-15T10:00:00Z")],
            0,
            GroupKeyMode::Date,
        );
        assert_eq!(replaced.len(), 1);
        assert_eq!(replaced[0].key, "2024-01-15");
    }

    #[test]
    fn test_apply_empty_later_page_keeps_groups() {
        let existing = group_page(
            vec![expense("1", "Lunch", "2024-01-15T10:00:00Z")],
            GroupKeyMode::Date,
        );
        let unchanged = apply_page(existing.clone(), Vec::new(), 1, GroupKeyMode::Date);
        assert_eq!(unchanged, existing);
    }

    #[test]
    fn test_next_page_merges_into_existing_date_group() {
        // Page 0, size 2: two records on 2024-01-15.
        let page_zero = apply_page(
            Vec::new(),
            vec![
                expense("1", "Lunch", "2024-01-15T10:00:00Z"),
                expense("2", "Coffee", "2024-01-15T11:00:00Z"),
            ],
            0,
            GroupKeyMode::Date,
        );
        assert_eq!(page_zero.len(), 1);
        assert_eq!(names(&page_zero[0]), vec!["Coffee", "Lunch"]);

        // Page 1 brings one more record on the same date.
        let page_one = apply_page(
            page_zero,
            vec![expense("3", "Bus", "2024-01-15T18:00:00Z")],
            1,
            GroupKeyMode::Date,
        );
        assert_eq!(page_one.len(), 1);
        assert_eq!(names(&page_one[0]), vec!["Bus", "Coffee", "Lunch"]);
    }

    #[test]
    fn test_format_group_date() {
        assert_eq!(format_group_date("2024-01-15"), "January 15, 2024");
        assert_eq!(format_group_date("not-a-date"), "not-a-date");
    }

    #[test]
    fn test_form_from_expense_copies_instead_of_aliasing() {
        let original = Expense {
            id: Some("1".to_string()),
            name: "Lunch".to_string(),
            amount: 12.5,
            date: "2024-01-15T10:00:00Z".to_string(),
            category: Some(Category {
                id: "cat-1".to_string(),
                name: "Food".to_string(),
            }),
            category_id: None,
        };
        let mut form = ExpenseForm::from_expense(&original);
        assert_eq!(form.category_id.as_deref(), Some("cat-1"));

        form.name = "Brunch".to_string();
        assert_eq!(original.name, "Lunch");
    }

    #[test]
    fn test_new_default_form_has_timestamp_and_no_category() {
        let form = ExpenseForm::new_default("2024-01-15T10:00:00Z".to_string());
        assert_eq!(form.date, "2024-01-15T10:00:00Z");
        assert_eq!(form.id, None);
        assert_eq!(form.category_id, None);
        assert!(form.name.is_empty());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let form = ExpenseForm::new_default("2024-01-15T10:00:00Z".to_string());
        let errors = form.validate().unwrap_err();
        assert_eq!(errors, vec![ValidationError::EmptyName]);
    }

    #[test]
    fn test_validate_rejects_overlong_name() {
        let mut form = ExpenseForm::new_default("2024-01-15T10:00:00Z".to_string());
        form.name = "x".repeat(MAX_NAME_LENGTH + 1);
        let errors = form.validate().unwrap_err();
        assert_eq!(errors, vec![ValidationError::NameTooLong(MAX_NAME_LENGTH + 1)]);
    }

    #[test]
    fn test_validate_rejects_unparseable_amount() {
        let mut form = ExpenseForm::new_default("2024-01-15T10:00:00Z".to_string());
        form.name = "Lunch".to_string();
        form.amount_input = "twelve".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidAmount("twelve".to_string())]
        );
    }

    #[test]
    fn test_validate_builds_upsert_body() {
        let mut form = ExpenseForm::new_default("2024-01-15T10:00:00Z".to_string());
        form.name = "  Lunch  ".to_string();
        form.amount_input = "12.50".to_string();
        form.category_id = Some("cat-1".to_string());

        let expense = form.validate().unwrap();
        assert_eq!(expense.name, "Lunch");
        assert_eq!(expense.amount, 12.5);
        assert_eq!(expense.category_id.as_deref(), Some("cat-1"));
        assert_eq!(expense.id, None);
    }

    #[test]
    fn test_validate_allows_empty_amount() {
        let mut form = ExpenseForm::new_default("2024-01-15T10:00:00Z".to_string());
        form.name = "Lunch".to_string();
        let expense = form.validate().unwrap();
        assert_eq!(expense.amount, 0.0);
    }

    #[test]
    fn test_expense_wire_format_uses_camel_case() {
        let expense = Expense {
            id: Some("1".to_string()),
            name: "Lunch".to_string(),
            amount: 12.5,
            date: "2024-01-15T10:00:00Z".to_string(),
            category: None,
            category_id: Some("cat-1".to_string()),
        };
        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["categoryId"], "cat-1");
        assert!(json.get("category").is_none());
    }

    #[test]
    fn test_page_last_flag_round_trips() {
        let json = r#"{"content":[{"id":"1","name":"Lunch","amount":12.5,"date":"2024-01-15T10:00:00Z"}],"last":true}"#;
        let page: Page<Expense> = serde_json::from_str(json).unwrap();
        assert!(page.last);
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].category, None);
    }
}
