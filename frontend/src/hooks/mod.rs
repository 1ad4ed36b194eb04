pub mod use_categories;
pub mod use_expense_form;
pub mod use_expenses;
