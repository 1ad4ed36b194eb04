pub mod expense_list;
pub mod expense_modal;
