use shared::YearMonth;

/// Current timestamp as RFC 3339, used to date a brand-new expense.
pub fn now_rfc3339() -> String {
    use js_sys::Date;
    Date::new_0()
        .to_iso_string()
        .as_string()
        .unwrap_or_default()
}

/// Year and month of today, the initial period shown by the expense list.
pub fn current_year_month() -> YearMonth {
    use js_sys::Date;
    let now = Date::new_0();
    YearMonth {
        year: now.get_full_year() as i32,
        // JavaScript months are 0-indexed
        month: now.get_month() + 1,
    }
}
