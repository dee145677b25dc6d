use chrono::{Local, NaiveDate};

/// Today's date in the machine's local timezone, used to seed the end-date field.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_today_formats_as_iso() {
        let today = local_today().format("%Y-%m-%d").to_string();
        assert_eq!(today.len(), 10);
        assert_eq!(NaiveDate::parse_from_str(&today, "%Y-%m-%d").unwrap(), local_today());
    }
}
