//! The four form fields and the filters applied while the user types.
//!
//! Filters run on every keystroke (`FormFields::on_*_input`), never at submit
//! time. `snapshot` just reads whatever the fields currently hold.

use crate::models::AnalyzeRequest;
use chrono::NaiveDate;

pub const MIN_DAY_COUNT: i64 = 1;

// ── Input filters ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFilter {
    None,
    Uppercase,
    /// Replace the value with the minimum when its leading integer is below it.
    MinClamp(i64),
}

impl InputFilter {
    pub fn apply(self, raw: &str) -> String {
        match self {
            InputFilter::None => raw.to_string(),
            InputFilter::Uppercase => raw.to_uppercase(),
            InputFilter::MinClamp(min) => match parse_leading_int(raw) {
                Some(n) if n < min => min.to_string(),
                _ => raw.to_string(),
            },
        }
    }
}

/// Parse the integer prefix of `s`.
/// "  42abc" → 42 | "-3" → -3 | "0.5" → 0 | "abc" → None | "" → None
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Overlong digit runs saturate; they are far above any minimum anyway.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

// ── Field ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Field {
    value: String,
    filter: InputFilter,
}

impl Field {
    pub fn new(filter: InputFilter) -> Self {
        Self {
            value: String::new(),
            filter,
        }
    }

    pub fn with_value(filter: InputFilter, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            filter,
        }
    }

    /// Replace the value as a keystroke would: the filter runs on the result.
    pub fn input(&mut self, raw: &str) {
        self.value = self.filter.apply(raw);
    }

    /// Programmatic assignment, bypassing the filter.
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

// ── Form ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FormFields {
    pub ticker: Field,
    pub end_date: Field,
    pub lookback_days: Field,
    pub crossover_days: Field,
}

impl FormFields {
    pub fn new(lookback_days: u32, crossover_days: u32) -> Self {
        Self {
            ticker: Field::new(InputFilter::Uppercase),
            end_date: Field::new(InputFilter::None),
            lookback_days: Field::with_value(
                InputFilter::MinClamp(MIN_DAY_COUNT),
                lookback_days.to_string(),
            ),
            crossover_days: Field::with_value(
                InputFilter::MinClamp(MIN_DAY_COUNT),
                crossover_days.to_string(),
            ),
        }
    }

    /// Page-load initialisation: seed the end date with `today`.
    pub fn on_load(&mut self, today: NaiveDate) {
        self.end_date.set(today.format("%Y-%m-%d").to_string());
    }

    pub fn on_ticker_input(&mut self, raw: &str) {
        self.ticker.input(raw);
    }

    pub fn on_end_date_input(&mut self, raw: &str) {
        self.end_date.input(raw);
    }

    pub fn on_lookback_input(&mut self, raw: &str) {
        self.lookback_days.input(raw);
    }

    pub fn on_crossover_input(&mut self, raw: &str) {
        self.crossover_days.input(raw);
    }

    /// Read the current values into a request body. An empty end date is
    /// sent as an absent value, not as "".
    pub fn snapshot(&self) -> AnalyzeRequest {
        let end_date = match self.end_date.value() {
            "" => None,
            d => Some(d.to_string()),
        };

        AnalyzeRequest {
            ticker: self.ticker.value().to_string(),
            end_date,
            lookback_days: self.lookback_days.value().to_string(),
            crossover_days: self.crossover_days.value().to_string(),
        }
    }
}

impl Default for FormFields {
    fn default() -> Self {
        Self::new(365, 180)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  7days"), Some(7));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("0.5"), Some(0));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn ticker_is_uppercased_on_every_keystroke() {
        let mut form = FormFields::default();
        for typed in ["a", "aa", "aap", "aapl", "brk.b"] {
            form.on_ticker_input(typed);
            assert_eq!(form.ticker.value(), typed.to_uppercase());
        }
    }

    #[test]
    fn day_counts_never_drop_below_one() {
        let mut form = FormFields::default();
        for typed in ["0", "-12", "0.9", "1", "50", "-"] {
            form.on_lookback_input(typed);
            form.on_crossover_input(typed);
            for v in [form.lookback_days.value(), form.crossover_days.value()] {
                if let Some(n) = parse_leading_int(v) {
                    assert!(n >= MIN_DAY_COUNT, "{typed:?} left {v:?}");
                }
            }
        }

        form.on_lookback_input("0");
        assert_eq!(form.lookback_days.value(), "1");
        form.on_crossover_input("50");
        assert_eq!(form.crossover_days.value(), "50");
        // No leading digits: left as typed, like a half-edited field.
        form.on_crossover_input("");
        assert_eq!(form.crossover_days.value(), "");
    }

    #[test]
    fn on_load_seeds_iso_date() {
        let mut form = FormFields::default();
        form.on_load(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
        assert_eq!(form.end_date.value(), "2024-03-07");
    }

    #[test]
    fn snapshot_reads_values_without_refiltering() {
        let mut form = FormFields::new(50, 10);
        form.on_ticker_input("aapl");
        form.on_load(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        // Programmatic writes skip the keystroke filters.
        form.lookback_days.set("0");

        let req = form.snapshot();
        assert_eq!(req.ticker, "AAPL");
        assert_eq!(req.end_date.as_deref(), Some("2024-01-02"));
        assert_eq!(req.lookback_days, "0");
        assert_eq!(req.crossover_days, "10");
    }

    #[test]
    fn cleared_end_date_becomes_none() {
        let mut form = FormFields::default();
        form.on_load(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        form.on_end_date_input("");
        assert_eq!(form.snapshot().end_date, None);
    }
}
