use chrono::NaiveDate;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];

/// Parse a round date as it was recorded. Returns `None` when no known format matches.
#[must_use]
pub fn parse_round_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Sort key for a recorded date; unparseable dates sort before everything else.
#[must_use]
pub fn date_sort_key(s: &str) -> NaiveDate {
    parse_round_date(s).unwrap_or(NaiveDate::MIN)
}

/// Round half away from zero to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean of a non-empty slice, `None` when empty.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[must_use]
pub fn format_vs_par(n: i32) -> String {
    match n {
        0 => "E".to_string(),
        n if n > 0 => format!("+{n}"),
        n => format!("{n}"),
    }
}
