//! Number formatting for text reports

/// Insert thousands separators into a non-negative whole number
fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Format a currency value with cents, e.g. `$25,093.17` or `-$1,200.00`
pub fn format_currency(value: f64) -> String {
    let cents_total = (value.abs() * 100.0).round() as u64;
    let dollars = cents_total / 100;
    let cents = cents_total % 100;
    let sign = if value < 0.0 && cents_total > 0 { "-" } else { "" };
    format!("{sign}${}.{cents:02}", group_thousands(dollars))
}

/// Format a currency value without cents (for table columns)
pub fn format_currency_short(value: f64) -> String {
    let dollars = value.abs().round() as u64;
    let sign = if value < 0.0 && dollars > 0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(dollars))
}

/// Format a value already in percent units with one decimal, e.g. `51.9%`
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Format a 0-1 probability as a percentage, e.g. `0.125` -> `12.5%`
pub fn format_probability(value: f64) -> String {
    format_percent(value * 100.0)
}
