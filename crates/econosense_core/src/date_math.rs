//! Month arithmetic on `jiff::civil::Date` without going through `Span`.
//!
//! Every monthly period is pinned to day 1, so a period can be mapped to a
//! single integer month index (`year * 12 + month - 1`). Differences and
//! offsets then become plain integer arithmetic.

use jiff::civil::Date;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Month index of a date: months elapsed since January of year 0.
#[inline]
pub fn month_index(d: Date) -> i32 {
    i32::from(d.year()) * 12 + i32::from(d.month()) - 1
}

/// Inverse of [`month_index`], returning the first day of that month.
#[inline]
pub fn from_month_index(index: i32) -> Result<Date, jiff::Error> {
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) + 1;
    let year = i16::try_from(year).unwrap_or(i16::MAX);
    Date::new(year, month as i8, 1)
}

/// Number of whole calendar months from `d1` to `d2` (days are ignored).
#[inline]
pub fn months_between(d1: Date, d2: Date) -> i32 {
    month_index(d2) - month_index(d1)
}

/// Shift a date by `n` calendar months, landing on day 1.
#[inline]
pub fn add_months(d: Date, n: i32) -> Result<Date, jiff::Error> {
    from_month_index(month_index(d) + n)
}

/// Resolve an English month name or three-letter abbreviation (case-insensitive).
pub fn month_from_name(name: &str) -> Option<i8> {
    let lower = name.trim().to_ascii_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|full| *full == lower || (lower.len() == 3 && full.starts_with(&lower)))
        .map(|i| i as i8 + 1)
}

/// Parse a month label into the first day of that month.
///
/// Accepted forms: `Jan-2023`, `January-2023`, `Jan 2023`, `2023-01` and
/// full ISO dates such as `2023-01-15` (the day is dropped).
pub fn parse_month_label(label: &str) -> Option<Date> {
    let label = label.trim();

    if let Ok(date) = label.parse::<Date>() {
        return Some(date.first_of_month());
    }

    let (left, right) = label.split_once(['-', ' ', '/'])?;

    // Named month first: "Jan-2023"
    if let Some(month) = month_from_name(left) {
        let year: i16 = right.trim().parse().ok()?;
        return Date::new(year, month, 1).ok();
    }

    // Numeric "2023-01"
    let year: i16 = left.parse().ok()?;
    let month: i8 = right.parse().ok()?;
    Date::new(year, month, 1).ok()
}

/// Short display label for a month, e.g. `Jan-2024`.
pub fn month_label(d: Date) -> String {
    let name = MONTH_NAMES[(d.month() - 1) as usize];
    let mut short: String = name.chars().take(3).collect();
    if let Some(first) = short.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    format!("{short}-{:04}", d.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_month_index_roundtrip() {
        let dates = [date(2023, 1, 1), date(2024, 2, 1), date(1999, 12, 1)];
        for d in dates {
            assert_eq!(from_month_index(month_index(d)).unwrap(), d);
        }
    }

    #[test]
    fn test_months_between() {
        assert_eq!(months_between(date(2023, 1, 1), date(2023, 12, 1)), 11);
        assert_eq!(months_between(date(2023, 12, 1), date(2024, 1, 1)), 1);
        assert_eq!(months_between(date(2024, 3, 31), date(2024, 2, 1)), -1);
    }

    #[test]
    fn test_add_months_across_year() {
        assert_eq!(add_months(date(2023, 12, 1), 1).unwrap(), date(2024, 1, 1));
        assert_eq!(add_months(date(2023, 11, 1), 3).unwrap(), date(2024, 2, 1));
        assert_eq!(add_months(date(2024, 1, 1), -1).unwrap(), date(2023, 12, 1));
    }

    #[test]
    fn test_parse_named_labels() {
        assert_eq!(parse_month_label("Jan-2023"), Some(date(2023, 1, 1)));
        assert_eq!(parse_month_label("sep-2023"), Some(date(2023, 9, 1)));
        assert_eq!(parse_month_label("December 2023"), Some(date(2023, 12, 1)));
    }

    #[test]
    fn test_parse_numeric_labels() {
        assert_eq!(parse_month_label("2023-07"), Some(date(2023, 7, 1)));
        assert_eq!(parse_month_label("2023-07-19"), Some(date(2023, 7, 1)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_month_label("Foo-2023"), None);
        assert_eq!(parse_month_label("2023-13"), None);
        assert_eq!(parse_month_label("2023"), None);
        assert_eq!(parse_month_label(""), None);
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(date(2024, 1, 1)), "Jan-2024");
        assert_eq!(month_label(date(2023, 12, 1)), "Dec-2023");
    }
}
