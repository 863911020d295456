//! Display formatting helpers for dates, money and percentages.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse the timestamp shapes the backend emits: RFC 3339, naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]`, or a bare date.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// "Mar 1, 2025 10:04"; unparseable input is returned unchanged
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%b %-d, %Y %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// "Mar 1, 2025"; unparseable input is returned unchanged
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Coarse relative age such as "5 minutes ago", measured against `now`
pub fn relative_time(raw: &str, now: NaiveDateTime) -> String {
    let Some(then) = parse_timestamp(raw) else {
        return raw.to_string();
    };
    let seconds = (now - then).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }
    let (amount, unit) = if seconds < 3_600 {
        (seconds / 60, "minute")
    } else if seconds < 86_400 {
        (seconds / 3_600, "hour")
    } else if seconds < 30 * 86_400 {
        (seconds / 86_400, "day")
    } else {
        return format_date(raw);
    };
    if amount == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", amount, unit)
    }
}

/// Two decimals with thousands separators: `1234567.5` → `"1,234,567.50"`
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}.{:02}", if negative { "-" } else { "" }, grouped, cents % 100)
}

/// `part / whole * 100`, or 0 when `whole` is not positive
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 || !whole.is_finite() || !part.is_finite() {
        return 0.0;
    }
    part / whole * 100.0
}

/// Percentage clamped into `[0, 100]` for progress bars
pub fn progress_percent(part: f64, whole: f64) -> f64 {
    percentage(part, whole).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_variants() {
        assert!(parse_timestamp("2025-03-01T10:04:00Z").is_some());
        assert!(parse_timestamp("2025-03-01T10:04:00.123456").is_some());
        assert!(parse_timestamp("2025-03-01 10:04:00").is_some());
        assert!(parse_timestamp("2025-03-01").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2025-03-01T10:04:00"), "Mar 1, 2025 10:04");
        assert_eq!(format_date("2025-12-24"), "Dec 24, 2025");
        assert_eq!(format_date("not a date"), "not a date");
    }

    #[test]
    fn test_relative_time() {
        let now = parse_timestamp("2025-03-01T12:00:00").unwrap();
        assert_eq!(relative_time("2025-03-01T11:59:30", now), "just now");
        assert_eq!(relative_time("2025-03-01T11:55:00", now), "5 minutes ago");
        assert_eq!(relative_time("2025-03-01T11:00:00", now), "1 hour ago");
        assert_eq!(relative_time("2025-02-27T12:00:00", now), "2 days ago");
        assert_eq!(relative_time("2024-12-01T12:00:00", now), "Dec 1, 2024");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(1234567.5), "1,234,567.50");
        assert_eq!(format_amount(-42.1), "-42.10");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(25.0, 200.0), 12.5);
        assert_eq!(percentage(10.0, 0.0), 0.0);
        assert_eq!(progress_percent(300.0, 200.0), 100.0);
        assert_eq!(progress_percent(-5.0, 200.0), 0.0);
    }
}
