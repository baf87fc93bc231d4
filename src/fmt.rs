//! Shared formatting helpers for table columns and detail popups.
//!
//! Pure string formatting only; no styles and no layout.

use chrono::{DateTime, NaiveDate, Utc};

/// Format integer cents as a currency amount: `1234` → `"$12.34"`.
pub fn format_money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{}${}.{:02}", sign, abs / 100, abs % 100)
}

/// Parse a money amount into cents: `"12.34"` → `1234`, `"12"` → `1200`.
///
/// Accepts an optional leading `$` and at most two decimal digits.
pub fn parse_money(input: &str) -> Option<i64> {
    let s = input.trim().trim_start_matches('$');
    if s.is_empty() {
        return None;
    }
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let whole: i64 = whole.parse().ok()?;
    let frac_cents: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };
    Some(whole * 100 + if whole < 0 { -frac_cents } else { frac_cents })
}

/// Timestamp as `YYYY-MM-DD HH:MM`.
pub fn format_datetime(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Date as `YYYY-MM-DD`.
pub fn format_date(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Truncate with a trailing ellipsis when over `max_len`.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_formats_cents() {
        assert_eq!(format_money(0), "$0.00");
        assert_eq!(format_money(749), "$7.49");
        assert_eq!(format_money(120_000), "$1200.00");
        assert_eq!(format_money(-1234), "-$12.34");
    }

    #[test]
    fn money_parses_common_forms() {
        assert_eq!(parse_money("12.34"), Some(1234));
        assert_eq!(parse_money("12"), Some(1200));
        assert_eq!(parse_money("12.5"), Some(1250));
        assert_eq!(parse_money("$7.49"), Some(749));
        assert_eq!(parse_money(""), None);
        assert_eq!(parse_money("12.345"), None);
        assert_eq!(parse_money("abc"), None);
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer string", 8), "a longe…");
    }
}
