//! pt-BR display formatting for dates, money and counts

use chrono::NaiveDate;

/// Format ISO date to DD/MM/YYYY
/// Example: "2025-05-31" or "2025-05-31T10:00:00" -> "31/05/2025"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => date_str.to_string(),
    }
}

/// Group digits by thousands with `.` and use `,` for decimals
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((integer, decimal)) => (integer, Some(decimal)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let mut result: String = grouped.chars().rev().collect();

    if let Some(decimal) = decimal_part {
        result.push(',');
        result.push_str(decimal);
    }
    // "-0,00" reads oddly; negative only when something non-zero is shown
    if value < 0.0 && result.chars().any(|c| c.is_ascii_digit() && c != '0') {
        result.insert(0, '-');
    }
    result
}

/// Example: 1234.5 -> "R$ 1.234,50"
pub fn format_currency(value: f64) -> String {
    format!("R$ {}", format_number_with_decimals(value, 2))
}

pub fn format_number(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

/// Example: 12.345 -> "12.3%"
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Compact age of an update: "42s", "5min", "3h", "2d"
pub fn format_time_ago(seconds: i64) -> String {
    let seconds = seconds.max(0);
    match seconds {
        s if s < 60 => format!("{}s", s),
        s if s < 3_600 => format!("{}min", s / 60),
        s if s < 86_400 => format!("{}h", s / 3_600),
        s => format!("{}d", s / 86_400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2025-05-31"), "31/05/2025");
        assert_eq!(format_date("2025-05-31T10:00:00"), "31/05/2025");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5), "R$ 1.234,50");
        assert_eq!(format_currency(1234567.891), "R$ 1.234.567,89");
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(-980.0), "R$ -980,00");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234567.0), "1.234.567");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(-0.2), "0");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(12.345), "12.3%");
    }

    #[test]
    fn test_format_time_ago() {
        assert_eq!(format_time_ago(42), "42s");
        assert_eq!(format_time_ago(59), "59s");
        assert_eq!(format_time_ago(60), "1min");
        assert_eq!(format_time_ago(3_599), "59min");
        assert_eq!(format_time_ago(7_200), "2h");
        assert_eq!(format_time_ago(172_800), "2d");
        assert_eq!(format_time_ago(-5), "0s");
    }
}
