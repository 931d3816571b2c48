use colored::{ColoredString, Colorize};
use unicode_width::UnicodeWidthStr;
use crate::eligibility::EligibilityStatus;

/// Format whole dollars with thousands separators, e.g. `$30,000`.
pub fn format_usd(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${}", grouped)
}

/// One-line threshold summary for a visa, e.g. `min age 50, min income $24,000`.
pub fn format_thresholds(min_age: Option<u32>, min_income_usd: Option<u32>) -> String {
    let mut parts = Vec::new();
    if let Some(age) = min_age {
        parts.push(format!("min age {}", age));
    }
    if let Some(income) = min_income_usd {
        parts.push(format!("min income {}", format_usd(income)));
    }
    if parts.is_empty() {
        "no thresholds".to_string()
    } else {
        parts.join(", ")
    }
}

/// Status text colored like the map legend.
pub fn colored_status(status: EligibilityStatus) -> ColoredString {
    paint_status(status, &status.to_string())
}

pub fn paint_status(status: EligibilityStatus, text: &str) -> ColoredString {
    match status {
        EligibilityStatus::Eligible => text.green().bold(),
        EligibilityStatus::Ineligible => text.bright_black(),
        EligibilityStatus::Unknown => text.dimmed(),
    }
}

/// Left-align `text` to `width` terminal columns.
pub fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{}{}", text, " ".repeat(fill))
}

/// Print a formatted table border
pub fn print_table_border(width: usize) {
    println!("{}", "=".repeat(width));
}

/// Print a table row with columns padded by display width
pub fn print_table_row(columns: &[&str], widths: &[usize]) {
    println!("{}", table_row(columns, widths));
}

pub fn table_row(columns: &[&str], widths: &[usize]) -> String {
    let mut row = String::new();
    for (col, width) in columns.iter().zip(widths) {
        row.push_str(&pad(col, *width));
        row.push_str("  ");
    }
    row.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_usd(0), "$0");
        assert_eq!(format_usd(999), "$999");
        assert_eq!(format_usd(30_000), "$30,000");
        assert_eq!(format_usd(1_234_567), "$1,234,567");
    }

    #[test]
    fn describes_thresholds() {
        assert_eq!(format_thresholds(None, None), "no thresholds");
        assert_eq!(format_thresholds(Some(50), Some(24_000)), "min age 50, min income $24,000");
    }

    #[test]
    fn pads_by_display_width() {
        let row = table_row(&["Côte d'Ivoire", "eligible"], &[15, 10]);
        assert_eq!(row, "Côte d'Ivoire    eligible");
    }
}
