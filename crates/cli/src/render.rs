//! Plain-text rendering helpers for screens.
//!
//! No styling toolkit: aligned columns and key/value blocks read fine in
//! any terminal and diff cleanly in test output.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Render rows as a left-aligned table with a header and separator.
///
/// Rows shorter than the header are padded with empty cells.
#[must_use]
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(len);
            }
        }
    }

    let render_row = |cells: &[String]| -> String {
        let mut line = String::new();
        for (i, width) in widths.iter().enumerate() {
            let cell = cells.get(i).map_or("", String::as_str);
            if i > 0 {
                line.push_str("  ");
            }
            line.push_str(cell);
            let pad = width.saturating_sub(cell.chars().count());
            if i + 1 < widths.len() {
                line.extend(std::iter::repeat_n(' ', pad));
            }
        }
        line
    };

    let header_cells: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
    let mut out = render_row(&header_cells);
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    for row in rows {
        out.push('\n');
        out.push_str(&render_row(row));
    }
    out
}

/// Render a key/value detail block with aligned keys.
#[must_use]
pub fn detail(pairs: &[(&str, String)]) -> String {
    let width = pairs
        .iter()
        .map(|(k, _)| k.chars().count())
        .max()
        .unwrap_or(0);
    pairs
        .iter()
        .map(|(k, v)| format!("{k:<width$}  {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a monetary amount with thousands separators.
#[must_use]
pub fn amount(value: Decimal) -> String {
    let raw = value.round_dp(2).to_string();
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));
    let (sign, digits) = int_part
        .strip_prefix('-')
        .map_or(("", int_part), |rest| ("-", rest));

    let mut grouped = String::new();
    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(*c);
    }
    format!("{sign}{grouped}.{frac_part:0<2}")
}

/// Render an optional value, `-` when absent.
#[must_use]
pub fn opt<T: std::fmt::Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "-".to_string(), ToString::to_string)
}

/// Render an optional date, `-` when absent.
#[must_use]
pub fn opt_date(value: Option<NaiveDate>) -> String {
    value.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

/// Render a timestamp in UTC at minute precision.
#[must_use]
pub fn timestamp(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_alignment() {
        let out = table(
            &["ID", "NAME"],
            &[
                vec!["1".to_string(), "Mariam Diallo".to_string()],
                vec!["12".to_string(), "Ibrahim Ouedraogo".to_string()],
            ],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[2].starts_with("1   Mariam"));
        assert!(lines[3].starts_with("12  Ibrahim"));
    }

    #[test]
    fn test_table_pads_short_rows() {
        let out = table(&["A", "B"], &[vec!["x".to_string()]]);
        assert!(out.lines().count() == 3);
    }

    #[test]
    fn test_detail_alignment() {
        let out = detail(&[
            ("Loan", "PR-2024-0042".to_string()),
            ("Status", "disbursing".to_string()),
        ]);
        assert_eq!(out, "Loan    PR-2024-0042\nStatus  disbursing");
    }

    #[test]
    fn test_amount_grouping() {
        assert_eq!(amount(Decimal::new(15_000_000_00, 2)), "15 000 000.00");
        assert_eq!(amount(Decimal::new(-1234_50, 2)), "-1 234.50");
        assert_eq!(amount(Decimal::new(999, 0)), "999.00");
    }

    #[test]
    fn test_opt_renders_dash() {
        assert_eq!(opt::<String>(None), "-");
        assert_eq!(opt(Some(&"x".to_string())), "x");
        assert_eq!(opt_date(None), "-");
    }
}
