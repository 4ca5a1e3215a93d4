// Utility helpers for parsing, rounding and display formatting.
//
// This module centralizes the "dirty" CSV/number handling so the rest of the
// code can assume clean, typed values, and owns the two enrollment-percentage
// conventions so neither call site can drift into the other.
use num_format::{Locale, ToFormattedString};

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in CSV exports (commas, spaces, text).
///
/// - Accepts `Option<&str>` so callers can pass through optional fields.
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(",", "");
    s.parse::<f64>().ok()
}

/// Round to a fixed number of decimal places.
pub fn round_to(v: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (v * factor).round() / factor
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Format a floating-point value with:
    // - a fixed number of decimal places, and
    // - locale-aware thousands separators (e.g., `1,234,567.89`).
    let neg = n.is_sign_negative();
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    // Use `num-format` to insert commas into the integer portion.
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    } else if decimals > 0 {
        res.push('.');
        res.push_str(&"0".repeat(decimals));
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

/// Currency display string, e.g. `$2,812.000` at 3 decimals.
pub fn format_currency(n: f64, decimals: usize) -> String {
    format!("${}", format_number(n, decimals))
}

/// Invert [`format_currency`]: strip the dollar sign and thousands
/// separators and parse the remainder back to a number. Formatting then
/// parsing returns the value exactly, to the precision it was formatted at.
pub fn parse_currency(s: &str) -> Option<f64> {
    let cleaned: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values, used for row
    // counts in console messages (e.g., `9,855 rows loaded`).
    n.to_formatted_string(&Locale::en)
}

/// Enrollment percentage, division-report convention: blank unless both
/// operands are present and capacity is positive.
pub fn enrollment_percent(capacity: Option<f64>, fte_count: Option<f64>) -> String {
    match (capacity, fte_count) {
        (Some(cap), Some(fte)) if cap > 0.0 => {
            format!("{:.2}%", round_to(fte / cap * 100.0, 2))
        }
        _ => String::new(),
    }
}

/// Enrollment percentage, course/instructor-report convention: `"0%"` for a
/// zero capacity and `"N/A%"` when either operand is missing.
pub fn enrollment_percent_display(capacity: Option<f64>, fte_count: Option<f64>) -> String {
    match (capacity, fte_count) {
        (Some(cap), Some(_)) if cap == 0.0 => "0%".to_string(),
        (Some(cap), Some(fte)) => format!("{:.2}%", round_to(fte / cap * 100.0, 2)),
        _ => "N/A%".to_string(),
    }
}

/// Display an optional numeric cell: blank when missing, no trailing `.0`
/// on whole numbers (capacity and FTE counts read as counts).
pub fn display_opt_count(v: Option<f64>) -> String {
    match v {
        Some(x) if x.fract() == 0.0 => format!("{:.0}", x),
        Some(x) => x.to_string(),
        None => String::new(),
    }
}

/// Display an optional Total FTE cell: blank when missing so the original
/// absence stays visible, three decimals otherwise.
pub fn display_opt_fte(v: Option<f64>) -> String {
    match v {
        Some(x) => format!("{:.3}", x),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_f64_rejects_text_and_blanks() {
        assert_eq!(parse_f64_safe(Some("30")), Some(30.0));
        assert_eq!(parse_f64_safe(Some(" 1,234.5 ")), Some(1234.5));
        assert_eq!(parse_f64_safe(Some("TBA")), None);
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(None), None);
    }

    #[test]
    fn currency_round_trip_is_exact_at_both_precisions() {
        for v in [2812.0, 1.406, 0.0, 12345.678, 99.995] {
            let three = format_currency(round_to(v, 3), 3);
            assert_eq!(parse_currency(&three), Some(round_to(v, 3)));
            let two = format_currency(round_to(v, 2), 2);
            assert_eq!(parse_currency(&two), Some(round_to(v, 2)));
        }
    }

    #[test]
    fn currency_formats_with_separators() {
        assert_eq!(format_currency(2812.0, 3), "$2,812.000");
        assert_eq!(format_currency(2812.0, 2), "$2,812.00");
        assert_eq!(format_currency(1234567.891, 2), "$1,234,567.89");
    }

    #[test]
    fn division_convention_leaves_zero_capacity_blank() {
        assert_eq!(enrollment_percent(Some(0.0), Some(10.0)), "");
        assert_eq!(enrollment_percent(None, Some(10.0)), "");
        assert_eq!(enrollment_percent(Some(32.0), Some(30.0)), "93.75%");
    }

    #[test]
    fn display_convention_reports_zero_capacity_as_zero_percent() {
        assert_eq!(enrollment_percent_display(Some(0.0), Some(10.0)), "0%");
        assert_eq!(enrollment_percent_display(None, Some(10.0)), "N/A%");
        assert_eq!(enrollment_percent_display(Some(30.0), None), "N/A%");
        assert_eq!(enrollment_percent_display(Some(30.0), Some(15.0)), "50.00%");
    }

    #[test]
    fn optional_cells_render_blank_when_missing() {
        assert_eq!(display_opt_count(Some(30.0)), "30");
        assert_eq!(display_opt_count(None), "");
        assert_eq!(display_opt_fte(Some(1.406)), "1.406");
        assert_eq!(display_opt_fte(None), "");
    }
}
