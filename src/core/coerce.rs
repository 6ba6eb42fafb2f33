//! Locale-tolerant coercion of raw payload values.
//!
//! Broker payloads mix dot-decimal and comma-decimal formats, glue units to
//! numbers ("320 pk", "4.250 uur") and ship numbers as strings. Every
//! function here is total: unparseable input yields `None`, never a panic.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static DIGIT_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Parses a number out of a raw value. Text is treated with the locale
/// convention that a comma is the decimal separator and dots are thousands
/// separators ("2.500,75" -> 2500.75); plain dot-decimal text still parses.
pub fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_locale_number(s),
        _ => None,
    }
}

fn parse_locale_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };

    // Tolerate units glued before or after the digits.
    let number: String = cleaned
        .chars()
        .skip_while(|c| !c.is_ascii_digit() && *c != '-')
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    number.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Trimmed text, or `None` for blank/absent values. Numbers stringify so
/// sources that report e.g. a type designation as a bare number still match.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First run of exactly four digits anywhere in the stringified value,
/// e.g. "bouwjaar 1962 (verlengd 1978)" -> 1962.
pub fn year(value: &Value) -> Option<u16> {
    let s = stringify(value)?;
    DIGIT_RUNS
        .find_iter(&s)
        .find(|m| m.as_str().len() == 4)
        .and_then(|m| m.as_str().parse().ok())
}

/// Hour counters like "4.250", "12 500 uur" or "1.234,5". Thousands
/// separators (dots, spaces) are stripped, then the leading integer run is
/// taken, so a decimal comma truncates.
pub fn hours(value: &Value) -> Option<u64> {
    if let Value::Number(n) = value {
        return n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64));
    }
    let s = stringify(value)?;
    let cleaned = s.replace(['.', ' ', '\u{a0}'], "");
    DIGIT_RUNS
        .find(&cleaned)
        .and_then(|m| m.as_str().parse().ok())
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_parses_comma_decimal() {
        assert_eq!(numeric(&json!("2.500,75")), Some(2500.75));
        assert_eq!(numeric(&json!("1,5")), Some(1.5));
    }

    #[test]
    fn numeric_parses_dot_decimal_and_plain_numbers() {
        assert_eq!(numeric(&json!("2500.75")), Some(2500.75));
        assert_eq!(numeric(&json!(320)), Some(320.0));
        assert_eq!(numeric(&json!(2.5)), Some(2.5));
    }

    #[test]
    fn numeric_tolerates_units() {
        assert_eq!(numeric(&json!("320 pk")), Some(320.0));
        assert_eq!(numeric(&json!("ca. 450")), Some(450.0));
    }

    #[test]
    fn numeric_never_panics_on_junk() {
        assert_eq!(numeric(&json!("")), None);
        assert_eq!(numeric(&json!("   ")), None);
        assert_eq!(numeric(&json!("onbekend")), None);
        assert_eq!(numeric(&json!(null)), None);
        assert_eq!(numeric(&json!(true)), None);
        assert_eq!(numeric(&json!({"nested": 1})), None);
    }

    #[test]
    fn text_trims_and_rejects_blank() {
        assert_eq!(text(&json!("  Volvo Penta  ")), Some("Volvo Penta".into()));
        assert_eq!(text(&json!("   ")), None);
        assert_eq!(text(&json!(null)), None);
        assert_eq!(text(&json!(1160)), Some("1160".into()));
    }

    #[test]
    fn year_finds_first_four_digit_run() {
        assert_eq!(year(&json!("bouwjaar 1962 (verlengd 1978)")), Some(1962));
        assert_eq!(year(&json!(2004)), Some(2004));
        assert_eq!(year(&json!("no. 123 uit 1955")), Some(1955));
        assert_eq!(year(&json!("123")), None);
        assert_eq!(year(&json!("12345")), None);
    }

    #[test]
    fn hours_strips_thousands_separators() {
        assert_eq!(hours(&json!("4.250")), Some(4250));
        assert_eq!(hours(&json!("12 500 uur")), Some(12500));
        assert_eq!(hours(&json!("1.234,5")), Some(1234));
        assert_eq!(hours(&json!(800)), Some(800));
        assert_eq!(hours(&json!("geen opgave")), None);
    }
}
