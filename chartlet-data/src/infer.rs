//! Cell type inference for delimited text.

use chartlet_common::time::parse_date;
use chartlet_common::value::Value;

/// Infers the type of a single cell.
///
/// Empty cells are null, `true`/`false` are booleans, numeric text is a
/// number and ISO-8601 dates become dates. Everything else stays text.
pub fn infer_value(raw: &str) -> Value {
    let cell = raw.trim();
    if cell.is_empty() {
        return Value::Null;
    }

    match cell {
        "true" => return Value::Boolean(true),
        "false" => return Value::Boolean(false),
        "NaN" => return Value::Number(f64::NAN),
        _ => {}
    }

    if let Some(n) = parse_number(cell) {
        return Value::Number(n);
    }

    if let Some(date) = parse_date(cell) {
        return Value::Date(date);
    }

    Value::Text(raw.to_string())
}

// Rust's float parser also takes "inf", "nan" and "infinity" in any case,
// which should stay text.
fn parse_number(cell: &str) -> Option<f64> {
    let unsigned = cell.trim_start_matches(['+', '-']);
    if unsigned == "Infinity" {
        return cell.replace("Infinity", "inf").parse().ok();
    }
    if !cell
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    cell.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartlet_common::time::parse_date;
    use rstest::rstest;

    #[rstest]
    #[case("", Value::Null)]
    #[case("   ", Value::Null)]
    #[case("true", Value::Boolean(true))]
    #[case("false", Value::Boolean(false))]
    #[case("42", Value::Number(42.0))]
    #[case("-3.5", Value::Number(-3.5))]
    #[case("1e3", Value::Number(1000.0))]
    #[case(".5", Value::Number(0.5))]
    #[case("Infinity", Value::Number(f64::INFINITY))]
    #[case("-Infinity", Value::Number(f64::NEG_INFINITY))]
    #[case("inf", Value::Text("inf".to_string()))]
    #[case("True", Value::Text("True".to_string()))]
    #[case("1-2", Value::Text("1-2".to_string()))]
    #[case("Seattle", Value::Text("Seattle".to_string()))]
    #[case(" Seattle ", Value::Text(" Seattle ".to_string()))]
    fn test_infer_scalars(#[case] cell: &str, #[case] expected: Value) {
        assert_eq!(infer_value(cell), expected);
    }

    #[test]
    fn test_infer_nan() {
        assert!(infer_value("NaN").is_null());
        assert!(matches!(infer_value("NaN"), Value::Number(_)));
    }

    #[rstest]
    #[case("2024-01-07", "2024-01-07")]
    #[case("2024-01-07T08:30", "2024-01-07T08:30")]
    #[case("2024-01-07T08:30:15Z", "2024-01-07T08:30:15")]
    #[case("2024-01-07T08:30:15.250", "2024-01-07T08:30:15.250")]
    fn test_infer_dates(#[case] cell: &str, #[case] expected: &str) {
        assert_eq!(infer_value(cell), Value::Date(parse_date(expected).unwrap()));
    }
}
