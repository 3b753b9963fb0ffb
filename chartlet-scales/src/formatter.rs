use chrono::{Datelike, NaiveDateTime, Timelike};
use std::fmt::Debug;

pub trait NumberFormatter: Debug + Send + Sync {
    fn format(&self, values: &[Option<f64>], default: Option<&str>) -> Vec<String>;
}

pub trait TimestampFormatter: Debug + Send + Sync {
    fn format(&self, values: &[Option<NaiveDateTime>], default: Option<&str>) -> Vec<String>;
}

/// Fixed-point number labels with thousands separators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedFormatter {
    pub precision: usize,
}

impl FixedFormatter {
    /// Enough decimals to tell apart ticks `step` apart
    pub fn for_step(step: f64) -> Self {
        let step = step.abs();
        let precision = if step.is_finite() && step > 0.0 {
            // nudge so exact powers of ten such as 0.1 don't round up a digit
            (-(step.log10() + 1e-9).floor()).max(0.0) as usize
        } else {
            0
        };
        Self { precision }
    }

    pub fn format_value(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let text = format!("{:.*}", self.precision, value);
        // "-0" and "-0.0" read as zero
        let text = if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
            text.trim_start_matches('-').to_string()
        } else {
            text
        };
        group_thousands(&text)
    }
}

fn group_thousands(text: &str) -> String {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match rest.find('.') {
        Some(i) => rest.split_at(i),
        None => (rest, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}{frac_part}")
}

impl NumberFormatter for FixedFormatter {
    fn format(&self, values: &[Option<f64>], default: Option<&str>) -> Vec<String> {
        let default = default.unwrap_or("");
        values
            .iter()
            .map(|v| {
                v.map(|v| self.format_value(v))
                    .unwrap_or_else(|| default.to_string())
            })
            .collect()
    }
}

/// Labels each timestamp with the coarsest calendar unit it does not sit on a
/// boundary of: milliseconds, seconds, minutes, hours, days, months, then years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MultiScaleTimeFormatter;

impl MultiScaleTimeFormatter {
    pub fn format_str(value: &NaiveDateTime) -> &'static str {
        if value.nanosecond() / 1_000_000 != 0 {
            ".%3f"
        } else if value.second() != 0 {
            ":%S"
        } else if value.minute() != 0 {
            "%I:%M"
        } else if value.hour() != 0 {
            "%I %p"
        } else if value.day() != 1 {
            "%b %d"
        } else if value.month() != 1 {
            "%B"
        } else {
            "%Y"
        }
    }

    pub fn format_value(&self, value: &NaiveDateTime) -> String {
        value.format(Self::format_str(value)).to_string()
    }
}

impl TimestampFormatter for MultiScaleTimeFormatter {
    fn format(&self, values: &[Option<NaiveDateTime>], default: Option<&str>) -> Vec<String> {
        let default = default.unwrap_or("");
        values
            .iter()
            .map(|v| {
                v.map(|v| self.format_value(&v))
                    .unwrap_or_else(|| default.to_string())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartlet_common::time::parse_date;

    #[test]
    fn test_precision_for_step() {
        assert_eq!(FixedFormatter::for_step(10.0).precision, 0);
        assert_eq!(FixedFormatter::for_step(1.0).precision, 0);
        assert_eq!(FixedFormatter::for_step(0.5).precision, 1);
        assert_eq!(FixedFormatter::for_step(0.1).precision, 1);
        assert_eq!(FixedFormatter::for_step(0.02).precision, 2);
        assert_eq!(FixedFormatter::for_step(0.0).precision, 0);
    }

    #[test]
    fn test_format_numbers() {
        let fmt = FixedFormatter { precision: 1 };
        assert_eq!(
            fmt.format(&[Some(0.2), Some(-1.26), None, Some(-0.01)], Some("n/a")),
            vec!["0.2", "-1.3", "n/a", "0.0"]
        );
        let fmt = FixedFormatter::default();
        assert_eq!(fmt.format_value(1234567.0), "1,234,567");
        assert_eq!(fmt.format_value(-1000.0), "-1,000");
        assert_eq!(fmt.format_value(999.0), "999");
    }

    #[test]
    fn test_multi_scale_time() {
        let fmt = MultiScaleTimeFormatter;
        let labels = fmt.format(
            &[
                parse_date("2024-01-01"),
                parse_date("2024-03-01"),
                parse_date("2024-03-15"),
                parse_date("2024-03-15T13:00"),
                parse_date("2024-03-15T13:30"),
                None,
            ],
            None,
        );
        assert_eq!(labels, vec!["2024", "March", "Mar 15", "01 PM", "01:30", ""]);
    }
}
