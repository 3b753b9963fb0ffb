use std::marker::PhantomData;

use chrono::NaiveDateTime;

use crate::error::AccessError;
use crate::record::DataRecord;
use crate::time::parse_date;
use crate::value::{Value, ValueKind};

/// Extracts one value from a record.
///
/// `Ok(None)` marks a null cell; extent and binning skip those. A missing
/// field or a value that cannot be read as `T` is an error.
pub trait Accessor<T> {
    fn access(&self, record: &DataRecord) -> Result<Option<T>, AccessError>;
}

impl<T, F> Accessor<T> for F
where
    F: Fn(&DataRecord) -> Result<Option<T>, AccessError>,
{
    fn access(&self, record: &DataRecord) -> Result<Option<T>, AccessError> {
        self(record)
    }
}

/// Conversion from a cell value to an accessor output type
pub trait FromValue: Sized {
    const KIND: ValueKind;

    fn from_value(field: &str, value: &Value) -> Result<Option<Self>, AccessError>;
}

fn mismatch(field: &str, expected: ValueKind, value: &Value) -> AccessError {
    AccessError::TypeMismatch {
        field: field.to_string(),
        expected,
        found: value.kind(),
    }
}

impl FromValue for f64 {
    const KIND: ValueKind = ValueKind::Number;

    fn from_value(field: &str, value: &Value) -> Result<Option<Self>, AccessError> {
        match value {
            Value::Null => Ok(None),
            Value::Number(n) if n.is_nan() => Ok(None),
            Value::Number(n) => Ok(Some(*n)),
            Value::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_nan() => Ok(None),
                Ok(n) => Ok(Some(n)),
                Err(_) => Err(mismatch(field, Self::KIND, value)),
            },
            _ => Err(mismatch(field, Self::KIND, value)),
        }
    }
}

impl FromValue for NaiveDateTime {
    const KIND: ValueKind = ValueKind::Date;

    fn from_value(field: &str, value: &Value) -> Result<Option<Self>, AccessError> {
        match value {
            Value::Null => Ok(None),
            Value::Date(d) => Ok(Some(*d)),
            Value::Text(s) => parse_date(s)
                .map(Some)
                .ok_or_else(|| mismatch(field, Self::KIND, value)),
            _ => Err(mismatch(field, Self::KIND, value)),
        }
    }
}

/// Accessor reading a single named field
#[derive(Debug)]
pub struct FieldAccessor<T> {
    field: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> FieldAccessor<T> {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            _marker: PhantomData,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl<T> Clone for FieldAccessor<T> {
    fn clone(&self) -> Self {
        Self::new(self.field.clone())
    }
}

impl<T: FromValue> Accessor<T> for FieldAccessor<T> {
    fn access(&self, record: &DataRecord) -> Result<Option<T>, AccessError> {
        let value = record
            .get(&self.field)
            .ok_or_else(|| AccessError::FieldMissing {
                field: self.field.clone(),
            })?;
        T::from_value(&self.field, value)
    }
}

pub fn number(field: impl Into<String>) -> FieldAccessor<f64> {
    FieldAccessor::new(field)
}

pub fn date(field: impl Into<String>) -> FieldAccessor<NaiveDateTime> {
    FieldAccessor::new(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    #[test]
    fn test_number_accessor() {
        let acc = number("h");
        assert_eq!(acc.access(&record! { "h" => 10.0 }), Ok(Some(10.0)));
        assert_eq!(acc.access(&record! { "h" => "12.5" }), Ok(Some(12.5)));
        assert_eq!(acc.access(&record! { "h" => Value::Null }), Ok(None));
        assert_eq!(acc.access(&record! { "h" => f64::NAN }), Ok(None));
    }

    #[test]
    fn test_number_accessor_errors() {
        let acc = number("h");
        assert_eq!(
            acc.access(&record! { "x" => 1.0 }),
            Err(AccessError::FieldMissing {
                field: "h".to_string()
            })
        );
        assert_eq!(
            acc.access(&record! { "h" => "tall" }),
            Err(AccessError::TypeMismatch {
                field: "h".to_string(),
                expected: ValueKind::Number,
                found: ValueKind::Text,
            })
        );
        assert!(acc.access(&record! { "h" => true }).is_err());
    }

    #[test]
    fn test_date_accessor() {
        let acc = date("date");
        let d = parse_date("2024-01-07").unwrap();
        assert_eq!(acc.access(&record! { "date" => d }), Ok(Some(d)));
        assert_eq!(acc.access(&record! { "date" => "2024-01-07" }), Ok(Some(d)));
        assert!(matches!(
            acc.access(&record! { "date" => 3.0 }),
            Err(AccessError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_closure_accessor() {
        let doubled = |r: &DataRecord| -> Result<Option<f64>, AccessError> {
            Ok(number("h").access(r)?.map(|v| v * 2.0))
        };
        assert_eq!(doubled.access(&record! { "h" => 4.0 }), Ok(Some(8.0)));
    }
}
