use crate::value::ValueKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AccessError {
    #[error("Field not found in record: {field}")]
    FieldMissing { field: String },

    #[error("Field {field} holds a {found} value where a {expected} was expected")]
    TypeMismatch {
        field: String,
        expected: ValueKind,
        found: ValueKind,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DimensionsError {
    #[error("Bounded {axis} would be negative ({bounded}): outer size {outer} is smaller than its margins")]
    NegativeBoundedDimension {
        axis: &'static str,
        outer: f64,
        bounded: f64,
    },

    #[error("Invalid outer size: {0}")]
    InvalidSize(f64),
}
