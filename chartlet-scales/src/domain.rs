use serde::Serialize;

use crate::error::ChartletScaleError;

/// Closed input interval `[min, max]` a scale maps from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Domain<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Domain<T> {
    /// Orders the endpoints so that `min <= max`
    pub fn new(a: T, b: T) -> Self {
        if b < a {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    pub fn as_tuple(&self) -> (T, T) {
        (self.min, self.max)
    }
}

impl Domain<f64> {
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Fails on NaN or infinite endpoints, or a width that overflows
    pub fn validate_finite(&self) -> Result<(), ChartletScaleError> {
        for v in [self.min, self.max, self.width()] {
            if !v.is_finite() {
                return Err(ChartletScaleError::NonFiniteValue(v));
            }
        }
        Ok(())
    }
}

impl<T: PartialOrd + Copy> From<(T, T)> for Domain<T> {
    fn from((a, b): (T, T)) -> Self {
        Domain::new(a, b)
    }
}

/// Output pixel interval. `low > high` flips the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleRange {
    pub low: f64,
    pub high: f64,
}

impl ScaleRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn is_inverted(&self) -> bool {
        self.low > self.high
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.low, self.high)
    }
}

impl From<(f64, f64)> for ScaleRange {
    fn from((low, high): (f64, f64)) -> Self {
        Self { low, high }
    }
}
