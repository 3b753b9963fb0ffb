pub mod linear;

use std::fmt::Debug;

use crate::error::ChartletScaleError;

/// Options shared by the `make_*_scale` constructors
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScaleOptions {
    pub nice: bool,
    pub clamp: bool,
    pub round: bool,
}

impl ScaleOptions {
    pub fn nice() -> Self {
        Self {
            nice: true,
            ..Default::default()
        }
    }
}

/// A scale mapping a continuous domain of `D` onto a pixel range
pub trait ContinuousScale<D: Copy>: Clone + Debug + Send + Sync {
    fn domain(&self) -> (D, D);

    fn range(&self) -> (f64, f64);

    fn clamp(&self) -> bool;

    /// Maps a domain value to a range coordinate
    fn scale(&self, value: D) -> f64;

    /// Maps a range coordinate back to the domain
    fn invert(&self, value: f64) -> D;

    /// Approximately `count` round values inside the domain (default 10)
    fn ticks(&self, count: Option<f64>) -> Vec<D>;

    fn scale_values(&self, values: &[D]) -> Vec<f64> {
        values.iter().map(|v| self.scale(*v)).collect()
    }

    /// Like [`ContinuousScale::scale`], but reports a NaN or infinite
    /// coordinate instead of returning it
    fn try_scale(&self, value: D) -> Result<f64, ChartletScaleError> {
        let coord = self.scale(value);
        if coord.is_finite() {
            Ok(coord)
        } else {
            Err(ChartletScaleError::NonFiniteValue(coord))
        }
    }
}
