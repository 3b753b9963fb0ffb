use crate::array;
use crate::domain::{Domain, ScaleRange};
use crate::error::ChartletScaleError;

use super::{ContinuousScale, ScaleOptions};

#[derive(Clone, Debug)]
pub struct LinearScaleConfig {
    pub domain: (f64, f64),
    pub range: (f64, f64),
    pub clamp: bool,
    pub range_offset: Option<f64>,
    pub nice: Option<usize>,
    pub round: bool,
}

impl Default for LinearScaleConfig {
    fn default() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
            clamp: false,
            range_offset: None,
            nice: None,
            round: false,
        }
    }
}

/// A linear scale that maps numeric input values from a domain to a range.
/// Supports clamping, domain niceing, and tick generation.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
    clamp: bool,
    range_offset: Option<f64>,
    round: bool,
}

impl LinearScale {
    pub fn new(config: &LinearScaleConfig) -> Self {
        let mut this = Self {
            domain_start: config.domain.0,
            domain_end: config.domain.1,
            range_start: config.range.0,
            range_end: config.range.1,
            clamp: config.clamp,
            range_offset: config.range_offset,
            round: config.round,
        };

        if let Some(nice) = config.nice {
            this = this.nice(Some(nice));
        }

        this
    }

    /// Like [`LinearScale::new`], rejecting NaN or infinite endpoints and
    /// domains or ranges whose width overflows
    pub fn try_new(config: &LinearScaleConfig) -> Result<Self, ChartletScaleError> {
        for v in [
            config.domain.0,
            config.domain.1,
            config.range.0,
            config.range.1,
        ] {
            if !v.is_finite() {
                return Err(ChartletScaleError::NonFiniteValue(v));
            }
        }

        let this = Self::new(config);
        for width in [
            this.domain_end - this.domain_start,
            this.range_end - this.range_start,
        ] {
            if !width.is_finite() {
                return Err(ChartletScaleError::NonFiniteValue(width));
            }
        }
        Ok(this)
    }

    /// Extends the domain to nice round numbers for better tick selection
    pub fn nice(mut self, count: Option<usize>) -> Self {
        let (start, end) = array::nice_domain(self.domain_start, self.domain_end, count.unwrap_or(10));
        self.domain_start = start;
        self.domain_end = end;
        self
    }

    pub fn with_domain(mut self, domain: (f64, f64)) -> Self {
        self.domain_start = domain.0;
        self.domain_end = domain.1;
        self
    }

    pub fn with_range(mut self, range: (f64, f64)) -> Self {
        self.range_start = range.0;
        self.range_end = range.1;
        self
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn with_range_offset(mut self, range_offset: Option<f64>) -> Self {
        self.range_offset = range_offset;
        self
    }

    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    pub fn round(&self) -> bool {
        self.round
    }

    fn is_degenerate(&self) -> bool {
        self.domain_start == self.domain_end
            || self.range_start == self.range_end
            || self.domain_start.is_nan()
            || self.domain_end.is_nan()
            || self.range_start.is_nan()
            || self.range_end.is_nan()
    }
}

impl ContinuousScale<f64> for LinearScale {
    fn domain(&self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    fn clamp(&self) -> bool {
        self.clamp
    }

    fn scale(&self, value: f64) -> f64 {
        // Zero-width domain maps everything to the range start
        if self.is_degenerate() {
            return self.range_start;
        }

        let t = (value - self.domain_start) / (self.domain_end - self.domain_start);
        let mut v = self.range_start + t * (self.range_end - self.range_start)
            + self.range_offset.unwrap_or(0.0);

        if self.clamp {
            let (range_min, range_max) = if self.range_start <= self.range_end {
                (self.range_start, self.range_end)
            } else {
                (self.range_end, self.range_start)
            };
            v = v.clamp(range_min, range_max);
        }

        if self.round {
            v.round()
        } else {
            v
        }
    }

    fn invert(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return self.domain_start;
        }

        let mut v = value - self.range_offset.unwrap_or(0.0);
        if self.clamp {
            let (range_min, range_max) = if self.range_start <= self.range_end {
                (self.range_start, self.range_end)
            } else {
                (self.range_end, self.range_start)
            };
            v = v.clamp(range_min, range_max);
        }

        let t = (v - self.range_start) / (self.range_end - self.range_start);
        self.domain_start + t * (self.domain_end - self.domain_start)
    }

    fn ticks(&self, count: Option<f64>) -> Vec<f64> {
        array::ticks(self.domain_start, self.domain_end, count.unwrap_or(10.0))
    }
}

/// Builds a linear scale from an extent, failing when there is no domain
pub fn make_linear_scale(
    domain: Option<Domain<f64>>,
    range: impl Into<ScaleRange>,
    opts: &ScaleOptions,
) -> Result<LinearScale, ChartletScaleError> {
    let domain = domain.ok_or(ChartletScaleError::EmptyDomain)?;
    let range = range.into();
    LinearScale::try_new(&LinearScaleConfig {
        domain: domain.as_tuple(),
        range: range.as_tuple(),
        clamp: opts.clamp,
        nice: opts.nice.then_some(10),
        round: opts.round,
        ..Default::default()
    })
}
