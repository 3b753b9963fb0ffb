use serde::{Deserialize, Serialize};

use crate::error::DimensionsError;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

/// Outer chart size, its margins, and the bounded drawing area inside them.
///
/// Construction fails instead of clamping when the margins do not fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub bounded_width: f64,
    pub bounded_height: f64,
}

impl Dimensions {
    pub fn compute(
        outer_width: f64,
        outer_height: f64,
        margin: Margin,
    ) -> Result<Self, DimensionsError> {
        for size in [outer_width, outer_height] {
            if !size.is_finite() || size < 0.0 {
                return Err(DimensionsError::InvalidSize(size));
            }
        }

        let bounded_width = outer_width - margin.left - margin.right;
        let bounded_height = outer_height - margin.top - margin.bottom;

        if !(bounded_width >= 0.0) {
            return Err(DimensionsError::NegativeBoundedDimension {
                axis: "width",
                outer: outer_width,
                bounded: bounded_width,
            });
        }
        if !(bounded_height >= 0.0) {
            return Err(DimensionsError::NegativeBoundedDimension {
                axis: "height",
                outer: outer_height,
                bounded: bounded_height,
            });
        }

        Ok(Self {
            width: outer_width,
            height: outer_height,
            margin,
            bounded_width,
            bounded_height,
        })
    }

    /// Square layout using the smaller of the two outer sides
    pub fn square(
        outer_width: f64,
        outer_height: f64,
        margin: Margin,
    ) -> Result<Self, DimensionsError> {
        let side = f64::min(outer_width, outer_height);
        Self::compute(side, side, margin)
    }

    /// Translation of the bounded area relative to the outer origin
    pub fn bounds_origin(&self) -> [f64; 2] {
        [self.margin.left, self.margin.top]
    }

    /// Horizontal pixel range of the bounded area
    pub fn x_range(&self) -> (f64, f64) {
        (0.0, self.bounded_width)
    }

    /// Vertical pixel range, inverted so larger values sit higher
    pub fn y_range(&self) -> (f64, f64) {
        (self.bounded_height, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_layout() {
        let dims = Dimensions::compute(600.0, 360.0, Margin::new(30.0, 10.0, 50.0, 50.0)).unwrap();
        assert_eq!(dims.bounded_width, 540.0);
        assert_eq!(dims.bounded_height, 280.0);
        assert_eq!(dims.bounds_origin(), [50.0, 30.0]);
        assert_eq!(dims.y_range(), (280.0, 0.0));
    }

    #[test]
    fn test_negative_bounds_fail() {
        let err = Dimensions::compute(50.0, 360.0, Margin::new(30.0, 10.0, 50.0, 50.0)).unwrap_err();
        assert_eq!(
            err,
            DimensionsError::NegativeBoundedDimension {
                axis: "width",
                outer: 50.0,
                bounded: -10.0,
            }
        );
        assert!(Dimensions::compute(600.0, 70.0, Margin::new(30.0, 10.0, 50.0, 50.0)).is_err());
    }

    #[test]
    fn test_zero_bounds_allowed() {
        let dims = Dimensions::compute(20.0, 20.0, Margin::uniform(10.0)).unwrap();
        assert_eq!(dims.bounded_width, 0.0);
        assert_eq!(dims.bounded_height, 0.0);
    }

    #[test]
    fn test_invalid_outer_size() {
        assert!(matches!(
            Dimensions::compute(f64::NAN, 10.0, Margin::default()),
            Err(DimensionsError::InvalidSize(_))
        ));
        assert_eq!(
            Dimensions::compute(-1.0, 10.0, Margin::default()),
            Err(DimensionsError::InvalidSize(-1.0))
        );
    }

    #[test]
    fn test_square() {
        let dims = Dimensions::square(900.0, 700.0, Margin::new(10.0, 10.0, 50.0, 50.0)).unwrap();
        assert_eq!(dims.width, 700.0);
        assert_eq!(dims.height, 700.0);
        assert_eq!(dims.bounded_width, 640.0);
        assert_eq!(dims.bounded_height, 640.0);
    }
}
