pub mod histogram;
pub mod line;
pub mod scatter;

use chartlet_common::dims::Dimensions;
use chartlet_common::record::Dataset;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::axis::{Axis, AxisOrientation};
use crate::error::ChartError;
use crate::marks::MarkGroup;

pub use histogram::{Histogram, HistogramConfig};
pub use line::{LineChart, LineChartConfig};
pub use scatter::{ScatterPlot, ScatterPlotConfig};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChartKind {
    Line,
    Scatter,
    Histogram,
}

/// Everything needed to draw a chart: outer size, the bounded-area marks and
/// the axes. Axis origins are relative to `bounds.origin`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChartGeometry {
    pub kind: ChartKind,
    pub dimensions: Dimensions,
    pub bounds: MarkGroup,
    pub axes: Vec<Axis>,
}

impl ChartGeometry {
    pub fn new(kind: ChartKind, dimensions: Dimensions) -> Self {
        Self {
            kind,
            dimensions,
            bounds: MarkGroup::new("bounds", dimensions.bounds_origin()),
            axes: Vec::new(),
        }
    }

    pub fn axis(&self, orientation: AxisOrientation) -> Option<&Axis> {
        self.axes.iter().find(|a| a.orientation == orientation)
    }
}

pub trait Chart {
    fn kind(&self) -> ChartKind;

    fn build(&self, dataset: &Dataset) -> Result<ChartGeometry, ChartError>;
}
