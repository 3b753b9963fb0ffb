use chartlet_common::accessor::{number, Accessor};
use chartlet_common::dims::{Dimensions, Margin};
use chartlet_common::record::Dataset;
use chartlet_scales::color::{ColorScale, DEFAULT_COLOR_RANGE};
use chartlet_scales::{extent, make_linear_scale, ChartletScaleError, ContinuousScale, ScaleOptions};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{Chart, ChartGeometry, ChartKind};
use crate::axis::{make_linear_axis, AxisConfig};
use crate::error::ChartError;
use crate::marks::PointMark;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScatterPlotConfig {
    pub x: String,
    pub y: String,
    /// Numeric field mapped through the color range
    pub color: Option<String>,
    pub colors: Vec<String>,
    /// Fill used when there is no color field
    pub fill: String,
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub radius: f64,
    pub opacity: f64,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
}

impl Default for ScatterPlotConfig {
    fn default() -> Self {
        Self {
            x: "dew_point".to_string(),
            y: "humidity".to_string(),
            color: None,
            colors: DEFAULT_COLOR_RANGE.iter().map(|c| c.to_string()).collect(),
            fill: "cornflowerblue".to_string(),
            width: 600.0,
            height: 600.0,
            margin: Margin::new(10.0, 10.0, 50.0, 50.0),
            radius: 4.0,
            opacity: 0.7,
            x_title: Some("Dew Point (°C)".to_string()),
            y_title: Some("Humidity (%)".to_string()),
        }
    }
}

/// Square scatter plot with niced linear axes
#[derive(Debug, Clone, Default)]
pub struct ScatterPlot {
    pub config: ScatterPlotConfig,
}

impl ScatterPlot {
    pub fn new(config: ScatterPlotConfig) -> Self {
        Self { config }
    }
}

impl Chart for ScatterPlot {
    fn kind(&self) -> ChartKind {
        ChartKind::Scatter
    }

    fn build(&self, dataset: &Dataset) -> Result<ChartGeometry, ChartError> {
        let config = &self.config;
        let dims = Dimensions::square(config.width, config.height, config.margin)?;
        let x_accessor = number(&config.x);
        let y_accessor = number(&config.y);
        let color_accessor = config.color.as_ref().map(number);

        let x_scale =
            make_linear_scale(extent(dataset, &x_accessor), dims.x_range(), &ScaleOptions::nice())?;
        let y_scale =
            make_linear_scale(extent(dataset, &y_accessor), dims.y_range(), &ScaleOptions::nice())?;
        let color_scale = match &color_accessor {
            Some(accessor) => {
                let domain = extent(dataset, accessor).ok_or(ChartletScaleError::EmptyDomain)?;
                Some(ColorScale::try_new(domain, config.colors.as_slice())?)
            }
            None => None,
        };

        let mut geometry = ChartGeometry::new(self.kind(), dims);
        let mut skipped = 0usize;
        for record in dataset {
            let (Some(x), Some(y)) = (x_accessor.access(record)?, y_accessor.access(record)?)
            else {
                skipped += 1;
                continue;
            };

            let fill = match (&color_scale, &color_accessor) {
                (Some(scale), Some(accessor)) => {
                    scale.scale_css(accessor.access(record)?.unwrap_or(f64::NAN))
                }
                _ => config.fill.clone(),
            };

            geometry.bounds.push(PointMark {
                cx: x_scale.try_scale(x)?,
                cy: y_scale.try_scale(y)?,
                r: config.radius,
                fill,
                opacity: config.opacity,
            });
        }
        if skipped > 0 {
            debug!("scatter plot: {skipped} records with a null coordinate left out");
        }

        geometry.axes.push(make_linear_axis(
            &x_scale,
            config.x_title.as_deref(),
            &dims,
            &AxisConfig::bottom(),
        ));
        geometry.axes.push(make_linear_axis(
            &y_scale,
            config.y_title.as_deref(),
            &dims,
            &AxisConfig::left(),
        ));
        Ok(geometry)
    }
}
