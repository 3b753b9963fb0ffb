use chartlet_common::accessor::{date, number, Accessor};
use chartlet_common::dims::{Dimensions, Margin};
use chartlet_common::record::Dataset;
use chartlet_scales::{
    extent, make_linear_scale, make_temporal_scale, ContinuousScale, ScaleOptions,
};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{Chart, ChartGeometry, ChartKind};
use crate::axis::{make_linear_axis, make_time_axis, AxisConfig};
use crate::error::ChartError;
use crate::marks::LinePath;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LineChartConfig {
    /// Date field on the x axis
    pub x: String,
    /// Numeric field on the y axis
    pub y: String,
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub nice: bool,
    pub stroke: String,
    pub stroke_width: f64,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            x: "date".to_string(),
            y: "max_temp_F".to_string(),
            width: 900.0,
            height: 400.0,
            margin: Margin::new(15.0, 15.0, 40.0, 60.0),
            nice: false,
            stroke: "#af9358".to_string(),
            stroke_width: 2.0,
            x_title: None,
            y_title: None,
        }
    }
}

/// Time series drawn as a single path
#[derive(Debug, Clone, Default)]
pub struct LineChart {
    pub config: LineChartConfig,
}

impl LineChart {
    pub fn new(config: LineChartConfig) -> Self {
        Self { config }
    }
}

impl Chart for LineChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Line
    }

    fn build(&self, dataset: &Dataset) -> Result<ChartGeometry, ChartError> {
        let config = &self.config;
        let dims = Dimensions::compute(config.width, config.height, config.margin)?;
        let x_accessor = date(&config.x);
        let y_accessor = number(&config.y);
        let opts = ScaleOptions {
            nice: config.nice,
            ..Default::default()
        };

        let x_scale = make_temporal_scale(extent(dataset, &x_accessor), dims.x_range(), &opts)?;
        let y_scale = make_linear_scale(extent(dataset, &y_accessor), dims.y_range(), &opts)?;

        let mut points = Vec::with_capacity(dataset.len());
        for record in dataset {
            match (x_accessor.access(record)?, y_accessor.access(record)?) {
                (Some(x), Some(y)) => points.push([x_scale.try_scale(x)?, y_scale.try_scale(y)?]),
                _ => continue,
            }
        }
        if points.len() < dataset.len() {
            debug!(
                "line chart: {} records with a null {} or {} left out",
                dataset.len() - points.len(),
                config.x,
                config.y
            );
        }

        let mut geometry = ChartGeometry::new(self.kind(), dims);
        geometry.bounds.push(LinePath {
            points,
            stroke: config.stroke.clone(),
            stroke_width: config.stroke_width,
        });
        geometry.axes.push(make_time_axis(
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

#[cfg(test)]
mod tests {
    use super::*;
    use chartlet_common::record;
    use chartlet_common::value::Value;
    use float_cmp::assert_approx_eq;

    fn weekly() -> Dataset {
        Dataset::from_records(vec![
            record! {"date" => "2024-01-01", "max_temp_F" => 30.0},
            record! {"date" => "2024-01-08", "max_temp_F" => Value::Null},
            record! {"date" => "2024-01-15", "max_temp_F" => 50.0},
            record! {"date" => "2024-01-22", "max_temp_F" => 40.0},
        ])
    }

    #[test]
    fn test_line_points() {
        let geometry = LineChart::default().build(&weekly()).unwrap();
        assert_eq!(geometry.dimensions.bounded_width, 825.0);
        assert_eq!(geometry.dimensions.bounded_height, 345.0);

        let line = geometry.bounds.lines().next().unwrap();
        assert_eq!(line.points.len(), 3);
        assert_approx_eq!(f64, line.points[0][0], 0.0);
        assert_approx_eq!(f64, line.points[0][1], 345.0);
        assert_approx_eq!(f64, line.points[1][0], 2.0 / 3.0 * 825.0);
        assert_approx_eq!(f64, line.points[1][1], 0.0);
        assert_approx_eq!(f64, line.points[2][1], 172.5);
        assert_eq!(geometry.axes.len(), 2);
    }

    #[test]
    fn test_line_missing_field() {
        let chart = LineChart::new(LineChartConfig {
            y: "nope".to_string(),
            ..Default::default()
        });
        assert!(matches!(
            chart.build(&weekly()),
            Err(ChartError::InvalidScale(_))
        ));
    }
}
