use chartlet_common::dims::Dimensions;
use chartlet_common::value::Value;
use chartlet_scales::array::tick_step;
use chartlet_scales::formatter::{
    FixedFormatter, MultiScaleTimeFormatter, NumberFormatter, TimestampFormatter,
};
use chartlet_scales::{ContinuousScale, LinearScale, TimeScale};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::marks::{RuleMark, TextAlign, TextBaseline, TextMark};

const TITLE_FONT_SIZE: f64 = 14.0;
const TITLE_OFFSET: f64 = 10.0;
const LEFT_TITLE_INSET: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AxisOrientation {
    Left,
    #[default]
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AxisConfig {
    pub orientation: AxisOrientation,
    /// Approximate number of ticks
    pub tick_count: f64,
    pub tick_size_inner: f64,
    pub tick_size_outer: f64,
    pub tick_padding: f64,
    pub font_size: f64,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            orientation: AxisOrientation::Bottom,
            tick_count: 10.0,
            tick_size_inner: 6.0,
            tick_size_outer: 6.0,
            tick_padding: 3.0,
            font_size: 10.0,
        }
    }
}

impl AxisConfig {
    pub fn left() -> Self {
        Self {
            orientation: AxisOrientation::Left,
            ..Default::default()
        }
    }

    pub fn bottom() -> Self {
        Self::default()
    }

    pub fn with_tick_count(mut self, tick_count: f64) -> Self {
        self.tick_count = tick_count;
        self
    }

    pub fn with_tick_size_outer(mut self, tick_size_outer: f64) -> Self {
        self.tick_size_outer = tick_size_outer;
        self
    }

    pub fn with_tick_size_inner(mut self, tick_size_inner: f64) -> Self {
        self.tick_size_inner = tick_size_inner;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AxisTick {
    pub value: Value,
    /// Pixel offset along the axis
    pub position: f64,
    pub line: RuleMark,
    pub label: TextMark,
}

/// A positioned axis. Coordinates are relative to `origin`, which is itself
/// relative to the chart's bounded area.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Axis {
    pub orientation: AxisOrientation,
    pub origin: [f64; 2],
    pub ticks: Vec<AxisTick>,
    /// Domain line, with outer ticks at both ends when `tick_size_outer > 0`
    pub domain_path: Vec<[f64; 2]>,
    pub title: Option<TextMark>,
}

impl Axis {
    pub fn labels(&self) -> Vec<&str> {
        self.ticks.iter().map(|t| t.label.text.as_str()).collect()
    }
}

/// Numeric axis labelled with as many decimals as the tick step needs
pub fn make_linear_axis(
    scale: &LinearScale,
    title: Option<&str>,
    dims: &Dimensions,
    config: &AxisConfig,
) -> Axis {
    let (d0, d1) = scale.domain();
    let formatter = FixedFormatter::for_step(tick_step(d0, d1, config.tick_count));
    make_linear_axis_with(scale, &formatter, title, dims, config)
}

pub fn make_linear_axis_with(
    scale: &LinearScale,
    formatter: &dyn NumberFormatter,
    title: Option<&str>,
    dims: &Dimensions,
    config: &AxisConfig,
) -> Axis {
    let values = scale.ticks(Some(config.tick_count));
    let labels = formatter.format(&values.iter().copied().map(Some).collect::<Vec<_>>(), None);
    let ticks = values
        .into_iter()
        .zip(labels)
        .map(|(t, label)| (Value::Number(t), scale.scale(t), label))
        .collect();
    build_axis(ticks, scale.range(), title, dims, config)
}

pub fn make_time_axis(
    scale: &TimeScale,
    title: Option<&str>,
    dims: &Dimensions,
    config: &AxisConfig,
) -> Axis {
    make_time_axis_with(scale, &MultiScaleTimeFormatter, title, dims, config)
}

pub fn make_time_axis_with(
    scale: &TimeScale,
    formatter: &dyn TimestampFormatter,
    title: Option<&str>,
    dims: &Dimensions,
    config: &AxisConfig,
) -> Axis {
    let values = scale.ticks(Some(config.tick_count));
    let labels = formatter.format(&values.iter().copied().map(Some).collect::<Vec<_>>(), None);
    let ticks = values
        .into_iter()
        .zip(labels)
        .map(|(t, label)| (Value::Date(t), scale.scale(t), label))
        .collect();
    build_axis(ticks, scale.range(), title, dims, config)
}

fn build_axis(
    ticks: Vec<(Value, f64, String)>,
    range: (f64, f64),
    title: Option<&str>,
    dims: &Dimensions,
    config: &AxisConfig,
) -> Axis {
    let spacing = config.tick_size_inner.max(0.0) + config.tick_padding;
    let outer = config.tick_size_outer;
    let (r0, r1) = range;

    let make_tick = |(value, position, text): (Value, f64, String)| {
        let (line, label) = match config.orientation {
            AxisOrientation::Bottom => (
                RuleMark {
                    x: position,
                    y: 0.0,
                    x2: position,
                    y2: config.tick_size_inner,
                    ..Default::default()
                },
                TextMark {
                    text,
                    x: position,
                    y: spacing,
                    align: TextAlign::Center,
                    baseline: TextBaseline::Top,
                    font_size: config.font_size,
                    ..Default::default()
                },
            ),
            AxisOrientation::Left => (
                RuleMark {
                    x: 0.0,
                    y: position,
                    x2: -config.tick_size_inner,
                    y2: position,
                    ..Default::default()
                },
                TextMark {
                    text,
                    x: -spacing,
                    y: position,
                    align: TextAlign::Right,
                    baseline: TextBaseline::Middle,
                    font_size: config.font_size,
                    ..Default::default()
                },
            ),
        };
        AxisTick {
            value,
            position,
            line,
            label,
        }
    };

    let (origin, domain_path, title) = match config.orientation {
        AxisOrientation::Bottom => (
            [0.0, dims.bounded_height],
            vec![[r0, outer], [r0, 0.0], [r1, 0.0], [r1, outer]],
            title.map(|text| TextMark {
                text: text.to_string(),
                x: dims.bounded_width / 2.0,
                y: dims.margin.bottom - TITLE_OFFSET,
                align: TextAlign::Center,
                font_size: TITLE_FONT_SIZE,
                ..Default::default()
            }),
        ),
        AxisOrientation::Left => (
            [0.0, 0.0],
            vec![[-outer, r0], [0.0, r0], [0.0, r1], [-outer, r1]],
            // x and y are in the rotated frame
            title.map(|text| TextMark {
                text: text.to_string(),
                x: -dims.bounded_height / 2.0,
                y: -dims.margin.left + LEFT_TITLE_INSET,
                align: TextAlign::Center,
                angle: -90.0,
                font_size: TITLE_FONT_SIZE,
                ..Default::default()
            }),
        ),
    };

    let domain_path = if outer > 0.0 {
        domain_path
    } else {
        domain_path[1..3].to_vec()
    };

    Axis {
        orientation: config.orientation,
        origin,
        ticks: ticks.into_iter().map(make_tick).collect(),
        domain_path,
        title,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartlet_common::dims::Margin;
    use chartlet_common::time::parse_date;
    use chartlet_scales::numeric::linear::LinearScaleConfig;
    use chartlet_scales::temporal::timestamp::TimeScaleConfig;
    use float_cmp::assert_approx_eq;
    use std::str::FromStr;

    fn histogram_dims() -> Dimensions {
        Dimensions::compute(600.0, 360.0, Margin::new(30.0, 10.0, 50.0, 50.0)).unwrap()
    }

    #[test]
    fn test_orientation_names() {
        assert_eq!(AxisOrientation::Left.to_string(), "left");
        assert_eq!(AxisOrientation::from_str("bottom").unwrap(), AxisOrientation::Bottom);
    }

    #[test]
    fn test_bottom_axis() {
        let dims = histogram_dims();
        let scale = LinearScale::new(&LinearScaleConfig {
            domain: (0.0, 100.0),
            range: dims.x_range(),
            ..Default::default()
        });
        let axis = make_linear_axis(
            &scale,
            Some("Humidity (%)"),
            &dims,
            &AxisConfig::bottom().with_tick_count(6.0),
        );

        assert_eq!(axis.origin, [0.0, 280.0]);
        assert_eq!(axis.labels(), vec!["0", "20", "40", "60", "80", "100"]);
        assert_approx_eq!(f64, axis.ticks[1].position, 108.0);
        assert_eq!(axis.ticks[1].label.y, 9.0);
        assert_eq!(axis.domain_path, vec![[0.0, 6.0], [0.0, 0.0], [540.0, 0.0], [540.0, 6.0]]);

        let title = axis.title.unwrap();
        assert_eq!((title.x, title.y), (270.0, 40.0));
        assert_eq!(title.align, TextAlign::Center);
    }

    #[test]
    fn test_left_axis() {
        let dims = histogram_dims();
        let scale = LinearScale::new(&LinearScaleConfig {
            domain: (0.0, 1.0),
            range: dims.y_range(),
            ..Default::default()
        });
        let axis = make_linear_axis(
            &scale,
            Some("Number of days"),
            &dims,
            &AxisConfig::left().with_tick_count(5.0).with_tick_size_outer(0.0),
        );

        assert_eq!(axis.labels(), vec!["0.0", "0.2", "0.4", "0.6", "0.8", "1.0"]);
        assert_approx_eq!(f64, axis.ticks[0].position, 280.0);
        assert_eq!(axis.ticks[0].line.x2, -6.0);
        assert_eq!(axis.ticks[0].label.align, TextAlign::Right);
        assert_eq!(axis.domain_path, vec![[0.0, 280.0], [0.0, 0.0]]);

        let title = axis.title.unwrap();
        assert_eq!((title.x, title.y, title.angle), (-140.0, -35.0, -90.0));
    }

    #[test]
    fn test_custom_number_formatter() {
        let dims = histogram_dims();
        let scale = LinearScale::new(&LinearScaleConfig {
            domain: (0.0, 1.0),
            range: dims.x_range(),
            ..Default::default()
        });
        let axis = make_linear_axis_with(
            &scale,
            &FixedFormatter { precision: 2 },
            None,
            &dims,
            &AxisConfig::bottom().with_tick_count(2.0),
        );
        assert_eq!(axis.labels(), vec!["0.00", "0.50", "1.00"]);
        assert_eq!(axis.ticks[1].value, Value::Number(0.5));
    }

    #[test]
    fn test_time_axis_labels() {
        let dims = Dimensions::compute(1000.0, 400.0, Margin::new(15.0, 15.0, 40.0, 60.0)).unwrap();
        let scale = TimeScale::new(&TimeScaleConfig {
            domain: (
                parse_date("2024-01-01").unwrap(),
                parse_date("2025-01-01").unwrap(),
            ),
            range: dims.x_range(),
            ..Default::default()
        });
        let axis = make_time_axis(&scale, None, &dims, &AxisConfig::bottom().with_tick_count(5.0));
        assert_eq!(axis.labels(), vec!["2024", "April", "July", "October", "2025"]);
        assert!(axis.title.is_none());
    }
}
