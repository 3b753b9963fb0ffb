use chartlet_common::accessor::number;
use chartlet_common::dims::{Dimensions, Margin};
use chartlet_common::record::Dataset;
use chartlet_scales::{
    bin, extent, make_linear_scale, max_bin_len, mean, Bin, ContinuousScale, Domain,
    LinearScale, ScaleOptions,
};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{Chart, ChartGeometry, ChartKind};
use crate::axis::{make_linear_axis, AxisConfig};
use crate::error::ChartError;
use crate::marks::{BarMark, RuleMark, TextAlign, TextMark};

const LABEL_GAP: f64 = 5.0;
const MEAN_RULE_TOP: f64 = -15.0;
const MEAN_LABEL_Y: f64 = -20.0;
const LABEL_FONT_SIZE: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HistogramConfig {
    /// Numeric field to bin
    pub field: String,
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub bins: usize,
    /// Horizontal gap between neighbouring bars, in pixels
    pub bar_padding: f64,
    pub fill: String,
    pub show_labels: bool,
    pub show_mean: bool,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    pub x_ticks: f64,
    pub y_ticks: f64,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            field: "humidity".to_string(),
            width: 600.0,
            height: 360.0,
            margin: Margin::new(30.0, 10.0, 50.0, 50.0),
            bins: 12,
            bar_padding: 1.0,
            fill: "cornflowerblue".to_string(),
            show_labels: true,
            show_mean: true,
            x_title: Some("Humidity (%)".to_string()),
            y_title: Some("Number of days".to_string()),
            x_ticks: 6.0,
            y_ticks: 4.0,
        }
    }
}

impl HistogramConfig {
    /// Sets the width and keeps the height at 60% of it
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self.height = width * 0.6;
        self
    }

    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }
}

/// Equal-width histogram of one numeric field
#[derive(Debug, Clone, Default)]
pub struct Histogram {
    pub config: HistogramConfig,
}

impl Histogram {
    pub fn new(config: HistogramConfig) -> Self {
        Self { config }
    }

    fn bar(
        &self,
        bin: &Bin,
        x_scale: &LinearScale,
        y_scale: &LinearScale,
        bounded_height: f64,
    ) -> BarMark {
        let pad = self.config.bar_padding;
        let x0 = x_scale.scale(bin.x0);
        let x1 = x_scale.scale(bin.x1);
        let y = y_scale.scale(bin.len() as f64);
        BarMark {
            x: x0 + pad / 2.0,
            y,
            // padding is compared against the bin width in data units
            width: if bin.x1 - bin.x0 > pad {
                x1 - x0 - pad
            } else {
                0.0
            },
            height: bounded_height - y,
            fill: self.config.fill.clone(),
            x0: bin.x0,
            x1: bin.x1,
            count: bin.len(),
        }
    }
}

impl Chart for Histogram {
    fn kind(&self) -> ChartKind {
        ChartKind::Histogram
    }

    fn build(&self, dataset: &Dataset) -> Result<ChartGeometry, ChartError> {
        let config = &self.config;
        let dims = Dimensions::compute(config.width, config.height, config.margin)?;
        let accessor = number(&config.field);

        let x_scale =
            make_linear_scale(extent(dataset, &accessor), dims.x_range(), &ScaleOptions::nice())?;
        let bins = bin(dataset, &accessor, Domain::from(x_scale.domain()), config.bins)?;

        let max_len = max_bin_len(&bins);
        let y_scale = make_linear_scale(
            Some(Domain::new(0.0, max_len as f64)),
            dims.y_range(),
            &ScaleOptions::nice(),
        )?;
        debug!(
            "histogram of {}: {} bins, fullest holds {max_len}",
            config.field,
            bins.len()
        );

        let mut geometry = ChartGeometry::new(self.kind(), dims);
        for b in &bins {
            geometry
                .bounds
                .push(self.bar(b, &x_scale, &y_scale, dims.bounded_height));
        }

        if config.show_labels {
            for b in bins.iter().filter(|b| !b.is_empty()) {
                let x0 = x_scale.scale(b.x0);
                let x1 = x_scale.scale(b.x1);
                geometry.bounds.push(TextMark {
                    text: b.len().to_string(),
                    x: x0 + (x1 - x0) / 2.0,
                    y: y_scale.scale(b.len() as f64) - LABEL_GAP,
                    align: TextAlign::Center,
                    color: "darkgrey".to_string(),
                    font_size: LABEL_FONT_SIZE,
                    ..Default::default()
                });
            }
        }

        if config.show_mean {
            let mean_x = x_scale.try_scale(mean(dataset, &accessor)?)?;
            geometry.bounds.push(RuleMark {
                x: mean_x,
                y: MEAN_RULE_TOP,
                x2: mean_x,
                y2: dims.bounded_height,
                stroke: "maroon".to_string(),
                stroke_width: 2.0,
                stroke_dash: Some(vec![4.0, 4.0]),
            });
            geometry.bounds.push(TextMark {
                text: "Mean".to_string(),
                x: mean_x,
                y: MEAN_LABEL_Y,
                align: TextAlign::Center,
                color: "maroon".to_string(),
                font_size: LABEL_FONT_SIZE,
                ..Default::default()
            });
        }

        geometry.axes.push(make_linear_axis(
            &x_scale,
            config.x_title.as_deref(),
            &dims,
            &AxisConfig::bottom()
                .with_tick_count(config.x_ticks)
                .with_tick_size_outer(0.0),
        ));
        geometry.axes.push(make_linear_axis(
            &y_scale,
            config.y_title.as_deref(),
            &dims,
            &AxisConfig::left()
                .with_tick_count(config.y_ticks)
                .with_tick_size_outer(0.0),
        ));
        Ok(geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisOrientation;
    use chartlet_common::record;
    use float_cmp::assert_approx_eq;

    fn humidity(values: &[f64]) -> Dataset {
        values
            .iter()
            .map(|v| record! {"humidity" => *v})
            .collect()
    }

    #[test]
    fn test_defaults_match_layout() {
        let config = HistogramConfig::default();
        assert_eq!(config.bins, 12);
        assert_eq!(config.height, config.width * 0.6);
        assert_eq!(HistogramConfig::default().with_width(1000.0).height, 600.0);
    }

    #[test]
    fn test_default_axis_titles() {
        let geometry = Histogram::default()
            .build(&humidity(&[10.0, 40.0, 90.0]))
            .unwrap();
        let title = |orientation| {
            geometry
                .axis(orientation)
                .and_then(|a| a.title.as_ref())
                .map(|t| t.text.clone())
        };
        assert_eq!(title(AxisOrientation::Bottom).as_deref(), Some("Humidity (%)"));
        assert_eq!(title(AxisOrientation::Left).as_deref(), Some("Number of days"));
    }

    #[test]
    fn test_bar_geometry() {
        // domain [0, 120] over 540 px, 12 bins of width 10 = 45 px
        let ds = humidity(&[0.0, 5.0, 15.0, 15.0, 15.0, 120.0]);
        let geometry = Histogram::default().build(&ds).unwrap();

        let bars: Vec<_> = geometry.bounds.bars().collect();
        assert_eq!(bars.len(), 12);
        assert_eq!(bars[0].count, 2);
        assert_eq!(bars[1].count, 3);
        assert_eq!(bars[11].count, 1);

        assert_approx_eq!(f64, bars[1].x, 45.0 + 0.5);
        assert_approx_eq!(f64, bars[1].width, 44.0);
        // y domain [0, 3] over 280 px
        assert_approx_eq!(f64, bars[1].y, 0.0);
        assert_approx_eq!(f64, bars[1].height, 280.0);
        assert_approx_eq!(f64, bars[0].y, 280.0 / 3.0);
        assert_approx_eq!(f64, bars[2].height, 0.0);
    }

    #[test]
    fn test_labels_only_for_non_empty_bins() {
        let ds = humidity(&[0.0, 5.0, 15.0, 15.0, 15.0, 120.0]);
        let geometry = Histogram::new(HistogramConfig {
            show_mean: false,
            ..Default::default()
        })
        .build(&ds)
        .unwrap();

        let labels: Vec<_> = geometry.bounds.texts().collect();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[1].text, "3");
        assert_approx_eq!(f64, labels[1].x, 67.5);
        assert_approx_eq!(f64, labels[1].y, -5.0);
        assert_eq!(labels[1].align, TextAlign::Center);
        assert_eq!(geometry.bounds.rules().count(), 0);
    }

    #[test]
    fn test_mean_rule() {
        let ds = humidity(&[0.0, 60.0, 120.0]);
        let geometry = Histogram::new(HistogramConfig {
            show_labels: false,
            ..Default::default()
        })
        .build(&ds)
        .unwrap();

        let rule = geometry.bounds.rules().next().unwrap();
        assert_approx_eq!(f64, rule.x, 270.0);
        assert_eq!((rule.y, rule.y2), (-15.0, 280.0));
        let label = geometry.bounds.texts().next().unwrap();
        assert_eq!((label.text.as_str(), label.y), ("Mean", -20.0));
    }

    #[test]
    fn test_narrow_bins_have_zero_width() {
        // bins 0.1 wide in data units never exceed the 1 px padding
        let ds = humidity(&[0.0, 0.35, 1.2]);
        let geometry = Histogram::default().build(&ds).unwrap();
        assert!(geometry.bounds.bars().all(|b| b.width == 0.0));
    }

    #[test]
    fn test_errors() {
        let single = humidity(&[5.0, 5.0]);
        assert!(matches!(
            Histogram::default().build(&single),
            Err(ChartError::InvalidScale(_))
        ));

        let no_bins = Histogram::new(HistogramConfig::default().with_bins(0));
        assert!(matches!(
            no_bins.build(&humidity(&[1.0, 2.0])),
            Err(ChartError::InvalidScale(_))
        ));
    }
}
