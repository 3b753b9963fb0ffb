use std::path::Path;

use anyhow::Context;
use chartlet_chart::chart::{
    Histogram, HistogramConfig, LineChart, LineChartConfig, ScatterPlot, ScatterPlotConfig,
};
use chartlet_chart::{Chart, ChartKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-chart settings read from a JSON file. Missing sections and keys keep
/// their defaults, including the individual sides of a partial `margin`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub line: LineChartConfig,
    pub scatter: ScatterPlotConfig,
    pub histogram: HistogramConfig,
}

/// Command line values that take precedence over the config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub x: Option<String>,
    pub y: Option<String>,
    pub color: Option<String>,
    pub bins: Option<usize>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
}

impl ChartConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let mut value: Value = serde_json::from_str(text)?;
        let defaults = serde_json::to_value(Self::default())?;
        fill_margins(&mut value, &defaults);
        Ok(serde_json::from_value(value)?)
    }

    pub fn apply(&mut self, kind: ChartKind, overrides: Overrides) {
        let Overrides {
            x,
            y,
            color,
            bins,
            width,
            height,
            x_title,
            y_title,
        } = overrides;

        match kind {
            ChartKind::Line => {
                let config = &mut self.line;
                set(&mut config.x, x);
                set(&mut config.y, y);
                set(&mut config.width, width);
                set(&mut config.height, height);
                config.x_title = x_title.or(config.x_title.take());
                config.y_title = y_title.or(config.y_title.take());
            }
            ChartKind::Scatter => {
                let config = &mut self.scatter;
                retitle(&mut config.x_title, x_title, x.as_deref());
                retitle(&mut config.y_title, y_title, y.as_deref());
                set(&mut config.x, x);
                set(&mut config.y, y);
                set(&mut config.width, width);
                set(&mut config.height, height);
                config.color = color.or(config.color.take());
            }
            ChartKind::Histogram => {
                let config = &mut self.histogram;
                retitle(&mut config.x_title, x_title, x.as_deref());
                set(&mut config.field, x);
                set(&mut config.bins, bins);
                // a bare width keeps the 0.6 aspect ratio
                match (width, height) {
                    (Some(w), None) => *config = config.clone().with_width(w),
                    (w, h) => {
                        set(&mut config.width, w);
                        set(&mut config.height, h);
                    }
                }
                config.y_title = y_title.or(config.y_title.take());
            }
        }
    }

    pub fn chart(&self, kind: ChartKind) -> Box<dyn Chart> {
        match kind {
            ChartKind::Line => Box::new(LineChart::new(self.line.clone())),
            ChartKind::Scatter => Box::new(ScatterPlot::new(self.scatter.clone())),
            ChartKind::Histogram => Box::new(Histogram::new(self.histogram.clone())),
        }
    }
}

// Completes each section's partial margin with that chart's default sides
fn fill_margins(value: &mut Value, defaults: &Value) {
    let Some(sections) = value.as_object_mut() else {
        return;
    };
    for (name, section) in sections.iter_mut() {
        let margin = section.get_mut("margin").and_then(Value::as_object_mut);
        let default_margin = defaults
            .get(name.as_str())
            .and_then(|d| d.get("margin"))
            .and_then(Value::as_object);
        if let (Some(margin), Some(default_margin)) = (margin, default_margin) {
            for (side, default) in default_margin {
                margin.entry(side.clone()).or_insert_with(|| default.clone());
            }
        }
    }
}

// An axis whose field changed on the command line is titled with the new field
// name unless a title was given too
fn retitle(title: &mut Option<String>, new_title: Option<String>, new_field: Option<&str>) {
    match (new_title, new_field) {
        (Some(new_title), _) => *title = Some(new_title),
        (None, Some(field)) => *title = Some(field.to_string()),
        (None, None) => {}
    }
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}
