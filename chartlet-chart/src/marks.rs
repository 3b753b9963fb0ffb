use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuleMark {
    pub x: f64,
    pub y: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: String,
    pub stroke_width: f64,
    pub stroke_dash: Option<Vec<f64>>,
}

impl Default for RuleMark {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            x2: 0.0,
            y2: 0.0,
            stroke: "black".to_string(),
            stroke_width: 1.0,
            stroke_dash: None,
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextBaseline {
    Alphabetic,
    Top,
    Middle,
    #[default]
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TextMark {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    /// Rotation in degrees, clockwise
    pub angle: f64,
    pub color: String,
    pub font_size: f64,
}

impl Default for TextMark {
    fn default() -> Self {
        Self {
            text: String::new(),
            x: 0.0,
            y: 0.0,
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
            angle: 0.0,
            color: "black".to_string(),
            font_size: 10.0,
        }
    }
}

/// Polyline through data points in dataset order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LinePath {
    pub points: Vec<[f64; 2]>,
    pub stroke: String,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PointMark {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: String,
    pub opacity: f64,
}

/// Histogram bar, in bounds coordinates with y growing downward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BarMark {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub x0: f64,
    pub x1: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Mark {
    Rule(RuleMark),
    Text(TextMark),
    Line(LinePath),
    Point(PointMark),
    Bar(BarMark),
}

impl From<RuleMark> for Mark {
    fn from(mark: RuleMark) -> Self {
        Mark::Rule(mark)
    }
}

impl From<TextMark> for Mark {
    fn from(mark: TextMark) -> Self {
        Mark::Text(mark)
    }
}

impl From<LinePath> for Mark {
    fn from(mark: LinePath) -> Self {
        Mark::Line(mark)
    }
}

impl From<PointMark> for Mark {
    fn from(mark: PointMark) -> Self {
        Mark::Point(mark)
    }
}

impl From<BarMark> for Mark {
    fn from(mark: BarMark) -> Self {
        Mark::Bar(mark)
    }
}

/// Marks sharing a translated origin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MarkGroup {
    pub name: String,
    pub origin: [f64; 2],
    pub marks: Vec<Mark>,
}

impl MarkGroup {
    pub fn new(name: impl Into<String>, origin: [f64; 2]) -> Self {
        Self {
            name: name.into(),
            origin,
            marks: Vec::new(),
        }
    }

    pub fn push(&mut self, mark: impl Into<Mark>) {
        self.marks.push(mark.into());
    }

    pub fn bars(&self) -> impl Iterator<Item = &BarMark> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Bar(bar) => Some(bar),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextMark> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn rules(&self) -> impl Iterator<Item = &RuleMark> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Rule(rule) => Some(rule),
            _ => None,
        })
    }

    pub fn points(&self) -> impl Iterator<Item = &PointMark> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Point(point) => Some(point),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePath> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Line(line) => Some(line),
            _ => None,
        })
    }
}
