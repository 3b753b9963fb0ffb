use css_color_parser::Color;
use palette::{Mix, Srgba};

use crate::domain::Domain;
use crate::error::ChartletScaleError;
use crate::numeric::linear::{LinearScale, LinearScaleConfig};
use crate::numeric::ContinuousScale;

pub const DEFAULT_COLOR_RANGE: [&str; 2] = ["lightblue", "darkslategray"];

/// Parse a CSS color string into normalized RGBA components
pub fn parse_color(color_str: &str) -> Result<[f32; 4], ChartletScaleError> {
    match color_str.parse::<Color>() {
        Ok(color) => Ok([
            color.r as f32 / 255.0,
            color.g as f32 / 255.0,
            color.b as f32 / 255.0,
            color.a,
        ]),
        Err(_) => Err(ChartletScaleError::InvalidColor(color_str.to_string())),
    }
}

/// `#rrggbb` for opaque colors, `rgba(...)` otherwise
pub fn to_css(color: [f32; 4]) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    let [r, g, b, a] = color;
    if a >= 1.0 {
        format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
    } else {
        format!("rgba({}, {}, {}, {})", channel(r), channel(g), channel(b), a)
    }
}

/// Maps a numeric domain onto evenly spaced colors, interpolating in sRGB
#[derive(Clone, Debug)]
pub struct ColorScale {
    normalize: LinearScale,
    colors: Vec<Srgba>,
}

impl ColorScale {
    pub fn try_new<S: AsRef<str>>(
        domain: Domain<f64>,
        colors: &[S],
    ) -> Result<Self, ChartletScaleError> {
        if colors.is_empty() {
            return Err(ChartletScaleError::EmptyRange);
        }
        domain.validate_finite()?;

        let colors = colors
            .iter()
            .map(|c| {
                let [r, g, b, a] = parse_color(c.as_ref())?;
                Ok(Srgba::new(r, g, b, a))
            })
            .collect::<Result<Vec<_>, ChartletScaleError>>()?;

        let normalize = LinearScale::new(&LinearScaleConfig {
            domain: domain.as_tuple(),
            range: (0.0, 1.0),
            clamp: true,
            ..Default::default()
        });

        Ok(Self { normalize, colors })
    }

    /// Lightblue to darkslategray over `domain`
    pub fn sequential(domain: Domain<f64>) -> Result<Self, ChartletScaleError> {
        Self::try_new(domain, &DEFAULT_COLOR_RANGE)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.normalize.domain()
    }

    pub fn scale(&self, value: f64) -> [f32; 4] {
        let t = self.normalize.scale(value);
        let t = if t.is_nan() { 0.0 } else { t as f32 };

        let scale_factor = (self.colors.len() - 1) as f32;
        let continuous_index = (t * scale_factor).clamp(0.0, scale_factor);
        let lower_index = continuous_index.floor() as usize;
        let upper_index = continuous_index.ceil() as usize;

        let color = if lower_index == upper_index {
            self.colors[lower_index]
        } else {
            let frac = continuous_index - lower_index as f32;
            self.colors[lower_index].mix(self.colors[upper_index], frac)
        };
        let (r, g, b, a) = color.into_components();
        [r, g, b, a]
    }

    pub fn scale_css(&self, value: f64) -> String {
        to_css(self.scale(value))
    }
}
