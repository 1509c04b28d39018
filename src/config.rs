use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{BoardError, BoardResult};

/// How the two ends of every segment are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    #[serde(alias = "flat")]
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    /// Name understood by `CanvasRenderingContext2D.lineCap`
    pub fn as_str(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

/// Options applied when the board is created.
///
/// Field names follow the camelCase keys used by the JavaScript widget, so the
/// same JSON works for both hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardOptions {
    #[serde(deserialize_with = "deserialize_size")]
    pub width: u32,
    #[serde(deserialize_with = "deserialize_size")]
    pub height: u32,
    pub line_width: f32,
    pub line_color: String,
    pub line_cap: LineCap,
    pub canvas_class: Option<String>,
    /// Selector of the element the canvas is appended to right after creation
    pub el: Option<String>,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            width: 500,
            height: 300,
            line_width: 5.0,
            line_color: "#000000".to_owned(),
            line_cap: LineCap::Round,
            canvas_class: None,
            el: None,
        }
    }
}

impl BoardOptions {
    /// Parse options from JSON, filling every missing key with its default
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn load(path: impl AsRef<Path>) -> BoardResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> BoardResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BoardError::InvalidOption(format!(
                "surface size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(BoardError::InvalidOption(format!(
                "lineWidth must be positive, got {}",
                self.line_width
            )));
        }
        parse_color(&self.line_color)?;
        Ok(())
    }

    /// Resolve the stroke style these options describe
    pub fn line_style(&self) -> BoardResult<LineStyle> {
        Ok(LineStyle {
            width: self.line_width,
            color: parse_color(&self.line_color)?,
            cap: self.line_cap,
        })
    }
}

/// Pixel sizes coming from JavaScript are plain numbers and may be fractional;
/// they are rounded to the nearest whole pixel.
fn deserialize_size<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 || value.round() > f64::from(u32::MAX) {
        return Err(serde::de::Error::custom(format!(
            "size must be a non-negative number of pixels, got {value}"
        )));
    }
    Ok(value.round() as u32)
}

/// Everything a surface needs to draw one segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: f32,
    pub color: Color32,
    pub cap: LineCap,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: 5.0,
            color: Color32::BLACK,
            cap: LineCap::Round,
        }
    }
}

impl LineStyle {
    /// CSS `rgba()` form of the colour, for canvas `strokeStyle`
    pub fn css_color(&self) -> String {
        let [r, g, b, a] = self.color.to_srgba_unmultiplied();
        format!("rgba({}, {}, {}, {})", r, g, b, f32::from(a) / 255.0)
    }
}

/// Parse any CSS colour (`#rgb`, `#rrggbb`, `rgb(..)`, named colours, ...)
pub fn parse_color(value: &str) -> BoardResult<Color32> {
    let color =
        csscolorparser::parse(value).map_err(|_| BoardError::InvalidColor(value.to_owned()))?;
    let [r, g, b, a] = color.to_rgba8();
    Ok(Color32::from_rgba_unmultiplied(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = BoardOptions::default();
        assert_eq!((options.width, options.height), (500, 300));
        assert_eq!(options.line_width, 5.0);
        assert_eq!(options.line_color, "#000000");
        assert_eq!(options.line_cap, LineCap::Round);
        assert!(options.canvas_class.is_none());
        assert!(options.el.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options =
            BoardOptions::from_json(r##"{"lineWidth": 2, "lineColor": "red", "el": "#app"}"##)
                .unwrap();
        assert_eq!(options.line_width, 2.0);
        assert_eq!(options.line_color, "red");
        assert_eq!(options.el.as_deref(), Some("#app"));
        assert_eq!(options.width, 500);
        assert_eq!(options.line_cap, LineCap::Round);
    }

    #[test]
    fn test_flat_is_an_alias_for_butt() {
        let options = BoardOptions::from_json(r#"{"lineCap": "flat"}"#).unwrap();
        assert_eq!(options.line_cap, LineCap::Butt);
        assert_eq!(options.line_cap.as_str(), "butt");
    }

    #[test]
    fn test_rejects_zero_size() {
        let result = BoardOptions::from_json(r#"{"width": 0}"#);
        assert!(matches!(result, Err(BoardError::InvalidOption(_))));
    }

    #[test]
    fn test_fractional_size_is_rounded() {
        let options = BoardOptions::from_json(r#"{"width": 300.5, "height": 200.4}"#).unwrap();
        assert_eq!((options.width, options.height), (301, 200));
    }

    #[test]
    fn test_rejects_negative_size() {
        let result = BoardOptions::from_json(r#"{"height": -10}"#);
        assert!(matches!(result, Err(BoardError::Config(_))));
    }

    #[test]
    fn test_rejects_unknown_color() {
        let result = BoardOptions::from_json(r#"{"lineColor": "not-a-colour"}"#);
        assert!(matches!(result, Err(BoardError::InvalidColor(_))));
    }

    #[test]
    fn test_line_style_from_options() {
        let options = BoardOptions {
            line_color: "#ff0000".to_owned(),
            line_cap: LineCap::Square,
            ..Default::default()
        };
        let style = options.line_style().unwrap();
        assert_eq!(style.color, Color32::from_rgb(255, 0, 0));
        assert_eq!(style.cap, LineCap::Square);
        assert_eq!(style.css_color(), "rgba(255, 0, 0, 1)");
    }
}
