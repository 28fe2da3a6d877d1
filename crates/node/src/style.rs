use crate::{Color, NodeError};
use serde::{Deserialize, Serialize};

/// Border drawn around a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBorder")]
pub struct Border {
    color: Color,
    thickness: f64,
}

#[derive(Deserialize)]
struct RawBorder {
    color: Color,
    #[serde(default = "default_thickness")]
    thickness: f64,
}

fn default_thickness() -> f64 {
    1.0
}

impl TryFrom<RawBorder> for Border {
    type Error = NodeError;

    fn try_from(raw: RawBorder) -> Result<Self, Self::Error> {
        Border::new(raw.color, raw.thickness)
    }
}

impl Border {
    pub fn new(color: Color, thickness: f64) -> Result<Self, NodeError> {
        if !thickness.is_finite() || thickness < 0.0 {
            return Err(NodeError::InvalidBorder(thickness));
        }
        Ok(Self { color, thickness })
    }

    /// Parse the color and validate the thickness in one step.
    pub fn parse(color: &str, thickness: f64) -> Result<Self, NodeError> {
        Self::new(Color::parse(color)?, thickness)
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }
}

/// Visual appearance of a shape: ordered fills and ordered borders.
///
/// Fills and borders are painted in order, so the last fill is on top.
/// An empty list means nothing is painted for that part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default)]
    fills: Vec<Color>,
    #[serde(default)]
    borders: Vec<Border>,
}

impl Style {
    pub fn new(fills: Vec<Color>, borders: Vec<Border>) -> Self {
        Self { fills, borders }
    }

    /// Build a style from color strings, validating every entry.
    ///
    /// ```
    /// use node::Style;
    ///
    /// let style = Style::parse(&["#FF0000"], &[("#00FF00", 16.0)]).unwrap();
    /// assert_eq!(style.fills()[0].as_str(), "#FF0000");
    /// assert_eq!(style.borders()[0].thickness(), 16.0);
    /// ```
    pub fn parse(fills: &[&str], borders: &[(&str, f64)]) -> Result<Self, NodeError> {
        let fills = fills
            .iter()
            .map(|fill| Color::parse(fill))
            .collect::<Result<Vec<_>, _>>()?;
        let borders = borders
            .iter()
            .map(|(color, thickness)| Border::parse(color, *thickness))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { fills, borders })
    }

    /// Style with a single fill.
    pub fn filled(color: Color) -> Self {
        Self::default().with_fill(color)
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fills.push(color);
        self
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.borders.push(border);
        self
    }

    pub fn fills(&self) -> &[Color] {
        &self.fills
    }

    pub fn borders(&self) -> &[Border] {
        &self.borders
    }

    /// True when neither fills nor borders are present.
    pub fn is_empty(&self) -> bool {
        self.fills.is_empty() && self.borders.is_empty()
    }
}
