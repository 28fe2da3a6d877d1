//! Color parsing.
//!
//! Colors are written as strings by scripts and documents. A [`Color`] keeps
//! the string exactly as written (so documents round-trip without
//! normalizing case) together with the decoded sRGBA value.
//!
//! Supported formats:
//! - Hex colors: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (with or without `#`)
//! - RGB/RGBA: `rgb(r, g, b)`, `rgba(r, g, b, a)`
//! - Named colors: `black`, `white`, `rebeccapurple`, ... and `transparent`

use crate::NodeError;
use palette::Srgba;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A validated color value.
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    raw: String,
    rgba: Srgba<u8>,
}

impl Color {
    /// Parse a color string.
    ///
    /// ```
    /// use node::Color;
    ///
    /// let teal = Color::parse("#35E6C9").unwrap();
    /// assert_eq!(teal.as_str(), "#35E6C9");
    /// assert!(Color::parse("#35E6C").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self, NodeError> {
        let raw = value.trim();
        let rgba = parse_rgba(raw).ok_or_else(|| NodeError::InvalidColor(value.to_string()))?;
        Ok(Self {
            raw: raw.to_string(),
            rgba,
        })
    }

    /// Opaque color from 8-bit components, spelled as `#RRGGBB`.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        let rgba = Srgba::new(r, g, b, 255);
        Self {
            raw: hex_string(rgba),
            rgba,
        }
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// The string this color was written with.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn rgba(&self) -> Srgba<u8> {
        self.rgba
    }

    /// Normalized `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        hex_string(self.rgba)
    }

    pub fn is_opaque(&self) -> bool {
        self.rgba.alpha == u8::MAX
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Color {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq<str> for Color {
    fn eq(&self, other: &str) -> bool {
        self.raw == other
    }
}

impl PartialEq<&str> for Color {
    fn eq(&self, other: &&str) -> bool {
        self.raw == *other
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).map_err(serde::de::Error::custom)
    }
}

fn hex_string(rgba: Srgba<u8>) -> String {
    if rgba.alpha == u8::MAX {
        format!("#{:02X}{:02X}{:02X}", rgba.red, rgba.green, rgba.blue)
    } else {
        format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            rgba.red, rgba.green, rgba.blue, rgba.alpha
        )
    }
}

fn parse_rgba(value: &str) -> Option<Srgba<u8>> {
    if value.eq_ignore_ascii_case("transparent") {
        return Some(Srgba::new(0, 0, 0, 0));
    }

    let lower = value.to_ascii_lowercase();
    if lower.starts_with("rgb") {
        return parse_rgb_function(&lower);
    }

    if let Some(rgba) = parse_hex(value) {
        return Some(rgba);
    }

    let named = palette::named::from_str(&lower)?;
    Some(Srgba::new(named.red, named.green, named.blue, u8::MAX))
}

fn parse_hex(value: &str) -> Option<Srgba<u8>> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let short = |i: usize| u8::from_str_radix(&hex[i..i + 1].repeat(2), 16).ok();
    let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Srgba::new(short(0)?, short(1)?, short(2)?, u8::MAX)),
        4 => Some(Srgba::new(short(0)?, short(1)?, short(2)?, short(3)?)),
        6 => Some(Srgba::new(long(0)?, long(2)?, long(4)?, u8::MAX)),
        8 => Some(Srgba::new(long(0)?, long(2)?, long(4)?, long(6)?)),
        _ => None,
    }
}

fn parse_rgb_function(value: &str) -> Option<Srgba<u8>> {
    let (components, has_alpha) = if let Some(inner) = value.strip_prefix("rgba(") {
        (inner.strip_suffix(')')?, true)
    } else {
        (value.strip_prefix("rgb(")?.strip_suffix(')')?, false)
    };

    let parts: Vec<&str> = components.split(',').map(str::trim).collect();
    let expected = if has_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }

    let r = parse_rgb_component(parts[0])?;
    let g = parse_rgb_component(parts[1])?;
    let b = parse_rgb_component(parts[2])?;
    let a = if has_alpha {
        let a = parts[3].parse::<f32>().ok()?;
        if !(0.0..=1.0).contains(&a) {
            return None;
        }
        (a * 255.0).round() as u8
    } else {
        u8::MAX
    };

    Some(Srgba::new(r, g, b, a))
}

/// A single RGB component: a number (0-255) or a percentage.
fn parse_rgb_component(value: &str) -> Option<u8> {
    match value.strip_suffix('%') {
        Some(percent) => {
            let p = percent.trim().parse::<f32>().ok()?;
            if !(0.0..=100.0).contains(&p) {
                return None;
            }
            Some((p / 100.0 * 255.0).round() as u8)
        }
        None => value.parse::<u8>().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_original_spelling() {
        let color = Color::parse("#d5ffb3").unwrap();
        assert_eq!(color.as_str(), "#d5ffb3");
        assert_eq!(color.to_hex(), "#D5FFB3");
        assert_eq!(color, "#d5ffb3");
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::parse("#0000DD").unwrap().rgba(), Srgba::new(0, 0, 0xDD, 255));
        assert_eq!(Color::parse("f00").unwrap().rgba(), Srgba::new(255, 0, 0, 255));
        assert_eq!(Color::parse("#f008").unwrap().rgba(), Srgba::new(255, 0, 0, 0x88));
        assert_eq!(
            Color::parse("#11223344").unwrap().rgba(),
            Srgba::new(0x11, 0x22, 0x33, 0x44)
        );
    }

    #[test]
    fn parses_rgb_functions() {
        assert_eq!(
            Color::parse("rgb(0, 255, 0)").unwrap().rgba(),
            Srgba::new(0, 255, 0, 255)
        );
        assert_eq!(
            Color::parse("rgba(255, 0, 0, 0.5)").unwrap().rgba(),
            Srgba::new(255, 0, 0, 128)
        );
        assert_eq!(
            Color::parse("rgb(100%, 0%, 50%)").unwrap().rgba(),
            Srgba::new(255, 0, 128, 255)
        );
        assert_eq!(Color::parse("RGB(0, 0, 0)").unwrap().rgba(), Srgba::new(0, 0, 0, 255));
        let color = Color::parse("Rgba(0, 0, 255, 1)").unwrap();
        assert_eq!(color.rgba(), Srgba::new(0, 0, 255, 255));
        assert_eq!(color, "Rgba(0, 0, 255, 1)");
    }

    #[test]
    fn parses_named_colors() {
        assert_eq!(Color::parse("black").unwrap().rgba(), Srgba::new(0, 0, 0, 255));
        assert_eq!(Color::parse("White").unwrap().rgba(), Srgba::new(255, 255, 255, 255));
        assert!(!Color::parse("transparent").unwrap().is_opaque());
    }

    #[test]
    fn rejects_malformed_colors() {
        let malformed = [
            "", "#", "#12", "#12345", "#GGGGGG", "rgb(1, 2)", "rgb(300, 0, 0)",
            "rgba(0, 0, 0, 2)", "notacolor",
        ];
        for bad in malformed {
            assert_eq!(
                Color::parse(bad),
                Err(NodeError::InvalidColor(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn serializes_as_original_string() {
        let color = Color::parse("#35E6C9").unwrap();
        assert_eq!(serde_json::to_value(&color).unwrap(), serde_json::json!("#35E6C9"));
        assert!(serde_json::from_str::<Color>(r##""#xyz""##).is_err());
    }
}
