//! Axis-aligned frames.
//!
//! A [`Frame`] is the position and size of a node, in the coordinate space
//! of its container. Frames are immutable values; operations that move or
//! combine them return a new frame.

use crate::NodeError;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle `(x, y, width, height)`.
///
/// Width and height are never negative and all four fields are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFrame")]
pub struct Frame {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Unvalidated wire form of a frame.
#[derive(Deserialize)]
struct RawFrame {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl TryFrom<RawFrame> for Frame {
    type Error = NodeError;

    fn try_from(raw: RawFrame) -> Result<Self, Self::Error> {
        Frame::new(raw.x, raw.y, raw.width, raw.height)
    }
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, NodeError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(NodeError::InvalidGeometry(format!(
                "origin ({x}, {y}) is not finite"
            )));
        }
        if !width.is_finite() || width < 0.0 {
            return Err(NodeError::InvalidGeometry(format!(
                "width {width} must be a non-negative number"
            )));
        }
        if !height.is_finite() || height < 0.0 {
            return Err(NodeError::InvalidGeometry(format!(
                "height {height} must be a non-negative number"
            )));
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Build a frame from an origin and a size.
    pub fn from_origin_size(origin: DVec2, size: DVec2) -> Result<Self, NodeError> {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn origin(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Bottom-right corner.
    pub fn max(&self) -> DVec2 {
        self.origin() + self.size()
    }

    /// Check if a point is inside this frame (edges included).
    pub fn contains_point(&self, point: DVec2) -> bool {
        let min = self.origin();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Same frame moved by `delta`.
    pub fn translate(&self, delta: DVec2) -> Result<Self, NodeError> {
        Self::from_origin_size(self.origin() + delta, self.size())
    }

    /// Smallest frame enclosing both frames.
    pub fn union(&self, other: &Frame) -> Frame {
        let min = self.origin().min(other.origin());
        let max = self.max().max(other.max());
        // Both inputs are valid, so the extent is finite and non-negative.
        Frame {
            x: min.x,
            y: min.y,
            width: max.x - min.x,
            height: max.y - min.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_negative_size() {
        assert!(matches!(
            Frame::new(0.0, 0.0, -1.0, 10.0),
            Err(NodeError::InvalidGeometry(_))
        ));
        assert!(matches!(
            Frame::new(0.0, 0.0, 10.0, -0.5),
            Err(NodeError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(Frame::new(f64::NAN, 0.0, 1.0, 1.0).is_err());
        assert!(Frame::new(0.0, 0.0, f64::INFINITY, 1.0).is_err());
        assert!(Frame::new(0.0, 0.0, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn zero_size_is_valid() {
        let frame = Frame::new(5.0, 5.0, 0.0, 0.0).unwrap();
        assert_eq!(frame.size(), DVec2::ZERO);
    }

    #[test]
    fn contains_point_includes_edges() {
        let frame = Frame::new(0.0, 0.0, 100.0, 100.0).unwrap();
        assert!(frame.contains_point(DVec2::new(50.0, 50.0)));
        assert!(frame.contains_point(DVec2::new(100.0, 100.0)));
        assert!(!frame.contains_point(DVec2::new(-1.0, 50.0)));
    }

    #[test]
    fn union_covers_both_frames() {
        let a = Frame::new(53.0, 213.0, 122.0, 122.0).unwrap();
        let b = Frame::new(253.0, 213.0, 122.0, 122.0).unwrap();
        let u = a.union(&b);
        assert_eq!(u, Frame::new(53.0, 213.0, 322.0, 122.0).unwrap());
    }

    #[test]
    fn deserializing_validates() {
        let ok: Frame =
            serde_json::from_str(r#"{"x": 1, "y": 2, "width": 3, "height": 4}"#).unwrap();
        assert_eq!(ok, Frame::new(1.0, 2.0, 3.0, 4.0).unwrap());

        let bad = serde_json::from_str::<Frame>(r#"{"x": 0, "y": 0, "width": -3, "height": 4}"#);
        assert!(bad.is_err());
    }

    proptest! {
        #[test]
        fn valid_frames_read_back_unchanged(
            x in -1.0e6f64..1.0e6,
            y in -1.0e6f64..1.0e6,
            w in 0.0f64..1.0e6,
            h in 0.0f64..1.0e6,
        ) {
            let frame = Frame::new(x, y, w, h).unwrap();
            prop_assert_eq!((frame.x(), frame.y(), frame.width(), frame.height()), (x, y, w, h));
        }

        #[test]
        fn negative_sizes_are_rejected(
            w in -1.0e6f64..-f64::EPSILON,
            h in 0.0f64..1.0e6,
        ) {
            prop_assert!(matches!(Frame::new(0.0, 0.0, w, h), Err(NodeError::InvalidGeometry(_))));
            prop_assert!(matches!(Frame::new(0.0, 0.0, h, w), Err(NodeError::InvalidGeometry(_))));
        }
    }
}
