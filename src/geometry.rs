//! Pixel geometry and corner resolution.
//! A clicked rectangle arrives as two opposite corners. Two click conventions are in use:
//! bottom-left + top-right (capstone slots) and top-left + bottom-right (everything else).
//! Resolution never clamps or flips: reversed corners give negative extents,
//! which the validator reports instead of hiding.

use serde::{Deserialize, Serialize};

/// A clicked pixel. Serialized as a `[x, y]` pair, matching the click record file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (i32, i32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Width and height of a region. Signed so that reversed corners stay visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_negative(&self) -> bool {
        self.width < 0 || self.height < 0
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Normalized rectangle: top-left origin plus extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Which two corners the operator clicked, in click order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CornerConvention {
    /// First click bottom-left, second click top-right.
    BottomLeftTopRight,
    /// First click top-left, second click bottom-right.
    TopLeftBottomRight,
}

impl std::fmt::Display for CornerConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CornerConvention::BottomLeftTopRight => write!(f, "bottom-left, top-right"),
            CornerConvention::TopLeftBottomRight => write!(f, "top-left, bottom-right"),
        }
    }
}

impl CornerConvention {
    /// Converts a clicked corner pair into a top-left rectangle.
    pub fn resolve(self, first: Point, second: Point) -> Rect {
        match self {
            CornerConvention::BottomLeftTopRight => {
                let (bl, tr) = (first, second);
                Rect::new(bl.x, tr.y, tr.x - bl.x, bl.y - tr.y)
            }
            CornerConvention::TopLeftBottomRight => {
                let (tl, br) = (first, second);
                Rect::new(tl.x, tl.y, br.x - tl.x, br.y - tl.y)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_conventions_agree() {
        let a = CornerConvention::BottomLeftTopRight.resolve(Point::new(100, 200), Point::new(150, 180));
        let b = CornerConvention::TopLeftBottomRight.resolve(Point::new(100, 180), Point::new(150, 200));
        assert_eq!(a, Rect::new(100, 180, 50, 20));
        assert_eq!(a, b);
    }

    #[test]
    fn test_reversed_corners_go_negative() {
        // Bottom-right clicked first
        let rect = CornerConvention::TopLeftBottomRight.resolve(Point::new(150, 200), Point::new(100, 180));
        assert_eq!(rect, Rect::new(150, 200, -50, -20));
        assert!(rect.size().is_negative());
    }

    #[test]
    fn test_point_serializes_as_pair() {
        let json = serde_json::to_string(&Point::new(12, 34)).unwrap();
        assert_eq!(json, "[12,34]");
        let back: Point = serde_json::from_str("[5, 6]").unwrap();
        assert_eq!(back, Point::new(5, 6));
    }
}
