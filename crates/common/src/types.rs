//! Core geometry and timing types with newtype pattern for type safety.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer rectangle in framebuffer coordinates, `[x0, x1) x [y0, y1)`.
///
/// Extents may be negative after flip compensation; call
/// [`normalized`](Rect::normalized) before comparing against other rects.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    /// Returns the same area with non-negative extents.
    pub fn normalized(self) -> Self {
        Self {
            x0: self.x0.min(self.x1),
            y0: self.y0.min(self.y1),
            x1: self.x0.max(self.x1),
            y1: self.y0.max(self.y1),
        }
    }
}

/// Floating-point rectangle, used for source crops and render-target crops.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RectF {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl RectF {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

impl From<Rect> for RectF {
    fn from(r: Rect) -> Self {
        Self {
            x0: r.x0 as f32,
            y0: r.y0 as f32,
            x1: r.x1 as f32,
            y1: r.y1 as f32,
        }
    }
}

/// Horizontal alignment of the picture within the display area.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical alignment of the picture within the display area.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

impl VAlign {
    /// Swap top and bottom. Used to compensate for vertically flipped
    /// swapchain buffers before placement.
    pub fn flipped(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Center => Self::Center,
        }
    }
}

/// Combined picture alignment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    pub horizontal: HAlign,
    pub vertical: VAlign,
}

/// Source picture orientation, as tagged by the demuxer/decoder.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Normal,
    HFlipped,
    VFlipped,
    Rotated90,
    Rotated180,
    Rotated270,
    Transposed,
    AntiTransposed,
}

/// Rotation tag handed to the render backend alongside the source crop.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

/// Rational number, used for sample aspect ratios and zoom factors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rational {
    pub num: u32,
    pub den: u32,
}

impl Rational {
    pub const ONE: Self = Self { num: 1, den: 1 };

    pub fn new(num: u32, den: u32) -> Self {
        assert!(den > 0, "Rational denominator must be > 0");
        Self { num, den }
    }

    pub fn as_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

/// Presentation time in seconds (f64 precision).
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct TimeCode(pub f64);

impl TimeCode {
    pub const ZERO: Self = Self(0.0);

    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    pub fn as_secs(self) -> f64 {
        self.0
    }

    pub fn as_millis(self) -> f64 {
        self.0 * 1000.0
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.0;
        let hours = (total_secs / 3600.0) as u32;
        let mins = ((total_secs % 3600.0) / 60.0) as u32;
        let secs = total_secs % 60.0;
        write!(f, "{hours:02}:{mins:02}:{secs:06.3}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_normalize_negative_height() {
        let r = Rect::new(0, 100, 50, -20);
        let n = r.normalized();
        assert_eq!(n, Rect::new(0, -20, 50, 100));
        assert!(n.width() >= 0 && n.height() >= 0);
    }

    #[test]
    fn rect_normalize_is_idempotent() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.normalized(), r);
        assert_eq!(r.normalized().normalized(), r);
    }

    #[test]
    fn valign_flip_roundtrip() {
        assert_eq!(VAlign::Top.flipped(), VAlign::Bottom);
        assert_eq!(VAlign::Bottom.flipped(), VAlign::Top);
        assert_eq!(VAlign::Center.flipped(), VAlign::Center);
        for v in [VAlign::Top, VAlign::Center, VAlign::Bottom] {
            assert_eq!(v.flipped().flipped(), v);
        }
    }

    #[test]
    fn rational_display() {
        assert_eq!(Rational::ONE.to_string(), "1");
        assert_eq!(Rational::new(16, 9).to_string(), "16/9");
    }

    #[test]
    fn timecode_display() {
        let tc = TimeCode::from_secs(3661.5);
        assert_eq!(tc.to_string(), "01:01:01.500");
    }
}
