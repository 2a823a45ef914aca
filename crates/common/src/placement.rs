//! Picture placement seam.
//!
//! Placement policy belongs to the host player; the session only needs "give
//! me the on-screen rectangle for this source in this display area". The
//! [`PicturePlacer`] trait is that seam, and [`DefaultPlacer`] is a
//! reference implementation (aspect-correct fit with alignment and zoom).

use serde::{Deserialize, Serialize};

use crate::frame::VideoFormat;
use crate::types::{Alignment, HAlign, Rational, Rect, VAlign};

/// The display area and policy placement works against. The session updates
/// this from control requests and per-frame framebuffer dimensions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayGeometry {
    pub width: u32,
    pub height: u32,
    pub align: Alignment,
    /// Scale the picture to fill the display area (keeping aspect) instead
    /// of using the zoomed source size.
    pub fill: bool,
    pub zoom: Rational,
}

impl DisplayGeometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            align: Alignment::default(),
            fill: true,
            zoom: Rational::ONE,
        }
    }
}

/// The computed on-screen rectangle. `height` may be negated afterwards by
/// flip compensation, so it is signed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Place {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Place {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Computes where the picture lands on screen.
pub trait PicturePlacer: Send + Sync {
    fn place(&self, source: &VideoFormat, display: &DisplayGeometry) -> Place;
}

/// Aspect-ratio-correct placement with alignment, fill, and zoom.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultPlacer;

impl PicturePlacer for DefaultPlacer {
    fn place(&self, source: &VideoFormat, display: &DisplayGeometry) -> Place {
        // Display-aspect source dimensions: visible size corrected by SAR.
        let src_w = source.visible_width as f64 * source.sar.as_f64();
        let src_h = source.visible_height as f64;
        if src_w <= 0.0 || src_h <= 0.0 {
            return Place::default();
        }

        let (width, height) = if display.fill {
            // Fit inside the display area, preserving aspect.
            let scale = (display.width as f64 / src_w).min(display.height as f64 / src_h);
            (src_w * scale, src_h * scale)
        } else {
            let zoom = display.zoom.as_f64();
            (src_w * zoom, src_h * zoom)
        };
        let width = width.round() as i32;
        let height = height.round() as i32;

        let x = match display.align.horizontal {
            HAlign::Left => 0,
            HAlign::Center => (display.width as i32 - width) / 2,
            HAlign::Right => display.width as i32 - width,
        };
        let y = match display.align.vertical {
            VAlign::Top => 0,
            VAlign::Center => (display.height as i32 - height) / 2,
            VAlign::Bottom => display.height as i32 - height,
        };

        Place {
            x,
            y,
            width,
            height,
        }
    }
}
