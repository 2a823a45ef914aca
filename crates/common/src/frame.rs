//! Decoded pictures and subtitle compositions — input to the frame renderer.

use crate::color::{
    ChromaLocation, ColorLevels, ColorPrimaries, ColorSystem, PixelFormat, TransferFunction,
};
use crate::types::{Orientation, Rational, Rect, TimeCode};

/// Static description of a video stream's output format, negotiated at
/// session open and consulted on every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoFormat {
    pub pixel_format: PixelFormat,
    /// Full (coded) picture dimensions.
    pub width: u32,
    pub height: u32,
    /// Visible region within the coded picture.
    pub x_offset: u32,
    pub y_offset: u32,
    pub visible_width: u32,
    pub visible_height: u32,
    /// Sample aspect ratio.
    pub sar: Rational,
    pub orientation: Orientation,
    pub chroma_location: ChromaLocation,
    /// Signalled colorimetry; `Unknown` fields are inferred from geometry.
    pub primaries: ColorPrimaries,
    pub transfer: TransferFunction,
    pub system: ColorSystem,
    pub levels: ColorLevels,
    /// Mastering peak luminance relative to SDR white (0.0 = unsignalled).
    pub sig_peak: f32,
}

impl VideoFormat {
    /// A format with the given pixel format and dimensions, everything else
    /// unsignalled. The visible region covers the full picture.
    pub fn new(pixel_format: PixelFormat, width: u32, height: u32) -> Self {
        Self {
            pixel_format,
            width,
            height,
            x_offset: 0,
            y_offset: 0,
            visible_width: width,
            visible_height: height,
            sar: Rational::ONE,
            orientation: Orientation::Normal,
            chroma_location: ChromaLocation::Unknown,
            primaries: ColorPrimaries::Unknown,
            transfer: TransferFunction::Unknown,
            system: ColorSystem::Unknown,
            levels: ColorLevels::Unknown,
            sig_peak: 0.0,
        }
    }

    /// The visible region as a rect in coded-picture coordinates.
    pub fn visible_rect(&self) -> Rect {
        Rect::new(
            self.x_offset as i32,
            self.y_offset as i32,
            (self.x_offset + self.visible_width) as i32,
            (self.y_offset + self.visible_height) as i32,
        )
    }
}

/// One plane of a decoded picture, borrowed from the decoder's buffers.
#[derive(Copy, Clone, Debug)]
pub struct FramePlane<'a> {
    pub data: &'a [u8],
    /// Plane dimensions in samples (chroma planes are subsampled).
    pub width: u32,
    pub height: u32,
    /// Row stride in bytes.
    pub stride: usize,
}

/// A decoded picture handed to `prepare` each display cycle.
#[derive(Clone, Debug)]
pub struct SourceFrame<'a> {
    /// Visible region of this picture in coded coordinates.
    pub crop: Rect,
    /// Planes in fixed index order (luma, chroma, chroma, alpha). Length
    /// must match the negotiated pixel format's plane count.
    pub planes: Vec<FramePlane<'a>>,
    pub pts: TimeCode,
}

/// One subtitle region: a single-plane image plus its placement offset
/// relative to the picture's on-screen origin.
#[derive(Clone, Debug)]
pub struct SubpictureRegion<'a> {
    pub plane: FramePlane<'a>,
    /// Region format; carries its own colorimetry, independent of the main
    /// picture's.
    pub format: VideoFormat,
    pub x: i32,
    pub y: i32,
}

/// An ordered set of subtitle regions composited over one frame.
#[derive(Clone, Debug, Default)]
pub struct Subpicture<'a> {
    pub regions: Vec<SubpictureRegion<'a>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_rect_honors_offsets() {
        let mut fmt = VideoFormat::new(PixelFormat::I420, 1920, 1088);
        fmt.y_offset = 4;
        fmt.visible_height = 1080;
        assert_eq!(fmt.visible_rect(), Rect::new(0, 4, 1920, 1084));
    }

    #[test]
    fn new_format_is_unsignalled() {
        let fmt = VideoFormat::new(PixelFormat::Nv12, 1280, 720);
        assert_eq!(fmt.primaries, ColorPrimaries::Unknown);
        assert_eq!(fmt.transfer, TransferFunction::Unknown);
        assert_eq!(fmt.chroma_location, ChromaLocation::Unknown);
        assert_eq!(fmt.visible_width, 1280);
    }
}
