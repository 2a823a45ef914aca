//! Pixel formats, colorimetry descriptors, and chroma siting.

use serde::{Deserialize, Serialize};

/// Pixel format of a decoded picture or subtitle region.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    /// Planar YUV 4:2:0, 8-bit.
    I420,
    /// Planar YUV 4:2:2, 8-bit.
    I422,
    /// Planar YUV 4:4:4, 8-bit.
    I444,
    /// Planar YUV 4:2:0, 10-bit in 16-bit little-endian containers.
    I420_10,
    /// Y plane + interleaved UV at half resolution, 8-bit.
    Nv12,
    /// 10-bit NV12 variant (HDR content).
    P010,
    /// Packed RGBA, 8 bits per channel.
    Rgba,
    /// Packed BGRA, 8 bits per channel.
    Bgra,
    /// Packed RGB, 8 bits per channel, no alpha.
    Rgb24,
    /// Single-plane grayscale, 8-bit.
    Gray8,
}

impl PixelFormat {
    /// Number of planes a picture in this format carries.
    pub fn plane_count(self) -> usize {
        match self {
            Self::I420 | Self::I422 | Self::I444 | Self::I420_10 => 3,
            Self::Nv12 | Self::P010 => 2,
            Self::Rgba | Self::Bgra | Self::Rgb24 | Self::Gray8 => 1,
        }
    }

    pub fn is_yuv(self) -> bool {
        matches!(
            self,
            Self::I420 | Self::I422 | Self::I444 | Self::I420_10 | Self::Nv12 | Self::P010
        )
    }

    /// Nominal color depth in bits per component.
    pub fn bit_depth(self) -> u32 {
        match self {
            Self::I420_10 | Self::P010 => 10,
            _ => 8,
        }
    }

    /// Storage depth of one sample in bits (container size).
    pub fn sample_depth(self) -> u32 {
        match self {
            Self::I420_10 | Self::P010 => 16,
            _ => 8,
        }
    }

    /// Preferred substitution order when a backend does not support this
    /// format directly. Chains end before the universal [`Rgba`] default,
    /// which `open` falls back to unconditionally.
    ///
    /// [`Rgba`]: PixelFormat::Rgba
    pub fn fallbacks(self) -> &'static [PixelFormat] {
        match self {
            Self::I420 => &[Self::Nv12, Self::I422, Self::I444],
            Self::I422 => &[Self::I444, Self::I420, Self::Nv12],
            Self::I444 => &[Self::I422, Self::I420, Self::Nv12],
            Self::I420_10 => &[Self::P010, Self::I420, Self::Nv12],
            Self::Nv12 => &[Self::I420],
            Self::P010 => &[Self::I420_10, Self::Nv12, Self::I420],
            Self::Bgra => &[Self::Rgba],
            Self::Rgb24 => &[Self::Rgba, Self::Bgra],
            Self::Gray8 => &[Self::Rgba],
            Self::Rgba => &[],
        }
    }
}

/// Formats accepted for subtitle regions. Non-planar only: each region is a
/// single-plane image.
pub const SUBTITLE_FORMATS: &[PixelFormat] =
    &[PixelFormat::Rgba, PixelFormat::Bgra, PixelFormat::Gray8];

/// Color primaries. `Unknown` means "infer from the source".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorPrimaries {
    #[default]
    Unknown,
    /// BT.601 NTSC (SMPTE 170M).
    Bt601Ntsc,
    /// BT.601 PAL (BT.470 BG).
    Bt601Pal,
    Bt709,
    Bt2020,
    DciP3,
}

/// Transfer function. `Unknown` means "infer from the source".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferFunction {
    #[default]
    Unknown,
    Bt1886,
    Srgb,
    Linear,
    /// Perceptual Quantizer (HDR10).
    Pq,
    /// Hybrid Log-Gamma (broadcast HDR).
    Hlg,
}

/// Light level classification of the signal, re-inferred downstream when the
/// transfer function is overridden.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightLevel {
    #[default]
    Unknown,
    Display,
    SceneHlg,
    SceneRef,
}

/// YUV matrix coefficients used to decode the picture into RGB.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorSystem {
    #[default]
    Unknown,
    Bt601,
    Bt709,
    Bt2020Nc,
    Rgb,
}

/// Signal quantization range.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorLevels {
    #[default]
    Unknown,
    Limited,
    Full,
}

/// Alpha channel interpretation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlphaMode {
    #[default]
    Unknown,
    Independent,
    Premultiplied,
}

/// Bit-level encoding of the samples of one image.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitEncoding {
    /// Meaningful bits per component.
    pub color_depth: u32,
    /// Storage bits per sample.
    pub sample_depth: u32,
    /// Left shift of the color value within the sample.
    pub bit_shift: u32,
}

impl BitEncoding {
    /// Override the sample depth, rescaling the color depth so that the
    /// color-depth-to-sample-depth ratio is preserved. No-op when the
    /// current sample depth is zero.
    pub fn override_sample_depth(&mut self, depth: u32) {
        if self.sample_depth == 0 {
            return;
        }
        let scale = self.color_depth as f32 / self.sample_depth as f32;
        self.sample_depth = depth;
        self.color_depth = (scale * depth as f32) as u32;
    }
}

/// Color space of an image or render target.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorSpaceDesc {
    pub primaries: ColorPrimaries,
    pub transfer: TransferFunction,
    pub light: LightLevel,
    /// Peak signal level relative to SDR reference white (0.0 = unknown).
    pub sig_peak: f32,
    /// Average signal level relative to SDR reference white (0.0 = unknown).
    pub sig_avg: f32,
}

/// Color representation of an image or render target.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRepr {
    pub system: ColorSystem,
    pub levels: ColorLevels,
    pub alpha: AlphaMode,
    pub bits: BitEncoding,
}

/// Sub-pixel position of chroma samples relative to luma samples.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChromaLocation {
    #[default]
    Unknown,
    Left,
    Center,
    TopLeft,
    Top,
    BottomLeft,
    Bottom,
}

impl ChromaLocation {
    /// Sample offset of chroma planes in chroma-pixel units, or `None` when
    /// the location is indeterminate.
    pub fn offset(self) -> Option<(f32, f32)> {
        match self {
            Self::Unknown => None,
            Self::Left => Some((-0.5, 0.0)),
            Self::Center => Some((0.0, 0.0)),
            Self::TopLeft => Some((-0.5, -0.5)),
            Self::Top => Some((0.0, -0.5)),
            Self::BottomLeft => Some((-0.5, 0.5)),
            Self::Bottom => Some((0.0, 0.5)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_counts() {
        assert_eq!(PixelFormat::I420.plane_count(), 3);
        assert_eq!(PixelFormat::Nv12.plane_count(), 2);
        assert_eq!(PixelFormat::Rgba.plane_count(), 1);
        assert_eq!(PixelFormat::Gray8.plane_count(), 1);
    }

    #[test]
    fn yuv_classification() {
        assert!(PixelFormat::I420.is_yuv());
        assert!(PixelFormat::P010.is_yuv());
        assert!(!PixelFormat::Rgba.is_yuv());
        assert!(!PixelFormat::Gray8.is_yuv());
    }

    #[test]
    fn rgba_has_no_fallbacks() {
        assert!(PixelFormat::Rgba.fallbacks().is_empty());
    }

    #[test]
    fn subtitle_formats_are_single_plane() {
        for fmt in SUBTITLE_FORMATS {
            assert_eq!(fmt.plane_count(), 1, "{fmt:?} is not single-plane");
        }
    }

    #[test]
    fn sample_depth_override_preserves_ratio() {
        // 10-bit color in 10-bit samples, overridden to 8: ratio 1.0 is kept.
        let mut bits = BitEncoding {
            color_depth: 10,
            sample_depth: 10,
            bit_shift: 0,
        };
        bits.override_sample_depth(8);
        assert_eq!(bits.color_depth, 8);
        assert_eq!(bits.sample_depth, 8);

        // 10-bit color in 16-bit samples, overridden to 8.
        let mut bits = BitEncoding {
            color_depth: 10,
            sample_depth: 16,
            bit_shift: 0,
        };
        bits.override_sample_depth(8);
        assert_eq!(bits.sample_depth, 8);
        assert_eq!(bits.color_depth, 5);
    }

    #[test]
    fn sample_depth_override_ignores_empty_encoding() {
        let mut bits = BitEncoding::default();
        bits.override_sample_depth(8);
        assert_eq!(bits, BitEncoding::default());
    }

    #[test]
    fn chroma_offset_unknown_is_none() {
        assert!(ChromaLocation::Unknown.offset().is_none());
        assert_eq!(ChromaLocation::Left.offset(), Some((-0.5, 0.0)));
        assert_eq!(ChromaLocation::Center.offset(), Some((0.0, 0.0)));
    }
}
