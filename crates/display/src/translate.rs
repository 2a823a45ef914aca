//! Plane and color translators.
//!
//! Convert decoded pictures and their format metadata into the render
//! backend's ingestion types: [`PlaneData`] layouts for upload, and
//! [`ColorSpaceDesc`]/[`ColorRepr`] descriptors with SD/HD inference for
//! unsignalled colorimetry.

use opal_common::color::{
    AlphaMode, BitEncoding, ColorLevels, ColorPrimaries, ColorRepr, ColorSpaceDesc, ColorSystem,
    LightLevel, PixelFormat, TransferFunction,
};
use opal_common::error::GpuError;
use opal_common::frame::{FramePlane, SourceFrame, SubpictureRegion, VideoFormat};
use opal_common::gpu::PlaneData;

/// Byte/pixel layout of one plane: pixel stride, component bit sizes, and
/// the channel each component feeds.
fn plane_layout(format: PixelFormat, index: usize) -> (usize, [u32; 4], [i8; 4]) {
    match format {
        PixelFormat::I420 | PixelFormat::I422 | PixelFormat::I444 => {
            (1, [8, 0, 0, 0], [index as i8, -1, -1, -1])
        }
        PixelFormat::I420_10 => (2, [16, 0, 0, 0], [index as i8, -1, -1, -1]),
        PixelFormat::Nv12 => match index {
            0 => (1, [8, 0, 0, 0], [0, -1, -1, -1]),
            _ => (2, [8, 8, 0, 0], [1, 2, -1, -1]),
        },
        PixelFormat::P010 => match index {
            0 => (2, [16, 0, 0, 0], [0, -1, -1, -1]),
            _ => (4, [16, 16, 0, 0], [1, 2, -1, -1]),
        },
        PixelFormat::Rgba => (4, [8, 8, 8, 8], [0, 1, 2, 3]),
        PixelFormat::Bgra => (4, [8, 8, 8, 8], [2, 1, 0, 3]),
        PixelFormat::Rgb24 => (3, [8, 8, 8, 0], [0, 1, 2, -1]),
        PixelFormat::Gray8 => (1, [8, 0, 0, 0], [0, -1, -1, -1]),
    }
}

fn plane_data_for<'a>(
    plane: &FramePlane<'a>,
    format: PixelFormat,
    index: usize,
) -> Result<PlaneData<'a>, GpuError> {
    let (pixel_stride, component_size, component_map) = plane_layout(format, index);
    let needed = plane.stride * plane.height as usize;
    if plane.data.len() < needed {
        return Err(GpuError::Translate(format!(
            "plane {index}: {} bytes for {}x{} with stride {}",
            plane.data.len(),
            plane.width,
            plane.height,
            plane.stride
        )));
    }
    Ok(PlaneData {
        width: plane.width,
        height: plane.height,
        row_stride: plane.stride,
        pixel_stride,
        component_size,
        component_map,
        data: plane.data,
    })
}

/// Translate a decoded picture into per-plane upload descriptors, in fixed
/// plane index order.
pub fn plane_data<'a>(
    frame: &SourceFrame<'a>,
    format: PixelFormat,
) -> Result<Vec<PlaneData<'a>>, GpuError> {
    if frame.planes.len() != format.plane_count() {
        return Err(GpuError::Translate(format!(
            "expected {} planes for {format:?}, got {}",
            format.plane_count(),
            frame.planes.len()
        )));
    }
    frame
        .planes
        .iter()
        .enumerate()
        .map(|(i, plane)| plane_data_for(plane, format, i))
        .collect()
}

/// Translate a subtitle region's single plane into an upload descriptor.
pub fn region_plane_data<'a>(region: &SubpictureRegion<'a>) -> Result<PlaneData<'a>, GpuError> {
    let format = region.format.pixel_format;
    if format.plane_count() != 1 {
        return Err(GpuError::Translate(format!(
            "subtitle region format {format:?} is not single-plane"
        )));
    }
    plane_data_for(&region.plane, format, 0)
}

/// Whether the format is standard definition for colorimetry purposes.
fn is_sd(fmt: &VideoFormat) -> bool {
    fmt.visible_height < 720
}

/// The engine colorspace of a picture in `fmt`, with unsignalled fields
/// inferred: RGB content defaults to sRGB, HD video to BT.709, SD video to
/// BT.601 (PAL line counts pick the 625-line variant).
pub fn color_space_of(fmt: &VideoFormat) -> ColorSpaceDesc {
    let yuv = fmt.pixel_format.is_yuv();
    let primaries = match fmt.primaries {
        ColorPrimaries::Unknown if !yuv => ColorPrimaries::Bt709,
        ColorPrimaries::Unknown if is_sd(fmt) => {
            if fmt.visible_height == 576 || fmt.visible_height == 288 {
                ColorPrimaries::Bt601Pal
            } else {
                ColorPrimaries::Bt601Ntsc
            }
        }
        ColorPrimaries::Unknown => ColorPrimaries::Bt709,
        p => p,
    };
    let transfer = match fmt.transfer {
        TransferFunction::Unknown if !yuv => TransferFunction::Srgb,
        TransferFunction::Unknown => TransferFunction::Bt1886,
        t => t,
    };
    ColorSpaceDesc {
        primaries,
        transfer,
        light: LightLevel::Unknown,
        sig_peak: fmt.sig_peak,
        sig_avg: 0.0,
    }
}

/// The engine color representation of a picture in `fmt`, with unsignalled
/// fields inferred (limited-range BT.709/BT.601 for YUV, full-range RGB
/// otherwise).
pub fn color_repr_of(fmt: &VideoFormat) -> ColorRepr {
    let pf = fmt.pixel_format;
    let yuv = pf.is_yuv();
    let system = match fmt.system {
        ColorSystem::Unknown if !yuv => ColorSystem::Rgb,
        ColorSystem::Unknown if fmt.primaries == ColorPrimaries::Bt2020 => ColorSystem::Bt2020Nc,
        ColorSystem::Unknown if is_sd(fmt) => ColorSystem::Bt601,
        ColorSystem::Unknown => ColorSystem::Bt709,
        s => s,
    };
    let levels = match fmt.levels {
        ColorLevels::Unknown if yuv => ColorLevels::Limited,
        ColorLevels::Unknown => ColorLevels::Full,
        l => l,
    };
    let alpha = match pf {
        PixelFormat::Rgba | PixelFormat::Bgra => AlphaMode::Independent,
        _ => AlphaMode::Unknown,
    };
    // P010 stores 10-bit color in the high bits of its 16-bit samples.
    let bit_shift = match pf {
        PixelFormat::P010 => 6,
        _ => 0,
    };
    ColorRepr {
        system,
        levels,
        alpha,
        bits: BitEncoding {
            color_depth: pf.bit_depth(),
            sample_depth: pf.sample_depth(),
            bit_shift,
        },
    }
}
