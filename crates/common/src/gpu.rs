//! Render backend abstraction.
//!
//! The [`RenderBackend`] trait is the seam between the display session and
//! the GPU rendering library plus its windowing context. The host creates a
//! backend from its window/surface and hands it to the session; everything
//! GPU-touching goes through this trait under the make-current discipline
//! enforced by [`CurrentGuard`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::color::{ColorRepr, ColorSpaceDesc};
use crate::error::GpuError;
use crate::render::RenderParams;
use crate::types::{RectF, Rotation};

/// Opaque backend texture handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Opaque backend renderer handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RendererId(pub u64);

/// Opaque handle to a parsed color lookup table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LutHandle(pub u64);

/// Opaque handle to a parsed custom shader hook.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HookHandle(pub u64);

/// How a bound LUT is interpreted by the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LutType {
    /// Applied in the image's native colorspace.
    Native,
    /// Applied on normalized (linear) values.
    Normalized,
    /// Replaces the color conversion step entirely.
    Conversion,
}

/// A LUT handle together with its interpretation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LutBinding {
    pub lut: LutHandle,
    pub kind: LutType,
}

/// Raw plane memory laid out for upload, the backend's ingestion format.
#[derive(Copy, Clone, Debug)]
pub struct PlaneData<'a> {
    /// Plane dimensions in samples.
    pub width: u32,
    pub height: u32,
    /// Row stride in bytes.
    pub row_stride: usize,
    /// Distance between the first bits of two consecutive pixels, in bytes.
    pub pixel_stride: usize,
    /// Bit size of each component; zero for unused component slots.
    pub component_size: [u32; 4],
    /// Which image channel each component feeds (-1 = unused).
    pub component_map: [i8; 4],
    pub data: &'a [u8],
}

/// A plane as referenced by a render dispatch: the cached texture plus the
/// chroma siting shift in sample units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneRef {
    pub texture: TextureId,
    pub shift_x: f32,
    pub shift_y: f32,
}

/// One frame acquired from the swapchain.
#[derive(Copy, Clone, Debug)]
pub struct SwapchainFrame {
    /// The framebuffer to render into.
    pub fbo: TextureId,
    pub width: u32,
    pub height: u32,
    /// The surface delivers frames upside down; placement must compensate.
    pub flipped: bool,
    /// Colorimetry of the display surface.
    pub color: ColorSpaceDesc,
    pub repr: ColorRepr,
}

/// Overlay blending mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OverlayMode {
    #[default]
    Normal,
    /// Single-channel image interpreted as alpha.
    Monochrome,
}

/// One overlay region ready for compositing.
#[derive(Copy, Clone, Debug)]
pub struct OverlayDesc {
    pub plane: PlaneRef,
    /// On-screen rectangle in framebuffer coordinates; extents follow the
    /// buffer's flip orientation.
    pub rect: RectF,
    pub mode: OverlayMode,
    /// The region's own colorimetry, independent of the main picture.
    pub color: ColorSpaceDesc,
    pub repr: ColorRepr,
}

/// Source image descriptor for one render dispatch.
#[derive(Clone, Debug)]
pub struct ImageDesc {
    /// Uploaded planes in fixed index order.
    pub planes: Vec<PlaneRef>,
    pub color: ColorSpaceDesc,
    pub repr: ColorRepr,
    /// Source crop in coded-picture coordinates; axis endpoints may be
    /// swapped to express flips.
    pub crop: RectF,
    pub rotation: Rotation,
    /// LUT applied to the source before color conversion (Decoding mode).
    pub lut: Option<LutBinding>,
}

/// Render target descriptor for one render dispatch.
#[derive(Clone, Debug)]
pub struct TargetDesc<'a> {
    pub fbo: TextureId,
    /// Destination rectangle; extents may be negative on flipped buffers.
    pub crop: RectF,
    pub color: ColorSpaceDesc,
    pub repr: ColorRepr,
    /// LUT applied to the target after color conversion (Encoding mode).
    pub lut: Option<LutBinding>,
    pub overlays: &'a [OverlayDesc],
}

/// Capability provider for all GPU operations.
///
/// Every method other than [`make_current`]/[`release_current`] must only be
/// called while the context is current. [`upload_plane`] owns texture
/// lifecycle: it creates the slot's texture on first use and transparently
/// recreates it when the plane geometry or format changes.
///
/// [`make_current`]: RenderBackend::make_current
/// [`release_current`]: RenderBackend::release_current
/// [`upload_plane`]: RenderBackend::upload_plane
pub trait RenderBackend: Send + Sync {
    // -- Context discipline --

    fn make_current(&self) -> Result<(), GpuError>;
    fn release_current(&self);

    /// Whether pictures in `format` can be uploaded and sampled directly.
    fn format_supported(&self, format: crate::color::PixelFormat) -> bool;

    // -- Renderer lifecycle --

    fn create_renderer(&self) -> Result<RendererId, GpuError>;
    fn destroy_renderer(&self, renderer: RendererId);

    // -- Textures --

    /// Upload plane data into the cached slot, creating or resizing the
    /// texture as needed. Returns the plane reference for this dispatch.
    fn upload_plane(
        &self,
        slot: &mut Option<TextureId>,
        data: &PlaneData<'_>,
    ) -> Result<PlaneRef, GpuError>;

    fn destroy_texture(&self, slot: &mut Option<TextureId>);

    /// Clear a texture to a flat RGBA color.
    fn clear_texture(&self, texture: TextureId, color: [f32; 4]);

    // -- Swapchain --

    /// Acquire the next swapchain frame. `None` means the surface is
    /// temporarily unavailable; the caller skips the cycle.
    fn start_frame(&self) -> Option<SwapchainFrame>;

    fn submit_frame(&self) -> Result<(), GpuError>;

    fn swap_buffers(&self);

    /// Request new swapchain dimensions. On return the arguments hold the
    /// dimensions actually in effect.
    fn resize_swapchain(&self, width: &mut u32, height: &mut u32) -> Result<(), GpuError>;

    // -- Asset parsing --

    fn parse_cube_lut(&self, data: &[u8]) -> Result<LutHandle, GpuError>;
    fn free_lut(&self, lut: LutHandle);

    fn parse_shader_hook(&self, source: &[u8]) -> Result<HookHandle, GpuError>;
    fn free_shader_hook(&self, hook: HookHandle);

    // -- Rendering --

    /// Dispatch one render pass: sample `image`, composite overlays, write
    /// into the target, applying `params`.
    fn render_image(
        &self,
        renderer: RendererId,
        image: &ImageDesc,
        target: &TargetDesc<'_>,
        params: &RenderParams,
    ) -> Result<(), GpuError>;
}

/// Scoped make-current guard. The context is released when the guard drops,
/// on every exit path.
pub struct CurrentGuard {
    backend: Arc<dyn RenderBackend>,
}

impl CurrentGuard {
    /// Make the context current. Failure leaves nothing acquired; callers
    /// treat it as "skip this cycle".
    pub fn acquire(backend: Arc<dyn RenderBackend>) -> Result<Self, GpuError> {
        backend.make_current()?;
        Ok(Self { backend })
    }
}

impl Drop for CurrentGuard {
    fn drop(&mut self) {
        self.backend.release_current();
    }
}
