//! The display session — per-frame render pipeline and lifecycle.
//!
//! One [`DisplaySession`] owns the renderer, the texture caches, the
//! assembled render configuration, and the loaded assets. Every display
//! cycle, [`prepare`] acquires a swapchain frame, uploads the picture planes
//! and any subtitle regions into cached textures, computes placement, and
//! dispatches one render pass; [`display`] presents the result.
//!
//! All GPU work is bracketed by [`CurrentGuard`]; failing to acquire the
//! context skips the cycle and the host retries naturally on the next one.
//!
//! [`prepare`]: DisplaySession::prepare
//! [`display`]: DisplaySession::display

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use opal_common::color::{ChromaLocation, PixelFormat, SUBTITLE_FORMATS};
use opal_common::config::{DisplayOptions, LutMode};
use opal_common::error::{ControlError, GpuError, OpenError};
use opal_common::frame::{SourceFrame, Subpicture, VideoFormat};
use opal_common::gpu::{
    CurrentGuard, ImageDesc, LutBinding, LutType, OverlayDesc, OverlayMode, RenderBackend,
    RendererId, SwapchainFrame, TargetDesc,
};
use opal_common::output::{ControlQuery, VideoOutput};
use opal_common::placement::{DisplayGeometry, PicturePlacer, Place};
use opal_common::render::RenderParams;
use opal_common::types::{RectF, TimeCode};

use crate::assets::AssetCache;
use crate::geometry;
use crate::params::{self, TargetOverrides};
use crate::textures::{OverlayTextures, PlaneTextures};
use crate::translate;

/// Flat fill used when a frame fails to render, so failure is visible
/// instead of silently showing stale content.
const RENDER_ERROR_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// Background clear color for placements not covering the framebuffer.
const TRANSPARENT_BLACK: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

/// A live display session bridging the host player to the render backend.
pub struct DisplaySession {
    gpu: Arc<dyn RenderBackend>,
    placer: Box<dyn PicturePlacer>,
    renderer: RendererId,
    /// Negotiated source format; aspect/crop fields track control requests.
    format: VideoFormat,
    geometry: DisplayGeometry,
    chroma_loc: ChromaLocation,
    planes: PlaneTextures,
    overlays: OverlayTextures,
    /// Per-frame overlay descriptors; the allocation is reused across frames.
    overlay_descs: Vec<OverlayDesc>,
    params: RenderParams,
    target: TargetOverrides,
    lut_mode: LutMode,
    assets: AssetCache,
}

impl DisplaySession {
    /// Open a display session.
    ///
    /// Negotiates the display pixel format (the requested format, a
    /// supported fallback, or RGBA as the universal default) and assembles
    /// the render configuration from `options`. Returns the session together
    /// with the accepted format. On failure nothing is left behind.
    pub fn open(
        gpu: Arc<dyn RenderBackend>,
        placer: Box<dyn PicturePlacer>,
        options: &DisplayOptions,
        format: &VideoFormat,
        geometry: DisplayGeometry,
    ) -> Result<(Self, PixelFormat), OpenError> {
        let renderer = {
            let _guard = CurrentGuard::acquire(gpu.clone()).map_err(OpenError::MakeCurrent)?;
            gpu.create_renderer().map_err(OpenError::CreateRenderer)?
        };

        let accepted = negotiate_format(gpu.as_ref(), format.pixel_format);
        let mut format = format.clone();
        format.pixel_format = accepted;

        let chroma_loc = if accepted.is_yuv() {
            format.chroma_location
        } else {
            ChromaLocation::Unknown
        };

        // Asset parsing is CPU-side; the context is deliberately not held.
        let mut assets = AssetCache::new();
        let assembled = params::assemble(options, gpu.as_ref(), &mut assets);

        info!(
            format = ?accepted,
            width = format.width,
            height = format.height,
            "Opened display session"
        );

        let session = Self {
            gpu,
            placer,
            renderer,
            format,
            geometry,
            chroma_loc,
            planes: PlaneTextures::new(),
            overlays: OverlayTextures::new(),
            overlay_descs: Vec::new(),
            params: assembled.render,
            target: assembled.target,
            lut_mode: assembled.lut_mode,
            assets,
        };
        Ok((session, accepted))
    }

    /// Formats accepted for subtitle regions (non-planar only).
    pub fn subtitle_formats(&self) -> &'static [PixelFormat] {
        SUBTITLE_FORMATS
    }

    /// The negotiated source format.
    pub fn format(&self) -> &VideoFormat {
        &self.format
    }

    /// Steps 2-6 of the frame pipeline. Any error here fails the current
    /// frame (not the session); the caller paints the error color and still
    /// submits.
    fn render_frame(
        &mut self,
        sc: &SwapchainFrame,
        frame: &SourceFrame<'_>,
        subpicture: Option<&Subpicture<'_>>,
    ) -> Result<(), GpuError> {
        let data = translate::plane_data(frame, self.format.pixel_format)?;

        let mut planes = Vec::with_capacity(data.len());
        for (i, plane_data) in data.iter().enumerate() {
            let mut plane = self.gpu.upload_plane(self.planes.slot_mut(i), plane_data)?;
            // Siting offsets apply to the chroma planes, never luma or alpha.
            if i != 0 && i != 3 {
                if let Some((dx, dy)) = self.chroma_loc.offset() {
                    plane.shift_x += dx;
                    plane.shift_y += dy;
                }
            }
            planes.push(plane);
        }

        let mut crop = RectF::from(frame.crop);
        let rotation = geometry::apply_orientation(&mut crop, self.format.orientation);

        // Place against the actual framebuffer. Flipped buffers take two
        // compensating inversions: vertical alignment before placement, the
        // placed rectangle's vertical origin and extent after.
        let mut geo = self.geometry.clone();
        geo.width = sc.width;
        geo.height = sc.height;
        if sc.flipped {
            geo.align.vertical = geo.align.vertical.flipped();
        }
        let mut place = self.placer.place(&self.format, &geo);
        if sc.flipped {
            geometry::flip_place(&mut place, sc.height);
        }

        let mut target_color = sc.color;
        let mut target_repr = sc.repr;
        self.target.apply(&mut target_color, &mut target_repr);

        let num_overlays = match subpicture {
            Some(sub) => self.upload_overlays(sub, &place, sc.flipped)?,
            None => 0,
        };

        // Anything outside the picture area would show stale content.
        if !geometry::covers_framebuffer(&place, sc.width, sc.height) {
            self.gpu.clear_texture(sc.fbo, TRANSPARENT_BLACK);
        }

        let mut image = ImageDesc {
            planes,
            color: translate::color_space_of(&self.format),
            repr: translate::color_repr_of(&self.format),
            crop,
            rotation,
            lut: None,
        };
        let mut target_lut = None;
        if let Some(lut) = self.assets.lut() {
            match self.lut_mode {
                LutMode::Decoding => {
                    image.lut = Some(LutBinding {
                        lut,
                        kind: LutType::Conversion,
                    });
                }
                LutMode::Encoding => {
                    target_lut = Some(LutBinding {
                        lut,
                        kind: LutType::Conversion,
                    });
                }
                _ => {}
            }
        }

        let target = TargetDesc {
            fbo: sc.fbo,
            crop: RectF::new(
                place.x as f32,
                place.y as f32,
                (place.x + place.width) as f32,
                (place.y + place.height) as f32,
            ),
            color: target_color,
            repr: target_repr,
            lut: target_lut,
            overlays: &self.overlay_descs[..num_overlays],
        };

        self.gpu
            .render_image(self.renderer, &image, &target, &self.params)
    }

    /// Upload the subtitle regions into cached overlay textures. A region
    /// that fails to upload truncates the composition to the regions
    /// uploaded so far; only slot-array growth failure fails the frame.
    fn upload_overlays(
        &mut self,
        sub: &Subpicture<'_>,
        place: &Place,
        flipped: bool,
    ) -> Result<usize, GpuError> {
        self.overlays.ensure_slots(sub.regions.len())?;
        self.overlay_descs.clear();

        let ysign = if flipped { -1 } else { 1 };
        for (i, region) in sub.regions.iter().enumerate() {
            let uploaded = translate::region_plane_data(region)
                .and_then(|data| self.gpu.upload_plane(self.overlays.slot_mut(i), &data));
            let plane = match uploaded {
                Ok(plane) => plane,
                Err(e) => {
                    error!(region = i, error = %e, "Failed uploading subtitle region");
                    break; // keep the regions uploaded so far
                }
            };

            let width = region.format.visible_width as i32;
            let height = region.format.visible_height as i32;
            self.overlay_descs.push(OverlayDesc {
                plane,
                rect: RectF::new(
                    (place.x + region.x) as f32,
                    (place.y + region.y * ysign) as f32,
                    (place.x + region.x + width) as f32,
                    (place.y + (region.y + height) * ysign) as f32,
                ),
                mode: OverlayMode::Normal,
                color: translate::color_space_of(&region.format),
                repr: translate::color_repr_of(&region.format),
            });
        }
        Ok(self.overlay_descs.len())
    }
}

impl VideoOutput for DisplaySession {
    fn prepare(
        &mut self,
        frame: &SourceFrame<'_>,
        subpicture: Option<&Subpicture<'_>>,
        _pts: TimeCode,
    ) {
        let Ok(_guard) = CurrentGuard::acquire(self.gpu.clone()) else {
            return; // try again next cycle
        };
        let Some(sc) = self.gpu.start_frame() else {
            return; // surface temporarily unavailable, benign
        };

        let failed = match self.render_frame(&sc, frame, subpicture) {
            Ok(()) => false,
            Err(e) => {
                error!(error = %e, "Failed rendering frame");
                true
            }
        };

        if failed {
            self.gpu.clear_texture(sc.fbo, RENDER_ERROR_COLOR);
        }
        // Submit regardless of the failure flag to keep the swapchain going.
        if let Err(e) = self.gpu.submit_frame() {
            error!(error = %e, "Failed submitting frame");
        }
    }

    fn display(&mut self, _frame: &SourceFrame<'_>) {
        if let Ok(_guard) = CurrentGuard::acquire(self.gpu.clone()) {
            self.gpu.swap_buffers();
        }
    }

    fn control(&mut self, query: ControlQuery) -> Result<(), ControlError> {
        match query {
            ControlQuery::DisplaySize { width, height } => {
                // Resize eagerly rather than relying on implicit platform
                // resize; transient failures are swallowed and the session
                // continues with whatever the swapchain reports.
                let Ok(_guard) = CurrentGuard::acquire(self.gpu.clone()) else {
                    return Ok(());
                };
                let (mut w, mut h) = (width, height);
                if let Err(e) = self.gpu.resize_swapchain(&mut w, &mut h) {
                    debug!(error = %e, "Swapchain resize not honored");
                }
                if (w, h) != (width, height) {
                    warn!(
                        requested_width = width,
                        requested_height = height,
                        width = w,
                        height = h,
                        "Swapchain resized to different dimensions"
                    );
                }
                self.geometry.width = w;
                self.geometry.height = h;
                Ok(())
            }
            ControlQuery::DisplayFilled(fill) => {
                self.geometry.fill = fill;
                Ok(())
            }
            ControlQuery::SourceAspect(sar) => {
                self.format.sar = sar;
                Ok(())
            }
            ControlQuery::SourceCrop(crop) => {
                let crop = crop.normalized();
                self.format.x_offset = crop.x0.max(0) as u32;
                self.format.y_offset = crop.y0.max(0) as u32;
                self.format.visible_width = crop.width() as u32;
                self.format.visible_height = crop.height() as u32;
                Ok(())
            }
            ControlQuery::Zoom(zoom) => {
                self.geometry.zoom = zoom;
                Ok(())
            }
            query => {
                error!(?query, "Unsupported display control request");
                Err(ControlError::Unsupported)
            }
        }
    }
}

impl Drop for DisplaySession {
    fn drop(&mut self) {
        if let Ok(_guard) = CurrentGuard::acquire(self.gpu.clone()) {
            self.planes.destroy_all(self.gpu.as_ref());
            self.overlays.destroy_all(self.gpu.as_ref());
            self.gpu.destroy_renderer(self.renderer);
        }
        // LUTs and shader hooks are CPU-side objects; freeing them does not
        // need the context.
        self.assets.release(self.gpu.as_ref());
        debug!("Display session closed");
    }
}

/// Pick the display format: the requested one if supported, else the first
/// supported fallback, else RGBA unconditionally.
fn negotiate_format(gpu: &dyn RenderBackend, requested: PixelFormat) -> PixelFormat {
    if gpu.format_supported(requested) {
        return requested;
    }
    for &fallback in requested.fallbacks() {
        if gpu.format_supported(fallback) {
            debug!(?requested, ?fallback, "Substituted display format");
            return fallback;
        }
    }
    warn!(
        ?requested,
        "Failed picking any suitable display format, falling back to RGBA"
    );
    PixelFormat::Rgba
}
