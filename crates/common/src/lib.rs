//! `opal-common` — Shared types, traits, and errors for the Opal video
//! presentation engine.
//!
//! This crate is the foundation the display pipeline and the host player
//! program against. It defines the core abstractions:
//!
//! - **Types**: `Rect`, `RectF`, `Rational`, `TimeCode`, `Orientation` (newtypes for safety)
//! - **Color**: `PixelFormat`, `ColorSpaceDesc`, `ColorRepr`, `ChromaLocation`
//! - **Frames**: `VideoFormat`, `SourceFrame`, `Subpicture` (data flow types)
//! - **GPU seam**: `RenderBackend`, `CurrentGuard`, descriptor structs
//! - **Render params**: `RenderParams` and its sub-configurations
//! - **Placement**: `PicturePlacer`, `DisplayGeometry`, `DefaultPlacer`
//! - **Output**: `VideoOutput`, `ControlQuery` (host-facing interface)
//! - **Errors**: `GpuError`, `OpenError`, `AssetError`, `ControlError` (thiserror-based)
//! - **Config**: `DisplayOptions` and friends

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod gpu;
pub mod output;
pub mod placement;
pub mod render;
pub mod types;

// Re-export commonly used items at crate root
pub use color::{
    AlphaMode, BitEncoding, ChromaLocation, ColorLevels, ColorPrimaries, ColorRepr,
    ColorSpaceDesc, ColorSystem, LightLevel, PixelFormat, TransferFunction, SUBTITLE_FORMATS,
};
pub use config::{CustomFilterOptions, DisplayOptions, LutMode};
pub use error::{AssetError, ControlError, GpuError, OpenError};
pub use frame::{FramePlane, SourceFrame, Subpicture, SubpictureRegion, VideoFormat};
pub use gpu::{
    CurrentGuard, HookHandle, ImageDesc, LutBinding, LutHandle, LutType, OverlayDesc,
    OverlayMode, PlaneData, PlaneRef, RenderBackend, RendererId, SwapchainFrame, TargetDesc,
    TextureId,
};
pub use output::{ControlQuery, VideoOutput};
pub use placement::{DefaultPlacer, DisplayGeometry, PicturePlacer, Place};
pub use render::{
    ColorMapParams, DebandParams, DitherMethod, DitherParams, FilterConfig, FilterKernel,
    PeakDetectParams, RenderIntent, RenderParams, ScalerPreset, SigmoidParams, ToneMapping,
};
pub use types::{
    Alignment, HAlign, Orientation, Rational, Rect, RectF, Rotation, TimeCode, VAlign,
};
