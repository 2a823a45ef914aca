//! Central error types for the presentation engine (thiserror-based).

use thiserror::Error;

/// Errors reported by the render backend.
#[derive(Error, Debug)]
pub enum GpuError {
    #[error("GPU context unavailable")]
    ContextUnavailable,

    #[error("renderer creation failed: {0}")]
    RendererCreation(String),

    #[error("plane upload failed: {0}")]
    UploadFailed(String),

    #[error("frame translation failed: {0}")]
    Translate(String),

    #[error("render dispatch failed: {0}")]
    RenderFailed(String),

    #[error("swapchain submission failed: {0}")]
    SubmitFailed(String),

    #[error("swapchain resize failed: {0}")]
    ResizeFailed(String),

    #[error("asset parse failed: {0}")]
    ParseFailed(String),

    #[error("out of memory: {0} bytes")]
    OutOfMemory(usize),
}

/// Fatal errors at session open. Nothing is left behind on failure.
#[derive(Error, Debug)]
pub enum OpenError {
    #[error("failed to acquire the GPU context")]
    MakeCurrent(#[source] GpuError),

    #[error("failed to create the renderer")]
    CreateRenderer(#[source] GpuError),
}

/// Asset loading errors (LUT and shader-hook files).
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[source] GpuError),
}

/// Errors from display control requests.
#[derive(Error, Debug)]
pub enum ControlError {
    #[error("unsupported display control request")]
    Unsupported,
}
