//! Host-facing video output interface.

use crate::error::ControlError;
use crate::frame::{SourceFrame, Subpicture};
use crate::types::{Rational, Rect, TimeCode};

/// Display control requests issued by the host between frames.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlQuery {
    /// The display area was resized; the swapchain should follow eagerly.
    DisplaySize { width: u32, height: u32 },
    /// Fill-the-display policy toggled.
    DisplayFilled(bool),
    /// Source aspect ratio changed.
    SourceAspect(Rational),
    /// Source crop changed (visible region in coded coordinates).
    SourceCrop(Rect),
    /// Zoom factor changed.
    Zoom(Rational),
    /// Request to invalidate already-prepared pictures. Not supported.
    ResetPictures,
}

/// The interface a display module exposes to the host player.
///
/// `open` is a constructor on the concrete type (it negotiates the display
/// format and can fail); teardown happens on drop. One `prepare` renders a
/// frame without presenting it; `display` presents the previously prepared
/// frame; `control` services geometry changes between frames.
pub trait VideoOutput {
    /// Render `frame` (plus the optional subtitle composition) into the next
    /// swapchain buffer without presenting it. Per-frame failures produce an
    /// error-colored frame rather than propagating; transient conditions
    /// skip the cycle silently.
    fn prepare(&mut self, frame: &SourceFrame<'_>, subpicture: Option<&Subpicture<'_>>, pts: TimeCode);

    /// Present the previously prepared frame. Independent of whether the
    /// prepare succeeded, to keep the display loop alive.
    fn display(&mut self, frame: &SourceFrame<'_>);

    /// Service a control request.
    fn control(&mut self, query: ControlQuery) -> Result<(), ControlError>;
}
