//! `opal-display` — GPU display pipeline for the Opal video presentation
//! engine.
//!
//! This crate bridges a media player's video output to a GPU rendering
//! backend through the [`RenderBackend`] seam defined in `opal-common`:
//!
//! 1. **Translate** — picture planes and colorimetry into backend
//!    descriptors via [`translate`]
//! 2. **Upload** — into cached per-plane and per-overlay textures via
//!    [`textures`]
//! 3. **Place** — orientation, flip compensation, and background-clear
//!    decisions via [`geometry`]
//! 4. **Render** — one dispatch per frame with the parameters assembled
//!    once at open time via [`params`]
//!
//! [`RenderBackend`]: opal_common::RenderBackend

pub mod assets;
pub mod geometry;
pub mod params;
pub mod session;
pub mod textures;
pub mod translate;

// Re-export primary API
pub use assets::AssetCache;
pub use params::{AssembledParams, TargetOverrides};
pub use session::DisplaySession;
