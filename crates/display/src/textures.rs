//! Cached GPU textures, reused frame-to-frame.
//!
//! The backend's upload primitive owns creation and resizing; this module
//! only owns the slots. Plane slots are a fixed array of four; overlay slots
//! grow to the maximum region count seen and never shrink.

use opal_common::error::GpuError;
use opal_common::gpu::{RenderBackend, TextureId};

/// The maximum number of planes a picture can carry.
pub const MAX_PLANES: usize = 4;

/// One cached texture per decoded-frame plane.
#[derive(Debug, Default)]
pub struct PlaneTextures {
    slots: [Option<TextureId>; MAX_PLANES],
}

impl PlaneTextures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot_mut(&mut self, index: usize) -> &mut Option<TextureId> {
        &mut self.slots[index]
    }

    /// Destroy all cached textures. Must be called with the context current.
    pub fn destroy_all(&mut self, gpu: &dyn RenderBackend) {
        for slot in &mut self.slots {
            gpu.destroy_texture(slot);
        }
    }
}

/// One cached texture per subtitle region, in a never-shrinking slot array.
#[derive(Debug, Default)]
pub struct OverlayTextures {
    slots: Vec<Option<TextureId>>,
}

impl OverlayTextures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Grow the slot array to hold at least `count` entries. New slots start
    /// empty so the upload primitive treats them as first-use. The array is
    /// never shrunk; allocation failure is reported rather than aborting.
    pub fn ensure_slots(&mut self, count: usize) -> Result<(), GpuError> {
        if count <= self.slots.len() {
            return Ok(());
        }
        let extra = count - self.slots.len();
        self.slots
            .try_reserve(extra)
            .map_err(|_| GpuError::OutOfMemory(extra * std::mem::size_of::<Option<TextureId>>()))?;
        self.slots.resize(count, None);
        Ok(())
    }

    pub fn slot_mut(&mut self, index: usize) -> &mut Option<TextureId> {
        &mut self.slots[index]
    }

    /// Destroy all cached textures. Must be called with the context current.
    pub fn destroy_all(&mut self, gpu: &dyn RenderBackend) {
        for slot in &mut self.slots {
            gpu.destroy_texture(slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_slots_grow_and_never_shrink() {
        let mut overlays = OverlayTextures::new();
        assert!(overlays.is_empty());

        overlays.ensure_slots(3).unwrap();
        assert_eq!(overlays.len(), 3);

        overlays.ensure_slots(1).unwrap();
        assert_eq!(overlays.len(), 3, "slot array must never shrink");

        overlays.ensure_slots(5).unwrap();
        assert_eq!(overlays.len(), 5);
    }

    #[test]
    fn grown_slots_start_empty() {
        let mut overlays = OverlayTextures::new();
        overlays.ensure_slots(2).unwrap();
        *overlays.slot_mut(0) = Some(TextureId(7));

        overlays.ensure_slots(4).unwrap();
        assert_eq!(*overlays.slot_mut(0), Some(TextureId(7)));
        for i in 1..4 {
            assert!(overlays.slot_mut(i).is_none());
        }
    }

    #[test]
    fn plane_slots_start_empty() {
        let mut planes = PlaneTextures::new();
        for i in 0..MAX_PLANES {
            assert!(planes.slot_mut(i).is_none());
        }
    }
}
