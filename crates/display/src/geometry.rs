//! Placement and orientation geometry.
//!
//! Two concerns live here: mapping the source orientation tag onto the
//! backend's crop/rotation model, and compensating for swapchain buffers
//! that deliver frames upside down.

use opal_common::placement::Place;
use opal_common::types::{Orientation, Rect, RectF, Rotation};

/// Express the source orientation through the crop rectangle and rotation
/// tag. Flips swap the crop's axis endpoints; rotations tag the descriptor;
/// the transposed cases combine a 90-degree tag with an axis swap.
pub fn apply_orientation(crop: &mut RectF, orientation: Orientation) -> Rotation {
    match orientation {
        Orientation::Normal => Rotation::Deg0,
        Orientation::HFlipped => {
            std::mem::swap(&mut crop.x0, &mut crop.x1);
            Rotation::Deg0
        }
        Orientation::VFlipped => {
            std::mem::swap(&mut crop.y0, &mut crop.y1);
            Rotation::Deg0
        }
        Orientation::Rotated90 => Rotation::Deg90,
        Orientation::Rotated180 => Rotation::Deg180,
        Orientation::Rotated270 => Rotation::Deg270,
        Orientation::Transposed => {
            std::mem::swap(&mut crop.y0, &mut crop.y1);
            Rotation::Deg90
        }
        Orientation::AntiTransposed => {
            std::mem::swap(&mut crop.x0, &mut crop.x1);
            Rotation::Deg90
        }
    }
}

/// Map a placed rectangle into a flipped buffer's coordinate system: invert
/// the vertical origin and negate the height. Pairs with flipping the
/// vertical alignment before placement.
pub fn flip_place(place: &mut Place, fb_height: u32) {
    place.y = fb_height as i32 - place.y;
    place.height = -place.height;
}

/// Whether the placement exactly covers the framebuffer. When it does not,
/// the framebuffer must be cleared before compositing to avoid stale content
/// outside the picture area.
pub fn covers_framebuffer(place: &Place, width: u32, height: u32) -> bool {
    let full = Rect::new(0, 0, width as i32, height as i32);
    place.rect().normalized() == full
}
