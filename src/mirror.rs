//! Mirror reflection.
//! The UI is symmetric about the screen's vertical centre, so every right-side region is a
//! left-side region reflected horizontally. `y` never changes.

use tracing::debug;

use crate::generate::LeftSide;
use crate::order::{self, mirrored_identity};
use crate::region::{Extent, Region, RegionSet, Side};

/// Reflected left edge for a region spanning `x..x + width`.
/// The right edge lands exactly `x` pixels from the right screen border.
/// Saturates instead of overflowing; a saturated result is far off-screen and fails validation.
pub fn mirror_x(x: i32, width: i32, screen_width: i32) -> i32 {
    screen_width.saturating_sub(x).saturating_sub(width)
}

/// Reflects positions only; identity and slot fields are copied as-is.
pub fn reflect<E: Extent>(regions: &[Region<E>], params: E::Params, screen_width: i32) -> Vec<Region<E>> {
    regions
        .iter()
        .map(|region| {
            let size = region.size(params);
            Region {
                x: mirror_x(region.x, size.width, screen_width),
                ..region.clone()
            }
        })
        .collect()
}

/// Reflects and applies the +5 / bonus 10 -> 11 identity remap.
pub fn reflect_with_offset<E: Extent>(regions: &[Region<E>], params: E::Params, screen_width: i32) -> Vec<Region<E>> {
    let mut mirrored = reflect(regions, params, screen_width);
    for region in &mut mirrored {
        // Identities outside the left-side set have no mirror and are left unset for validation to flag
        region.participant_order = region.participant_order.and_then(mirrored_identity);
    }
    mirrored
}

/// Builds the right half from a stamped left half.
pub fn mirror_left_side(left: &LeftSide, screen_width: i32) -> RegionSet {
    let regions = &left.regions;

    // Capstone and standard slots reorder by their own right-side tables
    let mut capstone_slots = reflect(&regions.capstone_slots, (), screen_width);
    order::stamp_capstone_slots(&mut capstone_slots, Side::Right);
    let mut standard_slots = reflect(&regions.standard_slots, (), screen_width);
    order::stamp_standard_slots(&mut standard_slots, Side::Right);

    let model_thumbnails = reflect_with_offset(&regions.model_thumbnails, (), screen_width);
    let participant_boxes = reflect_with_offset(&regions.participant_boxes, left.participant_box_params, screen_width);
    let selected_slots = reflect_with_offset(&regions.selected_slots, left.selected_slot_params, screen_width);

    let right = RegionSet {
        capstone_slots,
        standard_slots,
        model_thumbnails,
        participant_boxes,
        selected_slots,
    };
    debug!(screen_width, "mirrored left side to right");
    right
}
