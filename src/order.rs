//! Identity assignment.
//! These tables are the layout's semantics. Capstone and standard slots use explicit per-side
//! tables; model thumbnails, participant boxes and selected slots mirror by a +5 offset with the
//! bonus pair 10 <-> 11 as the only exception.

use crate::generate::SLOTS_PER_PARTICIPANT;
use crate::region::{GridRegion, RegionSet, Side, SizedRegion};

/// Participant rows on the left half, top to bottom. 10 is the left bonus participant.
pub const LEFT_PARTICIPANTS: [u8; 6] = [0, 1, 2, 3, 4, 10];
/// Participant rows on the right half, top to bottom. 11 is the right bonus participant.
pub const RIGHT_PARTICIPANTS: [u8; 6] = [5, 6, 7, 8, 9, 11];

/// Capstone grid, row-major, 3 columns x 2 rows per side.
pub const CAPSTONE_LEFT: [u8; 6] = [0, 1, 2, 3, 4, 10];
pub const CAPSTONE_RIGHT: [u8; 6] = [7, 6, 5, 11, 9, 8];

pub const STANDARD_SLOTS_PER_ROW: usize = 3;

pub const BONUS_LEFT: u8 = 10;
pub const BONUS_RIGHT: u8 = 11;
pub const MIRROR_OFFSET: u8 = 5;

/// Left identity to right identity for the offset-mirrored categories.
/// Only left-side identities (0..=4 and the bonus 10) have a mirror.
pub fn mirrored_identity(left: u8) -> Option<u8> {
    match left {
        BONUS_LEFT => Some(BONUS_RIGHT),
        0..=4 => Some(left + MIRROR_OFFSET),
        _ => None,
    }
}

/// Stamps every left-side category.
pub fn stamp_left_side(regions: &mut RegionSet) {
    stamp_capstone_slots(&mut regions.capstone_slots, Side::Left);
    stamp_standard_slots(&mut regions.standard_slots, Side::Left);
    stamp_model_thumbnails(&mut regions.model_thumbnails);
    stamp_participant_boxes(&mut regions.participant_boxes);
    stamp_selected_slots(&mut regions.selected_slots);
}

pub fn stamp_capstone_slots(slots: &mut [SizedRegion], side: Side) {
    let table = match side {
        Side::Left => &CAPSTONE_LEFT,
        Side::Right => &CAPSTONE_RIGHT,
    };
    for (slot, &participant) in slots.iter_mut().zip(table) {
        slot.participant_order = Some(participant);
    }
}

/// Row `r` belongs to the side's `r`-th participant; column `c` is slot `c + 1`.
pub fn stamp_standard_slots(slots: &mut [SizedRegion], side: Side) {
    let rows = match side {
        Side::Left => &LEFT_PARTICIPANTS,
        Side::Right => &RIGHT_PARTICIPANTS,
    };
    for (row, &participant) in slots.chunks_mut(STANDARD_SLOTS_PER_ROW).zip(rows) {
        for (col, slot) in row.iter_mut().enumerate() {
            slot.participant_order = Some(participant);
            slot.slot_order = Some(col as u8 + 1);
        }
    }
}

/// Only ever stamped on the left; the right side is offset-mirrored.
pub fn stamp_model_thumbnails(models: &mut [SizedRegion]) {
    for (model, &participant) in models.iter_mut().zip(&LEFT_PARTICIPANTS) {
        model.participant_order = Some(participant);
    }
}

/// Generation order is identity order (no bonus box exists).
pub fn stamp_participant_boxes(boxes: &mut [GridRegion]) {
    for (i, participant_box) in boxes.iter_mut().enumerate() {
        participant_box.participant_order = Some(i as u8);
    }
}

pub fn stamp_selected_slots(slots: &mut [GridRegion]) {
    for (i, slot) in slots.iter_mut().enumerate() {
        slot.participant_order = Some((i / SLOTS_PER_PARTICIPANT) as u8);
    }
}
