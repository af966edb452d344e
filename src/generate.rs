//! Left-side generation.
//! Capstone slots, standard slots and model thumbnails are clicked one by one and pass through.
//! Participant boxes and selected slots are extrapolated from two anchors each:
//! boxes step down by a constant vertical spacing, selected slots step right by a constant
//! horizontal spacing and then repeat once per participant box.
//! Identities are stamped afterwards by `order`; the terminal-slot flag is geometric and set here.

use tracing::debug;

use crate::error::{LayoutError, LayoutResult};
use crate::geometry::{Rect, Size};
use crate::input::ClickSet;
use crate::region::{Category, GridRegion, RegionSet, SizedRegion};

/// Selected slots per participant; the last one is the terminal slot.
pub const SLOTS_PER_PARTICIPANT: usize = 4;

/// Left half of the layout plus the category-wide sizes taken from the first anchors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeftSide {
    pub regions: RegionSet,
    pub participant_box_params: Size,
    pub selected_slot_params: Size,
}

/// Builds every left-side region from the resolved clicks.
pub fn generate_left_side(clicks: &ClickSet) -> LayoutResult<LeftSide> {
    let capstone_slots = pass_through(Category::CapstoneSlots, &clicks.capstone_slots)?;
    let standard_slots = pass_through(Category::StandardSlots, &clicks.standard_slots)?;
    let model_thumbnails = pass_through(Category::ModelThumbnails, &clicks.model_thumbnails)?;

    let participant_boxes = generate_participant_boxes(&clicks.participant_anchors)?;
    let selected_slots = generate_selected_slots(&clicks.selected_anchors, &participant_boxes)?;

    // Shared sizes come from the first anchor of each pair
    let participant_box_params = clicks.participant_anchors[0].size();
    let selected_slot_params = clicks.selected_anchors[0].size();

    debug!(
        participant_boxes = participant_boxes.len(),
        selected_slots = selected_slots.len(),
        "generated left side"
    );

    Ok(LeftSide {
        regions: RegionSet {
            capstone_slots,
            standard_slots,
            model_thumbnails,
            participant_boxes,
            selected_slots,
        },
        participant_box_params,
        selected_slot_params,
    })
}

/// Converts individually clicked rectangles into regions. The count must match the category's
/// per-side cardinality exactly.
pub fn pass_through(category: Category, rects: &[Rect]) -> LayoutResult<Vec<SizedRegion>> {
    let expected = category.per_side();
    if rects.len() < expected {
        return Err(LayoutError::InsufficientInput {
            category,
            required: expected,
            supplied: rects.len(),
        });
    }
    if rects.len() > expected {
        return Err(LayoutError::ExcessInput {
            category,
            expected,
            supplied: rects.len(),
        });
    }
    Ok(rects.iter().copied().map(SizedRegion::from_rect).collect())
}

/// Five participant boxes: the two anchors verbatim, then three more continuing the spacing.
pub fn generate_participant_boxes(anchors: &[Rect]) -> LayoutResult<Vec<GridRegion>> {
    let [first, second] = two_anchors(Category::ParticipantBoxes, anchors)?;
    let spacing = second.y - first.y;
    if spacing <= 0 {
        return Err(LayoutError::NonPositiveSpacing {
            category: Category::ParticipantBoxes,
            spacing,
        });
    }

    let mut boxes = vec![GridRegion::at(first.x, first.y), GridRegion::at(second.x, second.y)];
    for k in 2..Category::ParticipantBoxes.per_side() as i32 {
        boxes.push(GridRegion::at(first.x, second.y + (k - 1) * spacing));
    }
    Ok(boxes)
}

/// Four slots per participant box. The template row comes from participant 0's first two slots;
/// each further row is shifted by that box's vertical offset from box 0.
pub fn generate_selected_slots(anchors: &[Rect], participant_boxes: &[GridRegion]) -> LayoutResult<Vec<GridRegion>> {
    let [first, second] = two_anchors(Category::SelectedSlots, anchors)?;
    let spacing = second.x - first.x;
    if spacing <= 0 {
        return Err(LayoutError::NonPositiveSpacing {
            category: Category::SelectedSlots,
            spacing,
        });
    }

    let Some(box0) = participant_boxes.first() else {
        return Err(LayoutError::InsufficientInput {
            category: Category::ParticipantBoxes,
            required: Category::ParticipantBoxes.per_side(),
            supplied: 0,
        });
    };

    let mut slots = Vec::with_capacity(participant_boxes.len() * SLOTS_PER_PARTICIPANT);
    for participant in participant_boxes {
        let y_offset = participant.y - box0.y;
        for j in 0..SLOTS_PER_PARTICIPANT {
            let mut slot = GridRegion::at(first.x + j as i32 * spacing, first.y + y_offset);
            slot.is_terminal_slot = Some(j == SLOTS_PER_PARTICIPANT - 1);
            slots.push(slot);
        }
    }
    Ok(slots)
}

fn two_anchors(category: Category, anchors: &[Rect]) -> LayoutResult<[Rect; 2]> {
    match anchors {
        [first, second] => Ok([*first, *second]),
        _ if anchors.len() < 2 => Err(LayoutError::InsufficientInput {
            category,
            required: 2,
            supplied: anchors.len(),
        }),
        _ => Err(LayoutError::ExcessInput {
            category,
            expected: 2,
            supplied: anchors.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_boxes_continue_spacing() {
        let anchors = [Rect::new(50, 100, 80, 40), Rect::new(52, 160, 80, 40)];
        let boxes = generate_participant_boxes(&anchors).unwrap();
        let positions: Vec<(i32, i32)> = boxes.iter().map(|b| (b.x, b.y)).collect();
        // Anchor 1 keeps its own x; extrapolated boxes use anchor 0's x
        assert_eq!(positions, vec![(50, 100), (52, 160), (50, 220), (50, 280), (50, 340)]);
    }

    #[test]
    fn test_zero_spacing_is_rejected() {
        let anchors = [Rect::new(50, 100, 80, 40), Rect::new(50, 100, 80, 40)];
        match generate_participant_boxes(&anchors) {
            Err(LayoutError::NonPositiveSpacing { category, spacing }) => {
                assert_eq!(category, Category::ParticipantBoxes);
                assert_eq!(spacing, 0);
            }
            other => panic!("expected NonPositiveSpacing, got {:?}", other),
        }
    }

    #[test]
    fn test_selected_slots_grid() {
        let anchors = [Rect::new(50, 100, 80, 40), Rect::new(50, 160, 80, 40)];
        let boxes = generate_participant_boxes(&anchors).unwrap();
        let slot_anchors = [Rect::new(140, 110, 20, 20), Rect::new(165, 110, 20, 20)];
        let slots = generate_selected_slots(&slot_anchors, &boxes).unwrap();

        assert_eq!(slots.len(), 20);
        let first_row: Vec<i32> = slots[..4].iter().map(|s| s.x).collect();
        assert_eq!(first_row, vec![140, 165, 190, 215]);
        // Row for participant 3 is shifted by 3 box spacings
        assert!(slots[12..16].iter().all(|s| s.y == 110 + 180));
        let terminal: Vec<bool> = slots[..4].iter().map(|s| s.is_terminal_slot == Some(true)).collect();
        assert_eq!(terminal, vec![false, false, false, true]);
    }

    #[test]
    fn test_selected_slots_need_rightward_spacing() {
        let boxes = generate_participant_boxes(&[Rect::new(50, 100, 80, 40), Rect::new(50, 160, 80, 40)]).unwrap();
        for (second_x, expected) in [(140, 0), (110, -30)] {
            let slot_anchors = [Rect::new(140, 110, 20, 20), Rect::new(second_x, 110, 20, 20)];
            match generate_selected_slots(&slot_anchors, &boxes) {
                Err(LayoutError::NonPositiveSpacing { category, spacing }) => {
                    assert_eq!(category, Category::SelectedSlots);
                    assert_eq!(spacing, expected);
                }
                other => panic!("expected NonPositiveSpacing, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_missing_anchor_is_insufficient_input() {
        let err = generate_participant_boxes(&[Rect::new(0, 0, 1, 1)]).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InsufficientInput {
                category: Category::ParticipantBoxes,
                required: 2,
                supplied: 1
            }
        ));
        assert!(err.to_string().contains("participant-boxes"));
    }

    #[test]
    fn test_pass_through_requires_exact_count() {
        let rects = vec![Rect::new(0, 0, 10, 10); 5];
        assert!(matches!(
            pass_through(Category::ModelThumbnails, &rects),
            Err(LayoutError::InsufficientInput { supplied: 5, .. })
        ));
        let rects = vec![Rect::new(0, 0, 10, 10); 7];
        assert!(matches!(
            pass_through(Category::ModelThumbnails, &rects),
            Err(LayoutError::ExcessInput { supplied: 7, .. })
        ));
        let rects = vec![Rect::new(0, 0, 10, 10); 6];
        assert_eq!(pass_through(Category::ModelThumbnails, &rects).unwrap().len(), 6);
    }
}
