//! Layout validation.
//! Runs over the assembled left+right layout and collects every problem in one pass.
//! Errors (negative coordinates, reversed corners, out-of-bounds, wrong counts) fail the report;
//! warnings (degenerate sizes, identity anomalies) do not. Nothing is repaired here.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Screen;
use crate::document::Layout;
use crate::generate::SLOTS_PER_PARTICIPANT;
use crate::region::{Category, Extent, GridRegion, Region, SizedRegion};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub passed: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            passed: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl ValidationReport {
    pub fn error(&mut self, message: String) {
        self.passed = false;
        self.errors.push(message);
    }

    pub fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }
}

/// Checks bounds, sizes, counts and identities of a complete layout.
pub fn validate_layout(layout: &Layout, screen: Screen) -> ValidationReport {
    let mut report = ValidationReport::default();
    let regions = &layout.regions;

    check_regions(Category::CapstoneSlots, &regions.capstone_slots, (), screen, &mut report);
    check_regions(Category::StandardSlots, &regions.standard_slots, (), screen, &mut report);
    check_regions(Category::ModelThumbnails, &regions.model_thumbnails, (), screen, &mut report);
    check_regions(
        Category::ParticipantBoxes,
        &regions.participant_boxes,
        layout.participant_box_params,
        screen,
        &mut report,
    );
    check_regions(
        Category::SelectedSlots,
        &regions.selected_slots,
        layout.selected_slot_params,
        screen,
        &mut report,
    );

    for category in Category::ALL {
        let actual = regions.count(category);
        let expected = category.expected_total();
        if actual != expected {
            report.error(format!("{}: expected {} regions, got {}", category, expected, actual));
        }
    }

    check_unique_participants(Category::CapstoneSlots, &regions.capstone_slots, &mut report);
    check_unique_participants(Category::ModelThumbnails, &regions.model_thumbnails, &mut report);
    check_unique_participants(Category::ParticipantBoxes, &regions.participant_boxes, &mut report);
    check_standard_slot_identities(&regions.standard_slots, &mut report);
    check_selected_slot_groups(&regions.selected_slots, &mut report);

    if report.passed {
        info!(warnings = report.warnings.len(), "layout validation passed");
    } else {
        warn!(
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "layout validation failed"
        );
    }
    report
}

fn check_regions<E: Extent>(
    category: Category,
    regions: &[Region<E>],
    params: E::Params,
    screen: Screen,
    report: &mut ValidationReport,
) {
    for (i, region) in regions.iter().enumerate() {
        let label = region_label(category, i, region.participant_order);
        let size = region.size(params);

        if region.x < 0 || region.y < 0 {
            report.error(format!("{}: negative coordinates (x={}, y={})", label, region.x, region.y));
        }
        if size.is_negative() {
            report.error(format!(
                "{}: negative size {}x{} (corners clicked in the wrong order?)",
                label, size.width, size.height
            ));
        } else if size.is_empty() {
            report.warn(format!("{}: zero-sized region {}x{}", label, size.width, size.height));
        }
        // Touching the screen edge is allowed; sums in i64 so hand-built layouts cannot overflow
        if i64::from(region.x) + i64::from(size.width) > i64::from(screen.width) {
            report.error(format!("{}: extends beyond width {}", label, screen.width));
        }
        if i64::from(region.y) + i64::from(size.height) > i64::from(screen.height) {
            report.error(format!("{}: extends beyond height {}", label, screen.height));
        }
    }
}

fn region_label(category: Category, index: usize, participant: Option<u8>) -> String {
    match participant {
        Some(p) => format!("{}[{}] participant_order={}", category, index, p),
        None => format!("{}[{}]", category, index),
    }
}

fn check_unique_participants<E>(category: Category, regions: &[Region<E>], report: &mut ValidationReport) {
    let mut seen: BTreeMap<u8, usize> = BTreeMap::new();
    for (i, region) in regions.iter().enumerate() {
        match region.participant_order {
            Some(p) => *seen.entry(p).or_default() += 1,
            None => report.warn(format!("{}[{}]: missing participant_order", category, i)),
        }
    }
    for (participant, count) in seen {
        if count > 1 {
            report.warn(format!("{}: participant {} appears {} times", category, participant, count));
        }
    }
}

fn check_standard_slot_identities(slots: &[SizedRegion], report: &mut ValidationReport) {
    let mut seen: BTreeMap<(Option<u8>, Option<u8>), usize> = BTreeMap::new();
    for slot in slots {
        *seen.entry((slot.participant_order, slot.slot_order)).or_default() += 1;
    }
    for ((participant, slot), count) in seen {
        if count > 1 {
            report.warn(format!(
                "{}: participant {:?} slot {:?} appears {} times",
                Category::StandardSlots,
                participant,
                slot,
                count
            ));
        }
    }
}

fn check_selected_slot_groups(slots: &[GridRegion], report: &mut ValidationReport) {
    // participant -> (slots, terminal slots)
    let mut groups: BTreeMap<Option<u8>, (usize, usize)> = BTreeMap::new();
    for slot in slots {
        let group = groups.entry(slot.participant_order).or_default();
        group.0 += 1;
        if slot.is_terminal_slot == Some(true) {
            group.1 += 1;
        }
    }
    for (participant, (count, terminals)) in groups {
        if count != SLOTS_PER_PARTICIPANT || terminals != 1 {
            report.warn(format!(
                "{}: participant {:?} has {} slots and {} terminal slots",
                Category::SelectedSlots,
                participant,
                count,
                terminals
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Size};
    use crate::region::RegionSet;

    const SCREEN: Screen = Screen { width: 1920, height: 1080 };

    fn layout_with_models(models: Vec<SizedRegion>) -> Layout {
        Layout {
            regions: RegionSet {
                model_thumbnails: models,
                ..RegionSet::default()
            },
            participant_box_params: Size::new(100, 40),
            selected_slot_params: Size::new(20, 20),
        }
    }

    #[test]
    fn test_edge_touching_region_is_in_bounds() {
        let layout = layout_with_models(vec![SizedRegion::from_rect(Rect::new(1820, 980, 100, 100))]);
        let report = validate_layout(&layout, SCREEN);
        assert!(!report.errors.iter().any(|e| e.contains("extends beyond")), "{:?}", report.errors);
    }

    #[test]
    fn test_one_pixel_over_is_reported() {
        let layout = layout_with_models(vec![SizedRegion::from_rect(Rect::new(1821, 980, 100, 101))]);
        let report = validate_layout(&layout, SCREEN);
        assert!(!report.passed);
        assert!(report.errors.iter().any(|e| e.contains("extends beyond width")));
        assert!(report.errors.iter().any(|e| e.contains("extends beyond height")));
    }

    #[test]
    fn test_negative_size_is_error() {
        let layout = layout_with_models(vec![SizedRegion::from_rect(Rect::new(150, 200, -50, -20))]);
        let report = validate_layout(&layout, SCREEN);
        assert!(!report.passed);
        assert!(report.errors.iter().any(|e| e.contains("negative size -50x-20")));
    }

    #[test]
    fn test_negative_coordinates_and_counts_collected() {
        let layout = layout_with_models(vec![SizedRegion::from_rect(Rect::new(-1, 5, 10, 10))]);
        let report = validate_layout(&layout, SCREEN);
        assert!(report.errors.iter().any(|e| e.contains("negative coordinates")));
        // All five categories are short; every one is reported, not just the first
        let count_errors = report.errors.iter().filter(|e| e.contains("expected")).count();
        assert_eq!(count_errors, 5);
    }

    #[test]
    fn test_shared_params_used_for_bounds() {
        let mut layout = layout_with_models(Vec::new());
        layout.regions.participant_boxes.push(GridRegion::at(1900, 10));
        let report = validate_layout(&layout, SCREEN);
        assert!(report.errors.iter().any(|e| e.starts_with("participant-boxes[0]") && e.contains("width")));
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        let layout = layout_with_models(vec![SizedRegion::from_rect(Rect::new(i32::MAX, i32::MAX, i32::MAX, 1))]);
        let report = validate_layout(&layout, SCREEN);
        assert!(report.errors.iter().any(|e| e.contains("extends beyond width")));
        assert!(report.errors.iter().any(|e| e.contains("extends beyond height")));
    }

    #[test]
    fn test_identity_anomalies_are_warnings() {
        let mut a = SizedRegion::from_rect(Rect::new(0, 0, 10, 10));
        a.participant_order = Some(3);
        let layout = layout_with_models(vec![a.clone(), a]);
        let report = validate_layout(&layout, SCREEN);
        assert!(report.warnings.iter().any(|w| w.contains("participant 3 appears 2 times")));
    }
}
