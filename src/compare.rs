//! Reference comparison.
//! Checks a generated layout against a known-good one (for example a layout measured by hand
//! for a resolution that is already supported), region by region in document order.

use serde::Serialize;

use crate::document::Layout;
use crate::geometry::Size;
use crate::region::{Category, Extent, Region};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegionDelta {
    pub index: usize,
    pub participant_order: Option<u8>,
    pub slot_order: Option<u8>,
    pub delta_x: i32,
    pub delta_y: i32,
    pub delta_width: i32,
    pub delta_height: i32,
    /// Euclidean distance between the two origins.
    pub position_error: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryComparison {
    pub category: &'static str,
    pub expected_count: usize,
    pub calculated_count: usize,
    pub deltas: Vec<RegionDelta>,
}

impl CategoryComparison {
    pub fn max_error(&self) -> f64 {
        self.deltas.iter().map(|d| d.position_error).fold(0.0, f64::max)
    }

    pub fn mean_error(&self) -> f64 {
        if self.deltas.is_empty() {
            return 0.0;
        }
        self.deltas.iter().map(|d| d.position_error).sum::<f64>() / self.deltas.len() as f64
    }

    pub fn count_matches(&self) -> bool {
        self.expected_count == self.calculated_count
    }
}

/// Compares every category of `calculated` against `expected`.
pub fn compare_layouts(expected: &Layout, calculated: &Layout) -> Vec<CategoryComparison> {
    let (e, c) = (&expected.regions, &calculated.regions);
    vec![
        compare_category(Category::CapstoneSlots, &e.capstone_slots, (), &c.capstone_slots, ()),
        compare_category(Category::StandardSlots, &e.standard_slots, (), &c.standard_slots, ()),
        compare_category(Category::ModelThumbnails, &e.model_thumbnails, (), &c.model_thumbnails, ()),
        compare_category(
            Category::ParticipantBoxes,
            &e.participant_boxes,
            expected.participant_box_params,
            &c.participant_boxes,
            calculated.participant_box_params,
        ),
        compare_category(
            Category::SelectedSlots,
            &e.selected_slots,
            expected.selected_slot_params,
            &c.selected_slots,
            calculated.selected_slot_params,
        ),
    ]
}

fn compare_category<E: Extent>(
    category: Category,
    expected: &[Region<E>],
    expected_params: E::Params,
    calculated: &[Region<E>],
    calculated_params: E::Params,
) -> CategoryComparison {
    let deltas = expected
        .iter()
        .zip(calculated)
        .enumerate()
        .map(|(index, (exp, calc))| {
            let exp_size: Size = exp.size(expected_params);
            let calc_size: Size = calc.size(calculated_params);
            let delta_x = calc.x - exp.x;
            let delta_y = calc.y - exp.y;
            RegionDelta {
                index,
                participant_order: exp.participant_order,
                slot_order: exp.slot_order,
                delta_x,
                delta_y,
                delta_width: calc_size.width - exp_size.width,
                delta_height: calc_size.height - exp_size.height,
                position_error: f64::from(delta_x).hypot(f64::from(delta_y)),
            }
        })
        .collect();

    CategoryComparison {
        category: category.key(),
        expected_count: expected.len(),
        calculated_count: calculated.len(),
        deltas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::region::{GridRegion, RegionSet, SizedRegion};

    fn layout(models: Vec<SizedRegion>, boxes: Vec<GridRegion>, box_size: Size) -> Layout {
        Layout {
            regions: RegionSet {
                model_thumbnails: models,
                participant_boxes: boxes,
                ..RegionSet::default()
            },
            participant_box_params: box_size,
            selected_slot_params: Size::new(20, 20),
        }
    }

    #[test]
    fn test_identical_layouts_have_no_error() {
        let a = layout(
            vec![SizedRegion::from_rect(Rect::new(10, 10, 50, 50))],
            vec![GridRegion::at(5, 5)],
            Size::new(80, 30),
        );
        for comparison in compare_layouts(&a, &a.clone()) {
            assert_eq!(comparison.max_error(), 0.0);
            assert!(comparison.count_matches());
        }
    }

    #[test]
    fn test_deltas_and_errors() {
        let expected = layout(
            vec![SizedRegion::from_rect(Rect::new(10, 10, 50, 50))],
            vec![GridRegion::at(5, 5), GridRegion::at(5, 65)],
            Size::new(80, 30),
        );
        let calculated = layout(
            vec![SizedRegion::from_rect(Rect::new(13, 14, 52, 49))],
            vec![GridRegion::at(5, 5)],
            Size::new(81, 30),
        );
        let comparisons = compare_layouts(&expected, &calculated);

        let models = &comparisons[2];
        assert_eq!(models.category, "model_thumbnails");
        let delta = &models.deltas[0];
        assert_eq!((delta.delta_x, delta.delta_y), (3, 4));
        assert_eq!((delta.delta_width, delta.delta_height), (2, -1));
        assert!((delta.position_error - 5.0).abs() < 1e-9);

        let boxes = &comparisons[3];
        assert!(!boxes.count_matches());
        assert_eq!(boxes.deltas.len(), 1);
        assert_eq!(boxes.deltas[0].delta_width, 1);
    }
}
