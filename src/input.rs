//! Click partitioning.
//! The operator clicks exactly 68 points in a fixed order, left half of the screen only.
//! `CLICK_PLAN` is the single description of that order; partitioning walks it.

use tracing::debug;

use crate::error::{LayoutError, LayoutResult};
use crate::geometry::{CornerConvention, Point, Rect};
use crate::region::Category;

/// One contiguous run of corner pairs in the click sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickSegment {
    pub category: Category,
    pub convention: CornerConvention,
    pub pairs: usize,
    pub hint: &'static str,
}

impl ClickSegment {
    pub const fn points(&self) -> usize {
        self.pairs * 2
    }
}

pub static CLICK_PLAN: [ClickSegment; 5] = [
    ClickSegment {
        category: Category::CapstoneSlots,
        convention: CornerConvention::BottomLeftTopRight,
        pairs: 6,
        hint: "3 columns x 2 rows, row by row",
    },
    ClickSegment {
        category: Category::StandardSlots,
        convention: CornerConvention::TopLeftBottomRight,
        pairs: 18,
        hint: "3 columns x 6 rows, row by row",
    },
    ClickSegment {
        category: Category::ModelThumbnails,
        convention: CornerConvention::TopLeftBottomRight,
        pairs: 6,
        hint: "participants 0, 1, 2, 3, 4, 10",
    },
    ClickSegment {
        category: Category::ParticipantBoxes,
        convention: CornerConvention::TopLeftBottomRight,
        pairs: 2,
        hint: "participants 0 and 1 only",
    },
    ClickSegment {
        category: Category::SelectedSlots,
        convention: CornerConvention::TopLeftBottomRight,
        pairs: 2,
        hint: "participant 0, slots 1 and 2 only",
    },
];

/// Total clicks one capture takes.
pub const CLICK_COUNT: usize = 68;

/// Largest accepted coordinate magnitude, far beyond any real screen.
/// Keeps every derived sum and spacing product inside `i32`.
pub const MAX_COORDINATE: i32 = 1 << 20;

/// Resolved left-side rectangles, grouped by category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClickSet {
    pub capstone_slots: Vec<Rect>,
    pub standard_slots: Vec<Rect>,
    pub model_thumbnails: Vec<Rect>,
    pub participant_anchors: Vec<Rect>,
    pub selected_anchors: Vec<Rect>,
}

impl ClickSet {
    /// Partitions a full click sequence. Anything other than 68 points, or any point beyond
    /// `MAX_COORDINATE`, is rejected before any rectangle is resolved.
    pub fn from_points(points: &[Point]) -> LayoutResult<ClickSet> {
        if points.len() != CLICK_COUNT {
            return Err(LayoutError::PointCount {
                expected: CLICK_COUNT,
                supplied: points.len(),
            });
        }

        if let Some((i, p)) = points.iter().enumerate().find(|(_, p)| !in_range(**p)) {
            return Err(LayoutError::CoordinateOutOfRange {
                click: i + 1,
                x: p.x,
                y: p.y,
                limit: MAX_COORDINATE,
            });
        }

        let [capstone, standard, models, participants, selected] = &CLICK_PLAN;
        let mut rest = points;
        let mut take = |segment: &ClickSegment| {
            let (head, tail) = rest.split_at(segment.points());
            rest = tail;
            debug!(category = %segment.category, pairs = segment.pairs, "parsed click segment");
            resolve_pairs(head, segment.convention)
        };

        Ok(ClickSet {
            capstone_slots: take(capstone),
            standard_slots: take(standard),
            model_thumbnails: take(models),
            participant_anchors: take(participants),
            selected_anchors: take(selected),
        })
    }
}

fn in_range(p: Point) -> bool {
    (-MAX_COORDINATE..=MAX_COORDINATE).contains(&p.x) && (-MAX_COORDINATE..=MAX_COORDINATE).contains(&p.y)
}

/// Resolves consecutive corner pairs. A trailing unpaired point is ignored.
pub fn resolve_pairs(points: &[Point], convention: CornerConvention) -> Vec<Rect> {
    points
        .chunks_exact(2)
        .map(|pair| convention.resolve(pair[0], pair[1]))
        .collect()
}
