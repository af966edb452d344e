//! Screen layout mapper.
//! Turns 68 clicked reference points on a fixed-resolution screenshot into the complete, labelled
//! set of regions a screen reader samples at runtime. Only the left half is clicked: the right
//! half comes from mirror symmetry, and repeating rows/columns are extrapolated from two anchors.
//!
//! Pipeline: clicks -> rectangles (`input`, `geometry`) -> left side (`generate`) ->
//! identities (`order`) -> right side (`mirror`) -> checks (`validate`) -> document (`document`).

pub mod calibrate;
pub mod compare;
pub mod config;
pub mod document;
pub mod error;
pub mod generate;
pub mod geometry;
pub mod input;
pub mod mirror;
pub mod order;
pub mod region;
pub mod render;
pub mod validate;

pub use config::Screen;
pub use document::{Layout, LayoutDocument};
pub use error::{LayoutError, LayoutResult};
pub use geometry::Point;
pub use validate::{ValidationReport, validate_layout};

use tracing::info;

/// Runs generation, identity assignment and mirroring for one click sequence.
/// Validation is a separate step so callers can decide what a failed report means.
pub fn generate_layout(points: &[Point], screen_width: i32) -> LayoutResult<Layout> {
    if !(1..=input::MAX_COORDINATE).contains(&screen_width) {
        return Err(LayoutError::ScreenWidthOutOfRange {
            width: screen_width,
            limit: input::MAX_COORDINATE,
        });
    }
    let clicks = input::ClickSet::from_points(points)?;

    let mut left = generate::generate_left_side(&clicks)?;
    order::stamp_left_side(&mut left.regions);

    let right = mirror::mirror_left_side(&left, screen_width);
    let layout = Layout::assemble(left, right);

    info!(
        capstone_slots = layout.regions.capstone_slots.len(),
        standard_slots = layout.regions.standard_slots.len(),
        model_thumbnails = layout.regions.model_thumbnails.len(),
        participant_boxes = layout.regions.participant_boxes.len(),
        selected_slots = layout.regions.selected_slots.len(),
        "layout generated"
    );
    Ok(layout)
}
