//! Review overlay.
//! Draws every generated region over the screenshot it was mapped from, one colour per category,
//! so an operator can eyeball the layout before it is persisted.
//! Colours: capstone cyan, standard green, model blue, participant magenta, selected red.

use anyhow::{Context, Result, bail};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect as PixelRect;
use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::document::Layout;
use crate::region::{Category, Extent, Region};

const CYAN: Rgb<u8> = Rgb([0, 255, 255]);
const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
const MAGENTA: Rgb<u8> = Rgb([255, 0, 255]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);

/// Outline thickness in pixels.
const STROKE: i32 = 2;

pub fn category_color(category: Category) -> Rgb<u8> {
    match category {
        Category::CapstoneSlots => CYAN,
        Category::StandardSlots => GREEN,
        Category::ModelThumbnails => BLUE,
        Category::ParticipantBoxes => MAGENTA,
        Category::SelectedSlots => RED,
    }
}

/// Draws the layout onto `canvas`. Returns how many regions were drawn;
/// regions with a non-positive size are skipped.
pub fn draw_layout(canvas: &mut RgbImage, layout: &Layout) -> usize {
    let regions = &layout.regions;
    let mut drawn = 0;
    drawn += draw_regions(canvas, Category::CapstoneSlots, &regions.capstone_slots, ());
    drawn += draw_regions(canvas, Category::StandardSlots, &regions.standard_slots, ());
    drawn += draw_regions(canvas, Category::ModelThumbnails, &regions.model_thumbnails, ());
    drawn += draw_regions(
        canvas,
        Category::ParticipantBoxes,
        &regions.participant_boxes,
        layout.participant_box_params,
    );
    drawn += draw_regions(
        canvas,
        Category::SelectedSlots,
        &regions.selected_slots,
        layout.selected_slot_params,
    );
    drawn
}

fn draw_regions<E: Extent>(canvas: &mut RgbImage, category: Category, regions: &[Region<E>], params: E::Params) -> usize {
    let color = category_color(category);
    let mut drawn = 0;
    for region in regions {
        let size = region.size(params);
        if size.width <= 0 || size.height <= 0 {
            continue;
        }
        for inset in 0..STROKE {
            let (w, h) = (size.width - 2 * inset, size.height - 2 * inset);
            if w <= 0 || h <= 0 {
                break;
            }
            let rect = PixelRect::at(region.x + inset, region.y + inset).of_size(w as u32, h as u32);
            draw_hollow_rect_mut(canvas, rect, color);
        }
        drawn += 1;
    }
    drawn
}

/// Loads the screenshot, draws the layout and saves the result as an image at `output`.
pub fn draw_overlay(screenshot: &Path, layout: &Layout, output: &Path) -> Result<()> {
    let start = Instant::now();

    let mut canvas = image::open(screenshot)
        .with_context(|| format!("Failed to load screenshot: {}", screenshot.display()))?
        .to_rgb8();
    if canvas.dimensions() == (0, 0) {
        bail!("Screenshot {} is empty", screenshot.display());
    }

    let drawn = draw_layout(&mut canvas, layout);

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create overlay directory {}", parent.display()))?;
    }
    canvas
        .save(output)
        .with_context(|| format!("Failed to save overlay to {}", output.display()))?;

    tracing::info!(path = %output.display(), regions = drawn, elapsed = ?start.elapsed(), "overlay saved");
    Ok(())
}
