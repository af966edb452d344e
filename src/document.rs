//! Layout document.
//! The persisted form is a JSON object keyed by resolution label, e.g.
//! `{ "1920x1080": { "capstone_slots": [...], ..., "selected_slot_params": {...} } }`.
//! Optional region fields are omitted rather than written as null; shared-size categories never
//! carry width/height per region.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::LayoutResult;
use crate::generate::LeftSide;
use crate::geometry::Size;
use crate::region::RegionSet;

/// Both halves of every category plus the shared sizes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(flatten)]
    pub regions: RegionSet,
    pub participant_box_params: Size,
    pub selected_slot_params: Size,
}

impl Layout {
    /// Left regions first, then right, in every category.
    pub fn assemble(left: LeftSide, right: RegionSet) -> Layout {
        let mut regions = left.regions;
        regions.extend(right);
        Layout {
            regions,
            participant_box_params: left.participant_box_params,
            selected_slot_params: left.selected_slot_params,
        }
    }
}

/// Layouts keyed by resolution label.
pub type LayoutDocument = BTreeMap<String, Layout>;

/// Wraps one layout under its resolution label.
pub fn to_document(resolution: &str, layout: Layout) -> LayoutDocument {
    let mut document = LayoutDocument::new();
    document.insert(resolution.to_string(), layout);
    document
}

pub fn to_json(document: &LayoutDocument) -> LayoutResult<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

pub fn save_document(path: &Path, document: &LayoutDocument) -> LayoutResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_json(document)?)?;
    info!(path = %path.display(), resolutions = document.len(), "layout document saved");
    Ok(())
}

pub fn load_document(path: &Path) -> LayoutResult<LayoutDocument> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
