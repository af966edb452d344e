//! Region model.
//! A region is one rectangle the screen reader samples at runtime, tagged with its identity.
//! Whether a region carries its own width/height is a property of its category, so it is
//! encoded in the type: `Region<Size>` owns its extent, `Region<SharedExtent>` borrows the
//! category-wide params at use sites and serializes without size fields.

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Size};

/// How a region's extent is found.
pub trait Extent: Copy {
    /// What has to be supplied from outside to know the size.
    type Params: Copy;

    fn size(&self, params: Self::Params) -> Size;
}

impl Extent for Size {
    type Params = ();

    fn size(&self, _: ()) -> Size {
        *self
    }
}

/// Marker extent for categories whose size is stored once at category level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedExtent {}

impl Extent for SharedExtent {
    type Params = Size;

    fn size(&self, params: Size) -> Size {
        params
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region<E> {
    pub x: i32,
    pub y: i32,
    #[serde(flatten)]
    pub extent: E,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_order: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_order: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_terminal_slot: Option<bool>,
}

/// Region that owns its width and height.
pub type SizedRegion = Region<Size>;
/// Region sized by its category's shared params.
pub type GridRegion = Region<SharedExtent>;

impl<E: Extent> Region<E> {
    pub fn size(&self, params: E::Params) -> Size {
        self.extent.size(params)
    }
}

impl SizedRegion {
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            extent: rect.size(),
            participant_order: None,
            slot_order: None,
            is_terminal_slot: None,
        }
    }
}

impl GridRegion {
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            extent: SharedExtent {},
            participant_order: None,
            slot_order: None,
            is_terminal_slot: None,
        }
    }
}

/// Which half of the screen a group of regions sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Whether each region stores its own size or the category stores one shared size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeMode {
    PerRegion,
    Shared,
}

/// The five repeating region groups of the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    CapstoneSlots,
    StandardSlots,
    ModelThumbnails,
    ParticipantBoxes,
    SelectedSlots,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::CapstoneSlots,
        Category::StandardSlots,
        Category::ModelThumbnails,
        Category::ParticipantBoxes,
        Category::SelectedSlots,
    ];

    /// Key used in the layout document.
    pub fn key(self) -> &'static str {
        match self {
            Category::CapstoneSlots => "capstone_slots",
            Category::StandardSlots => "standard_slots",
            Category::ModelThumbnails => "model_thumbnails",
            Category::ParticipantBoxes => "participant_boxes",
            Category::SelectedSlots => "selected_slots",
        }
    }

    /// Regions on one half of the screen.
    pub fn per_side(self) -> usize {
        match self {
            Category::CapstoneSlots => 6,
            Category::StandardSlots => 18,
            Category::ModelThumbnails => 6,
            Category::ParticipantBoxes => 5,
            Category::SelectedSlots => 20,
        }
    }

    /// Left plus right.
    pub fn expected_total(self) -> usize {
        self.per_side() * 2
    }

    pub fn size_mode(self) -> SizeMode {
        match self {
            Category::ParticipantBoxes | Category::SelectedSlots => SizeMode::Shared,
            _ => SizeMode::PerRegion,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::CapstoneSlots => "capstone-slots",
            Category::StandardSlots => "standard-slots",
            Category::ModelThumbnails => "model-thumbnails",
            Category::ParticipantBoxes => "participant-boxes",
            Category::SelectedSlots => "selected-slots",
        };
        write!(f, "{}", name)
    }
}

/// One set of the five category sequences (a half, or both halves combined).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSet {
    pub capstone_slots: Vec<SizedRegion>,
    pub standard_slots: Vec<SizedRegion>,
    pub model_thumbnails: Vec<SizedRegion>,
    pub participant_boxes: Vec<GridRegion>,
    pub selected_slots: Vec<GridRegion>,
}

impl RegionSet {
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::CapstoneSlots => self.capstone_slots.len(),
            Category::StandardSlots => self.standard_slots.len(),
            Category::ModelThumbnails => self.model_thumbnails.len(),
            Category::ParticipantBoxes => self.participant_boxes.len(),
            Category::SelectedSlots => self.selected_slots.len(),
        }
    }

    /// Appends `other` after `self`, category by category.
    pub fn extend(&mut self, other: RegionSet) {
        self.capstone_slots.extend(other.capstone_slots);
        self.standard_slots.extend(other.standard_slots);
        self.model_thumbnails.extend(other.model_thumbnails);
        self.participant_boxes.extend(other.participant_boxes);
        self.selected_slots.extend(other.selected_slots);
    }
}
