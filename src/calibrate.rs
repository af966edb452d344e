//! Calibration session support.
//! The interactive window that collects clicks is a front-end; this module holds what it needs
//! from the library: an append-only click buffer scoped to one session, with undo and reset,
//! and the click record file that stores a finished session.
//! A record is reusable input: mapping can be re-run without clicking again.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{LayoutError, LayoutResult};
use crate::geometry::Point;
use crate::input::{CLICK_COUNT, CLICK_PLAN, ClickSegment};

/// Clicks collected so far in one capture session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClickBuffer {
    points: Vec<Point>,
}

impl ClickBuffer {
    pub fn new() -> Self {
        Self {
            points: Vec::with_capacity(CLICK_COUNT),
        }
    }

    /// Appends a click. Returns false once the buffer already holds 68 clicks.
    pub fn push(&mut self, point: Point) -> bool {
        if self.is_complete() {
            warn!(x = point.x, y = point.y, "already have all clicks, ignoring");
            return false;
        }
        self.points.push(point);
        debug!(n = self.points.len(), x = point.x, y = point.y, "click recorded");
        true
    }

    /// Removes and returns the most recent click.
    pub fn undo(&mut self) -> Option<Point> {
        self.points.pop()
    }

    pub fn reset(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.points.len() >= CLICK_COUNT
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The segment the next click belongs to, or None when complete.
    pub fn next_segment(&self) -> Option<&'static ClickSegment> {
        let mut start = 0;
        for segment in &CLICK_PLAN {
            let end = start + segment.points();
            if self.points.len() < end {
                return Some(segment);
            }
            start = end;
        }
        None
    }

    /// Maps clicks taken on a display scaled by `scale` back to image pixels (truncating).
    pub fn rescaled(&self, scale: f64) -> ClickBuffer {
        if scale == 1.0 {
            return self.clone();
        }
        let points = self
            .points
            .iter()
            .map(|p| Point::new((p.x as f64 / scale) as i32, (p.y as f64 / scale) as i32))
            .collect();
        ClickBuffer { points }
    }

    /// Ends the session. Fails unless exactly 68 clicks were taken.
    pub fn finish(self) -> LayoutResult<Vec<Point>> {
        if self.points.len() != CLICK_COUNT {
            return Err(LayoutError::IncompleteCapture {
                expected: CLICK_COUNT,
                captured: self.points.len(),
            });
        }
        Ok(self.points)
    }
}

/// A finished capture, as saved to disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    pub clicks: Vec<Point>,
}

pub fn load_clicks(path: &Path) -> LayoutResult<ClickRecord> {
    let content = fs::read_to_string(path)?;
    let record: ClickRecord = serde_json::from_str(&content)?;
    debug!(path = %path.display(), clicks = record.clicks.len(), "click record loaded");
    Ok(record)
}

pub fn save_clicks(path: &Path, record: &ClickRecord) -> LayoutResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(record)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Category;

    #[test]
    fn test_buffer_caps_at_68() {
        let mut buffer = ClickBuffer::new();
        for i in 0..CLICK_COUNT {
            assert!(buffer.push(Point::new(i as i32, 0)));
        }
        assert!(!buffer.push(Point::new(999, 999)));
        assert_eq!(buffer.len(), 68);
        assert_eq!(buffer.points().last(), Some(&Point::new(67, 0)));
    }

    #[test]
    fn test_undo_pops_from_end() {
        let mut buffer = ClickBuffer::new();
        buffer.push(Point::new(1, 1));
        buffer.push(Point::new(2, 2));
        assert_eq!(buffer.undo(), Some(Point::new(2, 2)));
        assert_eq!(buffer.points(), &[Point::new(1, 1)]);
        buffer.reset();
        assert!(buffer.is_empty());
        assert_eq!(buffer.undo(), None);
    }

    #[test]
    fn test_next_segment_follows_plan() {
        let mut buffer = ClickBuffer::new();
        assert_eq!(buffer.next_segment().map(|s| s.category), Some(Category::CapstoneSlots));
        for _ in 0..12 {
            buffer.push(Point::new(0, 0));
        }
        assert_eq!(buffer.next_segment().map(|s| s.category), Some(Category::StandardSlots));
        for _ in 12..64 {
            buffer.push(Point::new(0, 0));
        }
        assert_eq!(buffer.next_segment().map(|s| s.category), Some(Category::SelectedSlots));
        for _ in 64..68 {
            buffer.push(Point::new(0, 0));
        }
        assert!(buffer.next_segment().is_none());
    }

    #[test]
    fn test_finish_requires_all_clicks() {
        let mut buffer = ClickBuffer::new();
        buffer.push(Point::new(0, 0));
        assert!(matches!(
            buffer.finish(),
            Err(LayoutError::IncompleteCapture { expected: 68, captured: 1 })
        ));
    }

    #[test]
    fn test_rescaled_truncates() {
        let mut buffer = ClickBuffer::new();
        buffer.push(Point::new(100, 51));
        let scaled = buffer.rescaled(0.75);
        assert_eq!(scaled.points(), &[Point::new(133, 68)]);
    }

    #[test]
    fn test_record_file_format() {
        let record: ClickRecord =
            serde_json::from_str(r#"{"resolution": "1920x1080", "clicks": [[1, 2], [3, 4]]}"#).unwrap();
        assert_eq!(record.resolution.as_deref(), Some("1920x1080"));
        assert_eq!(record.clicks, vec![Point::new(1, 2), Point::new(3, 4)]);

        let path = std::env::temp_dir().join("layout_mapper_clicks_test.json");
        save_clicks(&path, &record).unwrap();
        assert_eq!(load_clicks(&path).unwrap(), record);
        let _ = fs::remove_file(&path);
    }
}
