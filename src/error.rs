//! Error types for the layout pipeline.
//! Input-shape and generation failures are fatal and surface here.
//! Geometry and bounds problems are not errors: they go into the validation report.

use thiserror::Error;

use crate::region::Category;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("expected exactly {expected} clicked points, got {supplied}")]
    PointCount { expected: usize, supplied: usize },

    #[error("click {click} at ({x}, {y}) is outside the accepted range of +/-{limit} pixels")]
    CoordinateOutOfRange { click: usize, x: i32, y: i32, limit: i32 },

    #[error("screen width {width} is outside 1..={limit}")]
    ScreenWidthOutOfRange { width: i32, limit: i32 },

    #[error("{category}: needs {required} rectangles, only {supplied} supplied")]
    InsufficientInput {
        category: Category,
        required: usize,
        supplied: usize,
    },

    #[error("{category}: takes exactly {expected} rectangles, {supplied} supplied")]
    ExcessInput {
        category: Category,
        expected: usize,
        supplied: usize,
    },

    #[error("{category}: anchor spacing must be positive, got {spacing}")]
    NonPositiveSpacing { category: Category, spacing: i32 },

    #[error("capture incomplete: {captured}/{expected} clicks")]
    IncompleteCapture { expected: usize, captured: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
