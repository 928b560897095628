//! Shared constants for N-up assembly
//!
//! This module centralizes the fixed geometry of the output canvas and
//! the text metrics used by the number overlay and the TOC renderer.

// =============================================================================
// Output Canvas
// =============================================================================

/// Output page width in points (US Letter: 8.5" x 11")
pub const PAGE_WIDTH_PT: f32 = 612.0;

/// Output page height in points (US Letter)
pub const PAGE_HEIGHT_PT: f32 = 792.0;

// =============================================================================
// Grid Layout
// =============================================================================

/// Horizontal inset from the canvas to the usable grid area (points)
pub const GRID_MARGIN_X_PT: f32 = 36.0;

/// Vertical inset from the canvas to the usable grid area (points)
pub const GRID_MARGIN_Y_PT: f32 = 27.0;

/// Extra inset applied to every cell of the six-up grid (points)
pub const SIX_UP_CELL_INSET_PT: f32 = 10.0;

/// Stroke width of the border drawn around scaled content (points)
pub const CONTENT_BORDER_WIDTH_PT: f32 = 1.0;

// =============================================================================
// Page Number Overlay
// =============================================================================

/// Font size of the page-number label (points)
pub const PAGE_NUMBER_FONT_SIZE: f32 = 14.0;

/// Left edge of the page-number label region
pub const PAGE_NUMBER_LABEL_X: f32 = 480.0;

/// Baseline of the page-number label, near the top-right corner
pub const PAGE_NUMBER_LABEL_Y: f32 = 730.0;

/// Width of the page-number label region; the label is right-aligned in it
pub const PAGE_NUMBER_LABEL_WIDTH: f32 = 100.0;

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;

// =============================================================================
// Table of Contents
// =============================================================================

/// Uniform TOC page margin (points)
pub const TOC_MARGIN_PT: f32 = 50.0;

/// Height of one TOC entry line (points)
pub const TOC_LINE_HEIGHT_PT: f32 = 20.0;

/// Font size of TOC entry text (points)
pub const TOC_FONT_SIZE_PT: f32 = 13.0;

/// Width of the trailing page-number column (points)
pub const TOC_NUMBER_COLUMN_PT: f32 = 25.0;

/// Lines of slack reserved at the bottom of every TOC page
pub const TOC_SLACK_LINES: usize = 2;

/// Title rendered on the first TOC page, at 1.5x the entry font size
pub const TOC_TITLE: &str = "Table of Contents";
