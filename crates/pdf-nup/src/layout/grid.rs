//! Grid cell calculation for each N-up mode

use crate::constants::{GRID_MARGIN_X_PT, GRID_MARGIN_Y_PT, SIX_UP_CELL_INSET_PT};
use crate::types::NupMode;

use super::Rect;

/// Partition the canvas into the cells of the given mode, in reading
/// order.
///
/// - `Full`: one cell, the uninset canvas.
/// - `One`: one cell, the canvas inset by the grid margins.
/// - `Two`: the inset canvas split into equal top and bottom halves,
///   top first.
/// - `Six`: the inset canvas split 2 columns x 3 rows (top-left,
///   top-right, mid-left, mid-right, bottom-left, bottom-right), each
///   cell inset a further 10pt on all sides.
pub fn grid_cells(mode: NupMode, canvas: &Rect) -> Vec<Rect> {
    let usable = canvas.inset(GRID_MARGIN_X_PT, GRID_MARGIN_Y_PT);

    match mode {
        NupMode::Full => vec![*canvas],
        NupMode::One => vec![usable],
        NupMode::Two => {
            let half = usable.height / 2.0;
            let top = Rect::new(usable.x, usable.y + half, usable.width, half);
            let bottom = Rect::new(usable.x, usable.y, usable.width, half);
            vec![top, bottom]
        }
        NupMode::Six => {
            let cell_width = usable.width / 2.0;
            let cell_height = usable.height / 3.0;
            let mut cells = Vec::with_capacity(6);
            for row in 0..3 {
                for col in 0..2 {
                    let cell = Rect::new(
                        usable.x + col as f32 * cell_width,
                        usable.y + (2 - row) as f32 * cell_height,
                        cell_width,
                        cell_height,
                    );
                    cells.push(cell.inset(SIX_UP_CELL_INSET_PT, SIX_UP_CELL_INSET_PT));
                }
            }
            cells
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PAGE_HEIGHT_PT, PAGE_WIDTH_PT};

    const EPS: f32 = 1e-4;

    fn canvas() -> Rect {
        Rect::new(0.0, 0.0, PAGE_WIDTH_PT, PAGE_HEIGHT_PT)
    }

    #[test]
    fn test_full_uses_uninset_canvas() {
        let cells = grid_cells(NupMode::Full, &canvas());
        assert_eq!(cells, vec![canvas()]);
    }

    #[test]
    fn test_one_up_insets_canvas() {
        let cells = grid_cells(NupMode::One, &canvas());
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0], Rect::new(36.0, 27.0, 540.0, 738.0));
    }

    #[test]
    fn test_two_up_top_first() {
        let cells = grid_cells(NupMode::Two, &canvas());
        assert_eq!(cells.len(), 2);

        let (top, bottom) = (cells[0], cells[1]);
        assert!(top.y > bottom.y);
        assert!((top.height - bottom.height).abs() < EPS);
        assert!((top.y - bottom.top()).abs() < EPS);
        assert!((top.top() - (PAGE_HEIGHT_PT - 27.0)).abs() < EPS);
        assert!((bottom.y - 27.0).abs() < EPS);
    }

    #[test]
    fn test_six_up_reading_order() {
        let cells = grid_cells(NupMode::Six, &canvas());
        assert_eq!(cells.len(), 6);

        // Rows descend, columns alternate left/right
        assert!(cells[0].y > cells[2].y && cells[2].y > cells[4].y);
        assert!(cells[0].x < cells[1].x);
        assert!((cells[0].y - cells[1].y).abs() < EPS);
        assert!((cells[2].x - cells[0].x).abs() < EPS);
        assert!((cells[3].x - cells[1].x).abs() < EPS);
    }

    #[test]
    fn test_six_up_tiles_usable_area() {
        let usable = canvas().inset(36.0, 27.0);
        let cells = grid_cells(NupMode::Six, &canvas());

        // Undo the per-cell inset; the raw cells must tile 2x3 exactly
        let raw: Vec<Rect> = cells
            .iter()
            .map(|c| c.inset(-SIX_UP_CELL_INSET_PT, -SIX_UP_CELL_INSET_PT))
            .collect();

        for cell in &raw {
            assert!((cell.width - usable.width / 2.0).abs() < EPS);
            assert!((cell.height - usable.height / 3.0).abs() < EPS);
        }

        // Corners of the tiling match the usable rectangle
        assert!((raw[0].x - usable.x).abs() < EPS);
        assert!((raw[0].top() - usable.top()).abs() < EPS);
        assert!((raw[5].right() - usable.right()).abs() < EPS);
        assert!((raw[5].y - usable.y).abs() < EPS);

        // Adjacent cells share edges: no overlap, no gap
        assert!((raw[0].right() - raw[1].x).abs() < EPS);
        assert!((raw[2].top() - raw[0].y).abs() < EPS);
        assert!((raw[4].top() - raw[2].y).abs() < EPS);
    }
}
