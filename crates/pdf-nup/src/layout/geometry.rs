//! Rectangles and aspect-preserving placement

use crate::types::{NupError, Result};

/// A rectangular area in points, origin at the bottom-left
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Shrink the rectangle by `dx` on the left and right and `dy` on the
    /// top and bottom
    pub fn inset(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(
            self.x + dx,
            self.y + dy,
            self.width - 2.0 * dx,
            self.height - 2.0 * dy,
        )
    }
}

/// Compute the largest rectangle with the source aspect ratio that fits
/// entirely inside `target`, centered.
///
/// One dimension of the result always matches the corresponding target
/// dimension exactly. Zero or negative dimensions are an error.
pub fn aspect_fit(source_width: f32, source_height: f32, target: &Rect) -> Result<Rect> {
    if source_width <= 0.0 || source_height <= 0.0 {
        return Err(NupError::Config(format!(
            "source size must be positive, got {}x{}",
            source_width, source_height
        )));
    }
    if target.width <= 0.0 || target.height <= 0.0 {
        return Err(NupError::Config(format!(
            "target rectangle must be positive, got {}x{}",
            target.width, target.height
        )));
    }

    let scale = (target.width / source_width).min(target.height / source_height);
    let width = source_width * scale;
    let height = source_height * scale;

    Ok(Rect::new(
        target.x + (target.width - width) / 2.0,
        target.y + (target.height - height) / 2.0,
        width,
        height,
    ))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_inset() {
        let rect = Rect::new(0.0, 0.0, 612.0, 792.0).inset(36.0, 27.0);
        assert_eq!(rect.x, 36.0);
        assert_eq!(rect.y, 27.0);
        assert_eq!(rect.width, 540.0);
        assert_eq!(rect.height, 738.0);
    }

    #[test]
    fn test_fit_wide_source_touches_width() {
        let target = Rect::new(10.0, 20.0, 200.0, 100.0);
        let fit = aspect_fit(400.0, 100.0, &target).unwrap();

        // Width-limited: full target width, centered vertically
        assert!((fit.width - 200.0).abs() < EPS);
        assert!((fit.height - 50.0).abs() < EPS);
        assert!((fit.x - 10.0).abs() < EPS);
        assert!((fit.y - 45.0).abs() < EPS);
    }

    #[test]
    fn test_fit_tall_source_touches_height() {
        let target = Rect::new(0.0, 0.0, 200.0, 100.0);
        let fit = aspect_fit(100.0, 400.0, &target).unwrap();

        assert!((fit.height - 100.0).abs() < EPS);
        assert!((fit.width - 25.0).abs() < EPS);
        // Centered horizontally
        assert!((fit.x - 87.5).abs() < EPS);
    }

    #[test]
    fn test_fit_preserves_ratio_and_containment() {
        let target = Rect::new(5.0, 7.0, 317.0, 253.0);
        for &(w, h) in &[(612.0, 792.0), (1024.0, 768.0), (1.0, 1000.0), (9.0, 9.0)] {
            let fit = aspect_fit(w, h, &target).unwrap();

            let source_ratio = w / h;
            let fit_ratio = fit.width / fit.height;
            assert!((source_ratio - fit_ratio).abs() < 1e-3);

            assert!(fit.x >= target.x - EPS);
            assert!(fit.y >= target.y - EPS);
            assert!(fit.right() <= target.right() + EPS);
            assert!(fit.top() <= target.top() + EPS);

            // At least one dimension matches the target exactly
            assert!((fit.width - target.width).abs() < EPS || (fit.height - target.height).abs() < EPS);
        }
    }

    #[test]
    fn test_fit_degenerate_source_is_error() {
        let target = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(aspect_fit(0.0, 100.0, &target).is_err());
        assert!(aspect_fit(100.0, -1.0, &target).is_err());
    }

    #[test]
    fn test_fit_degenerate_target_is_error() {
        let target = Rect::new(0.0, 0.0, 0.0, 100.0);
        assert!(aspect_fit(100.0, 100.0, &target).is_err());
    }
}
