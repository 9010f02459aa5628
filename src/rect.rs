//! The branding rectangle
//!
//! Coordinates come in as four integers in page units with a top-left origin,
//! the coordinate system of a page rendered at one pixel per unit. PDF
//! content streams use a bottom-left origin, so the rectangle is flipped
//! against the page height at the overlay boundary:
//!
//! ```text
//! pdf_y = page_height - y
//! ```

use crate::error::{Error, Result};

/// A fixed axis-aligned rectangle in page units, top-left origin.
///
/// `x1`/`y1` is the upper-left corner and `x2`/`y2` the lower-right corner
/// after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    /// Build a rectangle from two corner points in any order.
    ///
    /// Corners are normalized so callers never have to care about argument
    /// order; a rectangle with zero width or height is rejected since it
    /// would mask nothing.
    pub fn from_coords(x1: i32, y1: i32, x2: i32, y2: i32) -> Result<Self> {
        let rect = Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        };

        if rect.width() == 0 || rect.height() == 0 {
            return Err(Error::InvalidRect(format!(
                "zero-area rectangle ({}, {}, {}, {})",
                x1, y1, x2, y2
            )));
        }

        Ok(rect)
    }

    pub fn width(&self) -> u32 {
        (self.x2 - self.x1) as u32
    }

    pub fn height(&self) -> u32 {
        (self.y2 - self.y1) as u32
    }

    /// Lower-left corner plus extent in PDF (bottom-left origin) coordinates,
    /// ready for the `re` operator.
    pub fn to_pdf_coords(&self, page_height: f32) -> (f32, f32, f32, f32) {
        (
            self.x1 as f32,
            page_height - self.y2 as f32,
            self.width() as f32,
            self.height() as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_corner_order() {
        let rect = Rect::from_coords(30, 40, 10, 20).unwrap();
        assert_eq!(
            rect,
            Rect {
                x1: 10,
                y1: 20,
                x2: 30,
                y2: 40
            }
        );
        assert_eq!(rect.width(), 20);
        assert_eq!(rect.height(), 20);
    }

    #[test]
    fn test_rejects_zero_area() {
        assert!(Rect::from_coords(10, 10, 10, 50).is_err());
        assert!(Rect::from_coords(10, 10, 50, 10).is_err());
    }

    #[test]
    fn test_pdf_coords_flip_y() {
        // A 100x50 box whose top edge sits 20 units below the top of a
        // 792-unit page starts at pdf y = 792 - 70 = 722.
        let rect = Rect::from_coords(40, 20, 140, 70).unwrap();
        let (x, y, w, h) = rect.to_pdf_coords(792.0);
        assert_eq!((x, y, w, h), (40.0, 722.0, 100.0, 50.0));
    }
}
