//! Background color detection
//!
//! The branding rectangle is painted with a color sampled from the page
//! itself: the most frequent of the four corner pixels of a rendered view.
//! Corner sampling is a heuristic — slide decks and scanned documents almost
//! always have a uniform background that reaches every corner.

use image::RgbImage;

/// An RGB color with 8-bit channels.
///
/// All color handling in this crate goes through this one type; conversion to
/// the normalized 0–1 range PDF content streams expect happens only at the
/// content-stream boundary via [`Rgb::to_unit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Fallback color when a page cannot be rendered.
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

impl Rgb {
    /// Channels normalized to 0.0–1.0, for `rg`/`RG` content stream operators.
    pub fn to_unit(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(px: image::Rgb<u8>) -> Self {
        Self {
            r: px[0],
            g: px[1],
            b: px[2],
        }
    }
}

/// Pick the dominant background color from a rendered page.
///
/// Samples the four corner pixels (top-left, top-right, bottom-left,
/// bottom-right) and returns the most frequent value. Ties are broken in
/// favor of the corner encountered first. A zero-sized image yields white.
pub fn dominant_corner_color(img: &RgbImage) -> Rgb {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return WHITE;
    }

    let corners: [Rgb; 4] = [
        (*img.get_pixel(0, 0)).into(),
        (*img.get_pixel(width - 1, 0)).into(),
        (*img.get_pixel(0, height - 1)).into(),
        (*img.get_pixel(width - 1, height - 1)).into(),
    ];

    // Four elements only, so a linear count keeps first-encountered order
    // without any map machinery. A strict comparison means ties go to the
    // earlier corner.
    let mut best = corners[0];
    let mut best_count = 0;
    for &candidate in &corners {
        let count = corners.iter().filter(|&&c| c == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, image::Rgb(color))
    }

    #[test]
    fn test_uniform_background() {
        let img = solid(10, 10, [200, 200, 200]);
        assert_eq!(
            dominant_corner_color(&img),
            Rgb {
                r: 200,
                g: 200,
                b: 200
            }
        );
    }

    #[test]
    fn test_majority_white_one_black_corner() {
        let mut img = solid(10, 10, [255, 255, 255]);
        img.put_pixel(9, 9, image::Rgb([0, 0, 0]));
        assert_eq!(dominant_corner_color(&img), WHITE);
    }

    #[test]
    fn test_tie_prefers_first_encountered() {
        // Two red corners, two blue corners; top-left is red.
        let mut img = solid(4, 4, [255, 0, 0]);
        img.put_pixel(0, 3, image::Rgb([0, 0, 255]));
        img.put_pixel(3, 3, image::Rgb([0, 0, 255]));
        assert_eq!(dominant_corner_color(&img), Rgb { r: 255, g: 0, b: 0 });
    }

    #[test]
    fn test_single_pixel_image() {
        let img = solid(1, 1, [10, 20, 30]);
        assert_eq!(dominant_corner_color(&img), Rgb { r: 10, g: 20, b: 30 });
    }

    #[test]
    fn test_to_unit_range() {
        let [r, g, b] = WHITE.to_unit();
        assert_eq!((r, g, b), (1.0, 1.0, 1.0));

        let [r, g, b] = Rgb { r: 0, g: 51, b: 255 }.to_unit();
        assert_eq!(r, 0.0);
        assert!((g - 0.2).abs() < 1e-6);
        assert_eq!(b, 1.0);
    }
}
