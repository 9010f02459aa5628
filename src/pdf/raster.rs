//! Rasterizing output strategy
//!
//! Each kept page is rendered to an RGB bitmap, the branding rectangle is
//! painted directly into the pixels, and the result is JPEG-encoded and
//! embedded as a full-page image XObject. Text and vector content do not
//! survive this path; what it guarantees is that nothing under the rectangle
//! survives either.

use image::{ImageEncoder, RgbImage};
use lopdf::{Dictionary, Document, Object, Stream};

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::rect::Rect;

/// JPEG quality for rasterized pages.
const JPEG_QUALITY: u8 = 90;

/// Paint the rectangle into the bitmap, clamped to the image bounds.
/// Both corners are inclusive.
pub fn fill_rect(img: &mut RgbImage, rect: &Rect, color: Rgb) {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let x1 = rect.x1.max(0);
    let y1 = rect.y1.max(0);
    let x2 = rect.x2.min(width as i32 - 1);
    let y2 = rect.y2.min(height as i32 - 1);
    if x1 > x2 || y1 > y2 {
        return;
    }

    let pixel = image::Rgb([color.r, color.g, color.b]);
    for y in y1..=y2 {
        for x in x1..=x2 {
            img.put_pixel(x as u32, y as u32, pixel);
        }
    }
}

/// JPEG-encode a rendered page.
fn encode_jpeg(img: &RgbImage) -> Result<Vec<u8>> {
    let mut jpeg = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
    encoder
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| Error::Image(e.to_string()))?;
    Ok(jpeg)
}

/// Build the image XObject stream for one page.
///
/// JPEG data is embedded as-is with the DCTDecode filter; re-compressing it
/// is disabled since the data is already compressed.
fn image_xobject(width: u32, height: u32, jpeg: Vec<u8>) -> Stream {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(i64::from(width)));
    dict.set("Height", Object::Integer(i64::from(height)));
    dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));

    let mut stream = Stream::new(dict, jpeg);
    stream.allows_compression = false;
    stream
}

/// Assemble an image-backed PDF from the processed page bitmaps, one page per
/// bitmap, in order. The MediaBox of each page equals the bitmap dimensions,
/// so one pixel maps to one page unit.
pub fn assemble_output(pages: &[RgbImage]) -> Result<Document> {
    if pages.is_empty() {
        return Err(Error::NoPagesToWrite);
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());

    for (i, img) in pages.iter().enumerate() {
        let (width, height) = img.dimensions();
        let jpeg = encode_jpeg(img)?;

        let xobject_id = doc.add_object(image_xobject(width, height, jpeg));
        let name = format!("Im{}", i + 1);

        let resources_id = doc.add_object(Dictionary::from_iter([(
            "XObject",
            Object::Dictionary(Dictionary::from_iter([(
                name.as_bytes().to_vec(),
                Object::Reference(xobject_id),
            )])),
        )]));

        // Scale the unit image square up to the full page.
        let content = format!("q\n{width} 0 0 {height} 0 0 cm\n/{name} Do\nQ\n");
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_id = doc.add_object(Dictionary::from_iter([
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Reference(resources_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    0.into(),
                    0.into(),
                    Object::Integer(i64::from(width)),
                    Object::Integer(i64::from(height)),
                ]),
            ),
        ]));

        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter([
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(pages.len() as i64)),
        ("Kids", Object::Array(kids)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc.compress();

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, image::Rgb([255, 255, 255]))
    }

    #[test]
    fn test_fill_rect_paints_region() {
        let mut img = white_image(100, 100);
        let rect = Rect::from_coords(10, 20, 30, 40).unwrap();
        let red = Rgb { r: 255, g: 0, b: 0 };
        fill_rect(&mut img, &rect, red);

        // Inclusive corners, untouched outside.
        assert_eq!(img.get_pixel(10, 20), &image::Rgb([255, 0, 0]));
        assert_eq!(img.get_pixel(30, 40), &image::Rgb([255, 0, 0]));
        assert_eq!(img.get_pixel(9, 20), &image::Rgb([255, 255, 255]));
        assert_eq!(img.get_pixel(31, 40), &image::Rgb([255, 255, 255]));
        assert_eq!(img.get_pixel(10, 41), &image::Rgb([255, 255, 255]));
    }

    #[test]
    fn test_fill_rect_uniform_region() {
        let mut img = white_image(50, 50);
        let rect = Rect::from_coords(5, 5, 20, 15).unwrap();
        let gray = Rgb {
            r: 128,
            g: 128,
            b: 128,
        };
        fill_rect(&mut img, &rect, gray);

        for y in 5..=15 {
            for x in 5..=20 {
                assert_eq!(img.get_pixel(x, y), &image::Rgb([128, 128, 128]));
            }
        }
    }

    #[test]
    fn test_fill_rect_clamps_to_bounds() {
        let mut img = white_image(20, 20);
        let rect = Rect::from_coords(-5, -5, 100, 100).unwrap();
        fill_rect(&mut img, &rect, Rgb { r: 0, g: 0, b: 0 });
        assert_eq!(img.get_pixel(0, 0), &image::Rgb([0, 0, 0]));
        assert_eq!(img.get_pixel(19, 19), &image::Rgb([0, 0, 0]));
    }

    #[test]
    fn test_fill_rect_outside_image_is_noop() {
        let mut img = white_image(20, 20);
        let rect = Rect::from_coords(50, 50, 60, 60).unwrap();
        fill_rect(&mut img, &rect, Rgb { r: 0, g: 0, b: 0 });
        assert_eq!(img.get_pixel(19, 19), &image::Rgb([255, 255, 255]));
    }

    #[test]
    fn test_image_xobject_dict() {
        let stream = image_xobject(200, 100, vec![1, 2, 3]);
        let dict = &stream.dict;
        assert_eq!(dict.get(b"Subtype").unwrap().as_name().unwrap(), b"Image");
        assert_eq!(dict.get(b"Width").unwrap().as_i64().unwrap(), 200);
        assert_eq!(dict.get(b"Height").unwrap().as_i64().unwrap(), 100);
        assert_eq!(
            dict.get(b"Filter").unwrap().as_name().unwrap(),
            b"DCTDecode"
        );
        assert!(!stream.allows_compression);
    }

    #[test]
    fn test_assemble_output_page_count() {
        let pages = vec![white_image(40, 60), white_image(40, 60)];
        let doc = assemble_output(&pages).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_assemble_output_rejects_empty() {
        assert!(matches!(
            assemble_output(&[]),
            Err(Error::NoPagesToWrite)
        ));
    }
}
