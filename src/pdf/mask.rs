//! Vector-preserving overlay strategy
//!
//! Each kept page gets one extra content stream appended after its existing
//! content, painting an opaque rectangle over the branding region. Text and
//! vector drawing on the page stay selectable; the original content under the
//! rectangle remains in the file, merely hidden.
//!
//! The output document is rebuilt from the source: every object is carried
//! over except the old catalog and page tree, and a fresh Pages/Catalog pair
//! is created that references only the kept pages in their original order.

use std::fmt::Write as _;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::rect::Rect;

/// US Letter, the fallback when no MediaBox can be found anywhere.
const DEFAULT_MEDIA_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

/// Page attributes that may be inherited from ancestor Pages nodes.
///
/// The output assembly discards the original page tree, so anything a page
/// inherited must be copied down onto the page itself first.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Paint the branding rectangle on one page.
///
/// The overlay is appended after all existing content streams and wrapped in
/// q/Q, so it composites above everything already on the page.
pub fn mask_page(doc: &mut Document, page_id: ObjectId, rect: &Rect, color: Rgb) -> Result<()> {
    let page_obj = doc.get_object(page_id)?;
    let media_box = get_media_box(doc, page_obj);
    let page_height = media_box[3] - media_box[1];

    let content = overlay_content(rect, color, page_height);
    append_content_to_page(doc, page_id, &content)
}

/// PDF content stream operators for the opaque rectangle.
///
/// Fill and stroke use the same sampled color so the border never shows as a
/// distinct outline.
fn overlay_content(rect: &Rect, color: Rgb, page_height: f32) -> String {
    let [r, g, b] = color.to_unit();
    let (x, y, w, h) = rect.to_pdf_coords(page_height);

    let mut content = String::new();
    content.push_str("q\n");
    let _ = writeln!(content, "{r:.4} {g:.4} {b:.4} rg");
    let _ = writeln!(content, "{r:.4} {g:.4} {b:.4} RG");
    let _ = writeln!(content, "{x} {y} {w} {h} re");
    content.push_str("B\n");
    content.push_str("Q\n");
    content
}

/// Append a content stream to a page, preserving whatever Contents shape the
/// page already uses.
fn append_content_to_page(doc: &mut Document, page_id: ObjectId, content: &str) -> Result<()> {
    let content_id = doc.add_object(Object::Stream(Stream::new(
        Dictionary::new(),
        content.as_bytes().to_vec(),
    )));

    let page = doc.get_object_mut(page_id)?;
    if let Object::Dictionary(dict) = page {
        let existing = dict.get(b"Contents").ok().cloned();
        match existing {
            Some(Object::Reference(existing_id)) => {
                dict.set(
                    "Contents",
                    Object::Array(vec![
                        Object::Reference(existing_id),
                        Object::Reference(content_id),
                    ]),
                );
            }
            Some(Object::Array(mut arr)) => {
                arr.push(Object::Reference(content_id));
                dict.set("Contents", Object::Array(arr));
            }
            _ => {
                dict.set("Contents", Object::Reference(content_id));
            }
        }
    }

    Ok(())
}

/// Rebuild the document with only the kept pages, in the given order.
pub fn assemble_output(source: &Document, kept: &[ObjectId]) -> Result<Document> {
    if kept.is_empty() {
        return Err(Error::NoPagesToWrite);
    }

    let mut out = Document::with_version("1.5");

    for (&id, object) in source.objects.iter() {
        match object.type_name().unwrap_or(b"") {
            // The page tree is rebuilt from scratch; outlines may reference
            // pages that no longer exist.
            b"Catalog" | b"Pages" | b"Outlines" | b"Outline" => {}
            b"Page" => {
                if kept.contains(&id) {
                    out.objects.insert(id, object.clone());
                }
            }
            _ => {
                out.objects.insert(id, object.clone());
            }
        }
    }

    out.max_id = source.max_id;

    let pages_id = out.new_object_id();

    // Reparent the kept pages, copying down anything they inherited from the
    // page tree we just dropped.
    for &page_id in kept {
        let inherited: Vec<(&[u8], Object)> = INHERITABLE_KEYS
            .iter()
            .filter_map(|&key| {
                let page_obj = source.get_object(page_id).ok()?;
                let page_dict = page_obj.as_dict().ok()?;
                if page_dict.has(key) {
                    None
                } else {
                    find_inherited(source, page_dict, key).map(|value| (key, value))
                }
            })
            .collect();

        if let Ok(Object::Dictionary(dict)) = out.get_object_mut(page_id) {
            dict.set("Parent", Object::Reference(pages_id));
            for (key, value) in inherited {
                dict.set(key, value);
            }
        }
    }

    let kids: Vec<Object> = kept.iter().map(|&id| Object::Reference(id)).collect();
    let mut pages_dict = Dictionary::new();
    pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
    pages_dict.set("Count", Object::Integer(kept.len() as i64));
    pages_dict.set("Kids", Object::Array(kids));
    out.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = out.new_object_id();
    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    out.objects.insert(catalog_id, Object::Dictionary(catalog));

    out.trailer.set("Root", Object::Reference(catalog_id));

    out.renumber_objects();
    out.compress();

    Ok(out)
}

/// Look up an inheritable page attribute along the Parent chain.
fn find_inherited(doc: &Document, page_dict: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut dict = page_dict.clone();
    // Depth limit guards against malformed self-referencing trees.
    for _ in 0..10 {
        let parent_id = match dict.get(b"Parent") {
            Ok(Object::Reference(id)) => *id,
            _ => return None,
        };
        let parent = doc.get_object(parent_id).ok()?.as_dict().ok()?;
        if let Ok(value) = parent.get(key) {
            return Some(value.clone());
        }
        dict = parent.clone();
    }
    None
}

/// Get the MediaBox for a page, walking up the Pages tree when the page does
/// not carry one itself. Handles indirect references and falls back to US
/// Letter.
pub fn get_media_box(doc: &Document, page_obj: &Object) -> [f32; 4] {
    get_media_box_recursive(doc, page_obj, 10)
}

fn get_media_box_recursive(doc: &Document, page_obj: &Object, depth: usize) -> [f32; 4] {
    if depth == 0 {
        return DEFAULT_MEDIA_BOX;
    }

    if let Object::Dictionary(dict) = page_obj {
        if let Ok(media_box_obj) = dict.get(b"MediaBox") {
            let arr = match media_box_obj {
                Object::Array(arr) => Some(arr.clone()),
                Object::Reference(ref_id) => match doc.get_object(*ref_id) {
                    Ok(Object::Array(arr)) => Some(arr.clone()),
                    _ => None,
                },
                _ => None,
            };

            if let Some(arr) = arr {
                let values: Vec<f32> = arr
                    .iter()
                    .filter_map(|o| match o {
                        Object::Integer(i) => Some(*i as f32),
                        Object::Real(r) => Some(*r),
                        _ => None,
                    })
                    .collect();

                if values.len() == 4 {
                    return [values[0], values[1], values[2], values[3]];
                }
            }
        }

        if let Ok(Object::Reference(parent_id)) = dict.get(b"Parent") {
            if let Ok(parent) = doc.get_object(*parent_id) {
                return get_media_box_recursive(doc, parent, depth - 1);
            }
        }
    }

    DEFAULT_MEDIA_BOX
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::WHITE;

    #[test]
    fn test_overlay_content_operators() {
        let rect = Rect::from_coords(40, 20, 140, 70).unwrap();
        let content = overlay_content(&rect, WHITE, 792.0);

        assert!(content.starts_with("q\n"));
        assert!(content.contains("1.0000 1.0000 1.0000 rg"));
        assert!(content.contains("1.0000 1.0000 1.0000 RG"));
        assert!(content.contains("40 722 100 50 re"));
        assert!(content.contains("B\n"));
        assert!(content.ends_with("Q\n"));
    }

    #[test]
    fn test_overlay_content_color_conversion() {
        let rect = Rect::from_coords(0, 0, 10, 10).unwrap();
        let color = Rgb { r: 51, g: 0, b: 255 };
        let content = overlay_content(&rect, color, 100.0);
        assert!(content.contains("0.2000 0.0000 1.0000 rg"));
    }

    #[test]
    fn test_media_box_default() {
        let doc = Document::with_version("1.5");
        let page = Object::Dictionary(Dictionary::new());
        assert_eq!(get_media_box(&doc, &page), DEFAULT_MEDIA_BOX);
    }

    #[test]
    fn test_media_box_inline() {
        let doc = Document::with_version("1.5");
        let mut dict = Dictionary::new();
        dict.set(
            "MediaBox",
            Object::Array(vec![0.into(), 0.into(), 595.into(), 842.into()]),
        );
        let page = Object::Dictionary(dict);
        assert_eq!(get_media_box(&doc, &page), [0.0, 0.0, 595.0, 842.0]);
    }

    #[test]
    fn test_assemble_output_rejects_empty() {
        let doc = Document::with_version("1.5");
        assert!(matches!(
            assemble_output(&doc, &[]),
            Err(Error::NoPagesToWrite)
        ));
    }
}
