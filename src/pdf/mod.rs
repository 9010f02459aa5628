//! The debranding pipeline
//!
//! One linear, single-threaded pass: open the source, walk pages in
//! ascending order, sample a background color per page, paint the branding
//! rectangle, and save the accumulated output once at the end. Pages named in
//! the skip set are left out of the output entirely.

pub mod mask;
pub mod metadata;
pub mod raster;

// Re-export commonly used items
pub use metadata::{count_pages, count_pages_in};

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use lopdf::{Document, ObjectId};

use crate::color::{dominant_corner_color, Rgb, WHITE};
use crate::error::{Error, Result};
use crate::rect::Rect;
use crate::render::{default_renderer, PageRenderer};

/// Name of the file written into the destination directory.
pub const OUTPUT_FILE_NAME: &str = "output.pdf";

/// How the output document is assembled.
///
/// Both strategies share every pipeline step except the final assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStrategy {
    /// Keep each page's vector content and append an overlay rectangle.
    /// Text stays selectable; the masked content remains in the file.
    #[default]
    Overlay,
    /// Re-emit each page as a rendered JPEG image. Nothing under the
    /// rectangle survives, at the cost of text and vector fidelity.
    /// Requires a working page renderer.
    Rasterize,
}

/// Options for a debranding run
#[derive(Debug, Clone)]
pub struct DebrandOptions {
    /// Source PDF file path
    pub source_path: PathBuf,
    /// Destination directory (created if absent)
    pub dest_dir: PathBuf,
    /// 1-based page numbers to leave out of the output
    pub offsets: BTreeSet<u32>,
    /// Region to cover, identical on every page
    pub rect: Rect,
    /// Output assembly strategy
    pub strategy: OutputStrategy,
}

/// Run the pipeline with the default renderer (pdfium when available).
///
/// Returns the path of the written output file.
pub fn remove_branding(options: &DebrandOptions) -> Result<PathBuf> {
    remove_branding_with(options, default_renderer().as_deref())
}

/// Run the pipeline with an explicit renderer, or none.
///
/// Without a renderer the overlay strategy still works — every rectangle is
/// painted white — while the rasterize strategy fails up front.
pub fn remove_branding_with(
    options: &DebrandOptions,
    renderer: Option<&dyn PageRenderer>,
) -> Result<PathBuf> {
    if !options.source_path.exists() {
        return Err(Error::FileNotFound(options.source_path.clone()));
    }

    let mut doc = Document::load(&options.source_path)?;
    let pages = doc.get_pages();
    if pages.is_empty() {
        return Err(Error::EmptyPdf(options.source_path.clone()));
    }

    // Ascending page order is guaranteed by the BTreeMap get_pages returns.
    let kept: Vec<(u32, ObjectId)> = pages
        .iter()
        .filter(|&(page_num, _)| !options.offsets.contains(page_num))
        .map(|(&page_num, &page_id)| (page_num, page_id))
        .collect();

    if kept.is_empty() {
        return Err(Error::NoPagesToWrite);
    }

    let mut output = match options.strategy {
        OutputStrategy::Overlay => {
            for &(page_num, page_id) in &kept {
                let color = sample_background(renderer, &options.source_path, page_num);
                mask::mask_page(&mut doc, page_id, &options.rect, color)?;
            }
            let kept_ids: Vec<ObjectId> = kept.iter().map(|&(_, id)| id).collect();
            mask::assemble_output(&doc, &kept_ids)?
        }
        OutputStrategy::Rasterize => {
            let renderer = renderer.ok_or_else(|| {
                Error::Render("rasterize strategy requires a page renderer".to_string())
            })?;

            let mut images = Vec::with_capacity(kept.len());
            for &(page_num, _) in &kept {
                let mut img = renderer.render_page(&options.source_path, page_num - 1)?;
                let color = dominant_corner_color(&img);
                raster::fill_rect(&mut img, &options.rect, color);
                images.push(img);
            }
            raster::assemble_output(&images)?
        }
    };

    // Only now that there is something to write.
    fs::create_dir_all(&options.dest_dir)?;
    let output_path = options.dest_dir.join(OUTPUT_FILE_NAME);
    output.save(&output_path)?;

    Ok(output_path)
}

/// Sample the dominant background color of a page, falling back to white.
///
/// A per-page render failure is never fatal; the run continues with the
/// default color.
fn sample_background(
    renderer: Option<&dyn PageRenderer>,
    source: &Path,
    page_num: u32,
) -> Rgb {
    let Some(renderer) = renderer else {
        log::warn!("page {page_num}: no renderer available, using white background");
        return WHITE;
    };

    match renderer.render_page(source, page_num - 1) {
        Ok(img) => dominant_corner_color(&img),
        Err(e) => {
            log::warn!("page {page_num}: render failed ({e}), using white background");
            WHITE
        }
    }
}
