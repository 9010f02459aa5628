//! Page rasterization
//!
//! Color sampling and the rasterize output strategy both need a bitmap view
//! of a page. Rendering sits behind the [`PageRenderer`] trait so the
//! pipeline (and the tests) never depend on a particular backend. The
//! production backend is pdfium, bound at runtime; when the pdfium library is
//! not present the pipeline simply runs without a renderer and sampling falls
//! back to white.

use std::path::Path;

use image::RgbImage;

use crate::error::Result;

/// Renders single pages of a PDF to RGB bitmaps.
///
/// `page_index` is 0-based. Implementations render at one pixel per page
/// unit (72 dpi), so pixel coordinates in the result line up with page
/// coordinates in the source.
pub trait PageRenderer {
    fn render_page(&self, source: &Path, page_index: u32) -> Result<RgbImage>;
}

/// Build the default renderer, if one is available in this build and on this
/// machine.
#[cfg(feature = "render")]
pub fn default_renderer() -> Option<Box<dyn PageRenderer>> {
    match PdfiumRenderer::new() {
        Ok(renderer) => Some(Box::new(renderer)),
        Err(e) => {
            log::warn!("pdfium unavailable, color sampling disabled: {}", e);
            None
        }
    }
}

#[cfg(not(feature = "render"))]
pub fn default_renderer() -> Option<Box<dyn PageRenderer>> {
    None
}

#[cfg(feature = "render")]
pub use pdfium::PdfiumRenderer;

#[cfg(feature = "render")]
mod pdfium {
    use std::path::Path;

    use image::RgbImage;
    use pdfium_render::prelude::*;

    use super::PageRenderer;
    use crate::error::{Error, Result};

    /// pdfium-backed renderer.
    ///
    /// Binds to a pdfium library next to the executable first, then to a
    /// system-wide install. The source document is opened per render call;
    /// this tool touches each page once, so there is nothing to win by
    /// holding the document open across calls.
    pub struct PdfiumRenderer {
        pdfium: Pdfium,
    }

    impl PdfiumRenderer {
        pub fn new() -> Result<Self> {
            let bindings = Pdfium::bind_to_library(
                Pdfium::pdfium_platform_library_name_at_path("./"),
            )
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| Error::Render(format!("failed to bind pdfium: {e:?}")))?;

            Ok(Self {
                pdfium: Pdfium::new(bindings),
            })
        }
    }

    impl PageRenderer for PdfiumRenderer {
        fn render_page(&self, source: &Path, page_index: u32) -> Result<RgbImage> {
            let document = self
                .pdfium
                .load_pdf_from_file(source, None)
                .map_err(|e| Error::Render(format!("failed to open {:?}: {e:?}", source)))?;

            let pages = document.pages();
            let page = pages
                .get(page_index as u16)
                .map_err(|e| Error::Render(format!("no page {page_index}: {e:?}")))?;

            // One pixel per page unit keeps rect coordinates and pixel
            // coordinates interchangeable.
            let width = page.width().value.round().max(1.0) as i32;
            let bitmap = page
                .render_with_config(&PdfRenderConfig::new().set_target_width(width))
                .map_err(|e| {
                    Error::Render(format!("failed to render page {page_index}: {e:?}"))
                })?;

            Ok(bitmap.as_image().to_rgb8())
        }
    }
}
