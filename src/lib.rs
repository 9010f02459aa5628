//! PDF Debrand Library
//!
//! A cross-platform library for covering branding logos in PDF documents.
//! For every page of a source PDF it:
//! - samples the dominant background color from the corners of a rendered view
//! - paints a fixed rectangle with that color over the existing content
//! - collects the edited pages into a new single output PDF
//!
//! Pages can be excluded with a skip list (`"1-3,9"`); skipped pages are left
//! out of the output entirely. Two output strategies are available: a
//! vector-preserving overlay (default, keeps text selectable) and full
//! rasterization.
//!
//! # Example
//!
//! ```no_run
//! use pdf_debrand::pdf::{remove_branding, DebrandOptions, OutputStrategy};
//! use pdf_debrand::rect::Rect;
//! use std::collections::BTreeSet;
//! use std::path::PathBuf;
//!
//! let options = DebrandOptions {
//!     source_path: PathBuf::from("slides.pdf"),
//!     dest_dir: PathBuf::from("out"),
//!     offsets: BTreeSet::from([1]),
//!     rect: Rect::from_coords(450, 20, 590, 60).expect("valid rectangle"),
//!     strategy: OutputStrategy::Overlay,
//! };
//!
//! let output = remove_branding(&options).expect("Failed to remove branding");
//! println!("{}", output.display());
//! ```

pub mod color;
pub mod error;
pub mod offsets;
pub mod pdf;
pub mod rect;
pub mod render;

// Re-export commonly used items
pub use error::{Error, Result};
