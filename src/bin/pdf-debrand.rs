//! PDF Debrand CLI tool
//!
//! A command-line tool for covering branding logos in PDF files with the
//! surrounding page background color.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process;

use pdf_debrand::offsets::parse_offset_list;
use pdf_debrand::pdf::{remove_branding, DebrandOptions, OutputStrategy};
use pdf_debrand::rect::Rect;

/// PDF Debrand - Cover branding logos with the page background color
#[derive(Parser)]
#[command(name = "pdf-debrand")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Cover a logo in the top-right corner of every page
    pdf-debrand slides.pdf out/ --rect 450 20 590 60

    # Leave the title page and page 9 untouched (they are omitted from the output)
    pdf-debrand slides.pdf out/ --rect 450 20 590 60 --skip \"1-3,9\"

    # Produce a fully rasterized output instead of a vector overlay
    pdf-debrand slides.pdf out/ --rect 450 20 590 60 --strategy rasterize")]
struct Cli {
    /// Path to the source PDF file
    source: PathBuf,

    /// Destination directory for the new PDF (created if missing)
    dest: PathBuf,

    /// Rectangle covering the branding, in page coordinates from the
    /// top-left corner of the page
    #[arg(long, num_args = 4, required = true, allow_negative_numbers = true,
          value_names = ["X1", "Y1", "X2", "Y2"])]
    rect: Vec<i32>,

    /// Pages to skip, e.g. "1-3,9". Skipped pages are left out of the output
    #[arg(long, default_value = "")]
    skip: String,

    /// How the output is assembled
    #[arg(long, value_enum, default_value_t = Strategy::Overlay)]
    strategy: Strategy,
}

#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    /// Keep vector content, append an overlay rectangle (text stays selectable)
    Overlay,
    /// Re-emit every page as a rendered image
    Rasterize,
}

impl From<Strategy> for OutputStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Overlay => OutputStrategy::Overlay,
            Strategy::Rasterize => OutputStrategy::Rasterize,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let offsets = parse_offset_list(&cli.skip).context("invalid --skip value")?;
    let rect = Rect::from_coords(cli.rect[0], cli.rect[1], cli.rect[2], cli.rect[3])
        .context("invalid --rect value")?;

    let options = DebrandOptions {
        source_path: cli.source.clone(),
        dest_dir: cli.dest,
        offsets,
        rect,
        strategy: cli.strategy.into(),
    };

    eprintln!("Processing {}...", cli.source.display());

    let output_path = remove_branding(&options)
        .with_context(|| format!("failed to process {}", cli.source.display()))?;

    println!("New PDF created at {}", output_path.display());

    Ok(())
}
