//! Command line arguments

use std::path::PathBuf;

use clap::Parser;

/// Dump each glyph of a font source to a standalone SVG file.
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct Args {
    /// Source font: an SVG font (.svg) or a fontello config (any other
    /// extension, treated as JSON)
    #[arg(short = 'i', long)]
    pub src_font: PathBuf,

    /// Output folder for the per-glyph SVG files; created if missing
    #[arg(short = 'o', long)]
    pub glyphs_dir: PathBuf,

    /// Mapping from a previous run; glyphs listed in it are not re-emitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Where to write the mapping of newly discovered glyphs
    #[arg(short, long)]
    pub diff_config: Option<PathBuf>,

    /// Re-emit glyphs already in the config, under the config's filenames
    #[arg(short, long)]
    pub force: bool,

    /// Name new glyph files after the glyphs instead of their codepoints
    #[arg(short, long)]
    pub names: bool,
}
