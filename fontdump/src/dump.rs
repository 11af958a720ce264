//! Reconciliation of loaded glyphs against a prior mapping, and emission
//! of the per-glyph SVG files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use rand::Rng;
use rayon::prelude::*;

use crate::{
    args::Args,
    codepoint,
    config::{self, ConfigEntry, DiffEntry, GlyphMapping},
    error::Error,
    glyph::GlyphRecord,
    source::SourceFormat,
};

/// What reconciliation decided for one glyph.
#[derive(Debug, PartialEq)]
enum Classification<'a> {
    /// Already in the mapping; nothing to emit.
    Skip,
    /// Already in the mapping but the run is forced; emit under the
    /// mapping's filename.
    Override(&'a ConfigEntry),
    /// Never seen before; emit and record in the diff.
    New,
}

fn classify<'a>(code: u32, mapping: &'a GlyphMapping, force: bool) -> Classification<'a> {
    match mapping.lookup(code) {
        None => Classification::New,
        Some(_) if !force => Classification::Skip,
        Some(entry) => Classification::Override(entry),
    }
}

/// FontForge can't parse a close-path running straight into a move-to;
/// keep a space between them.
fn separate_close_and_move(path_data: &str) -> String {
    path_data.replace("zm", "z m")
}

/// A minimal standalone SVG document holding one glyph.
fn render_svg(width: &str, height: u32, path_data: &str) -> String {
    format!(
        "<svg height=\"{height}\" width=\"{width}\" xmlns=\"http://www.w3.org/2000/svg\">\n  <path d=\"{path_data}\" />\n</svg>\n"
    )
}

fn override_filename(entry: &ConfigEntry) -> String {
    let stem = entry
        .file
        .as_deref()
        .or(entry.css.as_deref())
        .unwrap_or_default();
    format!("{stem}.svg")
}

fn new_filename(glyph: &GlyphRecord, code: u32, names: bool) -> String {
    if names {
        format!("{}.svg", glyph.name)
    } else {
        format!("glyph__{code:x}.svg")
    }
}

fn random_uid() -> String {
    format!("{:032x}", rand::rng().random::<u128>())
}

fn require_dir(dir: &Path) -> Result<(), Error> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::ExpectedDirectory(dir.to_owned()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| Error::FileIo {
            path: dir.to_owned(),
            source,
        })?;
    }
    debug!("require_dir {dir:?}");
    Ok(())
}

/// A rendered glyph waiting to hit the disk.
struct PendingWrite {
    path: PathBuf,
    contents: String,
}

impl PendingWrite {
    fn new(dir: &Path, filename: String, glyph: &GlyphRecord) -> PendingWrite {
        let path_data = separate_close_and_move(&glyph.path_data);
        PendingWrite {
            path: dir.join(filename),
            contents: render_svg(&glyph.width, glyph.height, &path_data),
        }
    }

    fn commit(&self) -> Result<(), Error> {
        fs::write(&self.path, &self.contents).map_err(|source| Error::FileIo {
            path: self.path.clone(),
            source,
        })
    }
}

pub fn run(args: &Args) -> Result<(), Error> {
    let raw = fs::read_to_string(&args.src_font).map_err(|source| Error::SourceUnreadable {
        path: args.src_font.clone(),
        source,
    })?;
    let mapping = GlyphMapping::load(args.config.as_deref())?;
    let glyphs = SourceFormat::for_path(&args.src_font).load_glyphs(&raw)?;

    require_dir(&args.glyphs_dir)?;

    // Classify sequentially so the diff keeps source order; writes fan
    // out below once every decision is made.
    let mut diff = Vec::new();
    let mut pending = Vec::new();
    for glyph in &glyphs {
        let code = codepoint::decode(&glyph.unicode);
        match classify(code, &mapping, args.force) {
            Classification::Skip => info!("{code:x} exists, skipping"),
            Classification::Override(entry) => {
                info!("{code:x} - found, but override forced");
                pending.push(PendingWrite::new(
                    &args.glyphs_dir,
                    override_filename(entry),
                    glyph,
                ));
            }
            Classification::New => {
                info!("{code:x} - NEW glyph, writing...");
                diff.push(DiffEntry {
                    css: glyph.name.clone(),
                    code: code.into(),
                    uid: glyph.uid.clone().unwrap_or_else(random_uid),
                    search: glyph.search.clone(),
                });
                pending.push(PendingWrite::new(
                    &args.glyphs_dir,
                    new_filename(glyph, code, args.names),
                    glyph,
                ));
            }
        }
    }

    // a failed write ends the run; the diff must only list written glyphs
    pending.par_iter().try_for_each(PendingWrite::commit)?;

    if let Some(diff_path) = &args.diff_config {
        config::write_diff(diff_path, &diff)?;
    }
    Ok(())
}
