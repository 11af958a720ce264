//! Source format selection.

use std::ffi::OsStr;
use std::path::Path;

use crate::{error::Error, fontello, glyph::GlyphRecord, svg_font};

/// The two documents glyphs can be read from, told apart by file
/// extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// An SVG font document (`.svg`).
    SvgFont,
    /// A fontello icon config (any other extension; treated as JSON).
    Fontello,
}

impl SourceFormat {
    pub fn for_path(path: &Path) -> SourceFormat {
        match path.extension().and_then(OsStr::to_str) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => SourceFormat::SvgFont,
            _ => SourceFormat::Fontello,
        }
    }

    /// Parse `raw` into glyph records, all projected into the 1000 unit em.
    pub fn load_glyphs(self, raw: &str) -> Result<Vec<GlyphRecord>, Error> {
        match self {
            SourceFormat::SvgFont => svg_font::load_glyphs(raw),
            SourceFormat::Fontello => fontello::load_glyphs(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_extension_selects_the_svg_font_loader() {
        assert_eq!(SourceFormat::SvgFont, SourceFormat::for_path(Path::new("font.svg")));
        assert_eq!(SourceFormat::SvgFont, SourceFormat::for_path(Path::new("FONT.SVG")));
    }

    #[test]
    fn everything_else_is_fontello_json() {
        assert_eq!(
            SourceFormat::Fontello,
            SourceFormat::for_path(Path::new("config.json"))
        );
        assert_eq!(SourceFormat::Fontello, SourceFormat::for_path(Path::new("config")));
        assert_eq!(SourceFormat::Fontello, SourceFormat::for_path(Path::new("font.ttf")));
    }
}
