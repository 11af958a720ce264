//! The format-agnostic glyph record both loaders produce.

use smol_str::SmolStr;

/// Glyph geometry is normalized into a 1000 unit em.
pub const UNITS_PER_EM: f64 = 1000.0;

/// One glyph, loaded and projected into image space.
///
/// `unicode` is still the raw UTF-16 text from the source; the dump engine
/// decodes it to a scalar during reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRecord {
    /// Path data in the 1000 unit em, absolute/relative recompressed and
    /// rounded to one decimal.
    pub path_data: String,
    /// Horizontal advance, one fractional digit.
    pub width: String,
    /// Always 1000 for now; kept per record for future non-square ems.
    pub height: u32,
    pub unicode: String,
    pub name: SmolStr,
    pub uid: Option<String>,
    pub search: Vec<String>,
}
