//! Glyph extraction from fontello config documents.

use serde::Deserialize;
use smol_str::SmolStr;
use svgpath::SvgPath;

use crate::{
    codepoint,
    error::Error,
    glyph::{GlyphRecord, UNITS_PER_EM},
};

#[derive(Deserialize)]
struct FontelloConfig {
    glyphs: Vec<FontelloGlyph>,
}

#[derive(Deserialize)]
struct FontelloGlyph {
    code: u32,
    #[serde(default)]
    css: Option<String>,
    #[serde(default)]
    uid: Option<String>,
    #[serde(default)]
    search: Vec<String>,
    #[serde(default)]
    svg: Option<FontelloSvg>,
}

#[derive(Deserialize)]
struct FontelloSvg {
    #[serde(default)]
    path: String,
    #[serde(default)]
    width: f64,
}

pub(crate) fn load_glyphs(raw: &str) -> Result<Vec<GlyphRecord>, Error> {
    let config: FontelloConfig = serde_json::from_str(raw)?;
    let mut result = Vec::new();
    for glyph in config.glyphs {
        // entries without an image are not materialized
        let Some(svg) = glyph.svg.filter(|svg| !svg.path.is_empty()) else {
            continue;
        };
        // already in the 1000 unit em; only the normalization pass runs
        let path_data = SvgPath::parse(&svg.path)?
            .absolute()
            .round(1)
            .relative()
            .round(1)
            .to_string();
        let name = glyph
            .css
            .map(SmolStr::new)
            .unwrap_or_else(|| SmolStr::new(format!("glyph{}", glyph.code)));

        result.push(GlyphRecord {
            path_data,
            width: format!("{:.1}", svg.width),
            height: UNITS_PER_EM as u32,
            unicode: codepoint::encode(glyph.code),
            name,
            uid: glyph.uid,
            search: glyph.search,
        });
    }
    Ok(result)
}
