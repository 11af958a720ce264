//! Glyph extraction from SVG font documents.

use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};
use smol_str::SmolStr;
use svgpath::SvgPath;

use crate::{
    error::Error,
    glyph::{GlyphRecord, UNITS_PER_EM},
};

#[derive(Default)]
struct FontAttrs {
    horiz_adv_x: Option<f64>,
}

#[derive(Default)]
struct FontFaceAttrs {
    ascent: Option<f64>,
    units_per_em: Option<f64>,
}

#[derive(Default)]
struct RawGlyph {
    d: Option<String>,
    unicode: Option<String>,
    name: Option<String>,
    horiz_adv_x: Option<f64>,
}

pub(crate) fn load_glyphs(raw: &str) -> Result<Vec<GlyphRecord>, Error> {
    let mut reader = Reader::from_str(raw);
    let mut font: Option<FontAttrs> = None;
    let mut font_face: Option<FontFaceAttrs> = None;
    let mut raw_glyphs = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"font" if font.is_none() => font = Some(parse_font(&e)?),
                b"font-face" if font_face.is_none() => font_face = Some(parse_font_face(&e)?),
                b"glyph" => raw_glyphs.push(parse_glyph(&e)?),
                _ => (),
            },
            Event::Eof => break,
            _ => (),
        }
    }

    let font = font.ok_or(Error::NoFontElement)?;
    let font_face = font_face.ok_or(Error::NoFontFace)?;
    let ascent = font_face.ascent.unwrap_or(0.0);
    let scale = UNITS_PER_EM / font_face.units_per_em.unwrap_or(UNITS_PER_EM);

    let mut result = Vec::new();
    for glyph in raw_glyphs {
        // glyphs without an image are not materialized; that could be a
        // legitimate space, which nobody has asked for yet
        let Some(d) = glyph.d.filter(|d| !d.is_empty()) else {
            continue;
        };
        let unicode = glyph.unicode.unwrap_or_default();
        let name = glyph
            .name
            .map(SmolStr::new)
            .unwrap_or_else(|| SmolStr::new(format!("glyph{unicode}")));
        let width = glyph.horiz_adv_x.or(font.horiz_adv_x).unwrap_or(0.0);

        // baseline-relative font space, y up -> top-left image space, y down
        let path_data = SvgPath::parse(&d)?
            .translate(0.0, -ascent)
            .scale(scale, -scale)
            .absolute()
            .round(1)
            .relative()
            .round(1)
            .to_string();

        result.push(GlyphRecord {
            path_data,
            width: format!("{:.1}", width * scale),
            height: UNITS_PER_EM as u32,
            unicode,
            name,
            uid: None,
            search: Vec::new(),
        });
    }
    Ok(result)
}

fn parse_font(e: &BytesStart) -> Result<FontAttrs, Error> {
    let mut font = FontAttrs::default();
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"horiz-adv-x" {
            font.horiz_adv_x = Some(parse_number("horiz-adv-x", &attr.unescape_value()?)?);
        }
    }
    Ok(font)
}

fn parse_font_face(e: &BytesStart) -> Result<FontFaceAttrs, Error> {
    let mut face = FontFaceAttrs::default();
    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"ascent" => face.ascent = Some(parse_number("ascent", &value)?),
            b"units-per-em" => face.units_per_em = Some(parse_number("units-per-em", &value)?),
            _ => (),
        }
    }
    Ok(face)
}

fn parse_glyph(e: &BytesStart) -> Result<RawGlyph, Error> {
    let mut glyph = RawGlyph::default();
    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"d" => glyph.d = Some(value.into_owned()),
            b"unicode" => glyph.unicode = Some(value.into_owned()),
            b"glyph-name" => glyph.name = Some(value.into_owned()),
            b"horiz-adv-x" => glyph.horiz_adv_x = Some(parse_number("horiz-adv-x", &value)?),
            _ => (),
        }
    }
    Ok(glyph)
}

fn parse_number(name: &'static str, value: &str) -> Result<f64, Error> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::BadAttribute {
            name,
            value: value.to_owned(),
        })
}
