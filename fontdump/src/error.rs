use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Can't read font file '{path}': '{source}'")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Can't read config file '{path}': '{source}'")]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Can't parse config file '{0}': '{1}'")]
    ConfigUnparseable(PathBuf, #[source] serde_yaml::Error),
    #[error("'{0}' exists but is not a directory")]
    ExpectedDirectory(PathBuf),
    #[error("io failed for '{path}': '{source}'")]
    FileIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("No 'font' element in source font")]
    NoFontElement,
    #[error("No 'font-face' element in source font")]
    NoFontFace,
    #[error("Unable to parse source font: '{0}'")]
    XmlError(#[from] quick_xml::Error),
    #[error("Unable to parse source font: '{0}'")]
    XmlAttributeError(#[from] quick_xml::events::attributes::AttrError),
    #[error("Bad '{name}' attribute value '{value}'")]
    BadAttribute { name: &'static str, value: String },
    #[error("Bad glyph path data: '{0}'")]
    BadPathData(#[from] svgpath::ParseError),
    #[error("Unable to parse source font: '{0}'")]
    JsonError(#[from] serde_json::Error),
    #[error(transparent)]
    YamlSerError(#[from] serde_yaml::Error),
    #[error("Diff config requested but no new glyphs were found")]
    NoNewGlyphs,
}
