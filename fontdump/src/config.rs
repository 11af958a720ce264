//! Prior and diff glyph mappings, and the hex codepoints they carry.

use std::{fmt, fs, path::Path};

use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use smol_str::SmolStr;

use crate::error::Error;

/// A Unicode scalar that serializes in hex, the way mapping files are
/// written for humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Codepoint(u32);

impl Codepoint {
    pub fn to_u32(self) -> u32 {
        self.0
    }
}

impl From<u32> for Codepoint {
    fn from(value: u32) -> Self {
        Codepoint(value)
    }
}

impl fmt::Display for Codepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl Serialize for Codepoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:#x}", self.0))
    }
}

impl<'de> Deserialize<'de> for Codepoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CodepointVisitor;

        impl Visitor<'_> for CodepointVisitor {
            type Value = Codepoint;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a codepoint as an integer or hex string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Codepoint, E> {
                u32::try_from(v)
                    .map(Codepoint)
                    .map_err(|_| E::custom(format!("codepoint {v:#x} out of range")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Codepoint, E> {
                u32::try_from(v)
                    .map(Codepoint)
                    .map_err(|_| E::custom(format!("codepoint {v} out of range")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Codepoint, E> {
                let parsed = match v.strip_prefix("0x").or_else(|| v.strip_prefix("0X")) {
                    Some(hex) => u32::from_str_radix(hex, 16),
                    None => v.parse(),
                };
                parsed
                    .map(Codepoint)
                    .map_err(|_| E::custom(format!("bad codepoint '{v}'")))
            }
        }

        deserializer.deserialize_any(CodepointVisitor)
    }
}

/// One record of a previously generated mapping.
///
/// The key and filename fields each have two historical spellings; see
/// [`GlyphMapping::lookup`] and the override filename rule in the dump
/// engine.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ConfigEntry {
    #[serde(default)]
    pub css: Option<String>,
    #[serde(default)]
    pub code: Option<Codepoint>,
    #[serde(default)]
    pub from: Option<Codepoint>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub search: Vec<String>,
}

/// The glyphs recorded by previous runs, read once and never modified.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct GlyphMapping {
    pub glyphs: Vec<ConfigEntry>,
}

impl GlyphMapping {
    /// Read a mapping, or produce the empty mapping if no path was given.
    pub fn load(path: Option<&Path>) -> Result<GlyphMapping, Error> {
        let Some(path) = path else {
            return Ok(GlyphMapping::default());
        };
        let raw = fs::read_to_string(path).map_err(|source| Error::ConfigUnreadable {
            path: path.to_owned(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|e| Error::ConfigUnparseable(path.to_owned(), e))
    }

    /// First entry matching `code`, with `from` taking precedence over
    /// `code` within an entry. Colliding entries resolve to the earliest.
    pub fn lookup(&self, code: u32) -> Option<&ConfigEntry> {
        self.glyphs
            .iter()
            .find(|entry| entry.from.or(entry.code).map(Codepoint::to_u32) == Some(code))
    }
}

/// One newly discovered glyph, in the schema [`GlyphMapping`] accepts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DiffEntry {
    pub css: SmolStr,
    pub code: Codepoint,
    pub uid: String,
    pub search: Vec<String>,
}

#[derive(Serialize)]
struct DiffMapping<'a> {
    glyphs: &'a [DiffEntry],
}

/// Persist the diff mapping for use as a future run's config.
pub fn write_diff(path: &Path, diff: &[DiffEntry]) -> Result<(), Error> {
    if diff.is_empty() {
        return Err(Error::NoNewGlyphs);
    }
    let yml = serde_yaml::to_string(&DiffMapping { glyphs: diff })?;
    fs::write(path, yml).map_err(|source| Error::FileIo {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(yml: &str) -> GlyphMapping {
        serde_yaml::from_str(yml).unwrap()
    }

    #[test]
    fn lookup_prefers_from_over_code() {
        let mapping = mapping("glyphs:\n  - from: 0x41\n    code: 0x42\n    css: a\n");
        assert!(mapping.lookup(0x41).is_some());
        assert!(mapping.lookup(0x42).is_none());
    }

    #[test]
    fn lookup_falls_back_to_code() {
        let mapping = mapping("glyphs:\n  - code: 0x42\n    css: b\n");
        assert_eq!(Some("b"), mapping.lookup(0x42).and_then(|e| e.css.as_deref()));
    }

    #[test]
    fn colliding_entries_resolve_first_match() {
        let mapping = mapping(
            "glyphs:\n  - code: 0x42\n    css: first\n  - code: 0x42\n    css: second\n",
        );
        assert_eq!(
            Some("first"),
            mapping.lookup(0x42).and_then(|e| e.css.as_deref())
        );
    }

    #[test]
    fn codepoints_deserialize_from_many_spellings() {
        let mapping = mapping(
            "glyphs:\n  - code: 65\n  - code: '0x42'\n  - code: '67'\n  - from: 0x1f600\n",
        );
        assert!(mapping.lookup(0x41).is_some());
        assert!(mapping.lookup(0x42).is_some());
        assert!(mapping.lookup(0x43).is_some());
        assert!(mapping.lookup(0x1F600).is_some());
    }

    #[test]
    fn codepoints_serialize_in_hex() {
        let yml = serde_yaml::to_string(&Codepoint::from(0x1F600)).unwrap();
        assert!(yml.contains("0x1f600"), "{yml}");
    }

    #[test]
    fn no_config_is_the_empty_mapping() {
        let mapping = GlyphMapping::load(None).unwrap();
        assert!(mapping.glyphs.is_empty());
    }

    #[test]
    fn mapping_without_glyphs_key_is_unparseable() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        fs::write(tmp.path(), "not_glyphs: []\n").unwrap();
        assert!(matches!(
            GlyphMapping::load(Some(tmp.path())),
            Err(Error::ConfigUnparseable(..))
        ));
    }

    #[test]
    fn missing_config_file_is_unreadable() {
        assert!(matches!(
            GlyphMapping::load(Some(Path::new("no/such/config.yml"))),
            Err(Error::ConfigUnreadable { .. })
        ));
    }

    #[test]
    fn diff_round_trips_as_a_config() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let diff = vec![DiffEntry {
            css: "smile".into(),
            code: Codepoint::from(0x1F600),
            uid: "d870630b96a24c9ba38e9ae2faf09e70".into(),
            search: vec!["grin".into()],
        }];
        write_diff(tmp.path(), &diff).unwrap();

        let mapping = GlyphMapping::load(Some(tmp.path())).unwrap();
        let entry = mapping.lookup(0x1F600).expect("diff entry should match");
        assert_eq!(Some("smile"), entry.css.as_deref());
        assert_eq!(vec!["grin".to_string()], entry.search);
    }

    #[test]
    fn empty_diff_is_refused() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            write_diff(tmp.path(), &[]),
            Err(Error::NoNewGlyphs)
        ));
    }
}
