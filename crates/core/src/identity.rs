//! Font identity extraction and filename sanitization.
//!
//! Extracted name-table strings are attacker-controlled content, not
//! trusted configuration; both identity fields must pass [`is_safe_name`]
//! before they are allowed anywhere near a filesystem path.

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use ttf_parser::{name_id, Face};

lazy_static! {
    /// Character class permitted in identity strings that flow into paths:
    /// ASCII letters, digits, underscore, hyphen and space. Nothing else.
    static ref SAFE_NAME_RX: Regex = Regex::new(r"^[0-9A-Za-z_\- ]+$").unwrap();
}

/// Fallback family name used when the font carries no family record.
pub const UNKNOWN_FAMILY: &str = "Unknown";

/// Whether a string is safe to embed in an artifact path. Empty strings
/// always fail.
pub fn is_safe_name(name: &str) -> bool {
    SAFE_NAME_RX.is_match(name)
}

/// Identity strings recovered from a font's name table.
///
/// Derived once per uploaded font, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontIdentity {
    pub family: String,
    pub subfamily: String,
}

impl FontIdentity {
    /// Parse the payload's name table and recover family and subfamily.
    ///
    /// A missing family record falls back to [`UNKNOWN_FAMILY`]. A missing
    /// subfamily is a hard rejection: the subfamily is load-bearing for the
    /// artifact filename and must not default silently.
    pub fn extract(data: &[u8]) -> Result<Self> {
        let face = Face::parse(data, 0).map_err(|err| Error::MalformedFont(err.to_string()))?;

        let family =
            name_string(&face, name_id::FAMILY).unwrap_or_else(|| UNKNOWN_FAMILY.to_string());
        let subfamily = name_string(&face, name_id::SUBFAMILY).ok_or(Error::MissingSubfamily)?;

        Ok(Self { family, subfamily })
    }

    /// Validate both fields against the filename character class.
    pub fn validate(&self) -> Result<()> {
        for name in [&self.family, &self.subfamily] {
            if !is_safe_name(name) {
                return Err(Error::UnsafeName(name.clone()));
            }
        }
        Ok(())
    }

    /// Destination directory segment: the family with spaces hyphenated.
    pub fn directory_name(&self) -> String {
        self.family.replace(' ', "-")
    }

    /// Artifact file name for one subset.
    ///
    /// The subfamily segment keeps literal spaces; only the family is
    /// hyphenated. This matches the deployed naming scheme, which is the
    /// cache key across process restarts.
    pub fn artifact_file_name(&self, subset_id: &str, extension: &str) -> String {
        format!(
            "{}-{}.{}.{}",
            self.directory_name(),
            self.subfamily,
            subset_id,
            extension
        )
    }
}

/// First decodable Unicode record with the given name ID.
fn name_string(face: &Face<'_>, id: u16) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|name| name.name_id == id && name.is_unicode())
        .find_map(|name| name.to_string())
}
