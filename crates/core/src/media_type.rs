//! Content-based media type detection for uploaded payloads.
//!
//! Sniffing is a best-effort classification by magic bytes, not an
//! authoritative check; it must be paired with structural parsing
//! (see [`crate::identity`]) before the payload is trusted.

use crate::error::{Error, Result};
use bytes::Bytes;

/// Number of leading bytes consulted by [`sniff`].
pub const SNIFF_LEN: usize = 512;

/// Magic-byte signature table. First match wins.
///
/// Font signatures per the sfnt/WOFF specs; the non-font entries cover the
/// formats most commonly mis-submitted to the upload form.
const SIGNATURES: &[(&[u8], &str)] = &[
    (&[0x00, 0x01, 0x00, 0x00], "font/ttf"),
    (b"OTTO", "font/otf"),
    (b"ttcf", "font/collection"),
    (b"wOFF", "font/woff"),
    (b"wOF2", "font/woff2"),
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (&[0xFF, 0xD8, 0xFF], "image/jpeg"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"%PDF-", "application/pdf"),
    (b"PK\x03\x04", "application/zip"),
];

/// Classify a byte stream by its leading bytes.
///
/// Only the first [`SNIFF_LEN`] bytes are consulted, so callers may pass
/// either a prefix or the whole payload.
pub fn sniff(data: &[u8]) -> &'static str {
    let prefix = &data[..data.len().min(SNIFF_LEN)];
    for (magic, media_type) in SIGNATURES {
        if prefix.starts_with(magic) {
            return media_type;
        }
    }
    "application/octet-stream"
}

/// Accepted font container types.
///
/// Everything outside this allow-list is rejected before any parsing work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaType {
    Ttf,
    Woff,
    Woff2,
}

impl MediaType {
    /// Match a sniffed media type string against the allow-list.
    pub fn from_sniffed(media_type: &str) -> Result<Self> {
        match media_type {
            "font/ttf" => Ok(Self::Ttf),
            "font/woff" => Ok(Self::Woff),
            "font/woff2" => Ok(Self::Woff2),
            other => Err(Error::UnsupportedMediaType(other.to_string())),
        }
    }

    /// IANA media type string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ttf => "font/ttf",
            Self::Woff => "font/woff",
            Self::Woff2 => "font/woff2",
        }
    }

    /// Container extension, the media type's subtype.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Ttf => "ttf",
            Self::Woff => "woff",
            Self::Woff2 => "woff2",
        }
    }
}

/// One uploaded font payload with its sniffed container type.
///
/// Immutable once sniffed; dropped when the pipeline run completes.
#[derive(Clone, Debug)]
pub struct UploadedFont {
    payload: Bytes,
    media_type: MediaType,
}

impl UploadedFont {
    /// Sniff the payload and gate it against the font allow-list.
    pub fn sniff(payload: Bytes) -> Result<Self> {
        let media_type = MediaType::from_sniffed(sniff(&payload))?;
        Ok(Self {
            payload,
            media_type,
        })
    }

    /// The full raw payload.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// The detected container type.
    pub fn media_type(&self) -> MediaType {
        self.media_type
    }
}
