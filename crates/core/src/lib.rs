//! Core domain types for glyphpress: media-type sniffing, font identity
//! extraction, name sanitization and the subset catalog.
//!
//! Everything in this crate operates on in-memory bytes; filesystem and
//! process effects live in `glyphpress-subset`.

pub mod catalog;
pub mod config;
pub mod error;
pub mod identity;
pub mod media_type;

pub use catalog::{SubsetCatalog, SubsetRequest, UnicodeRange};
pub use error::{Error, Result};
pub use identity::FontIdentity;
pub use media_type::{MediaType, UploadedFont};
