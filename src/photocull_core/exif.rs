use crate::photocull_core::error::{PhotocullError, Result};
use exiftool::ExifTool;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use time::{PrimitiveDateTime, format_description::FormatItem, macros::format_description};

/// Date format used in EXIF data.
pub const EXIF_DATE_FORMAT: &[FormatItem] =
    format_description!("[year]:[month]:[day] [hour]:[minute]:[second]");

/// Rating and capture timestamp read from one photo. An absent or unparsable
/// field is simply `None`; only a failure to query the file at all is an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoMetadata {
    pub rating: Option<u8>,
    pub captured_at: Option<PrimitiveDateTime>,
}

/// Source of per-photo metadata. The production implementation drives an
/// exiftool process; tests supply canned values without any external process.
pub trait MetadataProvider {
    fn read(&mut self, path: &Path) -> Result<PhotoMetadata>;
}

/// Raw tag values from exiftool. The rating tag name varies by camera vendor,
/// so it is picked out of the flattened map instead of a fixed field.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
struct RawTagInfo {
    #[serde(default)]
    date_time_original: String,
    #[serde(flatten)]
    tags: HashMap<String, Value>,
}

/// Metadata provider backed by a persistent exiftool process. One instance
/// per worker; each read is a single round-trip requesting both tags.
pub struct ExifToolProvider {
    exiftool: ExifTool,
    rating_tag: String,
}

impl ExifToolProvider {
    pub fn new(rating_tag: &str) -> Result<Self> {
        let exiftool = ExifTool::new().map_err(|e| PhotocullError::Exiftool(e.to_string()))?;
        Ok(ExifToolProvider {
            exiftool,
            rating_tag: rating_tag.to_string(),
        })
    }
}

impl MetadataProvider for ExifToolProvider {
    fn read(&mut self, path: &Path) -> Result<PhotoMetadata> {
        let rating_arg = format!("-{}", self.rating_tag);
        let raw: RawTagInfo = self
            .exiftool
            .read_metadata(path, &[rating_arg.as_str(), "-DateTimeOriginal"])
            .map_err(|e| PhotocullError::MetadataExtraction {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let rating = raw.tags.get(&self.rating_tag).and_then(parse_rating);
        let captured_at = parse_exif_date(&raw.date_time_original);
        if captured_at.is_none() && !raw.date_time_original.is_empty() {
            log::debug!(
                "Unparsable DateTimeOriginal '{}' for {}",
                raw.date_time_original,
                path.display()
            );
        }

        Ok(PhotoMetadata {
            rating,
            captured_at,
        })
    }
}

/// Parse a rating tag value. Exiftool emits numbers for most vendors but
/// strings for some tags; anything that is not a non-negative integer counts
/// as absent.
fn parse_rating(value: &Value) -> Option<u8> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|r| u8::try_from(r).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse an EXIF `YYYY:MM:DD HH:MM:SS` timestamp.
fn parse_exif_date(date_str: &str) -> Option<PrimitiveDateTime> {
    if date_str.is_empty() {
        return None;
    }
    PrimitiveDateTime::parse(date_str, EXIF_DATE_FORMAT).ok()
}
