//! The JT file envelope.
//!
//! A JT file is a one-element JSON array. The entry's `dataType` selects
//! the static (1) or animation (0) branch of the `data` object; an
//! independent `graffitiType`/`aniType` tag selects the payload codec.
//! The payload itself is a flat byte buffer spelled as decimal integers.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ColorMode, EnvelopeVersion, JtError, PixelDocument, Result, SaveOptions, Size};

use super::{indexed_bitplane, rgb_bytes};

pub const JT_EXTENSION: &str = "jt";

const DATA_TYPE_ANIMATION: i64 = 0;
const DATA_TYPE_STATIC: i64 = 1;

/// A parsed JT file: the decoded document plus the envelope metadata
/// needed to write it back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct JtFile {
    pub document: PixelDocument,
    pub options: SaveOptions,
}

impl JtFile {
    /// Parse a JT file from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON, an unknown `dataType`,
    /// missing branch fields, or a payload that does not match the
    /// declared geometry.
    pub fn parse(json: &str) -> Result<JtFile> {
        let entries: Vec<RawEntry> = serde_json::from_str(json)?;
        let Some(entry) = entries.into_iter().next() else {
            return Err(JtError::EmptyEnvelope);
        };
        let data_type = entry.data_type.ok_or(JtError::MissingField { field: "dataType" })?;
        let data = entry.data;
        let size = Size::new(data.pixel_width as i32, data.pixel_height as i32);

        let mut options = SaveOptions::new();
        options.version = EnvelopeVersion::for_size(size);
        if let Some(speed) = data.speed {
            options.speed = speed;
        }
        if let Some(mode) = data.mode {
            options.mode = mode;
        }
        if let Some(stay_time) = data.stay_time {
            options.stay_time = stay_time;
        }

        let document = match data_type {
            DATA_TYPE_STATIC => {
                let payload = data.graffiti_data.ok_or(JtError::MissingField { field: "graffitiData" })?;
                let color_mode = color_mode_from_tag(data.graffiti_type)?;
                log::debug!("loading static JT document: {size}, {color_mode}, {} payload bytes", payload.len());
                decode_payload(&payload, color_mode, size, 1)?
            }
            DATA_TYPE_ANIMATION => {
                let payload = data.ani_data.ok_or(JtError::MissingField { field: "aniData" })?;
                let color_mode = color_mode_from_tag(data.ani_type)?;
                let frame_num = data.frame_num.ok_or(JtError::MissingField { field: "frameNum" })?;
                if frame_num <= 0 {
                    return Err(JtError::NoFrames);
                }
                log::debug!(
                    "loading animated JT document: {size}, {color_mode}, {frame_num} frames, {} payload bytes",
                    payload.len()
                );
                let mut document = decode_payload(&payload, color_mode, size, frame_num as usize)?;
                document.frame_delay_ms = data.delays.unwrap_or(crate::DEFAULT_FRAME_DELAY_MS);
                document
            }
            other => return Err(JtError::UnsupportedDataType { data_type: other }),
        };

        Ok(JtFile { document, options })
    }

    /// Serialize the document into JT JSON text. A single-frame document
    /// becomes the static branch, anything else the animation branch.
    ///
    /// # Errors
    ///
    /// Returns an error when the document violates its mode's invariants.
    pub fn serialize(&self) -> Result<String> {
        encode_envelope(&self.document, &self.options)
    }

    /// Read and parse a `.jt` file.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or parsing fails.
    pub fn load(path: &Path) -> Result<JtFile> {
        let json = std::fs::read_to_string(path)?;
        JtFile::parse(&json)
    }

    /// Serialize and write a `.jt` file.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.serialize()?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Decode a JT file's JSON text into a document, dropping the envelope
/// metadata.
///
/// # Errors
///
/// See [`JtFile::parse`].
pub fn decode_document(json: &str) -> Result<PixelDocument> {
    Ok(JtFile::parse(json)?.document)
}

/// Serialize a document into JT JSON text.
///
/// # Errors
///
/// Returns an error when the document violates its mode's invariants.
pub fn encode_envelope(document: &PixelDocument, options: &SaveOptions) -> Result<String> {
    let payload = match document.color_mode {
        ColorMode::Indexed3Bit => indexed_bitplane::encode(document)?,
        ColorMode::Rgb24Bit => rgb_bytes::encode(document)?,
    };
    let type_tag = document.color_mode.type_tag();
    let size = document.size();

    let json = if document.frame_count() == 1 {
        match options.version {
            EnvelopeVersion::V1 => serde_json::to_string(&[Entry {
                data: StaticDataV1 {
                    graffiti_data: payload,
                    graffiti_type: type_tag,
                    mode: options.mode,
                    pixel_height: i64::from(size.height),
                    pixel_width: i64::from(size.width),
                    speed: options.speed,
                    stay_time: options.stay_time,
                },
                data_type: DATA_TYPE_STATIC,
            }])?,
            EnvelopeVersion::V2 => serde_json::to_string(&[Entry {
                data: StaticDataV2 {
                    speed: options.speed,
                    mode: options.mode,
                    pixel_height: i64::from(size.height),
                    stay_time: options.stay_time,
                    graffiti_data: payload,
                    pixel_width: i64::from(size.width),
                    graffiti_type: type_tag,
                },
                data_type: DATA_TYPE_STATIC,
            }])?,
        }
    } else {
        serde_json::to_string(&[Entry {
            data: AnimationData {
                ani_data: payload,
                ani_type: type_tag,
                delays: document.frame_delay_ms,
                frame_num: document.frame_count() as i64,
                pixel_height: i64::from(size.height),
                pixel_width: i64::from(size.width),
            },
            data_type: DATA_TYPE_ANIMATION,
        }])?
    };
    Ok(json)
}

fn decode_payload(payload: &[u8], color_mode: ColorMode, size: Size, frame_count: usize) -> Result<PixelDocument> {
    match color_mode {
        ColorMode::Indexed3Bit => indexed_bitplane::decode(payload, size, frame_count),
        ColorMode::Rgb24Bit => rgb_bytes::decode(payload, size, frame_count),
    }
}

fn color_mode_from_tag(tag: Option<i64>) -> Result<ColorMode> {
    // Files predating the 24-bit mode carry no type tag; they are Type 1.
    let Some(tag) = tag else {
        log::debug!("no type tag present, assuming indexed 3-bit");
        return Ok(ColorMode::Indexed3Bit);
    };
    u8::try_from(tag)
        .ok()
        .and_then(ColorMode::from_type_tag)
        .ok_or(JtError::UnsupportedTypeTag { tag })
}

#[derive(Serialize)]
struct Entry<T> {
    data: T,
    #[serde(rename = "dataType")]
    data_type: i64,
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(rename = "dataType")]
    data_type: Option<i64>,
    data: RawData,
}

/// Union of both branches and both historical field orderings; JSON
/// object order is not semantically meaningful, so one struct accepts
/// every variant.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawData {
    #[serde(default)]
    graffiti_data: Option<Vec<u8>>,
    #[serde(default)]
    graffiti_type: Option<i64>,
    #[serde(default)]
    ani_data: Option<Vec<u8>>,
    #[serde(default)]
    ani_type: Option<i64>,
    #[serde(default)]
    delays: Option<u32>,
    #[serde(default)]
    frame_num: Option<i64>,
    pixel_height: i64,
    pixel_width: i64,
    #[serde(default)]
    mode: Option<i64>,
    #[serde(default)]
    speed: Option<i64>,
    #[serde(default)]
    stay_time: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StaticDataV1 {
    graffiti_data: Vec<u8>,
    graffiti_type: u8,
    mode: i64,
    pixel_height: i64,
    pixel_width: i64,
    speed: i64,
    stay_time: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StaticDataV2 {
    speed: i64,
    mode: i64,
    pixel_height: i64,
    stay_time: i64,
    graffiti_data: Vec<u8>,
    pixel_width: i64,
    graffiti_type: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnimationData {
    ani_data: Vec<u8>,
    ani_type: u8,
    delays: u32,
    frame_num: i64,
    pixel_height: i64,
    pixel_width: i64,
}
