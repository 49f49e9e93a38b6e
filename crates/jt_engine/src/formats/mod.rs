pub mod indexed_bitplane;
pub mod rgb_bytes;

mod jt;
pub use jt::*;

mod image_format;
pub use image_format::*;

use serde::{Deserialize, Serialize};

/// Field ordering of the static `data` object. Two orderings exist in
/// the wild; they are semantically identical JSON, but the original
/// editor writes v2 for 16x64 panels and v1 for everything else, and we
/// reproduce both byte-for-byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvelopeVersion {
    #[default]
    V1,
    V2,
}

impl EnvelopeVersion {
    /// The ordering the original editor selects for a panel size.
    pub fn for_size(size: crate::Size) -> EnvelopeVersion {
        if size.width == 64 && size.height == 16 {
            EnvelopeVersion::V2
        } else {
            EnvelopeVersion::V1
        }
    }
}

/// Envelope metadata written alongside the payload. The playback hints
/// are opaque to the codecs and passed through to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOptions {
    pub version: EnvelopeVersion,

    /// Device playback hint, opaque to the codec.
    pub speed: i64,
    /// Device playback hint, opaque to the codec.
    pub mode: i64,
    /// Device playback hint, opaque to the codec.
    pub stay_time: i64,
}

impl SaveOptions {
    pub const fn new() -> Self {
        SaveOptions {
            version: EnvelopeVersion::V1,
            speed: 255,
            mode: 1,
            stay_time: 3,
        }
    }
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self::new()
    }
}
