//! Type 1 payload codec: indexed 3-bit bit-plane packing.
//!
//! Each color channel of a frame is packed into its own bit plane:
//! columns outer, rows inner, 8 rows per byte, most significant bit
//! first. The payload concatenates the Red planes of every frame, then
//! Green, then Blue.

use crate::{Color, ColorMode, Frame, JtError, PaletteColor, PixelDocument, Position, Result, Size};

// Channel bit positions inside a palette code, in wire order R, G, B.
const CHANNEL_SHIFTS: [u8; 3] = [0, 1, 2];

/// Payload size in bytes for the given geometry.
pub fn payload_len(size: Size, frame_count: usize) -> usize {
    3 * size.pixels() / 8 * frame_count
}

/// Encode an indexed document into a Type 1 payload.
///
/// # Errors
///
/// Fails when the document is not in indexed mode or violates the
/// indexed-mode invariants (height not a multiple of 8, non-palette cell).
pub fn encode(doc: &PixelDocument) -> Result<Vec<u8>> {
    if doc.color_mode != ColorMode::Indexed3Bit {
        return Err(JtError::ColorModeMismatch { expected: "indexed 3-bit" });
    }
    doc.check_invariants()?;

    let width = doc.get_width();
    let height = doc.get_height();
    let mut result = Vec::with_capacity(payload_len(doc.size(), doc.frame_count()));

    for shift in CHANNEL_SHIFTS {
        for frame in &doc.frames {
            for x in 0..width {
                let mut byte = 0u8;
                for y in 0..height {
                    let color = frame.get_pixel(x, y);
                    let Some(entry) = PaletteColor::from_color(color) else {
                        return Err(JtError::NonPaletteColor {
                            color: color.to_string(),
                            position: Position::new(x, y).to_string(),
                        });
                    };
                    byte = (byte << 1) | ((entry.code() >> shift) & 1);
                    if y % 8 == 7 {
                        result.push(byte);
                        byte = 0;
                    }
                }
            }
        }
    }
    Ok(result)
}

/// Decode a Type 1 payload back into an indexed document.
///
/// # Errors
///
/// Fails when the geometry is invalid for indexed mode or `data` does not
/// have exactly `3 * width * height / 8 * frame_count` bytes.
pub fn decode(data: &[u8], size: Size, frame_count: usize) -> Result<PixelDocument> {
    if size.width <= 0 || size.height <= 0 {
        return Err(JtError::invalid_dimensions(size, "width and height must be positive"));
    }
    if size.height % 8 != 0 {
        return Err(JtError::invalid_dimensions(size, "indexed 3-bit height must be a multiple of 8"));
    }
    if frame_count == 0 {
        return Err(JtError::NoFrames);
    }

    let expected = payload_len(size, frame_count);
    if data.len() != expected {
        return Err(JtError::DecodeLength {
            expected,
            actual: data.len(),
        });
    }

    let frame_len = size.pixels() / 8;
    let channel_len = frame_len * frame_count;
    let (red, rest) = data.split_at(channel_len);
    let (green, blue) = rest.split_at(channel_len);

    let column_bytes = size.height as usize / 8;
    let mut frames = Vec::with_capacity(frame_count);
    for f in 0..frame_count {
        let base = f * frame_len;
        let mut frame = Frame::new(size, Color::default());
        for x in 0..size.width {
            for y in 0..size.height {
                let idx = base + x as usize * column_bytes + y as usize / 8;
                let bit = 7 - (y % 8);
                let r = (red[idx] >> bit) & 1;
                let g = (green[idx] >> bit) & 1;
                let b = (blue[idx] >> bit) & 1;
                let entry = PaletteColor::from_code(b << 2 | g << 1 | r);
                frame.set_pixel(x, y, entry.into());
            }
        }
        frames.push(frame);
    }

    PixelDocument::from_frames(ColorMode::Indexed3Bit, frames, crate::DEFAULT_FRAME_DELAY_MS)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::PALETTE;

    fn checkerboard(size: Size, frame_count: usize) -> PixelDocument {
        let mut frames = Vec::new();
        for f in 0..frame_count {
            let mut frame = Frame::new(size, Color::default());
            for y in 0..size.height {
                for x in 0..size.width {
                    let entry = PALETTE[((x + y + f as i32) % 8) as usize];
                    frame.set_pixel(x, y, entry.into());
                }
            }
            frames.push(frame);
        }
        PixelDocument::from_frames(ColorMode::Indexed3Bit, frames, 250).unwrap()
    }

    #[test]
    fn test_single_red_pixel_1x8() {
        let mut doc = PixelDocument::new(ColorMode::Indexed3Bit, (1, 8), Color::default());
        doc.frames[0].set_pixel(0, 0, Color::new(255, 0, 0));
        let bytes = encode(&doc).unwrap();
        // One column byte per channel: red bit of row 0 lands in the MSB.
        assert_eq!(bytes, vec![0b1000_0000, 0, 0]);
    }

    #[test]
    fn test_payload_length_formula() {
        for frame_count in [1, 2, 5] {
            let doc = checkerboard(Size::new(16, 32), frame_count);
            let bytes = encode(&doc).unwrap();
            assert_eq!(bytes.len(), 3 * 16 * 32 / 8 * frame_count);
        }
    }

    #[test]
    fn test_round_trip() {
        for frame_count in [1, 2, 5] {
            let doc = checkerboard(Size::new(16, 32), frame_count);
            let bytes = encode(&doc).unwrap();
            let decoded = decode(&bytes, doc.size(), frame_count).unwrap();
            assert_eq!(decoded.frames, doc.frames);
            assert_eq!(decoded.color_mode, ColorMode::Indexed3Bit);
        }
    }

    #[test]
    fn test_channel_major_ordering() {
        // A single white column: every channel plane carries the same bits.
        let mut doc = PixelDocument::new(ColorMode::Indexed3Bit, (2, 8), Color::default());
        for y in 0..8 {
            doc.frames[0].set_pixel(0, y, PaletteColor::White.into());
        }
        let bytes = encode(&doc).unwrap();
        assert_eq!(bytes, vec![0xFF, 0, 0xFF, 0, 0xFF, 0]);
    }

    #[test]
    fn test_palette_closure() {
        let doc = checkerboard(Size::new(8, 16), 2);
        let bytes = encode(&doc).unwrap();
        let decoded = decode(&bytes, doc.size(), 2).unwrap();
        for frame in &decoded.frames {
            for y in 0..frame.get_height() {
                for x in 0..frame.get_width() {
                    assert!(PaletteColor::from_color(frame.get_pixel(x, y)).is_some());
                }
            }
        }
    }

    #[test]
    fn test_rejects_height_not_multiple_of_8() {
        let doc = PixelDocument::new(ColorMode::Indexed3Bit, (2, 2), Color::default());
        assert!(matches!(encode(&doc), Err(JtError::InvalidDimensions { .. })));
        assert!(matches!(decode(&[0; 6], Size::new(2, 2), 1), Err(JtError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let doc = checkerboard(Size::new(16, 32), 1);
        let mut bytes = encode(&doc).unwrap();
        bytes.pop();
        assert!(matches!(
            decode(&bytes, doc.size(), 1),
            Err(JtError::DecodeLength { expected: 192, actual: 191 })
        ));
    }

    #[test]
    fn test_rejects_rgb_document() {
        let doc = PixelDocument::new(ColorMode::Rgb24Bit, (8, 8), Color::default());
        assert!(matches!(encode(&doc), Err(JtError::ColorModeMismatch { .. })));
    }
}
