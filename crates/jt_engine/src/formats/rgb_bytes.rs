//! Type 2 payload codec: 24-bit RGB byte triplets.
//!
//! Frames are emitted in document order; the traversal inside a frame
//! depends on the panel layout, which is a pure function of the panel
//! dimensions. Every frame contributes `width * height * 3` bytes.

use crate::{Color, ColorMode, Frame, JtError, PixelDocument, Result, Size};

/// Spatial traversal order of a Type 2 frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelLayout {
    /// Rows outer, columns inner. Used by every panel shape without a
    /// special case.
    RowMajor,
    /// The frame is split into left and right halves; each half is
    /// serialized column by column, left half first. Used by the 24-row
    /// 48/64-column panels, which are wired as two side-by-side blocks.
    DualBlockColumnMajor,
}

impl PanelLayout {
    /// Resolve the layout for a panel size. The two rules are mutually
    /// exclusive, every size maps to exactly one layout.
    pub fn for_size(size: Size) -> PanelLayout {
        if size.height == 24 && (size.width == 48 || size.width == 64) {
            PanelLayout::DualBlockColumnMajor
        } else {
            PanelLayout::RowMajor
        }
    }
}

/// Payload size in bytes for the given geometry.
pub fn payload_len(size: Size, frame_count: usize) -> usize {
    size.pixels() * 3 * frame_count
}

/// Encode a 24-bit document into a Type 2 payload.
///
/// # Errors
///
/// Fails when the document is not in 24-bit mode or has inconsistent
/// frame sizes.
pub fn encode(doc: &PixelDocument) -> Result<Vec<u8>> {
    if doc.color_mode != ColorMode::Rgb24Bit {
        return Err(JtError::ColorModeMismatch { expected: "24-bit RGB" });
    }
    doc.check_invariants()?;

    let layout = PanelLayout::for_size(doc.size());
    let mut result = Vec::with_capacity(payload_len(doc.size(), doc.frame_count()));
    for frame in &doc.frames {
        match layout {
            PanelLayout::RowMajor => encode_row_major(frame, &mut result),
            PanelLayout::DualBlockColumnMajor => encode_dual_block(frame, &mut result),
        }
    }
    Ok(result)
}

/// Decode a Type 2 payload back into a 24-bit document.
///
/// # Errors
///
/// Fails when the geometry is invalid or `data` does not have exactly
/// `width * height * 3 * frame_count` bytes.
pub fn decode(data: &[u8], size: Size, frame_count: usize) -> Result<PixelDocument> {
    if size.width <= 0 || size.height <= 0 {
        return Err(JtError::invalid_dimensions(size, "width and height must be positive"));
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

    let layout = PanelLayout::for_size(size);
    let frame_len = size.pixels() * 3;
    let mut frames = Vec::with_capacity(frame_count);
    for f in 0..frame_count {
        let slice = &data[f * frame_len..(f + 1) * frame_len];
        let frame = match layout {
            PanelLayout::RowMajor => decode_row_major(slice, size),
            PanelLayout::DualBlockColumnMajor => decode_dual_block(slice, size),
        };
        frames.push(frame);
    }

    PixelDocument::from_frames(ColorMode::Rgb24Bit, frames, crate::DEFAULT_FRAME_DELAY_MS)
}

fn encode_row_major(frame: &Frame, out: &mut Vec<u8>) {
    for y in 0..frame.get_height() {
        for x in 0..frame.get_width() {
            let (r, g, b) = frame.get_pixel(x, y).get_rgb();
            out.extend([r, g, b]);
        }
    }
}

fn encode_dual_block(frame: &Frame, out: &mut Vec<u8>) {
    let half = frame.get_width() / 2;
    for (x0, x1) in [(0, half), (half, frame.get_width())] {
        for x in x0..x1 {
            for y in 0..frame.get_height() {
                let (r, g, b) = frame.get_pixel(x, y).get_rgb();
                out.extend([r, g, b]);
            }
        }
    }
}

fn decode_row_major(data: &[u8], size: Size) -> Frame {
    let mut frame = Frame::new(size, Color::default());
    let mut o = 0;
    for y in 0..size.height {
        for x in 0..size.width {
            frame.set_pixel(x, y, Color::new(data[o], data[o + 1], data[o + 2]));
            o += 3;
        }
    }
    frame
}

fn decode_dual_block(data: &[u8], size: Size) -> Frame {
    let mut frame = Frame::new(size, Color::default());
    let half = size.width / 2;
    let mut o = 0;
    for (x0, x1) in [(0, half), (half, size.width)] {
        for x in x0..x1 {
            for y in 0..size.height {
                frame.set_pixel(x, y, Color::new(data[o], data[o + 1], data[o + 2]));
                o += 3;
            }
        }
    }
    frame
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn gradient(size: Size, frame_count: usize) -> PixelDocument {
        let mut frames = Vec::new();
        for f in 0..frame_count {
            let mut frame = Frame::new(size, Color::default());
            for y in 0..size.height {
                for x in 0..size.width {
                    frame.set_pixel(x, y, Color::new((x * 3 + f as i32) as u8, (y * 5) as u8, (x + y) as u8));
                }
            }
            frames.push(frame);
        }
        PixelDocument::from_frames(ColorMode::Rgb24Bit, frames, 250).unwrap()
    }

    #[test]
    fn test_layout_dispatch() {
        assert_eq!(PanelLayout::for_size(Size::new(48, 24)), PanelLayout::DualBlockColumnMajor);
        assert_eq!(PanelLayout::for_size(Size::new(64, 24)), PanelLayout::DualBlockColumnMajor);
        for (width, height) in [(32, 16), (64, 16), (96, 16), (128, 32), (48, 23), (50, 24)] {
            assert_eq!(PanelLayout::for_size(Size::new(width, height)), PanelLayout::RowMajor, "{width}x{height}");
        }
    }

    #[test]
    fn test_dual_block_offsets() {
        let mut doc = PixelDocument::new(ColorMode::Rgb24Bit, (48, 24), Color::default());
        doc.frames[0].set_pixel(0, 0, Color::new(1, 2, 3));
        doc.frames[0].set_pixel(24, 0, Color::new(4, 5, 6));
        let bytes = encode(&doc).unwrap();
        // (0, 0) starts the left block, (24, 0) starts the right block.
        assert_eq!(&bytes[0..3], &[1, 2, 3]);
        let right = 24 * 24 * 3;
        assert_eq!(&bytes[right..right + 3], &[4, 5, 6]);
    }

    #[test]
    fn test_row_major_offsets() {
        let mut doc = PixelDocument::new(ColorMode::Rgb24Bit, (32, 16), Color::default());
        doc.frames[0].set_pixel(5, 2, Color::new(9, 8, 7));
        let bytes = encode(&doc).unwrap();
        let offset = (2 * 32 + 5) * 3;
        assert_eq!(&bytes[offset..offset + 3], &[9, 8, 7]);
    }

    #[test]
    fn test_round_trip_both_layouts() {
        for size in [Size::new(32, 16), Size::new(48, 24), Size::new(64, 24)] {
            for frame_count in [1, 2, 5] {
                let doc = gradient(size, frame_count);
                let bytes = encode(&doc).unwrap();
                assert_eq!(bytes.len(), size.pixels() * 3 * frame_count);
                let decoded = decode(&bytes, size, frame_count).unwrap();
                assert_eq!(decoded.frames, doc.frames, "{size} x{frame_count}");
            }
        }
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let doc = gradient(Size::new(48, 24), 2);
        let mut bytes = encode(&doc).unwrap();
        bytes.push(0);
        assert!(matches!(decode(&bytes, doc.size(), 2), Err(JtError::DecodeLength { .. })));
    }

    #[test]
    fn test_rejects_indexed_document() {
        let doc = PixelDocument::new(ColorMode::Indexed3Bit, (8, 8), Color::default());
        assert!(matches!(encode(&doc), Err(JtError::ColorModeMismatch { .. })));
    }
}
