use serde::{Deserialize, Serialize};

use crate::{Color, JtError, PaletteColor, Position, Rectangle, Result, Size, quantize};

/// Color representation of a document; selects which payload codec applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorMode {
    /// 8 fixed palette colors, stored on the wire as bit planes (Type 1).
    #[default]
    Indexed3Bit,
    /// Full 0-255 RGB triples (Type 2).
    Rgb24Bit,
}

impl ColorMode {
    /// The `graffitiType`/`aniType` tag recorded in JT files.
    pub const fn type_tag(self) -> u8 {
        match self {
            ColorMode::Indexed3Bit => 1,
            ColorMode::Rgb24Bit => 2,
        }
    }

    pub const fn from_type_tag(tag: u8) -> Option<ColorMode> {
        match tag {
            1 => Some(ColorMode::Indexed3Bit),
            2 => Some(ColorMode::Rgb24Bit),
            _ => None,
        }
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorMode::Indexed3Bit => write!(f, "indexed 3-bit"),
            ColorMode::Rgb24Bit => write!(f, "24-bit RGB"),
        }
    }
}

/// A single `height x width` grid of colors, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    size: Size,
    data: Vec<Color>,
}

impl Frame {
    pub fn new(size: impl Into<Size>, fill: Color) -> Self {
        let size = size.into();
        Frame {
            size,
            data: vec![fill; size.pixels()],
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn get_width(&self) -> i32 {
        self.size.width
    }

    pub fn get_height(&self) -> i32 {
        self.size.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(x >= 0 && x < self.size.width && y >= 0 && y < self.size.height);
        y as usize * self.size.width as usize + x as usize
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Color {
        self.data[self.index(x, y)]
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        let idx = self.index(x, y);
        self.data[idx] = color;
    }

    /// Pixel lookup clamped to the frame bounds.
    pub fn get_pixel_clamped(&self, x: i32, y: i32) -> Color {
        self.get_pixel(x.clamp(0, self.size.width - 1), y.clamp(0, self.size.height - 1))
    }

    pub fn fill(&mut self, color: Color) {
        self.data.fill(color);
    }

    /// Copy the pixels inside `rect` (clipped to the frame) into a new frame.
    pub fn copy_rect(&self, rect: Rectangle) -> Frame {
        let mut result = Frame::new(rect.size, Color::default());
        for y in 0..rect.size.height {
            for x in 0..rect.size.width {
                let src = Position::new(rect.start.x + x, rect.start.y + y);
                if src.x >= 0 && src.x < self.size.width && src.y >= 0 && src.y < self.size.height {
                    result.set_pixel(x, y, self.get_pixel(src.x, src.y));
                }
            }
        }
        result
    }

    /// Blit `other` at `pos`, clipping to the frame bounds.
    pub fn paste(&mut self, pos: Position, other: &Frame) {
        for y in 0..other.size.height {
            for x in 0..other.size.width {
                let dest = Position::new(pos.x + x, pos.y + y);
                if dest.x >= 0 && dest.x < self.size.width && dest.y >= 0 && dest.y < self.size.height {
                    self.set_pixel(dest.x, dest.y, other.get_pixel(x, y));
                }
            }
        }
    }
}

/// The in-memory pixel document: ordered frames of a 2-D color grid plus
/// mode, dimension and timing metadata.
///
/// A static document has exactly one frame; animations carry an
/// inter-frame delay in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelDocument {
    pub color_mode: ColorMode,
    size: Size,
    pub frames: Vec<Frame>,
    pub frame_delay_ms: u32,
}

/// Default inter-frame delay the original editor writes into new animations.
pub const DEFAULT_FRAME_DELAY_MS: u32 = 250;

impl PixelDocument {
    /// Create a single-frame document filled with `background`.
    pub fn new(color_mode: ColorMode, size: impl Into<Size>, background: Color) -> Self {
        let size = size.into();
        PixelDocument {
            color_mode,
            size,
            frames: vec![Frame::new(size, background)],
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
        }
    }

    /// Build a document from existing frames.
    ///
    /// # Errors
    ///
    /// Returns an error if `frames` is empty or the frames disagree in size.
    pub fn from_frames(color_mode: ColorMode, frames: Vec<Frame>, frame_delay_ms: u32) -> Result<Self> {
        let Some(first) = frames.first() else {
            return Err(JtError::NoFrames);
        };
        let size = first.size();
        for (index, frame) in frames.iter().enumerate() {
            if frame.size() != size {
                return Err(JtError::FrameSizeMismatch {
                    index,
                    actual: frame.size().to_string(),
                    expected: size.to_string(),
                });
            }
        }
        Ok(PixelDocument {
            color_mode,
            size,
            frames,
            frame_delay_ms,
        })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn get_width(&self) -> i32 {
        self.size.width
    }

    pub fn get_height(&self) -> i32 {
        self.size.height
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_animation(&self) -> bool {
        self.frames.len() > 1
    }

    /// Validate the document invariants the codecs rely on: positive
    /// dimensions, at least one frame, uniform frame sizes, and (for
    /// indexed documents) height divisible by 8 and palette-only cells.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn check_invariants(&self) -> Result<()> {
        if self.size.width <= 0 || self.size.height <= 0 {
            return Err(JtError::invalid_dimensions(self.size, "width and height must be positive"));
        }
        if self.frames.is_empty() {
            return Err(JtError::NoFrames);
        }
        for (index, frame) in self.frames.iter().enumerate() {
            if frame.size() != self.size {
                return Err(JtError::FrameSizeMismatch {
                    index,
                    actual: frame.size().to_string(),
                    expected: self.size.to_string(),
                });
            }
        }
        if self.color_mode == ColorMode::Indexed3Bit {
            if self.size.height % 8 != 0 {
                return Err(JtError::invalid_dimensions(self.size, "indexed 3-bit height must be a multiple of 8"));
            }
            for frame in &self.frames {
                for y in 0..self.size.height {
                    for x in 0..self.size.width {
                        let color = frame.get_pixel(x, y);
                        if PaletteColor::from_color(color).is_none() {
                            return Err(JtError::NonPaletteColor {
                                color: color.to_string(),
                                position: Position::new(x, y).to_string(),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Replace every frame at once, adopting the new frames' size.
    /// Used by whole-canvas operations such as resizing.
    ///
    /// # Errors
    ///
    /// Returns an error if `frames` is empty or the frames disagree in size.
    pub fn replace_content(&mut self, frames: Vec<Frame>) -> Result<()> {
        let Some(first) = frames.first() else {
            return Err(JtError::NoFrames);
        };
        let size = first.size();
        for (index, frame) in frames.iter().enumerate() {
            if frame.size() != size {
                return Err(JtError::FrameSizeMismatch {
                    index,
                    actual: frame.size().to_string(),
                    expected: size.to_string(),
                });
            }
        }
        self.size = size;
        self.frames = frames;
        Ok(())
    }

    /// Convert to indexed mode, quantizing every cell to the palette.
    pub fn to_indexed(&self) -> PixelDocument {
        let mut result = self.clone();
        result.color_mode = ColorMode::Indexed3Bit;
        for frame in &mut result.frames {
            for y in 0..frame.get_height() {
                for x in 0..frame.get_width() {
                    frame.set_pixel(x, y, quantize(frame.get_pixel(x, y)).into());
                }
            }
        }
        result
    }

    /// Convert to 24-bit mode. Palette entries are already valid RGB
    /// triples, so this is lossless.
    pub fn to_rgb(&self) -> PixelDocument {
        let mut result = self.clone();
        result.color_mode = ColorMode::Rgb24Bit;
        result
    }
}
