//! Document editing with undo/redo.
//!
//! [`EditState`] owns the document being edited plus the current frame,
//! the selection and the undo stacks. Every mutation goes through an
//! [`UndoOperation`] so the full edit history can be walked in both
//! directions.

pub mod undo_stack;
pub use undo_stack::*;

mod undo_operations;
use undo_operations::{UndoAddFrame, UndoRemoveFrame, UndoReplaceDocument, UndoSetFrameDelay, UndoSetPixel, UndoUpdateFrame};

use crate::{Color, ColorMode, Frame, JtError, PixelDocument, Position, Rectangle, Result, ScalingAlgorithm, Selection, Size, scale_frame};

pub struct EditState {
    document: PixelDocument,
    current_frame: usize,
    selection_opt: Option<Selection>,

    /// Color used for cleared regions and new frames.
    pub background: Color,

    undo_stack: Vec<Box<dyn UndoOperation>>,
    redo_stack: Vec<Box<dyn UndoOperation>>,
    is_dirty: bool,
}

impl Default for EditState {
    fn default() -> Self {
        EditState::from_document(PixelDocument::new(ColorMode::Indexed3Bit, (64, 16), Color::default()))
    }
}

impl EditState {
    pub fn from_document(document: PixelDocument) -> Self {
        Self {
            document,
            current_frame: 0,
            selection_opt: None,
            background: Color::default(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            is_dirty: false,
        }
    }

    pub fn get_document(&self) -> &PixelDocument {
        &self.document
    }

    pub fn get_document_mut(&mut self) -> &mut PixelDocument {
        &mut self.document
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn set_is_dirty(&mut self, is_dirty: bool) {
        self.is_dirty = is_dirty;
    }

    pub fn get_current_frame(&self) -> usize {
        self.current_frame
    }

    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn set_current_frame(&mut self, index: usize) -> Result<()> {
        if index >= self.document.frames.len() {
            return Err(JtError::FrameOutOfRange {
                index,
                count: self.document.frames.len(),
            });
        }
        self.current_frame = index;
        Ok(())
    }

    pub fn undo_stack_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn get_selection(&self) -> Option<Selection> {
        self.selection_opt
    }

    pub fn set_selection(&mut self, selection: impl Into<Selection>) {
        self.selection_opt = Some(selection.into());
    }

    pub fn clear_selection(&mut self) {
        self.selection_opt = None;
    }

    pub fn is_something_selected(&self) -> bool {
        self.selection_opt.is_some_and(|sel| !sel.is_empty())
    }

    /// The selected rectangle, or the whole canvas without a selection.
    pub fn get_selected_rectangle(&self) -> Rectangle {
        match self.selection_opt {
            Some(sel) if !sel.is_empty() => sel.as_rectangle(),
            _ => Rectangle::new(Position::default(), self.document.size()),
        }
    }

    fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.document.get_width() && pos.y >= 0 && pos.y < self.document.get_height()
    }

    /// Set a pixel on the current frame. Positions outside the canvas
    /// are ignored, as are writes that would not change the pixel.
    ///
    /// # Errors
    ///
    /// Returns an error if the edit cannot be recorded.
    pub fn set_pixel(&mut self, pos: impl Into<Position>, color: Color) -> Result<()> {
        let pos = pos.into();
        if !self.in_bounds(pos) {
            return Ok(());
        }
        let old = self.document.frames[self.current_frame].get_pixel(pos.x, pos.y);
        if old == color {
            return Ok(());
        }
        let op = UndoSetPixel {
            frame: self.current_frame,
            pos,
            old,
            new: color,
        };
        self.push_undo_action(Box::new(op))
    }

    /// Fill the current frame with one color.
    ///
    /// # Errors
    ///
    /// Returns an error if the edit cannot be recorded.
    pub fn fill_frame(&mut self, color: Color) -> Result<()> {
        let old = self.document.frames[self.current_frame].clone();
        let mut new = old.clone();
        new.fill(color);
        self.push_frame_snapshot("Fill frame", old, new)
    }

    /// Reset the current frame to the background color.
    ///
    /// # Errors
    ///
    /// Returns an error if the edit cannot be recorded.
    pub fn clear_frame(&mut self) -> Result<()> {
        self.fill_frame(self.background)
    }

    /// Blit `frame` onto the current frame at `pos`, clipped to the
    /// canvas bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the edit cannot be recorded.
    pub fn paste_frame(&mut self, pos: impl Into<Position>, frame: &Frame) -> Result<()> {
        let old = self.document.frames[self.current_frame].clone();
        let mut new = old.clone();
        new.paste(pos.into(), frame);
        self.push_frame_snapshot("Paste", old, new)
    }

    /// Fill the selected region with the background color.
    ///
    /// # Errors
    ///
    /// Returns an error if the edit cannot be recorded.
    pub fn erase_selection(&mut self) -> Result<()> {
        let rect = self.get_selected_rectangle();
        let old = self.document.frames[self.current_frame].clone();
        let mut new = old.clone();
        new.paste(rect.start, &Frame::new(rect.size, self.background));
        self.push_frame_snapshot("Erase selection", old, new)
    }

    /// Move the selected region by `offset`, leaving background behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the edit cannot be recorded.
    pub fn move_selection(&mut self, offset: impl Into<Position>) -> Result<()> {
        let offset = offset.into();
        let rect = self.get_selected_rectangle();
        let old = self.document.frames[self.current_frame].clone();
        let cut = old.copy_rect(rect);
        let mut new = old.clone();
        new.paste(rect.start, &Frame::new(rect.size, self.background));
        new.paste(rect.start + offset, &cut);
        self.push_frame_snapshot("Move selection", old, new)?;
        if let Some(sel) = &mut self.selection_opt {
            sel.anchor += offset;
            sel.lead += offset;
        }
        Ok(())
    }

    /// Append a background-filled frame and make it current.
    ///
    /// # Errors
    ///
    /// Returns an error if the edit cannot be recorded.
    pub fn add_frame(&mut self) -> Result<()> {
        let op = UndoAddFrame {
            index: self.document.frames.len(),
            frame: Frame::new(self.document.size(), self.background),
            old_current: self.current_frame,
        };
        self.push_undo_action(Box::new(op))
    }

    /// Insert a copy of the current frame right after it and make the
    /// copy current.
    ///
    /// # Errors
    ///
    /// Returns an error if the edit cannot be recorded.
    pub fn duplicate_frame(&mut self) -> Result<()> {
        let op = UndoAddFrame {
            index: self.current_frame + 1,
            frame: self.document.frames[self.current_frame].clone(),
            old_current: self.current_frame,
        };
        self.push_undo_action(Box::new(op))
    }

    /// Remove the frame at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`JtError::LastFrame`] when only one frame remains, or
    /// [`JtError::FrameOutOfRange`] for a bad index.
    pub fn remove_frame(&mut self, index: usize) -> Result<()> {
        let count = self.document.frames.len();
        if index >= count {
            return Err(JtError::FrameOutOfRange { index, count });
        }
        if count == 1 {
            return Err(JtError::LastFrame);
        }
        let op = UndoRemoveFrame {
            index,
            frame: self.document.frames[index].clone(),
            old_current: self.current_frame,
        };
        self.push_undo_action(Box::new(op))
    }

    /// Remove the current frame.
    ///
    /// # Errors
    ///
    /// Returns [`JtError::LastFrame`] when only one frame remains.
    pub fn remove_current_frame(&mut self) -> Result<()> {
        self.remove_frame(self.current_frame)
    }

    /// Change the animation delay between frames.
    ///
    /// # Errors
    ///
    /// Returns an error if the edit cannot be recorded.
    pub fn set_frame_delay(&mut self, delay_ms: u32) -> Result<()> {
        if delay_ms == self.document.frame_delay_ms {
            return Ok(());
        }
        let op = UndoSetFrameDelay {
            old: self.document.frame_delay_ms,
            new: delay_ms,
        };
        self.push_undo_action(Box::new(op))
    }

    /// Switch between indexed and 24-bit mode, converting every frame.
    /// Switching to indexed quantizes the content and is lossy.
    ///
    /// # Errors
    ///
    /// Returns an error if the edit cannot be recorded.
    pub fn set_color_mode(&mut self, color_mode: ColorMode) -> Result<()> {
        if color_mode == self.document.color_mode {
            return Ok(());
        }
        let new = match color_mode {
            ColorMode::Indexed3Bit => self.document.to_indexed(),
            ColorMode::Rgb24Bit => self.document.to_rgb(),
        };
        let op = UndoReplaceDocument {
            description: format!("Convert to {color_mode}"),
            old: self.document.clone(),
            new,
        };
        self.push_undo_action(Box::new(op))
    }

    /// Resize the canvas, resampling every frame with `algorithm`.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive dimensions or if the edit
    /// cannot be recorded.
    pub fn resize_canvas(&mut self, size: impl Into<Size>, algorithm: ScalingAlgorithm) -> Result<()> {
        let size = size.into();
        if size.width <= 0 || size.height <= 0 {
            return Err(JtError::invalid_dimensions(size, "width and height must be positive"));
        }
        if size == self.document.size() {
            return Ok(());
        }
        let mut new = self.document.clone();
        let frames = new
            .frames
            .iter()
            .map(|frame| scale_frame(frame, size, algorithm, new.color_mode))
            .collect();
        new.replace_content(frames)?;
        let op = UndoReplaceDocument {
            description: format!("Resize to {size}"),
            old: self.document.clone(),
            new,
        };
        self.clear_selection();
        self.push_undo_action(Box::new(op))
    }

    fn push_frame_snapshot(&mut self, description: &str, old: Frame, new: Frame) -> Result<()> {
        let op = UndoUpdateFrame {
            description: description.to_string(),
            frame: self.current_frame,
            old,
            new,
        };
        self.push_undo_action(Box::new(op))
    }

    fn push_undo_action(&mut self, mut op: Box<dyn UndoOperation>) -> Result<()> {
        op.redo(self)?;
        if op.changes_data() {
            self.is_dirty = true;
        }
        self.undo_stack.push(op);
        self.redo_stack.clear();
        Ok(())
    }
}

impl UndoState for EditState {
    fn undo_description(&self) -> Option<String> {
        self.undo_stack.last().map(|op| op.get_description())
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn undo(&mut self) -> Result<()> {
        let Some(mut op) = self.undo_stack.pop() else {
            return Ok(());
        };
        if op.changes_data() {
            self.is_dirty = true;
        }
        let res = op.undo(self);
        self.redo_stack.push(op);
        res
    }

    fn redo_description(&self) -> Option<String> {
        self.redo_stack.last().map(|op| op.get_description())
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn redo(&mut self) -> Result<()> {
        if let Some(mut op) = self.redo_stack.pop() {
            if op.changes_data() {
                self.is_dirty = true;
            }
            let res = op.redo(self);
            self.undo_stack.push(op);
            return res;
        }
        Ok(())
    }
}
