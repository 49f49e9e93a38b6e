use crate::{Color, Frame, JtError, PixelDocument, Position, Result};

use super::{EditState, UndoOperation};

fn frame_mut(edit_state: &mut EditState, index: usize) -> Result<&mut Frame> {
    let count = edit_state.document.frames.len();
    edit_state.document.frames.get_mut(index).ok_or(JtError::FrameOutOfRange { index, count })
}

pub(crate) struct UndoSetPixel {
    pub frame: usize,
    pub pos: Position,
    pub old: Color,
    pub new: Color,
}

impl UndoOperation for UndoSetPixel {
    fn get_description(&self) -> String {
        "Set pixel".to_string()
    }

    fn undo(&mut self, edit_state: &mut EditState) -> Result<()> {
        frame_mut(edit_state, self.frame)?.set_pixel(self.pos.x, self.pos.y, self.old);
        Ok(())
    }

    fn redo(&mut self, edit_state: &mut EditState) -> Result<()> {
        frame_mut(edit_state, self.frame)?.set_pixel(self.pos.x, self.pos.y, self.new);
        Ok(())
    }
}

/// Whole-frame snapshot, used by fill, paste and selection edits.
pub(crate) struct UndoUpdateFrame {
    pub description: String,
    pub frame: usize,
    pub old: Frame,
    pub new: Frame,
}

impl UndoOperation for UndoUpdateFrame {
    fn get_description(&self) -> String {
        self.description.clone()
    }

    fn undo(&mut self, edit_state: &mut EditState) -> Result<()> {
        *frame_mut(edit_state, self.frame)? = self.old.clone();
        Ok(())
    }

    fn redo(&mut self, edit_state: &mut EditState) -> Result<()> {
        *frame_mut(edit_state, self.frame)? = self.new.clone();
        Ok(())
    }
}

pub(crate) struct UndoAddFrame {
    pub index: usize,
    pub frame: Frame,
    pub old_current: usize,
}

impl UndoOperation for UndoAddFrame {
    fn get_description(&self) -> String {
        "Add frame".to_string()
    }

    fn undo(&mut self, edit_state: &mut EditState) -> Result<()> {
        let count = edit_state.document.frames.len();
        if self.index >= count {
            return Err(JtError::FrameOutOfRange { index: self.index, count });
        }
        edit_state.document.frames.remove(self.index);
        edit_state.current_frame = self.old_current;
        Ok(())
    }

    fn redo(&mut self, edit_state: &mut EditState) -> Result<()> {
        let count = edit_state.document.frames.len();
        if self.index > count {
            return Err(JtError::FrameOutOfRange { index: self.index, count });
        }
        edit_state.document.frames.insert(self.index, self.frame.clone());
        edit_state.current_frame = self.index;
        Ok(())
    }
}

pub(crate) struct UndoRemoveFrame {
    pub index: usize,
    pub frame: Frame,
    pub old_current: usize,
}

impl UndoOperation for UndoRemoveFrame {
    fn get_description(&self) -> String {
        "Remove frame".to_string()
    }

    fn undo(&mut self, edit_state: &mut EditState) -> Result<()> {
        let count = edit_state.document.frames.len();
        if self.index > count {
            return Err(JtError::FrameOutOfRange { index: self.index, count });
        }
        edit_state.document.frames.insert(self.index, self.frame.clone());
        edit_state.current_frame = self.old_current;
        Ok(())
    }

    fn redo(&mut self, edit_state: &mut EditState) -> Result<()> {
        let count = edit_state.document.frames.len();
        if self.index >= count {
            return Err(JtError::FrameOutOfRange { index: self.index, count });
        }
        edit_state.document.frames.remove(self.index);
        edit_state.current_frame = self.index.min(edit_state.document.frames.len() - 1);
        Ok(())
    }
}

pub(crate) struct UndoSetFrameDelay {
    pub old: u32,
    pub new: u32,
}

impl UndoOperation for UndoSetFrameDelay {
    fn get_description(&self) -> String {
        "Set frame delay".to_string()
    }

    fn changes_data(&self) -> bool {
        false
    }

    fn undo(&mut self, edit_state: &mut EditState) -> Result<()> {
        edit_state.document.frame_delay_ms = self.old;
        Ok(())
    }

    fn redo(&mut self, edit_state: &mut EditState) -> Result<()> {
        edit_state.document.frame_delay_ms = self.new;
        Ok(())
    }
}

/// Full document snapshot for operations that touch every frame, such
/// as canvas resizing or color mode conversion.
pub(crate) struct UndoReplaceDocument {
    pub description: String,
    pub old: PixelDocument,
    pub new: PixelDocument,
}

impl UndoOperation for UndoReplaceDocument {
    fn get_description(&self) -> String {
        self.description.clone()
    }

    fn undo(&mut self, edit_state: &mut EditState) -> Result<()> {
        edit_state.document = self.old.clone();
        edit_state.current_frame = edit_state.current_frame.min(edit_state.document.frames.len() - 1);
        Ok(())
    }

    fn redo(&mut self, edit_state: &mut EditState) -> Result<()> {
        edit_state.document = self.new.clone();
        edit_state.current_frame = edit_state.current_frame.min(edit_state.document.frames.len() - 1);
        Ok(())
    }
}
