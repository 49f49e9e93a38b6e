use crate::Result;

use super::EditState;

pub trait UndoState {
    fn undo_description(&self) -> Option<String>;
    fn can_undo(&self) -> bool;

    /// # Errors
    ///
    /// Returns an error if the recorded operation can no longer be
    /// reverted against the current document.
    fn undo(&mut self) -> Result<()>;

    fn redo_description(&self) -> Option<String>;
    fn can_redo(&self) -> bool;

    /// # Errors
    ///
    /// Returns an error if the recorded operation can no longer be
    /// applied to the current document.
    fn redo(&mut self) -> Result<()>;
}

pub trait UndoOperation: Send + Sync {
    fn get_description(&self) -> String;

    /// # Errors
    ///
    /// Returns an error if the recorded operation can no longer be
    /// reverted against the current document.
    fn undo(&mut self, edit_state: &mut EditState) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the recorded operation can no longer be
    /// applied to the current document.
    fn redo(&mut self, edit_state: &mut EditState) -> Result<()>;

    fn changes_data(&self) -> bool {
        true
    }
}
