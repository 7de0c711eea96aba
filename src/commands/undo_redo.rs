use super::{CommandError, CommandOutcome, CommandResult, UndoableCommand};
use crate::manager::ModelManager;

pub const MESSAGE_UNDO_SUCCESS: &str = "Undo success!";
pub const MESSAGE_UNDO_FAILURE: &str = "No more commands to undo!";
pub const MESSAGE_REDO_SUCCESS: &str = "Redo success!";
pub const MESSAGE_REDO_FAILURE: &str = "No more commands to redo!";

/// History of executed undoable commands.
///
/// Pushing a new command discards everything that could have been redone.
#[derive(Debug, Default)]
pub struct UndoRedoStack {
    undo_stack: Vec<UndoableCommand>,
    redo_stack: Vec<UndoableCommand>,
}

impl UndoRedoStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: UndoableCommand) {
        self.redo_stack.clear();
        self.undo_stack.push(command);
    }

    /// Moves the most recent command onto the redo stack and returns it.
    pub fn pop_undo(&mut self) -> Option<&mut UndoableCommand> {
        let command = self.undo_stack.pop()?;
        self.redo_stack.push(command);
        self.redo_stack.last_mut()
    }

    /// Moves the most recently undone command back onto the undo stack.
    pub fn pop_redo(&mut self) -> Option<&mut UndoableCommand> {
        let command = self.redo_stack.pop()?;
        self.undo_stack.push(command);
        self.undo_stack.last_mut()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

pub fn undo(stack: &mut UndoRedoStack, model: &mut ModelManager) -> CommandOutcome {
    let command = stack
        .pop_undo()
        .ok_or_else(|| CommandError::failed(MESSAGE_UNDO_FAILURE))?;
    command.undo(model)?;
    Ok(CommandResult::new(MESSAGE_UNDO_SUCCESS))
}

pub fn redo(stack: &mut UndoRedoStack, model: &mut ModelManager) -> CommandOutcome {
    let command = stack
        .pop_redo()
        .ok_or_else(|| CommandError::failed(MESSAGE_REDO_FAILURE))?;
    command.redo(model)?;
    Ok(CommandResult::new(MESSAGE_REDO_SUCCESS))
}
