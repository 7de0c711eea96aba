//! Typed commands and the execute / undo / redo protocol.
//!
//! An [`UndoableCommand`] wraps one [`UndoableAction`]. Executing it records a
//! snapshot of the address book, lets the action resolve its targets against
//! the current model (`preprocess`) and then performs the mutation (`apply`).
//! Undo restores the snapshot; redo runs `apply` again on the restored state.

pub mod group_commands;
pub mod history;
pub mod person_commands;
pub mod todo_commands;
pub mod undo_redo;

use std::fmt;
use thiserror::Error;

use crate::error::BookError;
use crate::manager::ModelManager;
use crate::store::BookData;

pub use group_commands::{AddGroup, ChangeGroupColor, DeleteGroup};
pub use history::CommandHistory;
pub use person_commands::{AddPerson, ClearBook, DeletePerson, EditPerson, EditPersonDescriptor};
pub use todo_commands::{AddToDo, DeleteToDo};
pub use undo_redo::UndoRedoStack;

pub const MESSAGE_INVALID_PERSON_DISPLAYED_INDEX: &str = "The person index provided is invalid";
pub const MESSAGE_PERSONS_LISTED_OVERVIEW: &str = "persons listed!";

/// Feedback shown to the user after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
    pub exit: bool,
    /// The person view may have changed and should be shown again.
    pub show_persons: bool,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            exit: false,
            show_persons: false,
        }
    }

    pub fn exit(feedback: impl Into<String>) -> Self {
        Self {
            exit: true,
            ..Self::new(feedback)
        }
    }

    pub fn showing_persons(self) -> Self {
        Self {
            show_persons: true,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Recoverable; the message is shown to the user as is.
    #[error("{0}")]
    Failed(String),

    /// A broken invariant. The model can no longer be trusted.
    #[error("Internal error: {0}")]
    Fatal(String),
}

impl CommandError {
    pub fn failed(message: impl Into<String>) -> Self {
        CommandError::Failed(message.into())
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        CommandError::Fatal(message.into())
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, CommandError::Fatal(_))
    }
}

impl From<BookError> for CommandError {
    fn from(e: BookError) -> Self {
        if e.is_fatal() {
            CommandError::Fatal(e.to_string())
        } else {
            CommandError::Failed(e.to_string())
        }
    }
}

pub type CommandOutcome = Result<CommandResult, CommandError>;

/// One-based position in a displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index(usize);

impl Index {
    pub fn from_one_based(n: usize) -> Option<Self> {
        n.checked_sub(1).map(Index)
    }

    pub fn from_zero_based(n: usize) -> Self {
        Index(n)
    }

    pub fn zero_based(self) -> usize {
        self.0
    }

    pub fn one_based(self) -> usize {
        self.0 + 1
    }
}

/// The forward half of an undoable command.
pub trait UndoableAction: fmt::Debug {
    /// Resolves the concrete entities the action will touch. Runs once,
    /// before the first `apply`.
    fn preprocess(&mut self, _model: &ModelManager) -> Result<(), CommandError> {
        Ok(())
    }

    /// Performs the mutation. Must be repeatable on the state captured
    /// before the first run.
    fn apply(&mut self, model: &mut ModelManager) -> CommandOutcome;
}

#[derive(Debug)]
enum State {
    Unexecuted,
    Executed { snapshot: BookData },
}

/// A command that can be undone and redone. Moves from unexecuted to
/// executed exactly once.
#[derive(Debug)]
pub struct UndoableCommand {
    action: Box<dyn UndoableAction>,
    state: State,
}

impl UndoableCommand {
    pub fn new(action: impl UndoableAction + 'static) -> Self {
        Self {
            action: Box::new(action),
            state: State::Unexecuted,
        }
    }

    pub fn is_executed(&self) -> bool {
        matches!(self.state, State::Executed { .. })
    }

    pub fn action(&self) -> &dyn UndoableAction {
        self.action.as_ref()
    }

    pub fn execute(&mut self, model: &mut ModelManager) -> CommandOutcome {
        if self.is_executed() {
            return Err(CommandError::fatal("command has already been executed"));
        }
        let snapshot = model.address_book().to_data();
        self.action.preprocess(model)?;
        let result = self.action.apply(model)?;
        self.state = State::Executed { snapshot };
        Ok(result)
    }

    /// Restores the address book captured before execution.
    pub fn undo(&self, model: &mut ModelManager) -> Result<(), CommandError> {
        let State::Executed { snapshot } = &self.state else {
            return Err(CommandError::fatal("cannot undo a command that never executed"));
        };
        model
            .reset_data(snapshot)
            .map_err(|e| CommandError::fatal(format!("undo could not restore state: {}", e)))?;
        model.show_all_persons();
        Ok(())
    }

    /// Re-applies the forward mutation after an undo.
    pub fn redo(&mut self, model: &mut ModelManager) -> Result<(), CommandError> {
        if !self.is_executed() {
            return Err(CommandError::fatal("cannot redo a command that never executed"));
        }
        self.action.apply(model).map_err(|e| {
            CommandError::fatal(format!(
                "command succeeded before and must not fail on redo: {}",
                e
            ))
        })?;
        model.show_all_persons();
        Ok(())
    }
}

/// A parsed command, ready to run.
#[derive(Debug)]
pub enum Command {
    Undoable(UndoableCommand),
    List,
    Find(Vec<String>),
    ListGroups,
    ListToDos,
    History,
    Undo,
    Redo,
    Help,
    Exit,
}

impl Command {
    pub fn undoable(action: impl UndoableAction + 'static) -> Self {
        Command::Undoable(UndoableCommand::new(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ToDo;

    #[test]
    fn index_conversions() {
        assert!(Index::from_one_based(0).is_none());
        let idx = Index::from_one_based(3).unwrap();
        assert_eq!(idx.zero_based(), 2);
        assert_eq!(idx.one_based(), 3);
    }

    #[test]
    fn execute_twice_is_fatal() {
        let mut model = ModelManager::default();
        let mut cmd = UndoableCommand::new(AddToDo::new(ToDo::create("buy milk").unwrap()));
        cmd.execute(&mut model).unwrap();
        let err = cmd.execute(&mut model).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn undo_before_execute_is_fatal() {
        let mut model = ModelManager::default();
        let cmd = UndoableCommand::new(AddToDo::new(ToDo::create("buy milk").unwrap()));
        assert!(cmd.undo(&mut model).unwrap_err().is_fatal());
    }

    #[test]
    fn failed_execute_stays_unexecuted() {
        let mut model = ModelManager::default();
        model.add_todo(ToDo::create("buy milk").unwrap()).unwrap();
        let mut cmd = UndoableCommand::new(AddToDo::new(ToDo::create("buy milk").unwrap()));
        let err = cmd.execute(&mut model).unwrap_err();
        assert!(!err.is_fatal());
        assert!(!cmd.is_executed());
    }

    #[test]
    fn book_errors_keep_their_kind() {
        let user: CommandError = BookError::not_found("Person", "Amy").into();
        assert_eq!(user, CommandError::Failed("Person not found: Amy".into()));
        let fatal: CommandError = BookError::Invariant("broken".into()).into();
        assert!(fatal.is_fatal());
    }
}
