use super::{CommandError, CommandOutcome, CommandResult, Index, UndoableAction};
use crate::error::BookError;
use crate::manager::ModelManager;
use crate::model::ToDo;

pub const MESSAGE_DUPLICATE_TODO: &str = "This to-do already exists in the address book";
pub const MESSAGE_INVALID_TODO_INDEX: &str = "The to-do index provided is invalid";

#[derive(Debug)]
pub struct AddToDo {
    todo: ToDo,
}

impl AddToDo {
    pub fn new(todo: ToDo) -> Self {
        Self { todo }
    }
}

impl UndoableAction for AddToDo {
    fn apply(&mut self, model: &mut ModelManager) -> CommandOutcome {
        match model.add_todo(self.todo.clone()) {
            Ok(()) => Ok(CommandResult::new(format!("New to-do added: {}", self.todo))),
            Err(BookError::AlreadyExists { .. }) => Err(CommandError::failed(MESSAGE_DUPLICATE_TODO)),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug)]
pub struct DeleteToDo {
    index: Index,
    target: Option<ToDo>,
}

impl DeleteToDo {
    pub fn new(index: Index) -> Self {
        Self {
            index,
            target: None,
        }
    }
}

impl UndoableAction for DeleteToDo {
    fn preprocess(&mut self, model: &ModelManager) -> Result<(), CommandError> {
        let todo = model
            .address_book()
            .todos()
            .get(self.index.zero_based())
            .cloned()
            .ok_or_else(|| CommandError::failed(MESSAGE_INVALID_TODO_INDEX))?;
        self.target = Some(todo);
        Ok(())
    }

    fn apply(&mut self, model: &mut ModelManager) -> CommandOutcome {
        let target = self
            .target
            .as_ref()
            .ok_or_else(|| CommandError::fatal("to-do to delete was not resolved"))?;
        match model.remove_todo(target) {
            Ok(()) => Ok(CommandResult::new(format!("Deleted to-do: {}", target))),
            Err(BookError::NotFound { .. }) => Err(CommandError::fatal("the target to-do cannot be missing")),
            Err(e) => Err(e.into()),
        }
    }
}
