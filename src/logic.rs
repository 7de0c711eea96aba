use log::{error, info};

use crate::commands::{
    undo_redo, Command, CommandError, CommandHistory, CommandOutcome, CommandResult, UndoRedoStack,
    MESSAGE_PERSONS_LISTED_OVERVIEW,
};
use crate::manager::{name_contains_keywords, ModelManager};
use crate::parser::{self, HELP_TEXT};

pub const MESSAGE_LIST_SUCCESS: &str = "Listed all persons";
pub const MESSAGE_EXIT: &str = "Exiting address book as requested ...";

/// Runs user input against the model and keeps the undo history.
#[derive(Debug)]
pub struct Logic {
    model: ModelManager,
    history: CommandHistory,
    undo_redo: UndoRedoStack,
    book_changed: bool,
}

impl Logic {
    pub fn new(model: ModelManager) -> Self {
        Self {
            model,
            history: CommandHistory::new(),
            undo_redo: UndoRedoStack::new(),
            book_changed: false,
        }
    }

    pub fn model(&self) -> &ModelManager {
        &self.model
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn undo_redo(&self) -> &UndoRedoStack {
        &self.undo_redo
    }

    /// Whether the address book changed since the last call. Callers persist
    /// the book when this returns true.
    pub fn take_book_changed(&mut self) -> bool {
        std::mem::take(&mut self.book_changed)
    }

    /// Parses and runs one line of input. The line is recorded in the
    /// history whether or not it succeeds.
    pub fn execute(&mut self, input: &str) -> CommandOutcome {
        info!("----------------[USER COMMAND][{}]", input);
        let outcome = match parser::parse_command(input) {
            Ok(command) => self.run(command),
            Err(e) => Err(CommandError::failed(e.to_string())),
        };
        self.history.add(input);
        if let Err(e) = &outcome {
            if e.is_fatal() {
                error!("Fatal error while running '{}': {}", input, e);
            } else {
                info!("Command failed: {}", e);
            }
        }
        outcome
    }

    /// Runs an already parsed command.
    pub fn run(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::Undoable(mut undoable) => {
                let result = undoable.execute(&mut self.model)?;
                self.undo_redo.push(undoable);
                self.book_changed = true;
                Ok(result.showing_persons())
            }
            Command::Undo => {
                let result = undo_redo::undo(&mut self.undo_redo, &mut self.model)?;
                self.book_changed = true;
                Ok(result.showing_persons())
            }
            Command::Redo => {
                let result = undo_redo::redo(&mut self.undo_redo, &mut self.model)?;
                self.book_changed = true;
                Ok(result.showing_persons())
            }
            Command::List => {
                self.model.show_all_persons();
                Ok(CommandResult::new(MESSAGE_LIST_SUCCESS).showing_persons())
            }
            Command::Find(keywords) => {
                self.model
                    .update_filtered_person_list(name_contains_keywords(keywords));
                let count = self.model.filtered_persons().len();
                Ok(CommandResult::new(format!(
                    "{} {}",
                    count, MESSAGE_PERSONS_LISTED_OVERVIEW
                ))
                .showing_persons())
            }
            Command::ListGroups => {
                let groups = self.model.address_book().groups();
                if groups.is_empty() {
                    return Ok(CommandResult::new("No groups yet."));
                }
                let lines: Vec<String> = groups
                    .iter()
                    .map(|g| format!("  {} ({})", g.name, g.color))
                    .collect();
                Ok(CommandResult::new(format!(
                    "Groups ({}):\n{}",
                    groups.len(),
                    lines.join("\n")
                )))
            }
            Command::ListToDos => {
                let todos = self.model.address_book().todos();
                if todos.is_empty() {
                    return Ok(CommandResult::new("No to-dos yet."));
                }
                let lines: Vec<String> = todos
                    .iter()
                    .enumerate()
                    .map(|(i, t)| format!("  {}. {}", i + 1, t))
                    .collect();
                Ok(CommandResult::new(format!(
                    "To-dos ({}):\n{}",
                    todos.len(),
                    lines.join("\n")
                )))
            }
            Command::History => Ok(self.history.report()),
            Command::Help => Ok(CommandResult::new(HELP_TEXT)),
            Command::Exit => Ok(CommandResult::exit(MESSAGE_EXIT)),
        }
    }
}
