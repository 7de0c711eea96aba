use std::collections::BTreeSet;

use super::{
    CommandError, CommandOutcome, CommandResult, Index, UndoableAction,
    MESSAGE_INVALID_PERSON_DISPLAYED_INDEX,
};
use crate::error::BookError;
use crate::manager::ModelManager;
use crate::model::{Group, Person, PersonDetails, Tag};
use crate::store::BookData;

pub const MESSAGE_DUPLICATE_PERSON: &str = "This person already exists in the address book";
pub const MESSAGE_NOT_EDITED: &str = "At least one field to edit must be provided.";
pub const MESSAGE_CLEAR_SUCCESS: &str = "Address book has been cleared!";

fn person_at(model: &ModelManager, index: Index) -> Result<Person, CommandError> {
    model
        .filtered_persons()
        .into_iter()
        .nth(index.zero_based())
        .ok_or_else(|| CommandError::failed(MESSAGE_INVALID_PERSON_DISPLAYED_INDEX))
}

fn unresolved(field: &str) -> CommandError {
    CommandError::fatal(format!("{} was not resolved before apply", field))
}

#[derive(Debug)]
pub struct AddPerson {
    to_add: Person,
}

impl AddPerson {
    pub fn new(to_add: Person) -> Self {
        Self { to_add }
    }
}

impl UndoableAction for AddPerson {
    fn apply(&mut self, model: &mut ModelManager) -> CommandOutcome {
        match model.add_person(&self.to_add) {
            Ok(()) => Ok(CommandResult::new(format!("New person added: {}", self.to_add))),
            Err(BookError::AlreadyExists { .. }) => Err(CommandError::failed(MESSAGE_DUPLICATE_PERSON)),
            Err(e) => Err(e.into()),
        }
    }
}

/// Fields to overwrite on an existing person. Unset fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPersonDescriptor {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub timetable_link: Option<String>,
    pub detail: Option<String>,
    pub tags: Option<BTreeSet<Tag>>,
    pub groups: Option<BTreeSet<Group>>,
}

impl EditPersonDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.phone.is_some()
            || self.email.is_some()
            || self.address.is_some()
            || self.timetable_link.is_some()
            || self.detail.is_some()
            || self.tags.is_some()
            || self.groups.is_some()
    }

    /// Builds the edited copy of `person`.
    pub fn apply_to(&self, person: &Person) -> Person {
        let d = &person.details;
        let pick = |new: &Option<String>, old: &String| new.clone().unwrap_or_else(|| old.clone());
        Person {
            details: PersonDetails {
                name: pick(&self.name, &d.name),
                phone: pick(&self.phone, &d.phone),
                email: pick(&self.email, &d.email),
                address: pick(&self.address, &d.address),
                timetable_link: pick(&self.timetable_link, &d.timetable_link),
                detail: pick(&self.detail, &d.detail),
            },
            tags: self.tags.clone().unwrap_or_else(|| person.tags.clone()),
            groups: self.groups.clone().unwrap_or_else(|| person.groups.clone()),
        }
    }
}

#[derive(Debug)]
pub struct EditPerson {
    index: Index,
    descriptor: EditPersonDescriptor,
    target: Option<Person>,
    edited: Option<Person>,
}

impl EditPerson {
    pub fn new(index: Index, descriptor: EditPersonDescriptor) -> Self {
        Self {
            index,
            descriptor,
            target: None,
            edited: None,
        }
    }
}

impl UndoableAction for EditPerson {
    fn preprocess(&mut self, model: &ModelManager) -> Result<(), CommandError> {
        if !self.descriptor.is_any_field_edited() {
            return Err(CommandError::failed(MESSAGE_NOT_EDITED));
        }
        let target = person_at(model, self.index)?;
        self.edited = Some(self.descriptor.apply_to(&target));
        self.target = Some(target);
        Ok(())
    }

    fn apply(&mut self, model: &mut ModelManager) -> CommandOutcome {
        let target = self.target.as_ref().ok_or_else(|| unresolved("edit target"))?;
        let edited = self.edited.as_ref().ok_or_else(|| unresolved("edited person"))?;
        match model.update_person(target, edited) {
            Ok(()) => {
                model.show_all_persons();
                Ok(CommandResult::new(format!("Edited Person: {}", edited)))
            }
            Err(BookError::AlreadyExists { .. }) => Err(CommandError::failed(MESSAGE_DUPLICATE_PERSON)),
            Err(BookError::NotFound { .. }) => {
                Err(CommandError::fatal("the target person cannot be missing"))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug)]
pub struct DeletePerson {
    index: Index,
    target: Option<Person>,
}

impl DeletePerson {
    pub fn new(index: Index) -> Self {
        Self {
            index,
            target: None,
        }
    }
}

impl UndoableAction for DeletePerson {
    fn preprocess(&mut self, model: &ModelManager) -> Result<(), CommandError> {
        self.target = Some(person_at(model, self.index)?);
        Ok(())
    }

    fn apply(&mut self, model: &mut ModelManager) -> CommandOutcome {
        let target = self.target.as_ref().ok_or_else(|| unresolved("delete target"))?;
        match model.remove_person(target) {
            Ok(removed) => Ok(CommandResult::new(format!("Deleted Person: {}", removed))),
            Err(BookError::NotFound { .. }) => {
                Err(CommandError::fatal("the target person cannot be missing"))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Default)]
pub struct ClearBook;

impl UndoableAction for ClearBook {
    fn apply(&mut self, model: &mut ModelManager) -> CommandOutcome {
        model.reset_data(&BookData::default())?;
        model.show_all_persons();
        Ok(CommandResult::new(MESSAGE_CLEAR_SUCCESS))
    }
}
