use super::{CommandError, CommandOutcome, CommandResult, UndoableAction};
use crate::error::BookError;
use crate::manager::ModelManager;
use crate::model::{Group, GroupColor, GroupName};

pub const MESSAGE_DUPLICATE_GROUP: &str = "This group already exists in the address book";
pub const MESSAGE_GROUP_NOT_IN_LIST: &str = "The group specified is not associated with any person";
pub const MESSAGE_GROUP_NOT_FOUND: &str = "The group specified does not exist";

fn find_group(model: &ModelManager, name: &GroupName, missing: &str) -> Result<Group, CommandError> {
    model
        .address_book()
        .find_group(name)
        .cloned()
        .ok_or_else(|| CommandError::failed(missing))
}

#[derive(Debug)]
pub struct AddGroup {
    group: Group,
}

impl AddGroup {
    pub fn new(group: Group) -> Self {
        Self { group }
    }
}

impl UndoableAction for AddGroup {
    fn apply(&mut self, model: &mut ModelManager) -> CommandOutcome {
        match model.add_group(self.group.clone()) {
            Ok(()) => Ok(CommandResult::new(format!("New group added: {}", self.group.name))),
            Err(BookError::AlreadyExists { .. }) => Err(CommandError::failed(MESSAGE_DUPLICATE_GROUP)),
            Err(e) => Err(e.into()),
        }
    }
}

/// Repaints an existing group. Every person in the group shows the new color.
#[derive(Debug)]
pub struct ChangeGroupColor {
    name: GroupName,
    color: GroupColor,
    target: Option<Group>,
}

impl ChangeGroupColor {
    pub fn new(name: GroupName, color: GroupColor) -> Self {
        Self {
            name,
            color,
            target: None,
        }
    }
}

impl UndoableAction for ChangeGroupColor {
    fn preprocess(&mut self, model: &ModelManager) -> Result<(), CommandError> {
        self.target = Some(find_group(model, &self.name, MESSAGE_GROUP_NOT_IN_LIST)?);
        Ok(())
    }

    fn apply(&mut self, model: &mut ModelManager) -> CommandOutcome {
        let target = self
            .target
            .as_ref()
            .ok_or_else(|| CommandError::fatal("group to recolor was not resolved"))?;
        let edited = Group::with_color(self.name.clone(), self.color);
        match model.update_group(target, edited) {
            Ok(()) => Ok(CommandResult::new(format!(
                "Group {}'s color changed to {}",
                self.name, self.color
            ))),
            Err(BookError::NotFound { .. }) => Err(CommandError::failed(MESSAGE_GROUP_NOT_IN_LIST)),
            Err(e) => Err(e.into()),
        }
    }
}

/// Removes a group from the master list and from every person in it. The
/// persons themselves stay.
#[derive(Debug)]
pub struct DeleteGroup {
    name: GroupName,
    target: Option<Group>,
}

impl DeleteGroup {
    pub fn new(name: GroupName) -> Self {
        Self { name, target: None }
    }
}

impl UndoableAction for DeleteGroup {
    fn preprocess(&mut self, model: &ModelManager) -> Result<(), CommandError> {
        self.target = Some(find_group(model, &self.name, MESSAGE_GROUP_NOT_FOUND)?);
        Ok(())
    }

    fn apply(&mut self, model: &mut ModelManager) -> CommandOutcome {
        let target = self
            .target
            .as_ref()
            .ok_or_else(|| CommandError::fatal("group to delete was not resolved"))?;
        if !model.remove_group(target) {
            return Err(CommandError::failed(MESSAGE_GROUP_NOT_FOUND));
        }
        model.show_all_persons();
        Ok(CommandResult::new(format!("Deleted Group: {}", target.name)))
    }
}
