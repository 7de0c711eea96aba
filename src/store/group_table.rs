use crate::error::{BookError, BookResult};
use crate::model::{Group, GroupName, Id};

#[derive(Debug, Clone)]
struct GroupEntry {
    id: Id<Group>,
    group: Group,
}

/// The master list of groups. Each group gets a surrogate key when it enters
/// the table and keeps it across edits, so anything holding the key always
/// resolves to the current value.
///
/// At most one entry per name. Insertion order is preserved for display.
#[derive(Debug, Clone, Default)]
pub struct GroupTable {
    entries: Vec<GroupEntry>,
}

impl GroupTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn id_of(&self, name: &GroupName) -> Option<Id<Group>> {
        self.entries
            .iter()
            .find(|e| &e.group.name == name)
            .map(|e| e.id)
    }

    pub fn get(&self, id: Id<Group>) -> Option<&Group> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.group)
    }

    pub fn find(&self, name: &GroupName) -> Option<&Group> {
        self.entries
            .iter()
            .find(|e| &e.group.name == name)
            .map(|e| &e.group)
    }

    pub fn contains(&self, name: &GroupName) -> bool {
        self.id_of(name).is_some()
    }

    /// Adds a new group under a fresh key.
    pub fn insert(&mut self, group: Group) -> BookResult<Id<Group>> {
        if self.contains(&group.name) {
            return Err(BookError::already_exists("Group", &group.name));
        }
        let id = Id::generate();
        self.entries.push(GroupEntry { id, group });
        Ok(id)
    }

    /// Returns the key for `group`'s name, inserting `group` if the name is new.
    pub fn intern(&mut self, group: &Group) -> Id<Group> {
        match self.id_of(&group.name) {
            Some(id) => id,
            None => {
                let id = Id::generate();
                self.entries.push(GroupEntry {
                    id,
                    group: group.clone(),
                });
                id
            }
        }
    }

    /// Overwrites the value stored under `id`, keeping its position.
    pub fn replace(&mut self, id: Id<Group>, group: Group) -> BookResult<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| BookError::not_found("Group", id))?;
        entry.group = group;
        Ok(())
    }

    pub fn remove(&mut self, id: Id<Group>) -> Option<Group> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos).group)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.entries.iter().map(|e| &e.group)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Group> {
        self.entries.iter_mut().map(|e| &mut e.group)
    }
}
