use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::group_table::GroupTable;
use crate::error::{BookError, BookResult};
use crate::model::{Group, GroupColor, GroupName, Id, Person, PersonDetails, Tag, ToDo};

/// Plain-value snapshot of an address book. Used to seed the store, to
/// capture undo state and as the on-disk shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookData {
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub todos: Vec<ToDo>,
}

/// A person as held by the store: groups are keys into the master list.
#[derive(Debug, Clone)]
pub(crate) struct StoredPerson {
    pub(crate) details: PersonDetails,
    pub(crate) tags: BTreeSet<Tag>,
    pub(crate) group_ids: BTreeSet<Id<Group>>,
}

/// The entity store: unique persons, the group master list and to-dos.
///
/// Every group key held by a stored person resolves in `groups`.
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    pub(crate) persons: Vec<StoredPerson>,
    pub(crate) groups: GroupTable,
    pub(crate) todos: Vec<ToDo>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a book from a snapshot. See [`AddressBook::reset_data`].
    pub fn from_data(data: &BookData) -> BookResult<Self> {
        let mut book = Self::new();
        book.reset_data(data)?;
        Ok(book)
    }

    /// Replaces all contents with `data`.
    ///
    /// Groups are deduplicated by name (first wins) and every person is
    /// re-synchronized against them. Duplicate persons or to-dos mean the
    /// source is corrupt; that is reported as a fatal [`BookError::Invariant`]
    /// and the current contents are kept.
    pub fn reset_data(&mut self, data: &BookData) -> BookResult<()> {
        let mut fresh = AddressBook::new();
        for group in &data.groups {
            fresh.groups.intern(group);
        }
        for person in &data.persons {
            if fresh.position_of(person).is_some() {
                return Err(BookError::Invariant(format!(
                    "address book data holds duplicate person '{}'",
                    person.name()
                )));
            }
            let stored = fresh.sync(person);
            fresh.persons.push(stored);
        }
        for todo in &data.todos {
            if fresh.todos.contains(todo) {
                return Err(BookError::Invariant(format!(
                    "address book data holds duplicate to-do '{}'",
                    todo
                )));
            }
            fresh.todos.push(todo.clone());
        }
        *self = fresh;
        Ok(())
    }

    /// Plain-value copy of the current contents.
    pub fn to_data(&self) -> BookData {
        BookData {
            persons: self.persons(),
            groups: self.groups(),
            todos: self.todos.clone(),
        }
    }

    // ---- person-level operations ----

    pub fn contains_person(&self, person: &Person) -> bool {
        self.position_of(person).is_some()
    }

    /// Adds a person after synchronizing its groups with the master list.
    /// Nothing changes when the person is a duplicate.
    pub fn add_person(&mut self, person: &Person) -> BookResult<()> {
        if self.contains_person(person) {
            return Err(BookError::already_exists("Person", person.name()));
        }
        let stored = self.sync(person);
        self.persons.push(stored);
        Ok(())
    }

    /// Replaces `target` with `edited` in place.
    pub fn update_person(&mut self, target: &Person, edited: &Person) -> BookResult<()> {
        let index = self
            .position_of(target)
            .ok_or_else(|| BookError::not_found("Person", target.name()))?;
        if target != edited && self.contains_person(edited) {
            return Err(BookError::already_exists("Person", edited.name()));
        }
        let stored = self.sync(edited);
        self.persons[index] = stored;
        Ok(())
    }

    pub fn remove_person(&mut self, target: &Person) -> BookResult<Person> {
        let index = self
            .position_of(target)
            .ok_or_else(|| BookError::not_found("Person", target.name()))?;
        let removed = self.persons.remove(index);
        Ok(self.resolve(&removed))
    }

    // ---- to-do operations ----

    pub fn add_todo(&mut self, todo: ToDo) -> BookResult<()> {
        if self.todos.contains(&todo) {
            return Err(BookError::already_exists("To-do", &todo));
        }
        self.todos.push(todo);
        Ok(())
    }

    pub fn remove_todo(&mut self, todo: &ToDo) -> BookResult<()> {
        let index = self
            .todos
            .iter()
            .position(|t| t == todo)
            .ok_or_else(|| BookError::not_found("To-do", todo))?;
        self.todos.remove(index);
        Ok(())
    }

    // ---- group colors ----

    /// Recolors every group named in `colors`. Other groups keep their color.
    pub fn apply_group_colors(&mut self, colors: &HashMap<GroupName, GroupColor>) -> usize {
        let mut applied = 0;
        for group in self.groups.iter_mut() {
            if let Some(color) = colors.get(&group.name) {
                group.color = *color;
                applied += 1;
            }
        }
        applied
    }

    // ---- read views ----

    /// Persons in insertion order, groups resolved to their current values.
    pub fn persons(&self) -> Vec<Person> {
        self.persons.iter().map(|p| self.resolve(p)).collect()
    }

    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    pub fn groups(&self) -> Vec<Group> {
        self.groups.iter().cloned().collect()
    }

    pub fn find_group(&self, name: &GroupName) -> Option<&Group> {
        self.groups.find(name)
    }

    pub fn todos(&self) -> &[ToDo] {
        &self.todos
    }

    /// Verifies that every stored group key resolves in the master list.
    pub fn check_integrity(&self) -> BookResult<()> {
        for person in &self.persons {
            for id in &person.group_ids {
                if self.groups.get(*id).is_none() {
                    return Err(BookError::Invariant(format!(
                        "person '{}' references a group missing from the master list",
                        person.details.name
                    )));
                }
            }
        }
        Ok(())
    }

    pub(crate) fn position_of(&self, person: &Person) -> Option<usize> {
        self.persons.iter().position(|p| p.details == person.details)
    }

    pub(crate) fn resolve(&self, stored: &StoredPerson) -> Person {
        Person {
            details: stored.details.clone(),
            tags: stored.tags.clone(),
            groups: stored
                .group_ids
                .iter()
                .filter_map(|id| self.groups.get(*id).cloned())
                .collect(),
        }
    }
}

/// Value equality: persons in order with all fields, master list in any
/// order with colors, to-dos in order. Surrogate keys are not compared.
impl PartialEq for AddressBook {
    fn eq(&self, other: &Self) -> bool {
        let persons_match = self.persons.len() == other.persons.len()
            && self
                .persons()
                .iter()
                .zip(other.persons().iter())
                .all(|(a, b)| a.same_as(b));
        let groups_match = self.groups.len() == other.groups.len()
            && self.groups.iter().all(|g| {
                other
                    .groups
                    .find(&g.name)
                    .map(|o| o.same_as(g))
                    .unwrap_or(false)
            });
        persons_match && groups_match && self.todos == other.todos
    }
}

impl std::fmt::Display for AddressBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} persons, {} groups, {} to-dos",
            self.persons.len(),
            self.groups.len(),
            self.todos.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str) -> Group {
        Group::named(name).unwrap()
    }

    fn amy_in(groups: &[&str]) -> Person {
        let mut amy = Person::new(
            PersonDetails::create("Amy", "11111111", "amy@example.com", "Clementi", "link", "")
                .unwrap(),
        );
        amy.groups = groups.iter().map(|g| group(g)).collect();
        amy
    }

    #[test]
    fn apply_group_colors_recolors_named_groups_only() {
        let mut book = AddressBook::new();
        book.add_group(group("CS2010")).unwrap();
        book.add_person(&amy_in(&["CS1010"])).unwrap();
        let colors: HashMap<GroupName, GroupColor> =
            [(group("CS1010").name, GroupColor::Red)].into_iter().collect();

        assert_eq!(book.apply_group_colors(&colors), 1);

        assert_eq!(book.find_group(&group("CS1010").name).unwrap().color, GroupColor::Red);
        assert_eq!(
            book.find_group(&group("CS2010").name).unwrap().color,
            GroupColor::Undefined
        );
        let amy = &book.persons()[0];
        assert_eq!(amy.groups.get(&group("CS1010")).unwrap().color, GroupColor::Red);
    }

    #[test]
    fn apply_group_colors_ignores_unknown_names() {
        let mut book = AddressBook::new();
        book.add_group(group("CS1010")).unwrap();
        let colors: HashMap<GroupName, GroupColor> =
            [(group("MA1521").name, GroupColor::Blue)].into_iter().collect();

        assert_eq!(book.apply_group_colors(&colors), 0);
        assert_eq!(book.groups().len(), 1);
    }

    #[test]
    fn integrity_holds_after_group_removal() {
        let mut book = AddressBook::new();
        book.add_person(&amy_in(&["CS1010", "CS2010"])).unwrap();
        book.remove_group(&group("CS1010"));
        book.check_integrity().unwrap();
    }
}
