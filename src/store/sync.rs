//! Keeps person group references consistent with the master list.
//!
//! Persons store group keys, not group values, so editing a group is a single
//! write to the master list. Removing a group still has to strip its key from
//! every person that holds it.

use std::collections::BTreeSet;

use super::address_book::{AddressBook, StoredPerson};
use crate::error::{BookError, BookResult};
use crate::model::{Group, Id, Person};

impl AddressBook {
    /// Merges the person's unseen groups into the master list and returns the
    /// stored form, whose keys point at the canonical entries.
    ///
    /// Groups already in the master list keep their master value; whatever
    /// color the caller attached is ignored.
    pub(crate) fn sync(&mut self, person: &Person) -> StoredPerson {
        let group_ids: BTreeSet<Id<Group>> =
            person.groups.iter().map(|g| self.groups.intern(g)).collect();
        StoredPerson {
            details: person.details.clone(),
            tags: person.tags.clone(),
            group_ids,
        }
    }

    pub fn add_group(&mut self, group: Group) -> BookResult<()> {
        self.groups.insert(group).map(|_| ())
    }

    /// Replaces the master entry named like `target` with `edited`. Every
    /// person referencing the group sees the new value.
    ///
    /// Renaming onto another existing group is rejected.
    pub fn update_group(&mut self, target: &Group, edited: Group) -> BookResult<()> {
        let id = self
            .groups
            .id_of(&target.name)
            .ok_or_else(|| BookError::not_found("Group", &target.name))?;
        if edited.name != target.name && self.groups.contains(&edited.name) {
            return Err(BookError::already_exists("Group", &edited.name));
        }
        self.groups.replace(id, edited)
    }

    /// Drops `group` from every person, then from the master list.
    ///
    /// Returns `false` without touching anything when no group of that name
    /// exists.
    pub fn remove_group(&mut self, group: &Group) -> bool {
        let Some(id) = self.groups.id_of(&group.name) else {
            return false;
        };
        for person in &mut self.persons {
            person.group_ids.remove(&id);
        }
        self.groups.remove(id);
        true
    }

    /// Persons currently referencing a group of this name.
    pub fn persons_in_group(&self, group: &Group) -> Vec<Person> {
        match self.groups.id_of(&group.name) {
            Some(id) => self
                .persons
                .iter()
                .filter(|p| p.group_ids.contains(&id))
                .map(|p| self.resolve(p))
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GroupColor, PersonDetails};

    fn person(name: &str, groups: &[&str]) -> Person {
        let mut p = Person::new(
            PersonDetails::create(name, "12345", "x@example.com", "Somewhere", "link", "").unwrap(),
        );
        p.groups = groups.iter().map(|g| Group::named(g).unwrap()).collect();
        p
    }

    fn group(name: &str) -> Group {
        Group::named(name).unwrap()
    }

    #[test]
    fn sync_merges_unseen_groups() {
        let mut book = AddressBook::new();
        book.add_person(&person("Amy", &["CS1010", "CS2010"])).unwrap();
        assert_eq!(book.groups(), vec![group("CS1010"), group("CS2010")]);
    }

    #[test]
    fn sync_prefers_master_instance() {
        let mut book = AddressBook::new();
        book.add_group(Group::with_color(group("CS1010").name, GroupColor::Red))
            .unwrap();
        book.add_person(&person("Amy", &["CS1010"])).unwrap();
        let amy = &book.persons()[0];
        assert_eq!(amy.groups.iter().next().unwrap().color, GroupColor::Red);
    }

    #[test]
    fn duplicate_add_does_not_grow_master_list() {
        let mut book = AddressBook::new();
        book.add_person(&person("Amy", &["CS1010"])).unwrap();
        assert!(book.add_person(&person("Amy", &["CS2103"])).is_err());
        assert_eq!(book.groups(), vec![group("CS1010")]);
    }

    #[test]
    fn update_group_recolors_every_member() {
        let mut book = AddressBook::new();
        book.add_person(&person("Amy", &["CS1010"])).unwrap();
        book.add_person(&person("Bob", &["CS1010", "CS2010"])).unwrap();

        let red = Group::with_color(group("CS1010").name, GroupColor::Red);
        book.update_group(&group("CS1010"), red).unwrap();

        for p in book.persons_in_group(&group("CS1010")) {
            let g = p.groups.get(&group("CS1010")).unwrap();
            assert_eq!(g.color, GroupColor::Red);
        }
        assert_eq!(book.persons_in_group(&group("CS1010")).len(), 2);
        book.check_integrity().unwrap();
    }

    #[test]
    fn update_group_rename_moves_references() {
        let mut book = AddressBook::new();
        book.add_person(&person("Amy", &["CS1010"])).unwrap();
        book.update_group(&group("CS1010"), group("CS1101S")).unwrap();

        let amy = &book.persons()[0];
        assert!(amy.has_group(&group("CS1101S")));
        assert!(!amy.has_group(&group("CS1010")));
        assert_eq!(book.groups(), vec![group("CS1101S")]);
    }

    #[test]
    fn update_group_missing_target_fails() {
        let mut book = AddressBook::new();
        let err = book.update_group(&group("CS1010"), group("CS1010")).unwrap_err();
        assert!(matches!(err, BookError::NotFound { .. }));
    }

    #[test]
    fn update_group_rejects_rename_onto_existing() {
        let mut book = AddressBook::new();
        book.add_group(group("CS1010")).unwrap();
        book.add_group(group("CS2010")).unwrap();
        let err = book.update_group(&group("CS1010"), group("CS2010")).unwrap_err();
        assert!(matches!(err, BookError::AlreadyExists { .. }));
        assert_eq!(book.groups().len(), 2);
    }

    #[test]
    fn remove_group_strips_references_and_master_entry() {
        let mut book = AddressBook::new();
        book.add_person(&person("Amy", &["CS1010"])).unwrap();
        book.add_person(&person("Bob", &["CS1010", "CS2010"])).unwrap();

        assert!(book.remove_group(&group("CS1010")));

        let persons = book.persons();
        assert!(persons[0].groups.is_empty());
        assert_eq!(persons[1].groups.iter().cloned().collect::<Vec<_>>(), vec![group("CS2010")]);
        assert_eq!(book.groups(), vec![group("CS2010")]);
        book.check_integrity().unwrap();
    }

    #[test]
    fn remove_unknown_group_is_noop() {
        let mut book = AddressBook::new();
        book.add_person(&person("Amy", &["CS1010"])).unwrap();
        let before = book.clone();
        assert!(!book.remove_group(&group("UNUSED")));
        assert_eq!(book, before);
    }
}
