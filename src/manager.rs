use log::debug;
use std::fmt;

use crate::error::BookResult;
use crate::model::{Group, Person, ToDo};
use crate::store::{AddressBook, BookData};

/// Predicate deciding which persons the filtered view shows.
pub type PersonPredicate = Box<dyn Fn(&Person) -> bool>;

/// The single mutation entry point for commands. Owns the address book and
/// the filter behind the person view handed to presenters.
pub struct ModelManager {
    book: AddressBook,
    filter: Option<PersonPredicate>,
}

impl ModelManager {
    pub fn new(book: AddressBook) -> Self {
        debug!("Initializing model with {}", book);
        Self { book, filter: None }
    }

    pub fn address_book(&self) -> &AddressBook {
        &self.book
    }

    pub fn reset_data(&mut self, data: &BookData) -> BookResult<()> {
        self.book.reset_data(data)?;
        debug!("Reset address book to {}", self.book);
        Ok(())
    }

    pub fn add_person(&mut self, person: &Person) -> BookResult<()> {
        self.book.add_person(person)?;
        debug!("Added person '{}'", person.name());
        self.show_all_persons();
        Ok(())
    }

    pub fn update_person(&mut self, target: &Person, edited: &Person) -> BookResult<()> {
        self.book.update_person(target, edited)?;
        debug!("Updated person '{}' -> '{}'", target.name(), edited.name());
        Ok(())
    }

    pub fn remove_person(&mut self, target: &Person) -> BookResult<Person> {
        let removed = self.book.remove_person(target)?;
        debug!("Removed person '{}'", removed.name());
        Ok(removed)
    }

    pub fn add_group(&mut self, group: Group) -> BookResult<()> {
        let name = group.name.clone();
        self.book.add_group(group)?;
        debug!("Added group '{}'", name);
        Ok(())
    }

    pub fn update_group(&mut self, target: &Group, edited: Group) -> BookResult<()> {
        let (name, color) = (edited.name.clone(), edited.color);
        self.book.update_group(target, edited)?;
        debug!("Updated group '{}' -> '{}' ({})", target.name, name, color);
        self.show_all_persons();
        Ok(())
    }

    /// Silent no-op returning `false` when the group does not exist.
    pub fn remove_group(&mut self, group: &Group) -> bool {
        let members = self.book.persons_in_group(group).len();
        let removed = self.book.remove_group(group);
        debug!(
            "Remove group '{}': removed={} members={}",
            group.name, removed, members
        );
        removed
    }

    pub fn add_todo(&mut self, todo: ToDo) -> BookResult<()> {
        self.book.add_todo(todo)?;
        debug!("Added to-do");
        Ok(())
    }

    pub fn remove_todo(&mut self, todo: &ToDo) -> BookResult<()> {
        self.book.remove_todo(todo)?;
        debug!("Removed to-do");
        Ok(())
    }

    // ---- filtered view ----

    /// Persons passing the current filter, in store order.
    pub fn filtered_persons(&self) -> Vec<Person> {
        let persons = self.book.persons();
        match &self.filter {
            Some(pred) => persons.into_iter().filter(|p| pred(p)).collect(),
            None => persons,
        }
    }

    pub fn update_filtered_person_list(&mut self, predicate: PersonPredicate) {
        self.filter = Some(predicate);
    }

    pub fn show_all_persons(&mut self) {
        self.filter = None;
    }

    pub fn is_filtered(&self) -> bool {
        self.filter.is_some()
    }
}

impl Default for ModelManager {
    fn default() -> Self {
        Self::new(AddressBook::new())
    }
}

impl fmt::Debug for ModelManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelManager")
            .field("book", &self.book)
            .field("filtered", &self.is_filtered())
            .finish()
    }
}

/// Person predicate matching any keyword against a whole word of the name,
/// ignoring case.
pub fn name_contains_keywords(keywords: Vec<String>) -> PersonPredicate {
    let keywords: Vec<String> = keywords.into_iter().map(|k| k.to_lowercase()).collect();
    Box::new(move |person: &Person| {
        person
            .name()
            .split_whitespace()
            .any(|word| keywords.iter().any(|k| word.to_lowercase() == *k))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PersonDetails;

    fn person(name: &str) -> Person {
        Person::new(
            PersonDetails::create(name, "12345", "x@example.com", "Somewhere", "link", "").unwrap(),
        )
    }

    #[test]
    fn filter_narrows_view_and_reset_shows_all() {
        let mut model = ModelManager::default();
        model.add_person(&person("Alice Pauline")).unwrap();
        model.add_person(&person("Benson Meier")).unwrap();

        model.update_filtered_person_list(name_contains_keywords(vec!["alice".into()]));
        assert_eq!(model.filtered_persons().len(), 1);

        model.show_all_persons();
        assert_eq!(model.filtered_persons().len(), 2);
    }

    #[test]
    fn keyword_match_is_whole_word() {
        let pred = name_contains_keywords(vec!["Ali".into()]);
        assert!(!pred(&person("Alice Pauline")));
        let pred = name_contains_keywords(vec!["PAULINE".into()]);
        assert!(pred(&person("Alice Pauline")));
    }

    #[test]
    fn remove_missing_group_reports_false() {
        let mut model = ModelManager::default();
        assert!(!model.remove_group(&Group::named("CS1010").unwrap()));
    }
}
