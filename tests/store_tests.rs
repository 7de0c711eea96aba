use addressbook::error::BookError;
use addressbook::model::*;
use addressbook::store::{AddressBook, BookData};

fn person(name: &str, groups: &[&str]) -> Person {
    let details = PersonDetails::create(
        name,
        "91234567",
        &format!("{}@example.com", name.to_lowercase()),
        "Kent Ridge",
        "https://nusmods.com/timetable/share",
        "",
    )
    .unwrap();
    let mut p = Person::new(details);
    p.groups = groups.iter().map(|g| Group::named(g).unwrap()).collect();
    p
}

fn group_names(p: &Person) -> Vec<String> {
    p.groups.iter().map(|g| g.name.to_string()).collect()
}

fn setup() -> AddressBook {
    let mut book = AddressBook::new();
    book.add_group(Group::named("CS1010").unwrap()).unwrap();
    book.add_group(Group::named("CS2010").unwrap()).unwrap();
    book.add_person(&person("Amy", &["CS1010"])).unwrap();
    book.add_person(&person("Bob", &["CS1010", "CS2010"])).unwrap();
    book
}

// ==========================================================================
// GROUP REMOVAL
// ==========================================================================

#[test]
fn remove_group_strips_it_from_every_person() {
    let mut book = setup();

    assert!(book.remove_group(&Group::named("CS1010").unwrap()));

    let persons = book.persons();
    assert!(persons[0].groups.is_empty());
    assert_eq!(group_names(&persons[1]), vec!["CS2010"]);
    let masters: Vec<String> = book.groups().iter().map(|g| g.name.to_string()).collect();
    assert_eq!(masters, vec!["CS2010"]);
    book.check_integrity().unwrap();
}

#[test]
fn remove_unused_group_only_touches_master_list() {
    let mut book = setup();
    book.add_group(Group::named("CS3230").unwrap()).unwrap();
    let persons_before = book.persons();

    assert!(book.remove_group(&Group::named("CS3230").unwrap()));

    let persons_after = book.persons();
    assert_eq!(persons_before.len(), persons_after.len());
    assert!(persons_before
        .iter()
        .zip(persons_after.iter())
        .all(|(a, b)| a.same_as(b)));
    assert!(book.find_group(&GroupName::parse("CS3230").unwrap()).is_none());
}

#[test]
fn remove_missing_group_is_a_no_op() {
    let mut book = setup();
    let before = book.clone();

    assert!(!book.remove_group(&Group::named("MA1521").unwrap()));
    assert_eq!(book, before);
}

#[test]
fn add_then_remove_group_restores_book() {
    let mut book = setup();
    let before = book.clone();

    book.add_group(Group::named("GEA1000").unwrap()).unwrap();
    assert_ne!(book, before);
    book.remove_group(&Group::named("GEA1000").unwrap());

    assert_eq!(book, before);
}

// ==========================================================================
// GROUP ADD / EDIT
// ==========================================================================

#[test]
fn add_duplicate_group_fails_and_leaves_book_unchanged() {
    let mut book = setup();
    let before = book.clone();

    let err = book
        .add_group(Group::with_color(GroupName::parse("CS1010").unwrap(), GroupColor::Red))
        .unwrap_err();

    assert!(matches!(err, BookError::AlreadyExists { .. }));
    assert_eq!(book, before);
}

#[test]
fn edit_group_is_seen_by_every_member() {
    let mut book = setup();
    let target = Group::named("CS1010").unwrap();
    let edited = Group::with_color(GroupName::parse("CS1101S").unwrap(), GroupColor::Blue);

    book.update_group(&target, edited.clone()).unwrap();

    for p in book.persons() {
        assert!(!p.has_group(&target));
        let g = p.groups.iter().find(|g| g.name == edited.name).unwrap();
        assert_eq!(g.color, GroupColor::Blue);
    }
    // Other fields are untouched.
    let bob = &book.persons()[1];
    assert_eq!(bob.name(), "Bob");
    assert!(bob.has_group(&Group::named("CS2010").unwrap()));
    book.check_integrity().unwrap();
}

#[test]
fn edit_group_onto_existing_name_is_rejected() {
    let mut book = setup();
    let before = book.clone();

    let err = book
        .update_group(&Group::named("CS1010").unwrap(), Group::named("CS2010").unwrap())
        .unwrap_err();

    assert!(matches!(err, BookError::AlreadyExists { .. }));
    assert_eq!(book, before);
}

#[test]
fn edit_missing_group_is_not_found() {
    let mut book = setup();
    let err = book
        .update_group(&Group::named("MA1521").unwrap(), Group::named("MA2001").unwrap())
        .unwrap_err();
    assert!(matches!(err, BookError::NotFound { .. }));
}

// ==========================================================================
// PERSON SYNCHRONIZATION
// ==========================================================================

#[test]
fn adding_person_merges_unseen_groups() {
    let mut book = AddressBook::new();
    book.add_person(&person("Amy", &["CS1231"])).unwrap();

    assert!(book.find_group(&GroupName::parse("CS1231").unwrap()).is_some());
    assert_eq!(book.persons_in_group(&Group::named("CS1231").unwrap()).len(), 1);
}

#[test]
fn adding_person_uses_master_group_color() {
    let mut book = AddressBook::new();
    book.add_group(Group::with_color(GroupName::parse("CS1010").unwrap(), GroupColor::Teal))
        .unwrap();

    let mut amy = person("Amy", &[]);
    amy.groups.insert(Group::with_color(GroupName::parse("CS1010").unwrap(), GroupColor::Red));
    book.add_person(&amy).unwrap();

    let stored = &book.persons()[0];
    assert_eq!(stored.groups.iter().next().unwrap().color, GroupColor::Teal);
}

#[test]
fn duplicate_person_does_not_grow_master_list() {
    let mut book = setup();
    let before = book.clone();

    let err = book.add_person(&person("Amy", &["CS9999"])).unwrap_err();

    assert!(matches!(err, BookError::AlreadyExists { .. }));
    assert_eq!(book, before);
}

#[test]
fn update_person_resyncs_groups() {
    let mut book = setup();
    let amy = book.persons()[0].clone();
    let mut edited = amy.clone();
    edited.groups = [Group::named("CS2040").unwrap()].into_iter().collect();

    book.update_person(&amy, &edited).unwrap();

    assert_eq!(group_names(&book.persons()[0]), vec!["CS2040"]);
    assert!(book.find_group(&GroupName::parse("CS2040").unwrap()).is_some());
}

#[test]
fn update_person_onto_another_person_is_rejected() {
    let mut book = setup();
    let amy = book.persons()[0].clone();
    let bob = book.persons()[1].clone();

    let err = book.update_person(&amy, &bob).unwrap_err();
    assert!(matches!(err, BookError::AlreadyExists { .. }));
}

#[test]
fn remove_person_keeps_their_groups() {
    let mut book = setup();
    let bob = book.persons()[1].clone();

    let removed = book.remove_person(&bob).unwrap();

    assert!(removed.same_as(&bob));
    assert_eq!(book.person_count(), 1);
    assert_eq!(book.groups().len(), 2);
}

// ==========================================================================
// SNAPSHOTS
// ==========================================================================

#[test]
fn snapshot_round_trip_preserves_book() {
    let book = setup();
    let restored = AddressBook::from_data(&book.to_data()).unwrap();
    assert_eq!(restored, book);
}

#[test]
fn reset_data_rejects_duplicate_persons_and_keeps_contents() {
    let mut book = setup();
    let before = book.clone();
    let data = BookData {
        persons: vec![person("Cat", &[]), person("Cat", &["CS1010"])],
        groups: vec![],
        todos: vec![],
    };

    let err = book.reset_data(&data).unwrap_err();

    assert!(matches!(err, BookError::Invariant(_)));
    assert!(err.is_fatal());
    assert_eq!(book, before);
}

#[test]
fn reset_data_rejects_duplicate_todos() {
    let mut book = AddressBook::new();
    let todo = ToDo::create("Submit lab").unwrap();
    let data = BookData {
        todos: vec![todo.clone(), todo],
        ..BookData::default()
    };

    assert!(matches!(book.reset_data(&data), Err(BookError::Invariant(_))));
}

#[test]
fn reset_data_deduplicates_groups_first_wins() {
    let data = BookData {
        persons: vec![],
        groups: vec![
            Group::with_color(GroupName::parse("CS1010").unwrap(), GroupColor::Green),
            Group::with_color(GroupName::parse("CS1010").unwrap(), GroupColor::Red),
        ],
        todos: vec![],
    };

    let book = AddressBook::from_data(&data).unwrap();

    let groups = book.groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].color, GroupColor::Green);
}

#[test]
fn book_equality_ignores_master_list_order() {
    let mut a = AddressBook::new();
    a.add_group(Group::named("X1").unwrap()).unwrap();
    a.add_group(Group::named("Y2").unwrap()).unwrap();
    let mut b = AddressBook::new();
    b.add_group(Group::named("Y2").unwrap()).unwrap();
    b.add_group(Group::named("X1").unwrap()).unwrap();

    assert_eq!(a, b);
}

#[test]
fn book_equality_sees_group_colors() {
    let a = setup();
    let mut b = setup();
    b.update_group(
        &Group::named("CS1010").unwrap(),
        Group::with_color(GroupName::parse("CS1010").unwrap(), GroupColor::Pink),
    )
    .unwrap();

    assert_ne!(a, b);
}
