//! Turns a line of user input into a [`Command`].
//!
//! Arguments use prefixes: `add n/NAME p/PHONE e/EMAIL a/ADDRESS l/LINK
//! [d/DETAIL] [t/TAG]... [g/GROUP]...`.

use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

use crate::commands::{
    AddGroup, AddPerson, AddToDo, ChangeGroupColor, ClearBook, Command, DeleteGroup, DeletePerson,
    DeleteToDo, EditPerson, EditPersonDescriptor, Index,
};
use crate::error::BookError;
use crate::model::{Group, GroupColor, GroupName, Person, PersonDetails, Tag, ToDo};
use crate::validation;

pub const PREFIX_NAME: &str = "n/";
pub const PREFIX_PHONE: &str = "p/";
pub const PREFIX_EMAIL: &str = "e/";
pub const PREFIX_ADDRESS: &str = "a/";
pub const PREFIX_LINK: &str = "l/";
pub const PREFIX_DETAIL: &str = "d/";
pub const PREFIX_TAG: &str = "t/";
pub const PREFIX_GROUP: &str = "g/";

const PERSON_PREFIXES: [&str; 8] = [
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_ADDRESS,
    PREFIX_LINK,
    PREFIX_DETAIL,
    PREFIX_TAG,
    PREFIX_GROUP,
];

pub const USAGE_ADD: &str =
    "add: Adds a person. Parameters: n/NAME p/PHONE e/EMAIL a/ADDRESS l/LINK [d/DETAIL] [t/TAG]... [g/GROUP]...";
pub const USAGE_EDIT: &str =
    "edit: Edits the person at INDEX. Parameters: INDEX [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] [l/LINK] [d/DETAIL] [t/TAG]... [g/GROUP]...";
pub const USAGE_DELETE: &str = "delete: Deletes the person at INDEX. Parameters: INDEX";
pub const USAGE_FIND: &str = "find: Lists persons whose names contain any keyword. Parameters: KEYWORD [MORE_KEYWORDS]...";
pub const USAGE_ADD_GROUP: &str = "addGroup: Adds an empty group. Parameters: GROUPNAME";
pub const USAGE_COLOR: &str =
    "changeGroupColor: Changes the color of an existing group. Parameters: GROUPNAME COLOR";
pub const USAGE_DELETE_GROUP: &str = "deleteGroup: Removes a group from every person. Parameters: GROUPNAME";
pub const USAGE_ADD_TODO: &str = "addToDo: Adds a to-do. Parameters: CONTENT";
pub const USAGE_DELETE_TODO: &str = "deleteToDo: Deletes the to-do at INDEX. Parameters: INDEX";

pub const HELP_TEXT: &str = "Commands:
  add n/NAME p/PHONE e/EMAIL a/ADDRESS l/LINK [d/DETAIL] [t/TAG]... [g/GROUP]...
  edit INDEX [n/NAME] [p/PHONE] ... [t/TAG]... [g/GROUP]...
  delete INDEX
  clear
  list | find KEYWORD...
  addGroup NAME | changeGroupColor NAME COLOR | deleteGroup NAME | groups
  addToDo CONTENT | deleteToDo INDEX | todos
  history | undo | redo | help | exit";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid command format!\n{0}")]
    InvalidFormat(&'static str),

    #[error("{0}")]
    InvalidValue(#[from] BookError),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Prefixed values found in an argument string, plus the text before the
/// first prefix.
#[derive(Debug, Default)]
pub struct ArgumentMultimap {
    preamble: String,
    values: HashMap<&'static str, Vec<String>>,
}

impl ArgumentMultimap {
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Last value given for `prefix`.
    pub fn value(&self, prefix: &str) -> Option<&str> {
        self.values
            .get(prefix)
            .and_then(|v| v.last())
            .map(String::as_str)
    }

    pub fn all_values(&self, prefix: &str) -> Option<&[String]> {
        self.values.get(prefix).map(Vec::as_slice)
    }
}

/// Splits `args` on prefixes that start the input or follow any whitespace.
pub fn tokenize(args: &str, prefixes: &[&'static str]) -> ArgumentMultimap {
    let mut marks: Vec<(usize, &'static str)> = Vec::new();
    let mut after_space = true;
    for (pos, c) in args.char_indices() {
        if after_space {
            if let Some(prefix) = prefixes.iter().find(|p| args[pos..].starts_with(**p)) {
                marks.push((pos, *prefix));
            }
        }
        after_space = c.is_whitespace();
    }

    let preamble_end = marks.first().map(|(pos, _)| *pos).unwrap_or(args.len());
    let mut map = ArgumentMultimap {
        preamble: args[..preamble_end].trim().to_string(),
        values: HashMap::new(),
    };
    for (i, (pos, prefix)) in marks.iter().enumerate() {
        let start = pos + prefix.len();
        let end = marks.get(i + 1).map(|(next, _)| *next).unwrap_or(args.len());
        let value = args[start..end].trim().to_string();
        map.values.entry(*prefix).or_default().push(value);
    }
    map
}

/// Parses one line of input.
pub fn parse_command(input: &str) -> ParseResult<Command> {
    let trimmed = input.trim();
    let (word, args) = match trimmed.split_once(char::is_whitespace) {
        Some((w, rest)) => (w, rest.trim()),
        None => (trimmed, ""),
    };

    match word {
        "add" | "a" => parse_add(args),
        "edit" | "e" => parse_edit(args),
        "delete" | "d" => Ok(Command::undoable(DeletePerson::new(parse_index(args, USAGE_DELETE)?))),
        "clear" | "c" => Ok(Command::undoable(ClearBook)),
        "list" | "l" => Ok(Command::List),
        "find" | "f" => parse_find(args),
        "addGroup" => {
            let name = single_arg(args, USAGE_ADD_GROUP)?;
            Ok(Command::undoable(AddGroup::new(Group::named(name)?)))
        }
        "changeGroupColor" | "color" => parse_color(args),
        "deleteGroup" => {
            let name = single_arg(args, USAGE_DELETE_GROUP)?;
            Ok(Command::undoable(DeleteGroup::new(GroupName::parse(name)?)))
        }
        "groups" => Ok(Command::ListGroups),
        "addToDo" => {
            if args.is_empty() {
                return Err(ParseError::InvalidFormat(USAGE_ADD_TODO));
            }
            Ok(Command::undoable(AddToDo::new(ToDo::create(args)?)))
        }
        "deleteToDo" => Ok(Command::undoable(DeleteToDo::new(parse_index(args, USAGE_DELETE_TODO)?))),
        "todos" => Ok(Command::ListToDos),
        "history" | "h" => Ok(Command::History),
        "undo" | "u" => Ok(Command::Undo),
        "redo" | "r" => Ok(Command::Redo),
        "help" => Ok(Command::Help),
        "exit" | "quit" => Ok(Command::Exit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn single_arg<'a>(args: &'a str, usage: &'static str) -> ParseResult<&'a str> {
    let mut parts = args.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(only), None) => Ok(only),
        _ => Err(ParseError::InvalidFormat(usage)),
    }
}

fn parse_index(args: &str, usage: &'static str) -> ParseResult<Index> {
    single_arg(args, usage)?
        .parse::<usize>()
        .ok()
        .and_then(Index::from_one_based)
        .ok_or(ParseError::InvalidFormat(usage))
}

fn parse_tags(values: &[String]) -> ParseResult<BTreeSet<Tag>> {
    // A lone empty `t/` clears the set.
    if values.len() == 1 && values[0].is_empty() {
        return Ok(BTreeSet::new());
    }
    Ok(values
        .iter()
        .map(|v| Tag::parse(v))
        .collect::<Result<_, _>>()?)
}

fn parse_groups(values: &[String]) -> ParseResult<BTreeSet<Group>> {
    if values.len() == 1 && values[0].is_empty() {
        return Ok(BTreeSet::new());
    }
    Ok(values
        .iter()
        .map(|v| Group::named(v))
        .collect::<Result<_, _>>()?)
}

fn parse_add(args: &str) -> ParseResult<Command> {
    let map = tokenize(args, &PERSON_PREFIXES);
    let required = [PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_ADDRESS, PREFIX_LINK];
    if !map.preamble().is_empty() || required.iter().any(|p| map.value(p).is_none()) {
        return Err(ParseError::InvalidFormat(USAGE_ADD));
    }
    let field = |p: &str| map.value(p).unwrap_or_default();
    let details = PersonDetails::create(
        field(PREFIX_NAME),
        field(PREFIX_PHONE),
        field(PREFIX_EMAIL),
        field(PREFIX_ADDRESS),
        field(PREFIX_LINK),
        field(PREFIX_DETAIL),
    )?;
    let mut person = Person::new(details);
    if let Some(tags) = map.all_values(PREFIX_TAG) {
        person.tags = parse_tags(tags)?;
    }
    if let Some(groups) = map.all_values(PREFIX_GROUP) {
        person.groups = parse_groups(groups)?;
    }
    Ok(Command::undoable(AddPerson::new(person)))
}

fn parse_edit(args: &str) -> ParseResult<Command> {
    let map = tokenize(args, &PERSON_PREFIXES);
    let index = parse_index(map.preamble(), USAGE_EDIT)?;

    let mut descriptor = EditPersonDescriptor::default();
    if let Some(v) = map.value(PREFIX_NAME) {
        descriptor.name = Some(validation::non_blank(v, "name")?);
    }
    if let Some(v) = map.value(PREFIX_PHONE) {
        descriptor.phone = Some(validation::phone(v)?);
    }
    if let Some(v) = map.value(PREFIX_EMAIL) {
        descriptor.email = Some(validation::email(v)?);
    }
    if let Some(v) = map.value(PREFIX_ADDRESS) {
        descriptor.address = Some(validation::non_blank(v, "address")?);
    }
    if let Some(v) = map.value(PREFIX_LINK) {
        descriptor.timetable_link = Some(validation::non_blank(v, "timetable link")?);
    }
    if let Some(v) = map.value(PREFIX_DETAIL) {
        descriptor.detail = Some(v.trim().to_string());
    }
    if let Some(values) = map.all_values(PREFIX_TAG) {
        descriptor.tags = Some(parse_tags(values)?);
    }
    if let Some(values) = map.all_values(PREFIX_GROUP) {
        descriptor.groups = Some(parse_groups(values)?);
    }
    Ok(Command::undoable(EditPerson::new(index, descriptor)))
}

fn parse_find(args: &str) -> ParseResult<Command> {
    let keywords: Vec<String> = args.split_whitespace().map(str::to_string).collect();
    if keywords.is_empty() {
        return Err(ParseError::InvalidFormat(USAGE_FIND));
    }
    Ok(Command::Find(keywords))
}

fn parse_color(args: &str) -> ParseResult<Command> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let [name, color] = parts.as_slice() else {
        return Err(ParseError::InvalidFormat(USAGE_COLOR));
    };
    let name = GroupName::parse(name)?;
    let color: GroupColor = color.parse()?;
    Ok(Command::undoable(ChangeGroupColor::new(name, color)))
}
