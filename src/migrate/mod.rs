use std::fs;
use std::path::Path;

use rusqlite::Connection;

use crate::db::{book_repo, schema};
use crate::error::BookResult;
use crate::store::{AddressBook, BookData};

#[derive(Debug, PartialEq, Eq)]
pub struct ImportStats {
    pub persons: usize,
    pub groups: usize,
    pub todos: usize,
}

/// Reads an exported JSON address book. The data is loaded into a scratch
/// store first, so invalid or duplicate entries are rejected before anything
/// is written.
pub fn read_json(json_path: &Path) -> BookResult<BookData> {
    let json_str = fs::read_to_string(json_path)?;
    let data: BookData = serde_json::from_str(&json_str)?;
    Ok(AddressBook::from_data(&data)?.to_data())
}

/// Imports a JSON address book into a SQLite database, replacing its contents.
pub fn import_json(json_path: &Path, db_path: &Path) -> BookResult<ImportStats> {
    let data = read_json(json_path)?;

    let conn = Connection::open(db_path)?;
    schema::initialize(&conn)?;
    book_repo::save_book(&conn, &data)?;

    Ok(ImportStats {
        persons: data.persons.len(),
        groups: data.groups.len(),
        todos: data.todos.len(),
    })
}

/// Writes `data` as pretty-printed JSON.
pub fn export_json(data: &BookData, json_path: &Path) -> BookResult<()> {
    if let Some(parent) = json_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(json_path, json)?;
    Ok(())
}
