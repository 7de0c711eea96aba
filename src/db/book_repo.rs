use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeSet;

use crate::error::{BookError, BookResult};
use crate::model::{Group, GroupColor, GroupName, Person, PersonDetails, Tag, ToDo};
use crate::store::BookData;

const SAVED_AT_KEY: &str = "saved_at";

/// Replaces whatever is stored with `data`, in one transaction.
pub fn save_book(conn: &Connection, data: &BookData) -> BookResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "DELETE FROM person_groups; DELETE FROM person_tags; DELETE FROM persons;
         DELETE FROM groups; DELETE FROM todos;",
    )?;

    for (position, group) in data.groups.iter().enumerate() {
        tx.execute(
            "INSERT INTO groups (name, color, position) VALUES (?1, ?2, ?3)",
            params![group.name.as_str(), group.color.as_str(), position as i64],
        )?;
    }

    for (position, person) in data.persons.iter().enumerate() {
        let d = &person.details;
        tx.execute(
            "INSERT INTO persons (position, name, phone, email, address, timetable_link, detail)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                position as i64,
                d.name,
                d.phone,
                d.email,
                d.address,
                d.timetable_link,
                d.detail,
            ],
        )?;
        for tag in &person.tags {
            tx.execute(
                "INSERT INTO person_tags (person_position, tag) VALUES (?1, ?2)",
                params![position as i64, tag.as_str()],
            )?;
        }
        for group in &person.groups {
            tx.execute(
                "INSERT OR IGNORE INTO groups (name, color, position) VALUES (?1, ?2, ?3)",
                params![group.name.as_str(), group.color.as_str(), i64::MAX],
            )?;
            tx.execute(
                "INSERT INTO person_groups (person_position, group_name) VALUES (?1, ?2)",
                params![position as i64, group.name.as_str()],
            )?;
        }
    }

    for (position, todo) in data.todos.iter().enumerate() {
        tx.execute(
            "INSERT INTO todos (position, content) VALUES (?1, ?2)",
            params![position as i64, todo.content],
        )?;
    }

    tx.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        params![SAVED_AT_KEY, Utc::now().to_rfc3339()],
    )?;
    tx.commit()?;
    Ok(())
}

/// Reads the stored snapshot. An empty database yields an empty book.
pub fn load_book(conn: &Connection) -> BookResult<BookData> {
    let groups = load_groups(conn)?;

    let mut stmt = conn.prepare(
        "SELECT position, name, phone, email, address, timetable_link, detail
         FROM persons ORDER BY position",
    )?;
    let rows: Vec<(i64, PersonDetails)> = stmt
        .query_map([], |row| {
            Ok((
                row.get(0)?,
                PersonDetails {
                    name: row.get(1)?,
                    phone: row.get(2)?,
                    email: row.get(3)?,
                    address: row.get(4)?,
                    timetable_link: row.get(5)?,
                    detail: row.get(6)?,
                },
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut persons = Vec::with_capacity(rows.len());
    for (position, details) in rows {
        let mut person = Person::new(details);
        person.tags = load_tags(conn, position)?;
        person.groups = load_person_groups(conn, position, &groups)?;
        persons.push(person);
    }

    let mut stmt = conn.prepare("SELECT content FROM todos ORDER BY position")?;
    let todos = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|content| ToDo { content })
        .collect();

    Ok(BookData {
        persons,
        groups,
        todos,
    })
}

/// When the snapshot was last written, if ever.
pub fn last_saved_at(conn: &Connection) -> BookResult<Option<DateTime<Utc>>> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            params![SAVED_AT_KEY],
            |row| row.get(0),
        )
        .optional()?;
    value
        .map(|v| {
            DateTime::parse_from_rfc3339(&v)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| BookError::Other(format!("Invalid saved_at timestamp: {}", e)))
        })
        .transpose()
}

fn load_groups(conn: &Connection) -> BookResult<Vec<Group>> {
    let mut stmt = conn.prepare("SELECT name, color FROM groups ORDER BY position, name")?;
    let rows: Vec<(String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(name, color)| {
            Ok(Group::with_color(
                GroupName::parse(&name)?,
                color.parse::<GroupColor>()?,
            ))
        })
        .collect()
}

fn load_tags(conn: &Connection, position: i64) -> BookResult<BTreeSet<Tag>> {
    let mut stmt = conn.prepare("SELECT tag FROM person_tags WHERE person_position = ?1")?;
    let tags = stmt
        .query_map(params![position], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    tags.iter().map(|t| Tag::parse(t)).collect()
}

fn load_person_groups(
    conn: &Connection,
    position: i64,
    groups: &[Group],
) -> BookResult<BTreeSet<Group>> {
    let mut stmt =
        conn.prepare("SELECT group_name FROM person_groups WHERE person_position = ?1")?;
    let names = stmt
        .query_map(params![position], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    names
        .iter()
        .map(|name| {
            let name = GroupName::parse(name)?;
            Ok(groups
                .iter()
                .find(|g| g.name == name)
                .cloned()
                .unwrap_or_else(|| Group::new(name)))
        })
        .collect()
}
