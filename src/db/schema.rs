use rusqlite::Connection;

use crate::error::BookResult;

/// Initialize the database schema. Creates all tables if they don't exist.
pub fn initialize(conn: &Connection) -> BookResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS groups (
            name TEXT PRIMARY KEY NOT NULL,
            color TEXT NOT NULL DEFAULT 'undefined',
            position INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS persons (
            position INTEGER PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            phone TEXT NOT NULL,
            email TEXT NOT NULL,
            address TEXT NOT NULL,
            timetable_link TEXT NOT NULL,
            detail TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS person_tags (
            person_position INTEGER NOT NULL REFERENCES persons(position) ON DELETE CASCADE,
            tag TEXT NOT NULL,
            PRIMARY KEY (person_position, tag)
        );

        CREATE TABLE IF NOT EXISTS person_groups (
            person_position INTEGER NOT NULL REFERENCES persons(position) ON DELETE CASCADE,
            group_name TEXT NOT NULL REFERENCES groups(name) ON DELETE CASCADE,
            PRIMARY KEY (person_position, group_name)
        );

        CREATE TABLE IF NOT EXISTS todos (
            position INTEGER PRIMARY KEY NOT NULL,
            content TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS metadata (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );

        PRAGMA foreign_keys = ON;
        ",
    )?;
    Ok(())
}

/// Create an in-memory connection for testing. Available in test builds.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}
