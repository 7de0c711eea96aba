use log::info;
use rusqlite::Connection;
use std::io::{self, Write};

use crate::colors;
use crate::config::Config;
use crate::db::book_repo;
use crate::error::BookResult;
use crate::logic::Logic;
use crate::model::Person;

pub struct CLIContext {
    pub conn: Connection,
    pub logic: Logic,
    pub config: Config,
}

impl CLIContext {
    pub fn new(conn: Connection, logic: Logic, config: Config) -> Self {
        Self {
            conn,
            logic,
            config,
        }
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Writes the book and the color file if the last command changed anything.
    pub fn save_if_changed(&mut self) -> BookResult<()> {
        if !self.logic.take_book_changed() {
            return Ok(());
        }
        let data = self.logic.model().address_book().to_data();
        book_repo::save_book(&self.conn, &data)?;
        colors::write_group_colors(&self.config.colors_path, &data.groups)?;
        info!("Saved address book to {}", self.config.data_path.display());
        Ok(())
    }

    /// Print the persons currently in view.
    pub fn print_persons(&self) {
        let persons = self.logic.model().filtered_persons();
        if persons.is_empty() {
            println!("(no persons to show)");
            return;
        }
        for (i, person) in persons.iter().enumerate() {
            println!("  {}. {}", i + 1, format_person(person));
        }
    }
}

fn format_person(person: &Person) -> String {
    let d = &person.details;
    let mut line = format!("{}  {}  {}", d.name, d.phone, d.email);
    if !person.groups.is_empty() {
        let groups: Vec<String> = person
            .groups
            .iter()
            .map(|g| format!("{}({})", g.name, g.color))
            .collect();
        line.push_str(&format!("  groups: {}", groups.join(", ")));
    }
    if !person.tags.is_empty() {
        let tags: Vec<&str> = person.tags.iter().map(|t| t.as_str()).collect();
        line.push_str(&format!("  tags: {}", tags.join(", ")));
    }
    line
}
