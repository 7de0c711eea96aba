pub mod context;

use log::{error, info, warn};
use rusqlite::Connection;

use crate::colors;
use crate::commands::CommandError;
use crate::config::Config;
use crate::db::{book_repo, schema};
use crate::error::BookResult;
use crate::logic::Logic;
use crate::manager::ModelManager;
use crate::store::AddressBook;
use context::CLIContext;

/// Exit status after a broken invariant.
pub const FATAL_EXIT_CODE: i32 = 70;

/// Run the interactive REPL. Returns the process exit status.
pub fn run(config: Config) -> i32 {
    println!("Address Book");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let mut ctx = match load(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading address book: {}", e);
            error!("Startup failed: {}", e);
            return if e.is_fatal() { FATAL_EXIT_CODE } else { 1 };
        }
    };

    repl_loop(&mut ctx)
}

/// Opens the database and builds the model, merging in the group color file.
pub fn load(config: Config) -> BookResult<CLIContext> {
    if let Some(dir) = config.data_path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let conn = Connection::open(&config.data_path)?;
    schema::initialize(&conn)?;

    let data = book_repo::load_book(&conn)?;
    let mut book = AddressBook::from_data(&data)?;
    let colors = colors::read_group_colors(&config.colors_path)?;
    let recolored = book.apply_group_colors(&colors);
    book.check_integrity()?;
    info!(
        "Loaded {} from {} ({} groups recolored)",
        book,
        config.data_path.display(),
        recolored
    );

    let logic = Logic::new(ModelManager::new(book));
    Ok(CLIContext::new(conn, logic, config))
}

fn repl_loop(ctx: &mut CLIContext) -> i32 {
    loop {
        let Some(input) = ctx.read_line("> ") else {
            println!();
            return 0;
        };
        if input.trim().is_empty() {
            continue;
        }

        match ctx.logic.execute(&input) {
            Ok(result) => {
                println!("{}", result.feedback);
                if result.exit {
                    return 0;
                }
                if result.show_persons {
                    ctx.print_persons();
                }
            }
            Err(CommandError::Fatal(message)) => {
                eprintln!("Internal error: {}", message);
                eprintln!("The address book is in an inconsistent state; stopping without saving.");
                return FATAL_EXIT_CODE;
            }
            Err(e) => println!("{}", e),
        }

        if let Err(e) = ctx.save_if_changed() {
            warn!("Could not save address book: {}", e);
            println!("Warning: could not save address book: {}", e);
        }
    }
}
