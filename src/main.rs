use std::path::PathBuf;

use addressbook::config::Config;
use addressbook::db::{book_repo, schema};

/// Flushes the log before leaving; `process::exit` skips destructors.
fn exit(code: i32) -> ! {
    addressbook::logging::flush();
    std::process::exit(code)
}

fn main() {
    let mut args = std::env::args().skip(1);
    let mut config = Config::default();
    let mut data_path: Option<PathBuf> = None;
    let mut colors_path: Option<PathBuf> = None;
    let mut log_dir: Option<PathBuf> = None;
    let mut import_path: Option<PathBuf> = None;
    let mut export_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--file" | "-f" => {
                data_path = args.next().map(PathBuf::from);
                if data_path.is_none() {
                    eprintln!("Error: --file requires a path argument");
                    exit(1);
                }
            }
            "--colors" => {
                colors_path = args.next().map(PathBuf::from);
                if colors_path.is_none() {
                    eprintln!("Error: --colors requires a path argument");
                    exit(1);
                }
            }
            "--log-dir" => {
                log_dir = args.next().map(PathBuf::from);
                if log_dir.is_none() {
                    eprintln!("Error: --log-dir requires a path argument");
                    exit(1);
                }
            }
            "--log-level" => match args.next() {
                Some(level) => config.log_level = level,
                None => {
                    eprintln!("Error: --log-level requires a level");
                    exit(1);
                }
            },
            "--import" => {
                import_path = args.next().map(PathBuf::from);
                if import_path.is_none() {
                    eprintln!("Error: --import requires a JSON file path");
                    exit(1);
                }
            }
            "--export" => {
                export_path = args.next().map(PathBuf::from);
                if export_path.is_none() {
                    eprintln!("Error: --export requires a JSON file path");
                    exit(1);
                }
            }
            "--help" | "-h" => {
                println!("Address Book - contacts, groups and to-dos");
                println!();
                println!("Usage: addressbook [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --file <PATH>      Database file path (default: data/addressbook.db)");
                println!("  --colors <PATH>        Group color file (default: next to the database)");
                println!("  --log-dir <PATH>       Log directory (default: next to the database)");
                println!("  --log-level <LEVEL>    trace|debug|info|warn|error");
                println!("  --import <JSON_PATH>   Import an exported JSON address book");
                println!("  --export <JSON_PATH>   Export the address book as JSON");
                println!("  -h, --help             Show this help");
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Use --help for usage information.");
                exit(1);
            }
        }
    }

    if let Some(path) = data_path {
        let level = std::mem::take(&mut config.log_level);
        config = Config::with_data_path(path);
        config.log_level = level;
    }
    if let Some(path) = colors_path {
        config.colors_path = path;
    }
    if let Some(path) = log_dir {
        config.log_dir = path;
    }

    if let Err(e) = addressbook::logging::init_logging(&config.log_level, &config.log_dir) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    if let Some(json_path) = import_path {
        println!("Importing from {}...", json_path.display());
        if config.data_path.exists() {
            eprintln!("Error: Database file {} already exists.", config.data_path.display());
            eprintln!("Remove it first or use --file to specify a different path.");
            exit(1);
        }
        if let Some(dir) = config.data_path.parent() {
            if !dir.as_os_str().is_empty() {
                if let Err(e) = std::fs::create_dir_all(dir) {
                    eprintln!("Error creating {}: {}", dir.display(), e);
                    exit(1);
                }
            }
        }
        match addressbook::migrate::import_json(&json_path, &config.data_path) {
            Ok(stats) => {
                println!("Import complete!");
                println!("  Persons: {}", stats.persons);
                println!("  Groups: {}", stats.groups);
                println!("  To-dos: {}", stats.todos);
            }
            Err(e) => {
                eprintln!("Import failed: {}", e);
                exit(1);
            }
        }
        exit(0);
    }

    if let Some(json_path) = export_path {
        let result = rusqlite::Connection::open(&config.data_path)
            .map_err(addressbook::error::BookError::from)
            .and_then(|conn| {
                schema::initialize(&conn)?;
                book_repo::load_book(&conn)
            })
            .and_then(|data| addressbook::migrate::export_json(&data, &json_path));
        match result {
            Ok(()) => println!("Exported to {}", json_path.display()),
            Err(e) => {
                eprintln!("Export failed: {}", e);
                exit(1);
            }
        }
        exit(0);
    }

    exit(addressbook::cli::run(config));
}
