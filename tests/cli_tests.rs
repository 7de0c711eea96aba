use addressbook::cli;
use addressbook::config::Config;
use addressbook::db::{book_repo, schema};
use addressbook::model::*;
use addressbook::store::AddressBook;
use tempfile::TempDir;

fn setup() -> (TempDir, Config) {
    let dir = TempDir::new().unwrap();
    let config = Config::with_data_path(dir.path().join("addressbook.db"));

    let details = PersonDetails::create(
        "Amy",
        "91234567",
        "amy@example.com",
        "Kent Ridge",
        "https://nusmods.com/timetable/share",
        "",
    )
    .unwrap();
    let mut amy = Person::new(details);
    amy.groups.insert(Group::named("CS1010").unwrap());

    let mut book = AddressBook::new();
    book.add_group(Group::named("CS2010").unwrap()).unwrap();
    book.add_person(&amy).unwrap();

    let conn = rusqlite::Connection::open(&config.data_path).unwrap();
    schema::initialize(&conn).unwrap();
    book_repo::save_book(&conn, &book.to_data()).unwrap();

    (dir, config)
}

fn color_of(ctx: &cli::context::CLIContext, name: &str) -> GroupColor {
    ctx.logic
        .model()
        .address_book()
        .find_group(&GroupName::parse(name).unwrap())
        .unwrap()
        .color
}

#[test]
fn load_merges_color_file_into_master_list() {
    let (_dir, config) = setup();
    std::fs::write(&config.colors_path, "CS1010:red\n").unwrap();

    let ctx = cli::load(config).unwrap();

    assert_eq!(color_of(&ctx, "CS1010"), GroupColor::Red);
    assert_eq!(color_of(&ctx, "CS2010"), GroupColor::Undefined);
    let amy = &ctx.logic.model().address_book().persons()[0];
    assert_eq!(amy.groups.iter().next().unwrap().color, GroupColor::Red);
}

#[test]
fn load_without_color_file_keeps_defaults() {
    let (_dir, config) = setup();

    let ctx = cli::load(config).unwrap();

    assert_eq!(color_of(&ctx, "CS1010"), GroupColor::Undefined);
    assert_eq!(ctx.logic.model().address_book().person_count(), 1);
}

#[test]
fn save_after_change_writes_color_file() {
    let (_dir, config) = setup();
    let colors_path = config.colors_path.clone();
    let mut ctx = cli::load(config).unwrap();

    ctx.logic.execute("changeGroupColor CS2010 green").unwrap();
    ctx.save_if_changed().unwrap();

    assert_eq!(std::fs::read_to_string(&colors_path).unwrap(), "CS2010:green\n");
    let saved = book_repo::load_book(&ctx.conn).unwrap();
    let cs2010 = saved
        .groups
        .iter()
        .find(|g| g.name.as_str() == "CS2010")
        .unwrap();
    assert_eq!(cs2010.color, GroupColor::Green);
}
