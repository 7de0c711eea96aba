pub mod address_book;
pub mod group_table;
mod sync;

pub use address_book::{AddressBook, BookData};
pub use group_table::GroupTable;
