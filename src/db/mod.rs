pub mod schema;
pub mod book_repo;
