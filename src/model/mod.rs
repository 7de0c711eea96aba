pub mod ids;
pub mod person;
pub mod tag;
pub mod group;
pub mod todo;

// Re-exports for convenience
pub use ids::Id;
pub use person::{Person, PersonDetails};
pub use tag::Tag;
pub use group::{Group, GroupColor, GroupName};
pub use todo::ToDo;
