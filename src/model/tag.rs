use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BookError, BookResult};
use crate::validation;

/// Free-form alphanumeric label on a person. Unlike groups, tags carry no
/// shared state and are stored by value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    pub fn parse(value: &str) -> BookResult<Self> {
        validation::alphanumeric(value, "tag").map(Tag)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Tag {
    type Error = BookError;

    fn try_from(value: String) -> BookResult<Self> {
        Tag::parse(&value)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0)
    }
}
