use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BookResult;
use crate::validation;

/// A to-do item kept alongside the contacts. Unique by content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToDo {
    pub content: String,
}

impl ToDo {
    pub fn create(content: &str) -> BookResult<Self> {
        Ok(Self {
            content: validation::non_blank(content, "to-do content")?,
        })
    }
}

impl fmt::Display for ToDo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}
