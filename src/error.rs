use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("Invalid {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: String,
        identifier: String,
    },

    /// Store consistency was broken by a caller. Never recoverable.
    #[error("Invariant violated: {0}")]
    Invariant(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl BookError {
    pub fn not_found(entity_type: &str, identifier: impl ToString) -> Self {
        BookError::NotFound {
            entity_type: entity_type.into(),
            identifier: identifier.to_string(),
        }
    }

    pub fn already_exists(entity_type: &str, identifier: impl ToString) -> Self {
        BookError::AlreadyExists {
            entity_type: entity_type.into(),
            identifier: identifier.to_string(),
        }
    }

    /// True for errors that mean the store can no longer be trusted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BookError::Invariant(_))
    }
}

pub type BookResult<T> = Result<T, BookError>;
