use crate::error::{BookError, BookResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> BookResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(BookError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Validates a non-blank, purely alphanumeric token (tag and group names).
pub fn alphanumeric(value: &str, field: &str) -> BookResult<String> {
    let trimmed = non_blank(value, field)?;
    if trimmed.chars().all(char::is_alphanumeric) {
        Ok(trimmed)
    } else {
        Err(BookError::InvalidValue {
            field: field.to_string(),
            reason: format!("'{}' should be alphanumeric", trimmed),
        })
    }
}

/// Phone numbers are digits only, at least 3 of them.
pub fn phone(value: &str) -> BookResult<String> {
    let trimmed = non_blank(value, "phone")?;
    if trimmed.len() >= 3 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        Ok(trimmed)
    } else {
        Err(BookError::InvalidValue {
            field: "phone".into(),
            reason: "should only contain numbers, and it should be at least 3 digits long".into(),
        })
    }
}

/// Emails need a local part and a domain separated by a single '@'.
pub fn email(value: &str) -> BookResult<String> {
    let trimmed = non_blank(value, "email")?;
    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !trimmed.contains(char::is_whitespace)
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if valid {
        Ok(trimmed)
    } else {
        Err(BookError::InvalidValue {
            field: "email".into(),
            reason: "should be of the format local-part@domain".into(),
        })
    }
}
