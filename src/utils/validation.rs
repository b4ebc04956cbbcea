use regex::Regex;
use std::sync::OnceLock;

use crate::error::{Error, Result};

static RESUME_FILENAME: OnceLock<Regex> = OnceLock::new();

/// Stored resume names only: `resume_<safe chars>.<pdf|doc|docx|txt>`, no separators.
pub fn is_resume_filename(name: &str) -> bool {
    let re = RESUME_FILENAME.get_or_init(|| {
        Regex::new(r"^resume_[A-Za-z0-9_\-\.]+\.(pdf|doc|docx|txt)$")
            .expect("resume filename pattern is valid")
    });
    re.is_match(name) && !name.contains("..")
}

/// Ids arrive as optional positive integers; anything else is a missing field.
pub fn required_id(value: Option<i64>, message: &str) -> Result<i64> {
    match value {
        Some(id) if id > 0 => Ok(id),
        _ => Err(Error::BadRequest(message.to_string())),
    }
}

/// Trims and rejects empty strings.
pub fn required_text(value: Option<&str>, message: &str) -> Result<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(Error::BadRequest(message.to_string())),
    }
}
