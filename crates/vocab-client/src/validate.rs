use std::fmt;

use crate::session::DraftDefinition;

pub const MAX_EXPRESSION_CHARS: usize = 50;

pub const FORBIDDEN_CHARS: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '_', '+', '-', '=', '[', ']', '{', '}', ';',
    '\'', ':', '"', '\\', '|', ',', '.', '<', '>', '?', '~', '`',
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingWord,
    TooLong { length: usize },
    SpecialCharacter(char),
    IncompleteDefinitions,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingWord => f.write_str("word required"),
            Self::TooLong { .. } => f.write_str("too long"),
            Self::SpecialCharacter(_) => f.write_str("no special characters"),
            Self::IncompleteDefinitions => f.write_str("all meanings and parts of speech required"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Checks a draft before submission and returns the trimmed expression.
///
/// Rules run in order; the first failing rule wins.
pub fn validate_draft<'a>(
    expression: &'a str,
    definitions: &[DraftDefinition],
) -> Result<&'a str, ValidationError> {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingWord);
    }
    let length = trimmed.chars().count();
    if length > MAX_EXPRESSION_CHARS {
        return Err(ValidationError::TooLong { length });
    }
    if let Some(c) = trimmed.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(ValidationError::SpecialCharacter(c));
    }
    if !definitions.iter().all(DraftDefinition::is_complete) {
        return Err(ValidationError::IncompleteDefinitions);
    }
    Ok(trimmed)
}
