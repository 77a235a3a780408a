//! Transient form state for the add-word and edit-word flows.
//!
//! A session always holds at least one draft definition row while it exists.
//! Closing resets it to a single blank row and drops the edit target.

use std::fmt;

use crate::model::{DefinitionId, PartOfSpeech, Word, WordId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftDefinition {
    pub text: String,
    pub part_of_speech: Option<PartOfSpeech>,
    /// Server id for rows seeded from an existing word.
    pub id: Option<DefinitionId>,
}

impl DraftDefinition {
    pub fn is_complete(&self) -> bool {
        !self.text.trim().is_empty() && self.part_of_speech.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    LastDefinition,
    OutOfBounds { index: usize, len: usize },
    NotOpen,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastDefinition => f.write_str("at least one meaning is required"),
            Self::OutOfBounds { index, len } => {
                write!(f, "meaning {index} does not exist ({len} rows)")
            }
            Self::NotOpen => f.write_str("no word is being edited"),
        }
    }
}

impl std::error::Error for SessionError {}

#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    open: bool,
    pub expression: String,
    definitions: Vec<DraftDefinition>,
    target: Option<WordId>,
    removed: Vec<DefinitionId>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self {
            open: false,
            expression: String::new(),
            definitions: vec![DraftDefinition::default()],
            target: None,
            removed: Vec::new(),
        }
    }
}

impl EditSession {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opens a blank session for a new word.
    pub fn open_blank(&mut self) {
        self.close();
        self.open = true;
    }

    /// Seeds the draft from an existing word and remembers it as the target.
    pub fn open_for(&mut self, word: &Word) -> Result<(), SessionError> {
        let id = word.id.ok_or(SessionError::NotOpen)?;
        self.close();
        self.open = true;
        self.target = Some(id);
        self.expression = word.expression.clone();
        let seeded: Vec<DraftDefinition> = word
            .definitions
            .iter()
            .map(|def| DraftDefinition {
                text: def.text.clone(),
                part_of_speech: def.part_of_speech,
                id: def.id,
            })
            .collect();
        if !seeded.is_empty() {
            self.definitions = seeded;
        }
        Ok(())
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn target(&self) -> Option<WordId> {
        self.target
    }

    pub fn definitions(&self) -> &[DraftDefinition] {
        &self.definitions
    }

    /// Ids of seeded rows the user removed.
    pub fn removed(&self) -> &[DefinitionId] {
        &self.removed
    }

    pub fn push_definition(&mut self) {
        self.definitions.push(DraftDefinition::default());
    }

    pub fn remove_definition(&mut self, index: usize) -> Result<DraftDefinition, SessionError> {
        self.check_index(index)?;
        if self.definitions.len() == 1 {
            return Err(SessionError::LastDefinition);
        }
        let row = self.definitions.remove(index);
        if let Some(id) = row.id {
            self.removed.push(id);
        }
        Ok(row)
    }

    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> Result<(), SessionError> {
        self.check_index(index)?;
        self.definitions[index].text = text.into();
        Ok(())
    }

    pub fn set_part_of_speech(
        &mut self,
        index: usize,
        part_of_speech: Option<PartOfSpeech>,
    ) -> Result<(), SessionError> {
        self.check_index(index)?;
        self.definitions[index].part_of_speech = part_of_speech;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), SessionError> {
        if index < self.definitions.len() {
            Ok(())
        } else {
            Err(SessionError::OutOfBounds {
                index,
                len: self.definitions.len(),
            })
        }
    }
}
