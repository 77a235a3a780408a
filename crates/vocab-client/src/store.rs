use std::collections::BTreeSet;

use crate::model::{VocabId, Word, WordId};
use crate::session::{EditSession, SessionError};

/// Owned state of one vocabulary screen: the merged view, the selection set
/// and both edit sessions.
#[derive(Debug, Clone)]
pub struct VocabStore {
    vocab_id: VocabId,
    words: Vec<Word>,
    selection: BTreeSet<WordId>,
    pub add: EditSession,
    pub edit: EditSession,
}

impl VocabStore {
    pub fn new(vocab_id: VocabId) -> Self {
        Self {
            vocab_id,
            words: Vec::new(),
            selection: BTreeSet::new(),
            add: EditSession::default(),
            edit: EditSession::default(),
        }
    }

    pub fn vocab_id(&self) -> VocabId {
        self.vocab_id
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Replaces the view with a freshly aggregated one. The selection is kept.
    pub fn replace_words(&mut self, words: Vec<Word>) {
        self.words = words;
    }

    pub fn is_empty_vocabulary(&self) -> bool {
        matches!(self.words.as_slice(), [only] if only.is_sentinel())
    }

    pub fn word(&self, id: WordId) -> Option<&Word> {
        self.words.iter().find(|word| word.id == Some(id))
    }

    pub fn find_expression(&self, expression: &str) -> Option<&Word> {
        self.words
            .iter()
            .find(|word| !word.is_sentinel() && word.expression == expression)
    }

    pub fn selection(&self) -> &BTreeSet<WordId> {
        &self.selection
    }

    pub fn is_selected(&self, id: WordId) -> bool {
        self.selection.contains(&id)
    }

    /// Flips the selection state of `id` and returns whether it is now selected.
    pub fn toggle_selection(&mut self, id: WordId) -> bool {
        if self.selection.remove(&id) {
            false
        } else {
            self.selection.insert(id);
            true
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub(crate) fn deselect(&mut self, id: WordId) {
        self.selection.remove(&id);
    }

    pub fn open_add(&mut self) {
        self.add.open_blank();
    }

    pub fn open_edit(&mut self, id: WordId) -> Result<(), SessionError> {
        let word = self.word(id).ok_or(SessionError::NotOpen)?;
        let mut session = EditSession::default();
        session.open_for(word)?;
        self.edit = session;
        Ok(())
    }
}
