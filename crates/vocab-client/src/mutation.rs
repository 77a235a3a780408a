//! Validated writes against the vocabulary backend.
//!
//! Word-level calls decide the outcome of a submit. Definition writes run as a
//! concurrent batch afterwards and are reported item by item; a failed item
//! never rolls back the word.

use std::fmt;

use futures::future::join_all;
use serde_json::json;

use crate::model::{DefinitionBody, DefinitionId, PartOfSpeech, Word, WordBody, WordId};
use crate::session::{DraftDefinition, SessionError};
use crate::store::VocabStore;
use crate::transport::{request, Envelope, Method, Transport, TransportError};
use crate::validate::{validate_draft, ValidationError};
use crate::VocabClient;

#[derive(Debug)]
pub enum MutationError {
    Validation(ValidationError),
    DuplicateWord,
    Failed { status: u16 },
    MissingId,
    Transport(TransportError),
    Session(SessionError),
    UnknownWord(WordId),
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateWord => f.write_str("duplicate word"),
            Self::Failed { status } => write!(f, "failed to save word (status {status})"),
            Self::MissingId => f.write_str("server response did not include a word id"),
            Self::Transport(err) => write!(f, "a problem occurred while saving the word: {err}"),
            Self::Session(err) => write!(f, "{err}"),
            Self::UnknownWord(id) => write!(f, "word {id} is not in this vocabulary"),
        }
    }
}

impl std::error::Error for MutationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Transport(err) => Some(err),
            Self::Session(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for MutationError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<SessionError> for MutationError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

#[derive(Debug)]
pub enum DefinitionWriteError {
    Duplicate,
    Failed { status: u16 },
    Transport(TransportError),
}

impl fmt::Display for DefinitionWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate => f.write_str("duplicate meaning"),
            Self::Failed { status } => write!(f, "failed to save meaning (status {status})"),
            Self::Transport(err) => write!(f, "a problem occurred while saving the meaning: {err}"),
        }
    }
}

impl std::error::Error for DefinitionWriteError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Create,
    Update,
    Delete,
}

/// Outcome of one definition write in a submit batch.
#[derive(Debug)]
pub struct DefinitionWrite {
    pub kind: WriteKind,
    pub text: String,
    /// Id of the written definition; `None` if a create response carried none.
    pub result: Result<Option<DefinitionId>, DefinitionWriteError>,
}

#[derive(Debug)]
pub struct SubmitReport {
    pub word_id: WordId,
    pub definitions: Vec<DefinitionWrite>,
}

impl SubmitReport {
    pub fn failures(&self) -> impl Iterator<Item = &DefinitionWrite> {
        self.definitions.iter().filter(|write| write.result.is_err())
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}

enum DefinitionOp {
    Create {
        word_id: WordId,
        text: String,
        part_of_speech: PartOfSpeech,
    },
    Update {
        id: DefinitionId,
        text: String,
        part_of_speech: PartOfSpeech,
    },
    Delete {
        id: DefinitionId,
    },
}

impl DefinitionOp {
    fn for_draft(word_id: WordId, draft: &DraftDefinition, part_of_speech: PartOfSpeech) -> Self {
        let text = draft.text.trim().to_owned();
        match draft.id {
            Some(id) => DefinitionOp::Update {
                id,
                text,
                part_of_speech,
            },
            None => DefinitionOp::Create {
                word_id,
                text,
                part_of_speech,
            },
        }
    }
}

impl<T: Transport> VocabClient<T> {
    /// Submits the add session: creates the word, then its definitions.
    ///
    /// On success the view is refreshed and the session closed; on failure the
    /// session stays open for correction.
    pub async fn submit_add(&self, store: &mut VocabStore) -> Result<SubmitReport, MutationError> {
        if !store.add.is_open() {
            return Err(SessionError::NotOpen.into());
        }
        let expression = validate_draft(&store.add.expression, store.add.definitions())?;
        let envelope = self
            .write_word(
                Method::Post,
                &format!("/api/words/{}", store.vocab_id()),
                &WordBody { expression },
            )
            .await?;
        let Some(word_id) = id_field(&envelope, "wordId") else {
            // The word exists server-side; show it even though its meanings are lost.
            log::error!("event=word_create status=no_id vocab_id={}", store.vocab_id());
            self.refresh(store).await;
            return Err(MutationError::MissingId);
        };
        log::info!("event=word_create status=ok word_id={word_id}");

        let ops = batch_for(word_id, store.add.definitions(), &[]);
        let definitions = self.write_definitions(ops).await;

        self.refresh(store).await;
        store.add.close();
        Ok(SubmitReport {
            word_id,
            definitions,
        })
    }

    /// Submits the edit session against its target word.
    ///
    /// Seeded rows are updated, new rows created and removed rows deleted.
    pub async fn submit_edit(&self, store: &mut VocabStore) -> Result<SubmitReport, MutationError> {
        let word_id = match (store.edit.is_open(), store.edit.target()) {
            (true, Some(id)) => id,
            _ => return Err(SessionError::NotOpen.into()),
        };
        let expression = validate_draft(&store.edit.expression, store.edit.definitions())?;
        self.write_word(
            Method::Patch,
            &format!("/api/words/{word_id}"),
            &WordBody { expression },
        )
        .await?;
        log::info!("event=word_update status=ok word_id={word_id}");

        let ops = batch_for(word_id, store.edit.definitions(), store.edit.removed());
        let definitions = self.write_definitions(ops).await;

        self.refresh(store).await;
        store.edit.close();
        Ok(SubmitReport {
            word_id,
            definitions,
        })
    }

    /// Deletes one word once `confirm` approves it. Returns `Ok(false)` when
    /// the user declined, in which case nothing is sent.
    pub async fn delete_word(
        &self,
        store: &mut VocabStore,
        word_id: WordId,
        confirm: impl FnOnce(&Word) -> bool,
    ) -> Result<bool, MutationError> {
        let word = store
            .word(word_id)
            .ok_or(MutationError::UnknownWord(word_id))?;
        if !confirm(word) {
            return Ok(false);
        }
        let outcome = self.send_delete(word_id).await;
        if outcome.is_ok() {
            store.deselect(word_id);
        }
        // A failed reply may still have deleted the word, so the view is reloaded either way.
        self.refresh(store).await;
        outcome.map(|()| true)
    }

    /// Deletes every selected word after a single confirmation given the
    /// number of words. Returns `None` when declined or nothing is selected.
    pub async fn delete_selected(
        &self,
        store: &mut VocabStore,
        confirm: impl FnOnce(usize) -> bool,
    ) -> Option<Vec<(WordId, Result<(), MutationError>)>> {
        let ids: Vec<WordId> = store.selection().iter().copied().collect();
        if ids.is_empty() || !confirm(ids.len()) {
            return None;
        }
        let results = join_all(ids.iter().map(|&id| self.send_delete(id))).await;
        let outcomes: Vec<(WordId, Result<(), MutationError>)> =
            ids.into_iter().zip(results).collect();
        for (id, result) in &outcomes {
            if result.is_ok() {
                store.deselect(*id);
            }
        }
        self.refresh(store).await;
        Some(outcomes)
    }

    async fn send_delete(&self, word_id: WordId) -> Result<(), MutationError> {
        let path = format!("/api/words/{word_id}");
        let envelope = request(&self.transport, Method::Delete, &path, None)
            .await
            .map_err(|err| {
                log::error!("event=word_delete status=failed word_id={word_id} error={err}");
                MutationError::Transport(err)
            })?;
        if envelope.is_success() {
            log::info!("event=word_delete status=ok word_id={word_id}");
            Ok(())
        } else {
            Err(MutationError::Failed {
                status: envelope.status,
            })
        }
    }

    async fn write_word(
        &self,
        method: Method,
        path: &str,
        body: &WordBody<'_>,
    ) -> Result<Envelope, MutationError> {
        let envelope = request(&self.transport, method, path, Some(json!(body)))
            .await
            .map_err(|err| {
                log::error!("event=word_write status=failed path={path} error={err}");
                MutationError::Transport(err)
            })?;
        if envelope.is_success() {
            Ok(envelope)
        } else if envelope.is_conflict() {
            Err(MutationError::DuplicateWord)
        } else {
            Err(MutationError::Failed {
                status: envelope.status,
            })
        }
    }

    async fn write_definitions(&self, ops: Vec<DefinitionOp>) -> Vec<DefinitionWrite> {
        join_all(ops.into_iter().map(|op| self.write_definition(op))).await
    }

    async fn write_definition(&self, op: DefinitionOp) -> DefinitionWrite {
        let (kind, text, method, path, body, known_id) = match op {
            DefinitionOp::Create {
                word_id,
                text,
                part_of_speech,
            } => {
                let body = json!(DefinitionBody {
                    definition: &text,
                    kind: part_of_speech
                });
                let path = format!("/api/defs/{word_id}");
                (WriteKind::Create, text, Method::Post, path, Some(body), None)
            }
            DefinitionOp::Update {
                id,
                text,
                part_of_speech,
            } => {
                let body = json!(DefinitionBody {
                    definition: &text,
                    kind: part_of_speech
                });
                let path = format!("/api/defs/{id}");
                (WriteKind::Update, text, Method::Patch, path, Some(body), Some(id))
            }
            DefinitionOp::Delete { id } => {
                let path = format!("/api/defs/{id}");
                (WriteKind::Delete, String::new(), Method::Delete, path, None, Some(id))
            }
        };
        let result = match request(&self.transport, method, &path, body).await {
            Ok(envelope) if envelope.is_success() => {
                Ok(known_id.or_else(|| id_field(&envelope, "defId")))
            }
            Ok(envelope) if envelope.is_conflict() => Err(DefinitionWriteError::Duplicate),
            Ok(envelope) => Err(DefinitionWriteError::Failed {
                status: envelope.status,
            }),
            Err(err) => Err(DefinitionWriteError::Transport(err)),
        };
        if let Err(err) = &result {
            log::warn!("event=definition_write status=failed path={path} error={err}");
        }
        DefinitionWrite { kind, text, result }
    }
}

/// Validation guarantees every draft has a part of speech, so `filter_map`
/// drops nothing here.
fn batch_for(
    word_id: WordId,
    drafts: &[DraftDefinition],
    removed: &[DefinitionId],
) -> Vec<DefinitionOp> {
    drafts
        .iter()
        .filter_map(|draft| {
            draft
                .part_of_speech
                .map(|pos| DefinitionOp::for_draft(word_id, draft, pos))
        })
        .chain(removed.iter().map(|&id| DefinitionOp::Delete { id }))
        .collect()
}

fn id_field(envelope: &Envelope, key: &str) -> Option<i64> {
    envelope.data.get(key).and_then(serde_json::Value::as_i64)
}
