use futures::future::join_all;
use serde::de::DeserializeOwned;

use crate::difficulty::DEFAULT_SCORE;
use crate::model::{Definition, DefinitionRecord, VocabId, Word, WordId, WordRecord};
use crate::transport::{request, Method, Transport};

/// Builds the merged view for one vocabulary.
///
/// Never fails: each sub-fetch falls back to its default on its own, and a
/// failed word list yields an empty view.
pub(crate) async fn load_vocabulary<T: Transport>(transport: &T, vocab_id: VocabId) -> Vec<Word> {
    try_load_vocabulary(transport, vocab_id)
        .await
        .unwrap_or_default()
}

/// `None` when the word list itself could not be fetched.
pub(crate) async fn try_load_vocabulary<T: Transport>(
    transport: &T,
    vocab_id: VocabId,
) -> Option<Vec<Word>> {
    let records: Vec<WordRecord> =
        match fetch_list(transport, &format!("/api/words/all?vocab_id={vocab_id}")).await {
            Some(records) => records,
            None => {
                log::error!("event=vocab_load status=failed vocab_id={vocab_id}");
                return None;
            }
        };
    if records.is_empty() {
        return Some(vec![Word::empty_sentinel()]);
    }
    let words = join_all(records.into_iter().map(|record| load_word(transport, record))).await;
    log::info!(
        "event=vocab_load status=ok vocab_id={vocab_id} words={}",
        words.len()
    );
    Some(words)
}

async fn load_word<T: Transport>(transport: &T, record: WordRecord) -> Word {
    let id = record.word_id;
    let (definitions, detail, difficulty) = futures::join!(
        fetch_definitions(transport, id),
        fetch_detail(transport, id),
        fetch_difficulty(transport, id),
    );
    Word {
        id: Some(id),
        expression: record.expression,
        definitions,
        difficulty: Some(difficulty),
        detail,
    }
}

async fn fetch_definitions<T: Transport>(transport: &T, word_id: WordId) -> Vec<Definition> {
    let path = format!("/api/defs/all?word_id={word_id}");
    match fetch_list::<_, DefinitionRecord>(transport, &path).await {
        Some(records) => records
            .into_iter()
            .map(DefinitionRecord::into_definition)
            .collect(),
        None => {
            log::warn!("event=definitions_load status=degraded word_id={word_id}");
            Vec::new()
        }
    }
}

async fn fetch_detail<T: Transport>(transport: &T, word_id: WordId) -> serde_json::Value {
    let path = format!("/api/stats/detail?word_id={word_id}");
    match request(transport, Method::Get, &path, None).await {
        Ok(envelope) if envelope.is_success() => envelope.data,
        Ok(_) => serde_json::Value::Null,
        Err(err) => {
            log::warn!("event=stats_detail_load status=degraded word_id={word_id} error={err}");
            serde_json::Value::Null
        }
    }
}

async fn fetch_difficulty<T: Transport>(transport: &T, word_id: WordId) -> f64 {
    let path = format!("/api/stats/diff?word_id={word_id}");
    match request(transport, Method::Get, &path, None).await {
        Ok(envelope) if envelope.is_success() => match envelope.data {
            serde_json::Value::Null => DEFAULT_SCORE,
            serde_json::Value::Number(n) => n.as_f64().unwrap_or(DEFAULT_SCORE),
            other => {
                log::warn!(
                    "event=difficulty_load status=degraded word_id={word_id} data={other}"
                );
                DEFAULT_SCORE
            }
        },
        Ok(_) => {
            log::warn!("event=difficulty_load status=degraded word_id={word_id}");
            DEFAULT_SCORE
        }
        Err(err) => {
            log::warn!("event=difficulty_load status=degraded word_id={word_id} error={err}");
            DEFAULT_SCORE
        }
    }
}

/// `None` when the request fails or the payload is not a list of `R`.
async fn fetch_list<T: Transport, R: DeserializeOwned>(transport: &T, path: &str) -> Option<Vec<R>> {
    let envelope = match request(transport, Method::Get, path, None).await {
        Ok(envelope) if envelope.is_success() => envelope,
        Ok(_) => return None,
        Err(err) => {
            log::error!("event=list_load status=failed path={path} error={err}");
            return None;
        }
    };
    if envelope.data.is_null() {
        return Some(Vec::new());
    }
    match serde_json::from_value(envelope.data) {
        Ok(list) => Some(list),
        Err(err) => {
            log::error!("event=list_decode status=failed path={path} error={err}");
            None
        }
    }
}
