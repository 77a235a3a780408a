#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use serde_json::{json, Value};
use vocab_client::{ClientConfig, Envelope, Method, Transport, TransportError, VocabClient};

#[derive(Debug, Clone)]
struct StoredWord {
    vocab_id: i64,
    expression: String,
}

#[derive(Debug, Clone)]
struct StoredDefinition {
    word_id: i64,
    text: String,
    kind: String,
}

#[derive(Default)]
struct State {
    next_id: i64,
    words: BTreeMap<i64, StoredWord>,
    definitions: BTreeMap<i64, StoredDefinition>,
    difficulty: HashMap<i64, Value>,
    broken: HashSet<String>,
    statuses: HashMap<String, u16>,
    omit_created_ids: bool,
    requests: Vec<(Method, String, Option<Value>)>,
}

impl State {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory stand-in for the vocabulary REST service.
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<State>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_word(&self, vocab_id: i64, expression: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.allocate();
        state.words.insert(
            id,
            StoredWord {
                vocab_id,
                expression: expression.to_owned(),
            },
        );
        id
    }

    pub fn add_definition(&self, word_id: i64, text: &str, kind: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.allocate();
        state.definitions.insert(
            id,
            StoredDefinition {
                word_id,
                text: text.to_owned(),
                kind: kind.to_owned(),
            },
        );
        id
    }

    pub fn set_difficulty(&self, word_id: i64, score: Value) {
        self.state.lock().unwrap().difficulty.insert(word_id, score);
    }

    /// Requests to `path` fail as if the host were unreachable.
    pub fn break_path(&self, path: impl Into<String>) {
        self.state.lock().unwrap().broken.insert(path.into());
    }

    /// Requests to `path` answer with `status` and no data.
    pub fn answer_with(&self, path: impl Into<String>, status: u16) {
        self.state.lock().unwrap().statuses.insert(path.into(), status);
    }

    /// Created words are stored but their id is left out of the reply.
    pub fn omit_created_ids(&self) {
        self.state.lock().unwrap().omit_created_ids = true;
    }

    pub fn requests(&self) -> Vec<(Method, String)> {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .map(|(method, path, _)| (*method, path.clone()))
            .collect()
    }

    pub fn writes(&self) -> Vec<(Method, String, Option<Value>)> {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|(method, _, _)| *method != Method::Get)
            .cloned()
            .collect()
    }

    pub fn expressions(&self, vocab_id: i64) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .words
            .values()
            .filter(|word| word.vocab_id == vocab_id)
            .map(|word| word.expression.clone())
            .collect()
    }

    pub fn definition_count(&self) -> usize {
        self.state.lock().unwrap().definitions.len()
    }

    fn handle(&self, method: Method, path: &str, body: Option<Value>) -> Result<Envelope, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push((method, path.to_owned(), body.clone()));
        if state.broken.contains(path) {
            return Err(TransportError::Backend(format!("connection refused: {path}")));
        }
        if let Some(status) = state.statuses.get(path) {
            return Ok(Envelope::empty(*status));
        }

        let (route, query) = path.split_once('?').unwrap_or((path, ""));
        let query_id = query
            .split_once('=')
            .and_then(|(_, value)| value.parse::<i64>().ok());
        let segments: Vec<&str> = route.trim_start_matches('/').split('/').collect();
        let path_id = segments.get(2).and_then(|s| s.parse::<i64>().ok());
        let body = body.unwrap_or(Value::Null);
        let text_field = |key: &str| body.get(key).and_then(Value::as_str).unwrap_or_default().to_owned();

        match (method, segments.as_slice()) {
            (Method::Get, ["api", "words", "all"]) => {
                let vocab_id = query_id.unwrap_or_default();
                let data: Vec<Value> = state
                    .words
                    .iter()
                    .filter(|(_, word)| word.vocab_id == vocab_id)
                    .map(|(id, word)| json!({"wordId": id, "expression": word.expression}))
                    .collect();
                Ok(Envelope::ok(json!(data)))
            }
            (Method::Get, ["api", "defs", "all"]) => {
                let word_id = query_id.unwrap_or_default();
                let data: Vec<Value> = state
                    .definitions
                    .iter()
                    .filter(|(_, def)| def.word_id == word_id)
                    .map(|(id, def)| json!({"defId": id, "definition": def.text, "type": def.kind}))
                    .collect();
                Ok(Envelope::ok(json!(data)))
            }
            (Method::Get, ["api", "stats", "detail"]) => {
                Ok(Envelope::ok(json!({"wordId": query_id, "correct": 3, "wrong": 1})))
            }
            (Method::Get, ["api", "stats", "diff"]) => {
                let score = query_id
                    .and_then(|id| state.difficulty.get(&id).cloned())
                    .unwrap_or(Value::Null);
                Ok(Envelope::ok(score))
            }
            (Method::Post, ["api", "words", _]) => {
                let vocab_id = path_id.unwrap_or_default();
                let expression = text_field("expression");
                let duplicate = state
                    .words
                    .values()
                    .any(|word| word.vocab_id == vocab_id && word.expression == expression);
                if duplicate {
                    return Ok(Envelope::empty(409));
                }
                let id = state.allocate();
                state.words.insert(
                    id,
                    StoredWord {
                        vocab_id,
                        expression: expression.clone(),
                    },
                );
                if state.omit_created_ids {
                    return Ok(Envelope::ok(json!({"expression": expression})));
                }
                Ok(Envelope::ok(json!({"wordId": id, "expression": expression})))
            }
            (Method::Patch, ["api", "words", _]) => {
                let Some(id) = path_id.filter(|id| state.words.contains_key(id)) else {
                    return Ok(Envelope::empty(404));
                };
                let expression = text_field("expression");
                let vocab_id = state.words[&id].vocab_id;
                let duplicate = state.words.iter().any(|(other, word)| {
                    *other != id && word.vocab_id == vocab_id && word.expression == expression
                });
                if duplicate {
                    return Ok(Envelope::empty(409));
                }
                if let Some(word) = state.words.get_mut(&id) {
                    word.expression = expression.clone();
                }
                Ok(Envelope::ok(json!({"wordId": id, "expression": expression})))
            }
            (Method::Delete, ["api", "words", _]) => {
                let Some(id) = path_id.filter(|id| state.words.contains_key(id)) else {
                    return Ok(Envelope::empty(404));
                };
                state.words.remove(&id);
                state.definitions.retain(|_, def| def.word_id != id);
                Ok(Envelope::ok(json!({"wordId": id})))
            }
            (Method::Post, ["api", "defs", _]) => {
                let Some(word_id) = path_id.filter(|id| state.words.contains_key(id)) else {
                    return Ok(Envelope::empty(404));
                };
                let text = text_field("definition");
                let kind = text_field("type");
                let duplicate = state
                    .definitions
                    .values()
                    .any(|def| def.word_id == word_id && def.text == text);
                if duplicate {
                    return Ok(Envelope::empty(409));
                }
                let id = state.allocate();
                state
                    .definitions
                    .insert(id, StoredDefinition { word_id, text, kind });
                Ok(Envelope::ok(json!({"defId": id})))
            }
            (Method::Patch, ["api", "defs", _]) => {
                let Some(id) = path_id.filter(|id| state.definitions.contains_key(id)) else {
                    return Ok(Envelope::empty(404));
                };
                let text = text_field("definition");
                let kind = text_field("type");
                let word_id = state.definitions[&id].word_id;
                let duplicate = state
                    .definitions
                    .iter()
                    .any(|(other, def)| *other != id && def.word_id == word_id && def.text == text);
                if duplicate {
                    return Ok(Envelope::empty(409));
                }
                state
                    .definitions
                    .insert(id, StoredDefinition { word_id, text, kind });
                Ok(Envelope::ok(json!({"defId": id})))
            }
            (Method::Delete, ["api", "defs", _]) => match path_id.and_then(|id| state.definitions.remove(&id)) {
                Some(_) => Ok(Envelope::ok(Value::Null)),
                None => Ok(Envelope::empty(404)),
            },
            _ => Ok(Envelope::empty(404)),
        }
    }
}

impl Transport for FakeBackend {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Envelope, TransportError> {
        self.handle(method, path, body)
    }
}

pub fn client(backend: FakeBackend) -> VocabClient<FakeBackend> {
    VocabClient::with_transport(
        backend,
        ClientConfig::default().with_settle_delay(Duration::ZERO),
    )
}
