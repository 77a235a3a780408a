use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub type VocabId = i64;
pub type WordId = i64;
pub type DefinitionId = i64;

/// A merged entry of the vocabulary view.
///
/// The empty-vocabulary sentinel is the only word without an `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub id: Option<WordId>,
    pub expression: String,
    pub definitions: Vec<Definition>,
    pub difficulty: Option<f64>,
    pub detail: serde_json::Value,
}

impl Word {
    /// Placeholder returned for a vocabulary with no words, so a renderer can
    /// tell "empty" apart from "still loading".
    pub fn empty_sentinel() -> Self {
        Self {
            id: None,
            expression: String::new(),
            definitions: vec![Definition::placeholder()],
            difficulty: None,
            detail: serde_json::Value::Null,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub id: Option<DefinitionId>,
    pub text: String,
    /// `None` only for placeholders and for server rows carrying an unknown type.
    pub part_of_speech: Option<PartOfSpeech>,
}

impl Definition {
    pub fn placeholder() -> Self {
        Self {
            id: None,
            text: String::new(),
            part_of_speech: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartOfSpeech {
    Noun,
    Pronoun,
    Verb,
    Adjective,
    Adverb,
    Article,
    Preposition,
    Conjunction,
    Interjection,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 9] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Pronoun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
        PartOfSpeech::Article,
        PartOfSpeech::Preposition,
        PartOfSpeech::Conjunction,
        PartOfSpeech::Interjection,
    ];

    /// Name used on the wire, e.g. `"VERB"`.
    pub fn wire_name(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::Pronoun => "PRONOUN",
            PartOfSpeech::Verb => "VERB",
            PartOfSpeech::Adjective => "ADJECTIVE",
            PartOfSpeech::Adverb => "ADVERB",
            PartOfSpeech::Article => "ARTICLE",
            PartOfSpeech::Preposition => "PREPOSITION",
            PartOfSpeech::Conjunction => "CONJUNCTION",
            PartOfSpeech::Interjection => "INTERJECTION",
        }
    }

    /// Display label shown next to a definition.
    pub fn label(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "명사",
            PartOfSpeech::Pronoun => "대명사",
            PartOfSpeech::Verb => "동사",
            PartOfSpeech::Adjective => "형용사",
            PartOfSpeech::Adverb => "부사",
            PartOfSpeech::Article => "관사",
            PartOfSpeech::Preposition => "전치사",
            PartOfSpeech::Conjunction => "접속사",
            PartOfSpeech::Interjection => "감탄사",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPartOfSpeech(pub String);

impl fmt::Display for UnknownPartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown part of speech `{}`", self.0)
    }
}

impl std::error::Error for UnknownPartOfSpeech {}

impl FromStr for PartOfSpeech {
    type Err = UnknownPartOfSpeech;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PartOfSpeech::ALL
            .into_iter()
            .find(|pos| pos.wire_name().eq_ignore_ascii_case(trimmed) || pos.label() == trimmed)
            .ok_or_else(|| UnknownPartOfSpeech(s.to_owned()))
    }
}

/// `GET /api/words/all` row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WordRecord {
    pub word_id: WordId,
    #[serde(default)]
    pub expression: String,
}

/// `GET /api/defs/all` row. `type` stays a string so one bad row cannot spoil the list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DefinitionRecord {
    pub def_id: DefinitionId,
    #[serde(default)]
    pub definition: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl DefinitionRecord {
    pub(crate) fn into_definition(self) -> Definition {
        let part_of_speech = match self.kind.parse::<PartOfSpeech>() {
            Ok(pos) => Some(pos),
            Err(error) => {
                log::warn!(
                    "event=definition_decode status=degraded def_id={} error={error}",
                    self.def_id
                );
                None
            }
        };
        Definition {
            id: Some(self.def_id),
            text: self.definition,
            part_of_speech,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct WordBody<'a> {
    pub expression: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DefinitionBody<'a> {
    pub definition: &'a str,
    #[serde(rename = "type")]
    pub kind: PartOfSpeech,
}
