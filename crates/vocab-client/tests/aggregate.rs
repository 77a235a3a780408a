mod common;

use common::{client, FakeBackend};
use serde_json::json;
use vocab_client::{classify, DifficultyClass, PartOfSpeech, VocabStore};

#[tokio::test]
async fn empty_vocabulary_yields_single_sentinel() {
    let client = client(FakeBackend::new());

    let words = client.load_vocabulary(1).await;

    assert_eq!(words.len(), 1);
    assert!(words[0].is_sentinel());
    assert_eq!(words[0].expression, "");
    assert_eq!(words[0].definitions.len(), 1);
    assert_eq!(words[0].definitions[0].text, "");
}

#[tokio::test]
async fn merges_definitions_difficulty_and_detail() {
    let backend = FakeBackend::new();
    let run = backend.add_word(1, "run");
    backend.add_definition(run, "달리다", "VERB");
    backend.add_definition(run, "달리기", "NOUN");
    backend.set_difficulty(run, json!(0.8));
    let apple = backend.add_word(1, "apple");
    backend.add_definition(apple, "사과", "NOUN");
    backend.set_difficulty(apple, json!(0.2));
    backend.add_word(2, "other vocabulary");
    let client = client(backend);

    let words = client.load_vocabulary(1).await;

    assert_eq!(words.len(), 2);
    let run_word = words.iter().find(|w| w.expression == "run").unwrap();
    assert_eq!(run_word.id, Some(run));
    let texts: Vec<&str> = run_word.definitions.iter().map(|d| d.text.as_str()).collect();
    assert_eq!(texts, ["달리다", "달리기"]);
    assert_eq!(run_word.definitions[0].part_of_speech, Some(PartOfSpeech::Verb));
    assert_eq!(classify(run_word.difficulty), DifficultyClass::Hard);
    assert_eq!(run_word.detail["correct"], json!(3));

    let apple_word = words.iter().find(|w| w.expression == "apple").unwrap();
    assert_eq!(classify(apple_word.difficulty), DifficultyClass::Easy);
}

#[tokio::test]
async fn one_failed_definition_fetch_does_not_touch_siblings() {
    let backend = FakeBackend::new();
    let broken = backend.add_word(1, "broken");
    backend.add_definition(broken, "부서진", "ADJECTIVE");
    let fine = backend.add_word(1, "fine");
    backend.add_definition(fine, "좋은", "ADJECTIVE");
    backend.break_path(format!("/api/defs/all?word_id={broken}"));
    let client = client(backend);

    let words = client.load_vocabulary(1).await;

    assert_eq!(words.len(), 2);
    let broken_word = words.iter().find(|w| w.id == Some(broken)).unwrap();
    assert!(broken_word.definitions.is_empty());
    let fine_word = words.iter().find(|w| w.id == Some(fine)).unwrap();
    assert_eq!(fine_word.definitions.len(), 1);
    assert_eq!(fine_word.definitions[0].text, "좋은");
}

#[tokio::test]
async fn unsuccessful_definition_status_degrades_to_empty() {
    let backend = FakeBackend::new();
    let word = backend.add_word(1, "tea");
    backend.add_definition(word, "차", "NOUN");
    backend.answer_with(format!("/api/defs/all?word_id={word}"), 500);
    let client = client(backend);

    let words = client.load_vocabulary(1).await;

    assert_eq!(words.len(), 1);
    assert!(words[0].definitions.is_empty());
}

#[tokio::test]
async fn missing_or_failed_difficulty_defaults_to_half() {
    let backend = FakeBackend::new();
    let unknown = backend.add_word(1, "unknown");
    let failing = backend.add_word(1, "failing");
    let rejected = backend.add_word(1, "rejected");
    backend.break_path(format!("/api/stats/diff?word_id={failing}"));
    backend.answer_with(format!("/api/stats/diff?word_id={rejected}"), 404);
    backend.break_path(format!("/api/stats/detail?word_id={failing}"));
    let client = client(backend);

    let words = client.load_vocabulary(1).await;

    for id in [unknown, failing, rejected] {
        let word = words.iter().find(|w| w.id == Some(id)).unwrap();
        assert_eq!(word.difficulty, Some(0.5));
        assert_eq!(classify(word.difficulty), DifficultyClass::Medium);
    }
    let failing_word = words.iter().find(|w| w.id == Some(failing)).unwrap();
    assert!(failing_word.detail.is_null());
}

#[tokio::test]
async fn failed_word_list_yields_no_words() {
    let backend = FakeBackend::new();
    backend.add_word(1, "hidden");
    backend.break_path("/api/words/all?vocab_id=1");
    let client = client(backend);

    assert!(client.load_vocabulary(1).await.is_empty());
}

#[tokio::test]
async fn unknown_part_of_speech_is_kept_without_category() {
    let backend = FakeBackend::new();
    let word = backend.add_word(1, "swimming");
    backend.add_definition(word, "수영", "GERUND");
    let client = client(backend);

    let words = client.load_vocabulary(1).await;

    assert_eq!(words[0].definitions.len(), 1);
    assert_eq!(words[0].definitions[0].part_of_speech, None);
}

#[tokio::test]
async fn refresh_replaces_view_and_keeps_selection() {
    let backend = FakeBackend::new();
    let first = backend.add_word(1, "first");
    let client = client(backend);
    let mut store = VocabStore::new(1);

    client.refresh(&mut store).await;
    store.toggle_selection(first);
    client.transport().add_word(1, "second");
    client.refresh(&mut store).await;

    assert_eq!(store.words().len(), 2);
    assert!(store.is_selected(first));
}

#[tokio::test]
async fn failed_refresh_keeps_the_current_view() {
    let backend = FakeBackend::new();
    let kept = backend.add_word(1, "keep");
    let client = client(backend);
    let mut store = VocabStore::new(1);
    assert!(client.refresh(&mut store).await);
    store.toggle_selection(kept);

    client.transport().break_path("/api/words/all?vocab_id=1");
    assert!(!client.refresh(&mut store).await);

    assert_eq!(store.words().len(), 1);
    assert_eq!(store.words()[0].expression, "keep");
    assert!(!store.is_empty_vocabulary());
    assert!(store.is_selected(kept));
}
