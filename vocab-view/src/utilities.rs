use std::io::{self, Write};

use vocab_client::{PartOfSpeech, VocabStore, WordId};

pub fn input(prompt: &str) -> io::Result<String> {
    let mut line = String::new();
    print!("{prompt}");
    io::stdout().flush()?;
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

pub fn str_to_bool(mut str: String) -> Option<bool> {
    str.make_ascii_lowercase();
    match str.trim() {
        "y" | "yes" | "yeah" | "yea" | "true" | "on" | "네" | "예" => Some(true),
        "n" | "no" | "nope" | "false" | "off" | "아니오" => Some(false),
        _ => None,
    }
}

/// Asks a yes/no question; anything unrecognised counts as `default`.
pub fn confirm(prompt: &str, default: bool) -> bool {
    input(prompt)
        .ok()
        .and_then(str_to_bool)
        .unwrap_or(default)
}

/// Accepts a 1-based menu number, a wire name or a label.
pub fn parse_part_of_speech(answer: &str) -> Option<PartOfSpeech> {
    let answer = answer.trim();
    if let Ok(index) = answer.parse::<usize>() {
        return PartOfSpeech::ALL.get(index.wrapping_sub(1)).copied();
    }
    answer.parse().ok()
}

/// Finds the word the user meant: an exact expression, or the single
/// clearly closest one.
pub fn resolve_word(store: &VocabStore, query: &str) -> Option<WordId> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    if let Some(word) = store.find_expression(query) {
        return word.id;
    }
    let query = query.to_lowercase();
    let mut candidates = store
        .words()
        .iter()
        .filter_map(|word| {
            let id = word.id?;
            Some((id, strsim::jaro(&word.expression.to_lowercase(), &query)))
        })
        .collect::<Vec<(WordId, f64)>>();
    // most similar at the start
    candidates.sort_unstable_by(|(_, a), (_, b)| b.total_cmp(a));
    match candidates.as_slice() {
        [] => None,
        [(id, score)] => (*score > 0.9).then_some(*id),
        [(id, best), (_, second), ..] => {
            let difference = f64::abs(best - second);
            (*best > 0.9 && difference > 0.25).then_some(*id)
        }
    }
}
