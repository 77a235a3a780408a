use vocab_client::{classify, DifficultyClass, PartOfSpeech, VocabStore, Word};

pub fn print_vocabulary(store: &VocabStore) {
    if store.words().is_empty() {
        println!("Couldn't load this vocabulary.");
        return;
    }
    if store.is_empty_vocabulary() {
        println!("This vocabulary has no words yet. Use `add` to create one.");
        return;
    }
    for word in store.words() {
        print_word(store, word);
    }
    if !store.selection().is_empty() {
        println!("{} selected", store.selection().len());
    }
}

fn print_word(store: &VocabStore, word: &Word) {
    let checkbox = match word.id {
        Some(id) if store.is_selected(id) => "[x]",
        _ => "[ ]",
    };
    println!(
        "{checkbox} {} ({})",
        word.expression,
        difficulty_marker(classify(word.difficulty))
    );
    let meanings = word
        .definitions
        .iter()
        .map(|def| format!("{} ({});", def.text, label(def.part_of_speech)))
        .collect::<Vec<String>>()
        .join(" ");
    if !meanings.is_empty() {
        println!("        {meanings}");
    }
}

fn difficulty_marker(class: DifficultyClass) -> &'static str {
    match class {
        DifficultyClass::Easy => "easy",
        DifficultyClass::Medium => "medium",
        DifficultyClass::Hard => "hard!",
    }
}

pub fn label(part_of_speech: Option<PartOfSpeech>) -> &'static str {
    part_of_speech.map(PartOfSpeech::label).unwrap_or("?")
}

pub fn print_part_of_speech_menu() {
    for (index, pos) in PartOfSpeech::ALL.iter().enumerate() {
        println!("    [{}]: {} ({})", index + 1, pos.label(), pos.wire_name());
    }
}
