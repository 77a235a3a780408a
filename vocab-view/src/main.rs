use clap::Parser;
use render::{label, print_part_of_speech_menu, print_vocabulary};
use utilities::{confirm, input, parse_part_of_speech, resolve_word};
use vocab_client::{
    ClientConfig, EditSession, MutationError, SubmitReport, VocabClient, VocabId, VocabStore,
    WriteKind,
};

mod logging;
mod render;
mod utilities;

#[derive(Parser, Debug)]
#[command(name = "vocab-view", about = "Browse and edit one vocabulary list", version)]
struct Args {
    /// Vocabulary to open.
    #[arg(long)]
    vocab_id: VocabId,

    /// Backend address; overrides `VOCAB_API_URL`.
    #[arg(long)]
    base_url: Option<String>,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Debug, Clone, Copy)]
enum Flow {
    Add,
    Edit,
}

impl Flow {
    fn session(self, store: &mut VocabStore) -> &mut EditSession {
        match self {
            Flow::Add => &mut store.add,
            Flow::Edit => &mut store.edit,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _logger = logging::init(&args.log_level)?;

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }
    let client = VocabClient::new(config);
    let mut store = VocabStore::new(args.vocab_id);
    client.refresh(&mut store).await;
    print_vocabulary(&store);

    loop {
        let line = input(">> ")?;
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        match command {
            "" => {}
            "exit" | "leave" | "quit" | "e" | "q" | "l" => {
                break;
            }
            "list" | "ls" => print_vocabulary(&store),
            "refresh" => {
                if !client.refresh(&mut store).await {
                    println!("Couldn't reach the server; showing the last loaded words.");
                }
                print_vocabulary(&store);
            }
            "add" => {
                store.open_add();
                store.add.expression = rest.to_owned();
                run_session(&client, &mut store, Flow::Add).await?;
            }
            "edit" => match resolve_word(&store, rest) {
                Some(id) => {
                    store.open_edit(id)?;
                    run_session(&client, &mut store, Flow::Edit).await?;
                }
                None => println!("Couldn't find the word you were looking for."),
            },
            "delete" | "remove" => match resolve_word(&store, rest) {
                Some(id) => {
                    let deleted = client
                        .delete_word(&mut store, id, |word| {
                            confirm(&format!("Delete '{}'? (y/N): ", word.expression), false)
                        })
                        .await;
                    match deleted {
                        Ok(true) => println!("Deleted the word successfully."),
                        Ok(false) => {}
                        Err(error) => println!("Failed to delete the word: {error}"),
                    }
                }
                None => println!("Couldn't find the word you were looking for."),
            },
            "select" => match resolve_word(&store, rest) {
                Some(id) => {
                    let selected = store.toggle_selection(id);
                    println!("{}", if selected { "Selected." } else { "Unselected." });
                }
                None => println!("Couldn't find the word you were looking for."),
            },
            "delete-selected" => {
                let outcomes = client
                    .delete_selected(&mut store, |count| {
                        confirm(&format!("Delete {count} selected words? (y/N): "), false)
                    })
                    .await;
                for (id, result) in outcomes.unwrap_or_default() {
                    if let Err(error) = result {
                        println!("Failed to delete word {id}: {error}");
                    }
                }
            }
            "clear" => store.clear_selection(),
            "help" => print_help(),
            _ => {
                println!("Unknown command {command}.");
            }
        }
    }
    Ok(())
}

/// Prompts for the draft and submits it until it succeeds or the user gives up.
async fn run_session(
    client: &VocabClient,
    store: &mut VocabStore,
    flow: Flow,
) -> anyhow::Result<()> {
    loop {
        fill_draft(flow.session(store))?;
        let result = match flow {
            Flow::Add => client.submit_add(store).await,
            Flow::Edit => client.submit_edit(store).await,
        };
        match result {
            Ok(report) => {
                print_report(&report);
                print_vocabulary(store);
                return Ok(());
            }
            Err(error) => {
                if let MutationError::Transport(_) = &error {
                    log::error!("event=submit status=failed error={error}");
                }
                println!("{error}");
                if !confirm("Edit and try again? (Y/n): ", true) {
                    flow.session(store).close();
                    return Ok(());
                }
            }
        }
    }
}

fn fill_draft(session: &mut EditSession) -> anyhow::Result<()> {
    let expression = input(&format!("Word [{}]: ", session.expression))?;
    if !expression.trim().is_empty() {
        session.expression = expression.trim().to_owned();
    }

    let mut index = 0;
    while index < session.definitions().len() {
        let row = &session.definitions()[index];
        let prompt = format!(
            "Meaning {} [{} ({})] (`-` removes): ",
            index + 1,
            row.text,
            label(row.part_of_speech)
        );
        let answer = input(&prompt)?;
        let answer = answer.trim();
        if answer == "-" {
            match session.remove_definition(index) {
                Ok(_) => continue,
                Err(error) => println!("{error}"),
            }
        } else if !answer.is_empty() {
            session.set_text(index, answer)?;
        }
        ask_part_of_speech(session, index)?;
        index += 1;
    }

    loop {
        let answer = input("New meaning (empty to finish): ")?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(());
        }
        session.push_definition();
        let index = session.definitions().len() - 1;
        session.set_text(index, answer)?;
        ask_part_of_speech(session, index)?;
    }
}

fn ask_part_of_speech(session: &mut EditSession, index: usize) -> anyhow::Result<()> {
    let current = session.definitions()[index].part_of_speech;
    if current.is_some() {
        let answer = input(&format!("Part of speech [{}]: ", label(current)))?;
        if answer.trim().is_empty() {
            return Ok(());
        }
        if let Some(pos) = parse_part_of_speech(&answer) {
            session.set_part_of_speech(index, Some(pos))?;
            return Ok(());
        }
    }
    print_part_of_speech_menu();
    let answer = input("Part of speech: ")?;
    session.set_part_of_speech(index, parse_part_of_speech(&answer))?;
    Ok(())
}

fn print_report(report: &SubmitReport) {
    println!("Saved the word successfully.");
    for write in report.failures() {
        let action = match write.kind {
            WriteKind::Create => "add",
            WriteKind::Update => "update",
            WriteKind::Delete => "remove",
        };
        if let Err(error) = &write.result {
            println!("Couldn't {action} meaning '{}': {error}", write.text);
        }
    }
}

fn print_help() {
    println!("list | refresh | add [word] | edit <word> | delete <word>");
    println!("select <word> | delete-selected | clear | quit");
}
