use std::path::Path;

use crate::complete;
use crate::io::store::{self, StoreError};
use crate::model::Board;

use super::commands::{AddArgs, Cli, Commands, DoneArgs, ListArgs, NoteArgs};

/// Dispatch a parsed CLI invocation (everything except the TUI default).
pub fn dispatch(cli: Cli) -> Result<(), StoreError> {
    let store_dir = store::resolve_store_dir(cli.store_dir.as_deref());
    store::ensure_store_dir(&store_dir)?;

    match cli.command {
        Some(Commands::Add(args)) => cmd_add(&store_dir, args),
        Some(Commands::List(args)) => cmd_list(&store_dir, args, cli.json),
        Some(Commands::Done(args)) => cmd_done(&store_dir, args),
        Some(Commands::Note(args)) => cmd_note(&store_dir, args),
        Some(Commands::Vocab) => cmd_vocab(&store_dir),
        Some(Commands::Path) => {
            println!("{}", store_dir.display());
            Ok(())
        }
        None => Ok(()),
    }
}

fn save(store_dir: &Path, board: &Board) -> Result<(), StoreError> {
    store::save_board(store_dir, board)?;
    let config = store::load_config(store_dir);
    store::maybe_backup(store_dir, &config.store)?;
    Ok(())
}

fn cmd_add(store_dir: &Path, args: AddArgs) -> Result<(), StoreError> {
    let mut board = store::load_board(store_dir)?;
    let text = args.text.join(" ");
    match board.add_item(&text) {
        Some(id) => {
            save(store_dir, &board)?;
            println!("[+] added #{id}");
            Ok(())
        }
        None => {
            eprintln!("nothing to add (empty text)");
            Ok(())
        }
    }
}

fn cmd_list(store_dir: &Path, args: ListArgs, json: bool) -> Result<(), StoreError> {
    let board = store::load_board(store_dir)?;
    let items: Vec<_> = board
        .items
        .iter()
        .filter(|i| args.all || !i.done)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("queue is empty");
        return Ok(());
    }
    for item in items {
        let marker = if item.done { "x" } else { " " };
        let notes = if item.notes.is_empty() {
            String::new()
        } else {
            format!("  [{}]", item.notes.len())
        };
        println!("[{marker}] #{:<3} {}{notes}", item.id, item.text);
    }
    Ok(())
}

fn cmd_done(store_dir: &Path, args: DoneArgs) -> Result<(), StoreError> {
    let mut board = store::load_board(store_dir)?;
    if !board.toggle_done(args.id) {
        return Err(StoreError::NoSuchItem(args.id));
    }
    let done = board.find(args.id).is_some_and(|i| i.done);
    save(store_dir, &board)?;
    println!(
        "[{}] #{} {}",
        if done { "x" } else { " " },
        args.id,
        if done { "done" } else { "reopened" }
    );
    Ok(())
}

fn cmd_note(store_dir: &Path, args: NoteArgs) -> Result<(), StoreError> {
    let mut board = store::load_board(store_dir)?;
    if board.find(args.id).is_none() {
        return Err(StoreError::NoSuchItem(args.id));
    }
    let text = args.text.join(" ");
    if !board.add_note(args.id, &text) {
        eprintln!("nothing to note (empty text)");
        return Ok(());
    }
    save(store_dir, &board)?;
    println!("[+] noted #{}", args.id);
    Ok(())
}

/// Print the vocabulary the completion engine learns from the current
/// board (what Tab will offer).
fn cmd_vocab(store_dir: &Path) -> Result<(), StoreError> {
    let board = store::load_board(store_dir)?;
    for word in complete::extract(board.text_fragments()) {
        println!("{word}");
    }
    Ok(())
}
