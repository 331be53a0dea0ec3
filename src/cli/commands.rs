use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jt", about = concat!("[>] jot v", env!("CARGO_PKG_VERSION"), " - a keyboard-driven note queue"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different store directory
    #[arg(short = 'C', long = "store-dir", global = true)]
    pub store_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add an item to the queue
    Add(AddArgs),
    /// List queued items
    List(ListArgs),
    /// Mark an item done (toggles)
    Done(DoneArgs),
    /// Attach a follow-up note to an item
    Note(NoteArgs),
    /// Print the learned completion vocabulary
    Vocab,
    /// Print the store directory path
    Path,
}

#[derive(Args)]
pub struct AddArgs {
    /// Item text (joined with spaces)
    #[arg(required = true)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Include done items
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct DoneArgs {
    /// Item id
    pub id: u64,
}

#[derive(Args)]
pub struct NoteArgs {
    /// Item id
    pub id: u64,
    /// Note text (joined with spaces)
    #[arg(required = true)]
    pub text: Vec<String>,
}
