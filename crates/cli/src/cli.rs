use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use nest_core::{LengthUnit, SplitterStrategy};

/// Chunk, index and query local documents in memory.
///
/// Provider settings (API keys, models, chunk sizes) come from the
/// environment or a `.env` file; `NEST_PROFILE` selects a key prefix.
#[derive(Parser, Debug)]
#[command(name = "nest", version, about = "In-memory document chunking and semantic search")]
pub struct CliArgs {
    /// Log at info level (RUST_LOG still wins when set)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split a document and print its chunks
    Split(SplitArgs),
    /// Index documents and print the chunks closest to a query
    Search(SearchArgs),
    /// Index documents and answer a question from the closest chunks
    Ask(AskArgs),
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Document to split (.txt, .md or .pdf)
    pub file: PathBuf,

    #[arg(long)]
    pub chunk_size: Option<usize>,

    #[arg(long)]
    pub chunk_overlap: Option<usize>,

    /// recursive or paragraph
    #[arg(long)]
    pub strategy: Option<SplitterStrategy>,

    /// characters, words or tokens
    #[arg(long)]
    pub unit: Option<LengthUnit>,

    /// Print chunks as a JSON array
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Documents to index
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[arg(long, short)]
    pub query: String,

    /// Number of results (defaults to SEARCH_TOP_K)
    #[arg(short)]
    pub k: Option<usize>,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Documents to index
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[arg(long)]
    pub question: String,

    /// Number of chunks given to the model (defaults to SEARCH_TOP_K)
    #[arg(short)]
    pub k: Option<usize>,
}
