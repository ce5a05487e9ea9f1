mod cli;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use nest_core::config::{load_dotenv, Config};
use nest_ingest::document::chunker::{split_document, LengthFunction};
use nest_ingest::embedding::create_embedder;
use nest_ingest::{build_splitter, extract_file, Indexer};
use nest_store::SearchHit;

use crate::cli::{AskArgs, CliArgs, Command, SearchArgs, SplitArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    load_dotenv();
    let config = Config::from_env();
    config.log_summary();

    match args.command {
        Command::Split(split) => run_split(config, split),
        Command::Search(search) => run_search(&config, search).await,
        Command::Ask(ask) => run_ask(&config, ask).await,
    }
}

fn run_split(mut config: Config, args: SplitArgs) -> Result<()> {
    let splitter_config = &mut config.splitter;
    if let Some(size) = args.chunk_size {
        splitter_config.chunk_size = size;
    }
    if let Some(overlap) = args.chunk_overlap {
        splitter_config.chunk_overlap = overlap;
    }
    if let Some(strategy) = args.strategy {
        splitter_config.strategy = strategy;
    }
    if let Some(unit) = args.unit {
        splitter_config.length_unit = unit;
    }

    let splitter = build_splitter(splitter_config).context("invalid splitter configuration")?;
    let doc = extract_file(&args.file)
        .with_context(|| format!("failed to extract {}", args.file.display()))?;
    let chunks = split_document(&doc, splitter.as_ref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&chunks)?);
        return Ok(());
    }
    let length = LengthFunction::from_unit(splitter_config.length_unit)
        .context("failed to load length function")?;
    for (i, chunk) in chunks.iter().enumerate() {
        println!("{}", chunk_header(i, chunk, &length));
        println!("{chunk}\n");
    }
    info!(chunks = chunks.len(), "split complete");
    Ok(())
}

/// Chunk banner, with the size measured in the unit the splitter budgets in.
fn chunk_header(index: usize, chunk: &str, length: &LengthFunction) -> String {
    format!(
        "── chunk {} ({} {}) ──",
        index + 1,
        length.measure(chunk),
        length.unit()
    )
}

async fn build_index(config: &Config, files: &[PathBuf]) -> Result<Indexer> {
    let embedder = create_embedder(config).context("failed to create embedding provider")?;
    let indexer = Indexer::from_config(config, embedder).context("failed to build indexer")?;
    for file in files {
        let report = indexer
            .index_file(file)
            .await
            .with_context(|| format!("failed to index {}", file.display()))?;
        info!(file = %file.display(), chunks = report.chunks, total = report.total_chunks, "indexed");
    }
    Ok(indexer)
}

fn print_hits(hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("No results.");
        return;
    }
    for (rank, hit) in hits.iter().enumerate() {
        println!("{}. [score {:.4}] chunk #{}", rank + 1, hit.score, hit.index);
        println!("{}\n", hit.chunk);
    }
}

async fn run_search(config: &Config, args: SearchArgs) -> Result<()> {
    let indexer = build_index(config, &args.files).await?;
    let k = args.k.unwrap_or(config.search.top_k);
    let hits = indexer.query(&args.query, k).await.context("search failed")?;
    print_hits(&hits);
    Ok(())
}

async fn run_ask(config: &Config, args: AskArgs) -> Result<()> {
    let provider = nest_llm::create_provider(config).context("failed to create LLM provider")?;
    let indexer = build_index(config, &args.files).await?;
    let k = args.k.unwrap_or(config.search.top_k);
    let hits = indexer.query(&args.question, k).await.context("search failed")?;

    let reply = nest_llm::answer(provider.as_ref(), &args.question, &hits, &config.llm)
        .await
        .context("LLM request failed")?;
    println!("Q: {}\nA: {}", args.question, reply);
    Ok(())
}
