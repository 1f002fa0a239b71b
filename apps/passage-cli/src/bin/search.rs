use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use passage_core::config::{resolve_with_base, Config};
use passage_core::corpus::DirectorySource;
use passage_core::traits::{DocumentSource, EmbedProvider};
use passage_embed::{default_provider, ParallelProvider};
use passage_narrow::CorpusSearch;
use passage_segment::SentenceSegmenter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let json_output = args.iter().any(|a| a == "--json");
    let positional: Vec<&String> = args.iter().skip(1).filter(|a| !a.starts_with("--")).collect();

    let config = Config::load()?;
    let settings = config.settings()?;

    let query = match positional.first() {
        Some(q) => (*q).clone(),
        None => prompt("Enter search term: ")?,
    };
    if query.trim().is_empty() {
        eprintln!("Usage: passage-search <query> [data_dir] [--json]");
        std::process::exit(1);
    }

    let data_dir = resolve_with_base(
        &env::current_dir()?,
        positional.get(1).map_or(settings.data_dir.as_str(), |s| s.as_str()),
    );

    println!("🔍 passage-search\n=================");
    println!("Query: {}", query);
    println!("Corpus: {}", data_dir.display());

    let documents = DirectorySource::new(data_dir).load()?;
    println!("Loaded {} documents", documents.len());

    let provider: Arc<dyn EmbedProvider> = Arc::from(default_provider());
    tracing::info!(embedder = provider.embedder_id(), "provider ready");
    let provider = ParallelProvider::new(provider)?;
    let engine = CorpusSearch::new(
        Box::new(provider),
        Box::new(SentenceSegmenter),
        settings.search.clone(),
    )?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message("searching...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let hits = engine.search(&documents, &query)?;
    spinner.finish_and_clear();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    println!("\n🔍 Found {} passages for: \"{}\"", hits.len(), query);
    for (i, hit) in hits.iter().enumerate() {
        println!("\n  {}. score={:.4}  doc={}", i + 1, hit.score, hit.doc_id);
        println!("     📝 {}", hit.text);
    }
    Ok(())
}

fn prompt(msg: &str) -> Result<String> {
    print!("{msg}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
