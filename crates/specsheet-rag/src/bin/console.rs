//! Spec-sheet assistant console
//!
//! Run with: cargo run -p specsheet-rag
//! Requires GOOGLE_API_KEY in the environment or a .env file.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use console::style;
use indicatif::ProgressBar;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use specsheet_rag::config::API_KEY_ENV;
use specsheet_rag::providers::{EmbeddingProvider, GeminiProvider, LlmProvider};
use specsheet_rag::{Answer, AssistantConfig, ChainCell, RetrievalQa};

#[derive(Parser)]
#[command(name = "specsheet-rag")]
#[command(about = "Ask questions about a laptop spec sheet, answered from a local knowledge file")]
#[command(version)]
struct Cli {
    /// One-shot question; omit to start the interactive prompt
    question: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Knowledge file override
    #[arg(long)]
    knowledge: Option<PathBuf>,

    /// Print the retrieved source chunks under each answer
    #[arg(long)]
    show_sources: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "specsheet_rag=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = AssistantConfig::load(cli.config.as_deref())?;
    if let Some(knowledge) = cli.knowledge {
        config.knowledge.path = knowledge;
    }

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                  Spec Sheet AI Assistant                  ║
║         Retrieval-Augmented Q&A over a local file         ║
╚═══════════════════════════════════════════════════════════╝
"#
    );
    println!(
        "  Subject:   {}",
        style(&config.knowledge.subject).cyan().bold()
    );
    println!("  Knowledge: {}", config.knowledge.path.display());
    println!(
        "  Models:    {} / {}",
        config.gemini.embed_model, config.gemini.generate_model
    );
    println!();
    println!("  Answers use Retrieval-Augmented Generation over the knowledge");
    println!("  file above; the AI can only answer from the data it was given.");
    println!();

    let provider = GeminiProvider::from_env(&config.gemini)
        .with_context(|| format!("set {} in your environment or .env file", API_KEY_ENV))?;
    let (embedder, generator) = provider.split();
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(embedder);
    let llm: Arc<dyn LlmProvider> = Arc::new(generator);

    match embedder.health_check().await {
        Ok(true) => {}
        _ => tracing::warn!(
            "Embedding model {} is not reachable, requests may fail",
            config.gemini.embed_model
        ),
    }
    match llm.health_check().await {
        Ok(true) => {}
        _ => tracing::warn!(
            "Generation model {} is not reachable, requests may fail",
            config.gemini.generate_model
        ),
    }

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Indexing {}...", config.knowledge.path.display()));

    let cell = ChainCell::new();
    let built = cell.get_or_build(&config, embedder, llm).await;
    spinner.finish_and_clear();
    let chain = built?;

    println!("  Indexed {} chunks.\n", chain.chunk_count());

    match cli.question {
        Some(question) => ask(&chain, &question, cli.show_sources).await?,
        None => prompt_loop(&chain, cli.show_sources).await?,
    }

    Ok(())
}

/// Interactive prompt; one question at a time until exit/quit/EOF
async fn prompt_loop(chain: &RetrievalQa, show_sources: bool) -> anyhow::Result<()> {
    println!("Ask me anything about my {}!", chain.subject());
    println!(
        "{}",
        style("e.g., How much RAM does it have? (exit to quit)").dim()
    );
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break; // EOF
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if input == "exit" || input == "quit" {
            break;
        }

        if let Err(e) = ask(chain, input, show_sources).await {
            println!("{}", style(format!("Error: {}", e)).red());
            println!();
        }
    }

    Ok(())
}

async fn ask(chain: &RetrievalQa, question: &str, show_sources: bool) -> specsheet_rag::Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Consulting the official specs...");

    let result = chain.answer(question).await;
    spinner.finish_and_clear();

    let answer = result?;
    print_answer(&answer, show_sources);
    Ok(())
}

fn print_answer(answer: &Answer, show_sources: bool) {
    println!();
    if answer.refused {
        println!("{}", style(&answer.text).yellow());
    } else {
        println!("{}", style("Answer").green().bold());
        println!("{}", answer.text);
    }

    if show_sources {
        println!();
        println!("{}", style("Sources").bold());
        for source in &answer.sources {
            println!(
                "{}",
                style(format!(
                    "  [{}] similarity {:.3}: {}",
                    source.chunk.chunk_index,
                    source.similarity,
                    snippet(&source.chunk.content)
                ))
                .dim()
            );
        }
    }
    println!();
}

/// First line's worth of a chunk, flattened for one-line display
fn snippet(content: &str) -> String {
    const MAX_CHARS: usize = 80;

    let flat = content.replace('\n', " ");
    if flat.chars().count() <= MAX_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(MAX_CHARS).collect();
        format!("{}...", cut)
    }
}
