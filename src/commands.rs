use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::chat::{Answer, ChatSession, QueryEngine};
use crate::config::Config;
use crate::embeddings::OllamaClient;
use crate::ingest::IngestionPipeline;
use crate::store::VectorStore;

/// Ingest all PDFs from the documents directory into the vector store
#[inline]
pub async fn ingest(docs_dir: Option<PathBuf>) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(dir) = docs_dir {
        config.paths.docs_dir = dir;
    }

    info!("Starting ingestion from {}", config.paths.docs_dir.display());

    let mut pipeline = IngestionPipeline::new(&config)
        .await
        .context("Failed to build ingestion pipeline")?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .context("Failed to build progress style")?,
    );
    spinner.set_message("Creating embeddings. This may take a few minutes...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));

    let result = pipeline.run().await;
    spinner.finish_and_clear();

    let stats = result?;

    println!("{}", style("Ingestion complete!").green().bold());
    println!("  Documents loaded:  {}", stats.documents_loaded);
    println!("  Chunks created:    {}", stats.chunks_created);
    println!("  Embeddings stored: {}", stats.embeddings_stored);
    println!();
    println!("You can now ask questions with `pdf-chat ask` or `pdf-chat chat`.");

    Ok(())
}

/// Answer a single question against the ingested documents
#[inline]
pub async fn ask(question: String) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let engine = QueryEngine::new(&config).await?;
    let mut session = ChatSession::new(engine.history_window());

    let answer = engine.answer(&mut session, &question).await?;
    print_answer(&answer);

    Ok(())
}

/// Interactive question-answering loop with conversation memory
#[inline]
pub async fn chat() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let engine = QueryEngine::new(&config).await?;
    let mut session = ChatSession::new(engine.history_window());

    println!(
        "{}",
        style("Chat with your PDFs. Type 'exit' to quit.").bold().cyan()
    );

    loop {
        let question: String = Input::new()
            .with_prompt("You")
            .allow_empty(true)
            .interact_text()?;

        let question = question.trim().to_string();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        match engine.answer(&mut session, &question).await {
            Ok(answer) => print_answer(&answer),
            Err(e) => println!("{} {:#}", style("Error:").red().bold(), e),
        }
    }

    info!(
        "Chat session {} ended after {} exchanges",
        session.id(),
        session.len()
    );

    Ok(())
}

fn print_answer(answer: &Answer) {
    println!();
    println!("{}", answer.text.trim());

    if !answer.sources.is_empty() {
        println!();
        println!("{}", style("Sources:").dim());
        for source in &answer.sources {
            println!(
                "  {} (chunk {})",
                style(&source.file_name).dim(),
                style(source.chunk_index).dim()
            );
        }
    }
    println!();
}

/// Show connectivity and store statistics
#[inline]
pub async fn show_status() -> Result<()> {
    let config = Config::load().unwrap_or_default();

    println!("{}", style("pdf-chat status").bold());
    println!();

    println!("Ollama:");
    match OllamaClient::new(&config) {
        Ok(client) => match client.health_check() {
            Ok(()) => {
                println!(
                    "  {} Connected ({}:{})",
                    style("✓").green(),
                    config.ollama.host,
                    config.ollama.port
                );
                println!("  Embedding model:  {}", config.ollama.embedding_model);
                println!("  Generation model: {}", config.ollama.generation_model);
            }
            Err(e) => {
                println!("  {} Reachable but unhealthy: {:#}", style("!").yellow(), e);
            }
        },
        Err(e) => {
            println!("  {} Failed to create client: {:#}", style("✗").red(), e);
        }
    }

    println!();
    println!("Vector store ({}):", config.paths.store_dir.display());
    match VectorStore::open(&config).await {
        Ok(store) => match store.count_embeddings().await {
            Ok(count) => {
                println!("  {} Available, {} chunk embeddings", style("✓").green(), count);
            }
            Err(e) => {
                println!("  {} Unreadable: {}", style("✗").red(), e);
            }
        },
        Err(e) => {
            println!("  {} {}", style("✗").red(), e);
        }
    }

    println!();
    println!("Documents directory: {}", config.paths.docs_dir.display());
    match crate::loader::find_pdf_files(&config.paths.docs_dir) {
        Ok(files) => println!("  {} PDF files found", files.len()),
        Err(e) => println!("  {} {}", style("✗").red(), e),
    }

    Ok(())
}
