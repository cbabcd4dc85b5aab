// Chat module
// Retrieval-augmented query engine, prompt assembly, and conversation state


pub mod prompt;
pub mod session;

use anyhow::{Context, Result};
use itertools::Itertools;
use tracing::{debug, info};

use crate::config::{Config, GenerationConfig, RetrievalConfig};
use crate::embeddings::OllamaClient;
use crate::store::{ChunkMetadata, SearchResult, VectorStore};

pub use prompt::PromptFields;
pub use session::{ChatSession, Exchange};

/// A generated answer together with the chunks it was conditioned on
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<ChunkMetadata>,
}

/// Application context for the query flow.
///
/// Holds the opened vector store, the Ollama client, and the retrieval and
/// generation settings. Constructed once at startup and passed to command
/// handlers; dropping it releases the store connection.
pub struct QueryEngine {
    store: VectorStore,
    ollama: OllamaClient,
    retrieval: RetrievalConfig,
    generation: GenerationConfig,
}

impl QueryEngine {
    /// Open the vector store and build the engine.
    ///
    /// Fails with a store-unavailable error when no ingested store exists;
    /// there is no automatic rebuild at query time.
    #[inline]
    pub async fn new(config: &Config) -> Result<Self> {
        let store = VectorStore::open(config).await?;
        let ollama = OllamaClient::new(config).context("Failed to create Ollama client")?;

        Ok(Self {
            store,
            ollama,
            retrieval: config.retrieval.clone(),
            generation: config.generation.clone(),
        })
    }

    /// Number of exchanges from the session included in each prompt
    #[inline]
    pub fn history_window(&self) -> usize {
        self.retrieval.history_window
    }

    /// Answer a question against the ingested documents.
    ///
    /// Embeds the question, retrieves the most similar chunks, assembles the
    /// prompt with the session's windowed history, and invokes the generation
    /// model. The exchange is recorded in the session on success. Blocks
    /// until the model returns.
    #[inline]
    pub async fn answer(&self, session: &mut ChatSession, question: &str) -> Result<Answer> {
        let question = question.trim();
        if question.is_empty() {
            anyhow::bail!("Question cannot be empty");
        }

        debug!("Answering question (session {})", session.id());

        let query_embedding = self
            .ollama
            .generate_embedding(question)
            .context("Failed to embed question")?;

        let results = self
            .store
            .search_similar(&query_embedding.embedding, self.retrieval.top_k)
            .await
            .context("Failed to retrieve context chunks")?;

        debug!("Retrieved {} context chunks", results.len());

        let prompt = PromptFields::new()
            .context(context_block(&results))
            .chat_history(session.history_block())
            .question(question)
            .render()?;

        let text = self
            .ollama
            .generate(&prompt, &self.generation)
            .context("Failed to generate answer")?;

        session.record(question, &text);
        info!(
            "Answered question with {} source chunks (session {})",
            results.len(),
            session.id()
        );

        Ok(Answer {
            text,
            sources: results
                .into_iter()
                .map(|result| result.chunk_metadata)
                .collect(),
        })
    }
}

/// Join retrieved chunks into the prompt's context block, best match first
fn context_block(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|result| result.chunk_metadata.content.as_str())
        .join("\n\n")
}
