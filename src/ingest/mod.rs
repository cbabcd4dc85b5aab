// Ingestion module
// Wires the loader, splitter, embeddings, and vector store into one pipeline

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::PdfChatError;
use crate::config::Config;
use crate::embeddings::OllamaClient;
use crate::loader::{find_pdf_files, load_document};
use crate::splitter::{DocumentChunk, SplitterConfig, split_document};
use crate::store::{ChunkMetadata, EmbeddingRecord, VectorStore};

/// Ingestion pipeline: PDF files in, persisted chunk embeddings out
pub struct IngestionPipeline {
    docs_dir: PathBuf,
    chunking: SplitterConfig,
    ollama: OllamaClient,
    store: VectorStore,
}

/// Summary of one ingestion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestStats {
    pub documents_loaded: usize,
    pub chunks_created: usize,
    pub embeddings_stored: usize,
}

impl IngestionPipeline {
    /// Build the pipeline, creating the vector store if it does not exist yet
    #[inline]
    pub async fn new(config: &Config) -> Result<Self> {
        let store = VectorStore::create(config)
            .await
            .context("Failed to initialize vector store")?;
        let ollama = OllamaClient::new(config).context("Failed to create Ollama client")?;

        Ok(Self {
            docs_dir: config.paths.docs_dir.clone(),
            chunking: config.chunking.clone(),
            ollama,
            store,
        })
    }

    /// Ingest every PDF under the documents directory.
    ///
    /// All matching files are processed, not just the last one found. Fails
    /// with `NothingToIngest` when the directory holds no PDFs, and
    /// propagates the first loader, embedding, or store error; there is no
    /// partial-failure recovery.
    #[inline]
    pub async fn run(&mut self) -> Result<IngestStats> {
        let files = find_pdf_files(&self.docs_dir)?;
        if files.is_empty() {
            return Err(PdfChatError::NothingToIngest(self.docs_dir.clone()).into());
        }

        info!(
            "Ingesting {} PDF files from {}",
            files.len(),
            self.docs_dir.display()
        );

        let mut chunks: Vec<DocumentChunk> = Vec::new();
        let mut documents_loaded = 0;

        for file in &files {
            let document = load_document(file)?;
            let document_chunks = split_document(&document, &self.chunking)?;
            debug!(
                "{}: {} chunks",
                file.display(),
                document_chunks.len()
            );
            chunks.extend(document_chunks);
            documents_loaded += 1;
        }

        let chunks_created = chunks.len();
        info!("Split {} documents into {} chunks", documents_loaded, chunks_created);

        let embeddings = self
            .ollama
            .generate_chunk_embeddings(&chunks)
            .context("Failed to embed chunks")?;

        let created_at = Utc::now().to_rfc3339();
        let records: Vec<EmbeddingRecord> = chunks
            .iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| EmbeddingRecord {
                id: Uuid::new_v4().to_string(),
                vector: embedding.embedding,
                metadata: chunk_metadata(chunk, &created_at),
            })
            .collect();

        let embeddings_stored = records.len();
        self.store
            .store_embeddings_batch(records)
            .await
            .context("Failed to persist embeddings")?;

        info!(
            "Ingestion complete: {} documents, {} chunks, {} embeddings",
            documents_loaded, chunks_created, embeddings_stored
        );

        Ok(IngestStats {
            documents_loaded,
            chunks_created,
            embeddings_stored,
        })
    }

    /// Total number of embeddings currently persisted
    #[inline]
    pub async fn stored_embeddings(&self) -> Result<u64> {
        Ok(self.store.count_embeddings().await?)
    }
}

/// One vector store entry per chunk
fn chunk_metadata(chunk: &DocumentChunk, created_at: &str) -> ChunkMetadata {
    ChunkMetadata {
        chunk_id: format!("{}#{}", chunk.source.display(), chunk.chunk_index),
        source_path: chunk.source.display().to_string(),
        file_name: chunk
            .source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        content: chunk.content.clone(),
        char_count: chunk.char_count as u32,
        chunk_index: chunk.chunk_index as u32,
        created_at: created_at.to_string(),
    }
}
