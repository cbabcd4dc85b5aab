// Vector store module
// LanceDB-backed persistence for chunk embeddings and similarity search

pub mod vector_store;

use serde::{Deserialize, Serialize};

pub use vector_store::{SearchResult, VectorStore};

/// Embedding record persisted in the vector store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    /// Unique identifier for this record
    pub id: String,
    /// The vector embedding (768 dimensions for nomic-embed-text)
    pub vector: Vec<f32>,
    /// Metadata about the chunk this embedding represents
    pub metadata: ChunkMetadata,
}

/// Metadata stored alongside each chunk embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Unique identifier for the chunk
    pub chunk_id: String,
    /// Path of the source PDF
    pub source_path: String,
    /// File name of the source PDF, for display
    pub file_name: String,
    /// The actual text content of the chunk
    pub content: String,
    /// Length of the chunk in characters
    pub char_count: u32,
    /// Index of this chunk within its document (for ordering)
    pub chunk_index: u32,
    /// Timestamp when this embedding was created
    pub created_at: String,
}
