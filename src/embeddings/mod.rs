// Embeddings module
// Ollama integration for chunk embeddings and answer generation

pub mod ollama;

pub use ollama::{EmbeddingResult, OllamaClient};
