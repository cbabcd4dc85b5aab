// Text splitting module
// Produces fixed-size, overlapping character chunks from loaded documents

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loader::Document;
use crate::{PdfChatError, Result};

/// Configuration for document splitting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SplitterConfig {
    /// Maximum chunk size in characters
    pub chunk_size: usize,
    /// Overlap in characters between adjacent chunks
    pub chunk_overlap: usize,
}

impl Default for SplitterConfig {
    #[inline]
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 100,
        }
    }
}

/// A contiguous segment of a document's text, the unit of retrieval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChunk {
    /// The chunk text
    pub content: String,
    /// Path of the source PDF
    pub source: PathBuf,
    /// Index of this chunk within the document
    pub chunk_index: usize,
    /// Length of the chunk in characters
    pub char_count: usize,
}

/// Split a document into overlapping chunks.
///
/// Every chunk is at most `chunk_size` characters long; adjacent chunks
/// overlap by exactly `chunk_overlap` characters, except possibly the final
/// chunk, which keeps at least that much overlap but may be shorter.
#[inline]
pub fn split_document(document: &Document, config: &SplitterConfig) -> Result<Vec<DocumentChunk>> {
    let pieces = split_text(&document.text, config)?;

    let chunks = pieces
        .into_iter()
        .enumerate()
        .map(|(chunk_index, content)| DocumentChunk {
            char_count: content.chars().count(),
            content,
            source: document.source.clone(),
            chunk_index,
        })
        .collect::<Vec<_>>();

    debug!(
        "Split {} into {} chunks",
        document.source.display(),
        chunks.len()
    );

    Ok(chunks)
}

/// Split raw text into overlapping windows of at most `chunk_size` characters.
///
/// Windows advance by `chunk_size - chunk_overlap` characters and always cut
/// on character boundaries, so multi-byte code points are never split.
#[inline]
pub fn split_text(text: &str, config: &SplitterConfig) -> Result<Vec<String>> {
    if config.chunk_size == 0 {
        return Err(PdfChatError::Config(
            "chunk size must be greater than zero".to_string(),
        ));
    }
    if config.chunk_overlap >= config.chunk_size {
        return Err(PdfChatError::Config(format!(
            "chunk overlap ({}) must be smaller than chunk size ({})",
            config.chunk_overlap, config.chunk_size
        )));
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Ok(Vec::new());
    }

    let step = config.chunk_size - config.chunk_overlap;
    let mut pieces = Vec::new();
    let mut start = 0;

    loop {
        let end = (start + config.chunk_size).min(chars.len());
        pieces.push(chars[start..end].iter().collect::<String>());
        if end == chars.len() {
            break;
        }
        start += step;
    }

    Ok(pieces)
}
