// Document loading module
// Handles PDF discovery and text extraction for the ingestion pipeline


use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{PdfChatError, Result};

/// Raw text extracted from a single PDF file.
///
/// Documents are created at load time and discarded after splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path of the source PDF
    pub source: PathBuf,
    /// Full extracted text, whitespace-normalized
    pub text: String,
}

/// Recursively find all PDF files under `dir`, sorted by path.
///
/// A missing directory is treated the same as an empty one; the caller
/// decides whether an empty result is an error.
#[inline]
pub fn find_pdf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if !dir.exists() {
        debug!("Documents directory {} does not exist", dir.display());
        return Ok(files);
    }

    collect_pdf_files(dir, &mut files)?;
    files.sort();

    debug!("Found {} PDF files in {}", files.len(), dir.display());
    Ok(files)
}

fn collect_pdf_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_pdf_files(&path, files)?;
        } else if is_pdf(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Load a PDF file and extract its text content.
///
/// Non-PDF paths are rejected before any bytes are read. Extraction goes
/// through pdf-extract first, falling back to lopdf when that fails on
/// unusual font encodings.
#[inline]
pub fn load_document(path: &Path) -> Result<Document> {
    if !is_pdf(path) {
        return Err(PdfChatError::Loader(format!(
            "unsupported file type: {} (only PDF files can be ingested)",
            path.display()
        )));
    }

    debug!("Loading PDF document: {}", path.display());

    let bytes = std::fs::read(path).map_err(|e| {
        PdfChatError::Loader(format!("failed to read {}: {}", path.display(), e))
    })?;

    let raw_text = match pdf_extract::extract_text_from_mem(&bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!(
                "pdf-extract failed for {}: {}, trying lopdf fallback",
                path.display(),
                e
            );
            extract_text_fallback(&bytes, path)?
        }
    };

    let text = normalize_text(&raw_text);
    if text.is_empty() {
        return Err(PdfChatError::Loader(format!(
            "no text content could be extracted from {} (image-only or encrypted PDF?)",
            path.display()
        )));
    }

    debug!(
        "Extracted {} characters from {}",
        text.chars().count(),
        path.display()
    );

    Ok(Document {
        source: path.to_path_buf(),
        text,
    })
}

/// Fallback extraction using lopdf's page-level text API
fn extract_text_fallback(bytes: &[u8], path: &Path) -> Result<String> {
    let doc = lopdf::Document::load_mem(bytes).map_err(|e| {
        PdfChatError::Loader(format!("failed to parse {}: {}", path.display(), e))
    })?;

    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    doc.extract_text(&pages).map_err(|e| {
        PdfChatError::Loader(format!(
            "failed to extract text from {}: {}",
            path.display(),
            e
        ))
    })
}

/// Strip null bytes and collapse the ragged line structure PDF extractors
/// tend to produce
fn normalize_text(raw: &str) -> String {
    raw.replace('\0', "")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
