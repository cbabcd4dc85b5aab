use super::*;
use crate::config::PathsConfig;
use std::path::Path;
use tempfile::TempDir;

fn test_config(temp_dir: &TempDir) -> Config {
    Config {
        paths: PathsConfig {
            docs_dir: temp_dir.path().join("docs"),
            store_dir: temp_dir.path().join("db"),
        },
        ..Config::default()
    }
}

#[tokio::test]
async fn empty_docs_dir_is_nothing_to_ingest() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config = test_config(&temp_dir);
    std::fs::create_dir_all(&config.paths.docs_dir).expect("mkdir");

    let mut pipeline = IngestionPipeline::new(&config)
        .await
        .expect("pipeline construction should not need the network");

    let error = pipeline.run().await.expect_err("run should fail");
    assert!(matches!(
        error.downcast_ref::<PdfChatError>(),
        Some(PdfChatError::NothingToIngest(_))
    ));
}

#[tokio::test]
async fn missing_docs_dir_is_nothing_to_ingest() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config = test_config(&temp_dir);

    let mut pipeline = IngestionPipeline::new(&config)
        .await
        .expect("pipeline construction should succeed");

    let error = pipeline.run().await.expect_err("run should fail");
    assert!(matches!(
        error.downcast_ref::<PdfChatError>(),
        Some(PdfChatError::NothingToIngest(_))
    ));
}

#[tokio::test]
async fn non_pdf_files_are_not_ingested() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config = test_config(&temp_dir);
    std::fs::create_dir_all(&config.paths.docs_dir).expect("mkdir");
    std::fs::write(config.paths.docs_dir.join("notes.txt"), b"plain text").expect("write");

    let mut pipeline = IngestionPipeline::new(&config)
        .await
        .expect("pipeline construction should succeed");

    // Only PDFs count as input; a directory of other files has nothing to ingest
    let error = pipeline.run().await.expect_err("run should fail");
    assert!(matches!(
        error.downcast_ref::<PdfChatError>(),
        Some(PdfChatError::NothingToIngest(_))
    ));
}

#[test]
fn chunk_metadata_carries_source_and_index() {
    let chunk = DocumentChunk {
        content: "The sky is blue.".to_string(),
        source: Path::new("docs/report.pdf").to_path_buf(),
        chunk_index: 7,
        char_count: 16,
    };

    let metadata = chunk_metadata(&chunk, "2024-01-01T00:00:00Z");

    assert_eq!(metadata.chunk_id, "docs/report.pdf#7");
    assert_eq!(metadata.source_path, "docs/report.pdf");
    assert_eq!(metadata.file_name, "report.pdf");
    assert_eq!(metadata.content, "The sky is blue.");
    assert_eq!(metadata.char_count, 16);
    assert_eq!(metadata.chunk_index, 7);
    assert_eq!(metadata.created_at, "2024-01-01T00:00:00Z");
}

#[test]
fn one_record_per_chunk() {
    // The invariant behind the stats: records are built by zipping chunks
    // with their embeddings one-to-one
    let document = crate::loader::Document {
        source: Path::new("docs/report.pdf").to_path_buf(),
        text: "word ".repeat(400),
    };
    let chunks = crate::splitter::split_document(&document, &crate::splitter::SplitterConfig::default())
        .expect("split should succeed");

    let created_at = "2024-01-01T00:00:00Z";
    let records: Vec<ChunkMetadata> = chunks
        .iter()
        .map(|chunk| chunk_metadata(chunk, created_at))
        .collect();

    assert_eq!(records.len(), chunks.len());
    for (record, chunk) in records.iter().zip(&chunks) {
        assert_eq!(record.chunk_index as usize, chunk.chunk_index);
    }
}
