use super::*;
use std::path::PathBuf;

fn config(chunk_size: usize, chunk_overlap: usize) -> SplitterConfig {
    SplitterConfig {
        chunk_size,
        chunk_overlap,
    }
}

#[test]
fn short_text_is_a_single_chunk() {
    let pieces = split_text("The sky is blue.", &SplitterConfig::default())
        .expect("split should succeed");

    assert_eq!(pieces, vec!["The sky is blue.".to_string()]);
}

#[test]
fn empty_text_produces_no_chunks() {
    let pieces = split_text("", &SplitterConfig::default()).expect("split should succeed");
    assert!(pieces.is_empty());
}

#[test]
fn chunks_respect_max_size() {
    let text = "abcdefghij".repeat(100);
    let cfg = config(120, 30);

    let pieces = split_text(&text, &cfg).expect("split should succeed");

    for piece in &pieces {
        assert!(piece.chars().count() <= cfg.chunk_size);
    }
}

#[test]
fn adjacent_chunks_overlap_exactly() {
    let text = "abcdefghij".repeat(100);
    let cfg = config(120, 30);

    let pieces = split_text(&text, &cfg).expect("split should succeed");
    assert!(pieces.len() > 1);

    for pair in pieces.windows(2) {
        let prev: Vec<char> = pair[0].chars().collect();
        let tail: String = prev[prev.len() - cfg.chunk_overlap..].iter().collect();
        assert!(
            pair[1].starts_with(&tail),
            "next chunk should start with the previous chunk's last {} chars",
            cfg.chunk_overlap
        );
    }
}

#[test]
fn reassembly_recovers_original_text() {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(50);
    let cfg = config(100, 20);
    let step = cfg.chunk_size - cfg.chunk_overlap;

    let pieces = split_text(&text, &cfg).expect("split should succeed");

    let mut rebuilt: Vec<char> = Vec::new();
    for (i, piece) in pieces.iter().enumerate() {
        let chars: Vec<char> = piece.chars().collect();
        if i == 0 {
            rebuilt.extend(chars);
        } else {
            rebuilt.truncate(i * step);
            rebuilt.extend(chars);
        }
    }

    assert_eq!(rebuilt.into_iter().collect::<String>(), text);
}

#[test]
fn multibyte_text_splits_on_char_boundaries() {
    let text = "日本語のテキスト。".repeat(100);
    let cfg = config(50, 10);

    let pieces = split_text(&text, &cfg).expect("split should succeed");

    for piece in &pieces {
        assert!(piece.chars().count() <= cfg.chunk_size);
    }
}

#[test]
fn overlap_must_be_smaller_than_chunk_size() {
    // An overlap equal to the chunk size would never advance the window
    let result = split_text("some text", &config(500, 500));
    assert!(matches!(result, Err(crate::PdfChatError::Config(_))));
}

#[test]
fn zero_chunk_size_is_rejected() {
    let result = split_text("some text", &config(0, 0));
    assert!(matches!(result, Err(crate::PdfChatError::Config(_))));
}

#[test]
fn split_document_indexes_chunks() {
    let document = crate::loader::Document {
        source: PathBuf::from("docs/report.pdf"),
        text: "word ".repeat(300),
    };

    let chunks = split_document(&document, &SplitterConfig::default())
        .expect("split should succeed");

    assert!(chunks.len() > 1);
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.chunk_index, i);
        assert_eq!(chunk.source, document.source);
        assert_eq!(chunk.char_count, chunk.content.chars().count());
        assert!(chunk.char_count <= 500);
    }
}
