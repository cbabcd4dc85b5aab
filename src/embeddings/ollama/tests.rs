use super::*;
use crate::config::{Config, OllamaConfig};

fn test_config() -> Config {
    Config {
        ollama: OllamaConfig {
            host: "test-host".to_string(),
            port: 1234,
            embedding_model: "test-embed".to_string(),
            generation_model: "test-generate".to_string(),
            batch_size: 128,
            ..OllamaConfig::default()
        },
        ..Config::default()
    }
}

#[test]
fn client_configuration() {
    let client = OllamaClient::new(&test_config()).expect("Failed to create client");

    assert_eq!(client.embedding_model, "test-embed");
    assert_eq!(client.generation_model, "test-generate");
    assert_eq!(client.batch_size, 128);
    assert_eq!(client.base_url.host_str(), Some("test-host"));
    assert_eq!(client.base_url.port(), Some(1234));
    assert_eq!(client.retry_attempts, DEFAULT_RETRY_ATTEMPTS);
}

#[test]
fn client_builder_methods() {
    let client = OllamaClient::new(&Config::default())
        .expect("Failed to create client")
        .with_timeout(Duration::from_secs(60))
        .with_retry_attempts(5);

    assert_eq!(client.retry_attempts, 5);
}

#[test]
fn generate_request_serializes_sampling_options() {
    let request = GenerateRequest {
        model: "test-generate".to_string(),
        prompt: "What color is the sky?".to_string(),
        stream: false,
        options: GenerateOptions {
            num_predict: 256,
            temperature: 0.3,
            top_p: 0.95,
        },
    };

    let json = serde_json::to_value(&request).expect("should serialize");

    assert_eq!(json["stream"], false);
    assert_eq!(json["options"]["num_predict"], 256);
    assert!((json["options"]["temperature"].as_f64().expect("f64") - 0.3).abs() < 1e-6);
    assert!((json["options"]["top_p"].as_f64().expect("f64") - 0.95).abs() < 1e-6);
}

#[test]
fn embedding_result_structure() {
    let result = EmbeddingResult {
        text: "test text".to_string(),
        embedding: vec![0.1, 0.2, 0.3, 0.4, 0.5],
        char_count: 9,
        chunk_index: Some(0),
        source: Some("docs/report.pdf".to_string()),
    };

    assert_eq!(result.text, "test text");
    assert_eq!(result.embedding.len(), 5);
    assert_eq!(result.char_count, 9);
    assert_eq!(result.chunk_index, Some(0));
    assert_eq!(result.source.as_deref(), Some("docs/report.pdf"));
}

#[test]
fn chunk_embeddings_empty_input() {
    let client = OllamaClient::new(&Config::default()).expect("Failed to create client");
    let chunks: Vec<crate::splitter::DocumentChunk> = Vec::new();

    let results = client
        .generate_chunk_embeddings(&chunks)
        .expect("empty input should not touch the network");
    assert!(results.is_empty());
}

#[test]
fn batch_embeddings_empty_input() {
    let client = OllamaClient::new(&Config::default()).expect("Failed to create client");

    let results = client
        .generate_embeddings_batch(&[])
        .expect("empty input should not touch the network");
    assert!(results.is_empty());
}

#[test]
fn embed_request_uses_embedding_model() {
    let request = EmbedRequest {
        model: "nomic-embed-text:latest".to_string(),
        prompt: "The sky is blue.".to_string(),
    };

    let json = serde_json::to_value(&request).expect("should serialize");
    assert_eq!(json["model"], "nomic-embed-text:latest");
    assert_eq!(json["prompt"], "The sky is blue.");
}
