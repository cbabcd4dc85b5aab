
use super::{ChunkMetadata, EmbeddingRecord};
use crate::{PdfChatError, config::Config};
use arrow::array::{
    Array, FixedSizeListArray, Float32Array, RecordBatchIterator, StringArray, UInt32Array,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use futures::TryStreamExt;
use lancedb::{
    Connection,
    query::{ExecutableQuery, QueryBase},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

const TABLE_NAME: &str = "chunks";

/// Persistent vector store for chunk embeddings, backed by LanceDB
pub struct VectorStore {
    connection: Connection,
    table_name: String,
    vector_dimension: Option<usize>,
}

/// A retrieved chunk with its similarity to the query
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub chunk_metadata: ChunkMetadata,
    pub similarity_score: f32,
    pub distance: f32,
}

impl VectorStore {
    /// Open or create the vector store for ingestion.
    ///
    /// Creates the store directory and the chunks table if they do not exist;
    /// the table is appended to across ingestion runs.
    #[inline]
    pub async fn create(config: &Config) -> Result<Self, PdfChatError> {
        let mut store = Self::connect(&config.paths.store_dir, true).await?;
        store
            .initialize_table(config.ollama.embedding_dimension as usize)
            .await?;
        info!("Vector store ready at {}", config.paths.store_dir.display());
        Ok(store)
    }

    /// Open an existing vector store for querying.
    ///
    /// Fails with `StoreUnavailable` when the store directory or table does
    /// not exist; there is no automatic rebuild.
    #[inline]
    pub async fn open(config: &Config) -> Result<Self, PdfChatError> {
        let store_dir = &config.paths.store_dir;
        if !store_dir.exists() {
            return Err(PdfChatError::StoreUnavailable(format!(
                "no vector store at {} (run `pdf-chat ingest` first)",
                store_dir.display()
            )));
        }

        let mut store = Self::connect(store_dir, false).await?;

        let table_names = store
            .connection
            .table_names()
            .execute()
            .await
            .map_err(|e| PdfChatError::StoreUnavailable(format!("failed to list tables: {}", e)))?;

        if !table_names.contains(&store.table_name) {
            return Err(PdfChatError::StoreUnavailable(format!(
                "vector store at {} has no '{}' table (run `pdf-chat ingest` first)",
                store_dir.display(),
                store.table_name
            )));
        }

        let dimension = store.detect_existing_vector_dimension().await?;
        store.vector_dimension = Some(dimension);

        debug!("Opened vector store with {} dimensions", dimension);
        Ok(store)
    }

    async fn connect(store_dir: &Path, create_dir: bool) -> Result<Self, PdfChatError> {
        if create_dir {
            std::fs::create_dir_all(store_dir).map_err(|e| {
                PdfChatError::Store(format!("failed to create store directory: {}", e))
            })?;
        }

        let abs_dir: PathBuf = std::fs::canonicalize(store_dir).map_err(|e| {
            PdfChatError::Store(format!(
                "failed to resolve store directory {}: {}",
                store_dir.display(),
                e
            ))
        })?;

        let uri = format!("file://{}", abs_dir.display());
        debug!("Connecting to LanceDB at {}", uri);

        let connection = lancedb::connect(&uri).execute().await.map_err(|e| {
            PdfChatError::StoreUnavailable(format!("failed to connect to LanceDB: {}", e))
        })?;

        Ok(Self {
            connection,
            table_name: TABLE_NAME.to_string(),
            vector_dimension: None,
        })
    }

    /// Create the chunks table if missing; detect dimension when it exists
    async fn initialize_table(&mut self, default_dimension: usize) -> Result<(), PdfChatError> {
        let table_names = self
            .connection
            .table_names()
            .execute()
            .await
            .map_err(|e| PdfChatError::Store(format!("failed to list tables: {}", e)))?;

        if table_names.contains(&self.table_name) {
            let dimension = self.detect_existing_vector_dimension().await?;
            self.vector_dimension = Some(dimension);
            debug!("Chunks table exists with {} dimensions", dimension);
            return Ok(());
        }

        let schema = self.create_schema(default_dimension);
        self.connection
            .create_empty_table(&self.table_name, schema)
            .execute()
            .await
            .map_err(|e| PdfChatError::Store(format!("failed to create table: {}", e)))?;

        self.vector_dimension = Some(default_dimension);
        info!(
            "Created chunks table with {} dimensions",
            default_dimension
        );
        Ok(())
    }

    /// Detect vector dimension from the existing table schema
    async fn detect_existing_vector_dimension(&self) -> Result<usize, PdfChatError> {
        let table = self
            .connection
            .open_table(&self.table_name)
            .execute()
            .await
            .map_err(|e| PdfChatError::Store(format!("failed to open table: {}", e)))?;

        let schema = table
            .schema()
            .await
            .map_err(|e| PdfChatError::Store(format!("failed to get table schema: {}", e)))?;

        for field in schema.fields() {
            if field.name() == "vector" {
                if let DataType::FixedSizeList(_, size) = field.data_type() {
                    return Ok(*size as usize);
                }
            }
        }

        Err(PdfChatError::Store(
            "could not find vector column or determine dimension".to_string(),
        ))
    }

    fn create_schema(&self, vector_dim: usize) -> Arc<Schema> {
        Arc::new(Schema::new(vec![
            Field::new("id", DataType::Utf8, false),
            Field::new(
                "vector",
                DataType::FixedSizeList(
                    Arc::new(Field::new("item", DataType::Float32, false)),
                    vector_dim as i32,
                ),
                false,
            ),
            Field::new("chunk_id", DataType::Utf8, false),
            Field::new("source_path", DataType::Utf8, false),
            Field::new("file_name", DataType::Utf8, false),
            Field::new("content", DataType::Utf8, false),
            Field::new("char_count", DataType::UInt32, false),
            Field::new("chunk_index", DataType::UInt32, false),
            Field::new("created_at", DataType::Utf8, false),
        ]))
    }

    /// Append a batch of embedding records to the store
    #[inline]
    pub async fn store_embeddings_batch(
        &mut self,
        records: Vec<EmbeddingRecord>,
    ) -> Result<(), PdfChatError> {
        if records.is_empty() {
            debug!("No embeddings to store");
            return Ok(());
        }

        debug!("Storing batch of {} embeddings", records.len());

        // Recreate the table if the embedding model's dimension changed
        let vector_dim = records[0].vector.len();
        if self.vector_dimension != Some(vector_dim) {
            info!(
                "Vector dimension changed from {:?} to {}, recreating table",
                self.vector_dimension, vector_dim
            );
            self.recreate_table_with_dimension(vector_dim).await?;
            self.vector_dimension = Some(vector_dim);
        }

        let record_batch = self.create_record_batch(&records)?;

        let table = self
            .connection
            .open_table(&self.table_name)
            .execute()
            .await
            .map_err(|e| PdfChatError::Store(format!("failed to open table: {}", e)))?;

        let schema = record_batch.schema();
        let reader = RecordBatchIterator::new(std::iter::once(Ok(record_batch)), schema);
        table
            .add(reader)
            .execute()
            .await
            .map_err(|e| PdfChatError::Store(format!("failed to insert embeddings: {}", e)))?;

        info!("Stored {} embeddings", records.len());
        Ok(())
    }

    async fn recreate_table_with_dimension(&self, vector_dim: usize) -> Result<(), PdfChatError> {
        let table_names = self
            .connection
            .table_names()
            .execute()
            .await
            .map_err(|e| PdfChatError::Store(format!("failed to list tables: {}", e)))?;

        if table_names.contains(&self.table_name) {
            self.connection
                .drop_table(&self.table_name)
                .await
                .map_err(|e| PdfChatError::Store(format!("failed to drop table: {}", e)))?;
        }

        let schema = self.create_schema(vector_dim);
        self.connection
            .create_empty_table(&self.table_name, schema)
            .execute()
            .await
            .map_err(|e| {
                PdfChatError::Store(format!("failed to create table with new dimensions: {}", e))
            })?;

        Ok(())
    }

    fn create_record_batch(&self, records: &[EmbeddingRecord]) -> Result<RecordBatch, PdfChatError> {
        let len = records.len();
        let vector_dim = self
            .vector_dimension
            .ok_or_else(|| PdfChatError::Store("vector dimension not set".to_string()))?;

        let mut ids = Vec::with_capacity(len);
        let mut vectors = Vec::with_capacity(len);
        let mut chunk_ids = Vec::with_capacity(len);
        let mut source_paths = Vec::with_capacity(len);
        let mut file_names = Vec::with_capacity(len);
        let mut contents = Vec::with_capacity(len);
        let mut char_counts = Vec::with_capacity(len);
        let mut chunk_indices = Vec::with_capacity(len);
        let mut created_ats = Vec::with_capacity(len);

        for record in records {
            ids.push(record.id.as_str());
            vectors.push(record.vector.clone());
            chunk_ids.push(record.metadata.chunk_id.as_str());
            source_paths.push(record.metadata.source_path.as_str());
            file_names.push(record.metadata.file_name.as_str());
            contents.push(record.metadata.content.as_str());
            char_counts.push(record.metadata.char_count);
            chunk_indices.push(record.metadata.chunk_index);
            created_ats.push(record.metadata.created_at.as_str());
        }

        let schema = self.create_schema(vector_dim);

        let mut flat_values = Vec::with_capacity(len * vector_dim);
        for vector in &vectors {
            flat_values.extend_from_slice(vector);
        }
        let values_array = Float32Array::from(flat_values);
        let field = Arc::new(Field::new("item", DataType::Float32, false));
        let vector_array =
            FixedSizeListArray::try_new(field, vector_dim as i32, Arc::new(values_array), None)
                .map_err(|e| {
                    PdfChatError::Store(format!("failed to create vector array: {}", e))
                })?;

        let arrays: Vec<Arc<dyn arrow::array::Array>> = vec![
            Arc::new(StringArray::from(ids)),
            Arc::new(vector_array),
            Arc::new(StringArray::from(chunk_ids)),
            Arc::new(StringArray::from(source_paths)),
            Arc::new(StringArray::from(file_names)),
            Arc::new(StringArray::from(contents)),
            Arc::new(UInt32Array::from(char_counts)),
            Arc::new(UInt32Array::from(chunk_indices)),
            Arc::new(StringArray::from(created_ats)),
        ];

        RecordBatch::try_new(schema, arrays)
            .map_err(|e| PdfChatError::Store(format!("failed to create record batch: {}", e)))
    }

    /// Search for the chunks most similar to the query vector
    #[inline]
    pub async fn search_similar(
        &self,
        query_vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchResult>, PdfChatError> {
        debug!("Searching for similar vectors with limit: {}", limit);

        let table = self
            .connection
            .open_table(&self.table_name)
            .execute()
            .await
            .map_err(|e| PdfChatError::StoreUnavailable(format!("failed to open table: {}", e)))?;

        let query = table
            .vector_search(query_vector)
            .map_err(|e| PdfChatError::Store(format!("failed to create vector search: {}", e)))?
            .column("vector")
            .limit(limit);

        let results = query
            .execute()
            .await
            .map_err(|e| PdfChatError::Store(format!("failed to execute search: {}", e)))?;

        self.parse_search_results_stream(results).await
    }

    async fn parse_search_results_stream(
        &self,
        mut results: lancedb::arrow::SendableRecordBatchStream,
    ) -> Result<Vec<SearchResult>, PdfChatError> {
        let mut search_results = Vec::new();

        while let Some(batch_result) = results
            .try_next()
            .await
            .map_err(|e| PdfChatError::Store(format!("failed to read result stream: {}", e)))?
        {
            let parsed_batch = parse_search_batch(&batch_result)?;
            search_results.extend(parsed_batch);
        }

        debug!("Parsed {} search results from stream", search_results.len());
        Ok(search_results)
    }

    /// Total number of chunk embeddings stored
    #[inline]
    pub async fn count_embeddings(&self) -> Result<u64, PdfChatError> {
        let table = self
            .connection
            .open_table(&self.table_name)
            .execute()
            .await
            .map_err(|e| PdfChatError::Store(format!("failed to open table: {}", e)))?;

        let count = table
            .count_rows(None)
            .await
            .map_err(|e| PdfChatError::Store(format!("failed to count rows: {}", e)))?;

        Ok(count as u64)
    }
}

fn parse_search_batch(batch: &RecordBatch) -> Result<Vec<SearchResult>, PdfChatError> {
    let mut search_results = Vec::new();
    let num_rows = batch.num_rows();

    let chunk_ids = string_column(batch, "chunk_id")?;
    let source_paths = string_column(batch, "source_path")?;
    let file_names = string_column(batch, "file_name")?;
    let contents = string_column(batch, "content")?;
    let char_counts = u32_column(batch, "char_count")?;
    let chunk_indices = u32_column(batch, "chunk_index")?;
    let created_ats = string_column(batch, "created_at")?;

    // Distance column is appended by LanceDB for vector queries
    let distances = batch
        .column_by_name("_distance")
        .map(|col| col.as_any().downcast_ref::<Float32Array>());

    for row in 0..num_rows {
        let chunk_metadata = ChunkMetadata {
            chunk_id: chunk_ids.value(row).to_string(),
            source_path: source_paths.value(row).to_string(),
            file_name: file_names.value(row).to_string(),
            content: contents.value(row).to_string(),
            char_count: char_counts.value(row),
            chunk_index: chunk_indices.value(row),
            created_at: created_ats.value(row).to_string(),
        };

        let distance = distances
            .flatten()
            .map_or(0.0, |d| if d.is_null(row) { 0.0 } else { d.value(row) });

        // Convert distance to similarity score (higher is better)
        let similarity_score = 1.0 - distance;

        search_results.push(SearchResult {
            chunk_metadata,
            similarity_score,
            distance,
        });
    }

    Ok(search_results)
}

fn string_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a StringArray, PdfChatError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| PdfChatError::Store(format!("missing {} column", name)))?
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| PdfChatError::Store(format!("invalid {} column type", name)))
}

fn u32_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a UInt32Array, PdfChatError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| PdfChatError::Store(format!("missing {} column", name)))?
        .as_any()
        .downcast_ref::<UInt32Array>()
        .ok_or_else(|| PdfChatError::Store(format!("invalid {} column type", name)))
}
