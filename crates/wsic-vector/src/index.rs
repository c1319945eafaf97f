use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use arrow_array::{
    BooleanArray, FixedSizeListArray, Float32Array, RecordBatch, RecordBatchIterator, StringArray,
    UInt64Array,
};
use async_trait::async_trait;
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{connect, Connection};

use wsic_core::traits::VectorSearch;
use wsic_core::types::{Difficulty, SearchResult, Topic, VectorFilter};

use crate::filter::render_predicate;
use crate::schema::{build_topics_schema, EMBEDDING_DIM};

/// LanceDB-backed approximate nearest-neighbor index over topic embeddings.
///
/// Each row is one (topic, content type) pair. The index is append-only from
/// the search core's point of view; rows are written at seed time or by the
/// external generation pipeline.
pub struct TopicVectorIndex {
    db: Connection,
    table_name: String,
}

impl TopicVectorIndex {
    pub async fn connect(db_path: &Path, table_name: &str) -> Result<Self> {
        let db = connect(db_path.to_string_lossy().as_ref()).execute().await?;
        Ok(Self {
            db,
            table_name: table_name.to_string(),
        })
    }

    /// Append one embedding row per topic. `embeddings[i]` belongs to
    /// `topics[i]`; every vector must be `EMBEDDING_DIM` wide.
    pub async fn add(
        &self,
        topics: &[Topic],
        content_type: &str,
        embeddings: &[Vec<f32>],
    ) -> Result<()> {
        if topics.is_empty() {
            return Ok(());
        }
        if topics.len() != embeddings.len() {
            return Err(anyhow!(
                "topic/embedding count mismatch: {} vs {}",
                topics.len(),
                embeddings.len()
            ));
        }
        for e in embeddings {
            if e.len() != EMBEDDING_DIM as usize {
                return Err(anyhow!(
                    "embedding dimensionality mismatch: got {}, expected {}",
                    e.len(),
                    EMBEDDING_DIM
                ));
            }
        }

        let record_batch = to_record_batch(topics, content_type, embeddings)?;
        let schema = record_batch.schema();
        let reader = Box::new(RecordBatchIterator::new(
            vec![Ok(record_batch)].into_iter(),
            schema,
        ));
        if self
            .db
            .table_names()
            .execute()
            .await?
            .contains(&self.table_name)
        {
            self.db
                .open_table(&self.table_name)
                .execute()
                .await?
                .add(reader)
                .execute()
                .await?;
        } else {
            self.db
                .create_table(&self.table_name, reader)
                .execute()
                .await?;
        }
        tracing::debug!(rows = topics.len(), table = %self.table_name, "vector rows added");
        Ok(())
    }

    pub async fn search_vectors(
        &self,
        vector: &[f32],
        limit: usize,
        filters: &[VectorFilter],
    ) -> Result<Vec<SearchResult>> {
        // A database with no embeddings yet is an empty result, not a fault.
        if !self
            .db
            .table_names()
            .execute()
            .await?
            .contains(&self.table_name)
        {
            return Ok(Vec::new());
        }
        let table = self.db.open_table(&self.table_name).execute().await?;
        let mut query = table.vector_search(vector.to_vec())?.limit(limit);
        if let Some(predicate) = render_predicate(filters) {
            query = query.only_if(predicate);
        }
        let mut stream = query.execute().await?;

        let mut results = Vec::new();
        while let Some(batch) = TryStreamExt::try_next(&mut stream).await? {
            for i in 0..batch.num_rows() {
                results.push(row_to_result(&batch, i)?);
            }
        }
        Ok(results)
    }
}

#[async_trait]
impl VectorSearch for TopicVectorIndex {
    async fn nearest_neighbors(
        &self,
        vector: &[f32],
        limit: usize,
        filters: &[VectorFilter],
    ) -> Result<Vec<SearchResult>> {
        self.search_vectors(vector, limit, filters).await
    }
}

fn str_col<'a>(batch: &'a RecordBatch, name: &str, i: usize) -> Result<&'a str> {
    Ok(batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| anyhow!("column '{}' missing or not Utf8", name))?
        .value(i))
}

fn u64_col(batch: &RecordBatch, name: &str, i: usize) -> Result<u64> {
    Ok(batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<UInt64Array>())
        .ok_or_else(|| anyhow!("column '{}' missing or not UInt64", name))?
        .value(i))
}

fn row_to_result(batch: &RecordBatch, i: usize) -> Result<SearchResult> {
    // LanceDB reports L2 distance on normalized vectors; fold it into the
    // engine's [0, 1] higher-is-better score.
    let score = batch
        .column_by_name("_distance")
        .and_then(|c| c.as_any().downcast_ref::<Float32Array>())
        .map(|col| (1.0 - col.value(i)).clamp(0.0, 1.0))
        .unwrap_or(0.0);
    Ok(SearchResult {
        topic_id: str_col(batch, "topic_id", i)?.to_string(),
        title: str_col(batch, "title", i)?.to_string(),
        description: str_col(batch, "description", i)?.to_string(),
        difficulty: Difficulty::from_str(str_col(batch, "difficulty", i)?)?,
        view_count: u64_col(batch, "view_count", i)?,
        like_count: u64_col(batch, "like_count", i)?,
        share_count: u64_col(batch, "share_count", i)?,
        score: Some(score),
    })
}

fn to_record_batch(
    topics: &[Topic],
    content_type: &str,
    embeddings: &[Vec<f32>],
) -> Result<RecordBatch> {
    let schema = build_topics_schema();
    let mut topic_ids = Vec::new();
    let mut slugs = Vec::new();
    let mut titles = Vec::new();
    let mut descriptions = Vec::new();
    let mut difficulties = Vec::new();
    let mut content_types = Vec::new();
    let mut published = Vec::new();
    let mut view_counts = Vec::new();
    let mut like_counts = Vec::new();
    let mut share_counts = Vec::new();
    let mut vectors: Vec<Option<Vec<Option<f32>>>> = Vec::new();
    for (topic, embedding) in topics.iter().zip(embeddings) {
        topic_ids.push(topic.id.clone());
        slugs.push(topic.slug.clone());
        titles.push(topic.title.clone());
        descriptions.push(topic.description.clone());
        difficulties.push(topic.difficulty.as_str().to_string());
        content_types.push(content_type.to_string());
        published.push(topic.is_published);
        view_counts.push(topic.view_count);
        like_counts.push(topic.like_count);
        share_counts.push(topic.share_count);
        vectors.push(Some(embedding.iter().map(|&x| Some(x)).collect()));
    }
    let record_batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(topic_ids)),
            Arc::new(StringArray::from(slugs)),
            Arc::new(StringArray::from(titles)),
            Arc::new(StringArray::from(descriptions)),
            Arc::new(StringArray::from(difficulties)),
            Arc::new(StringArray::from(content_types)),
            Arc::new(BooleanArray::from(published)),
            Arc::new(UInt64Array::from(view_counts)),
            Arc::new(UInt64Array::from(like_counts)),
            Arc::new(UInt64Array::from(share_counts)),
            Arc::new(FixedSizeListArray::from_iter_primitive::<
                arrow_array::types::Float32Type,
                _,
                _,
            >(vectors.into_iter(), EMBEDDING_DIM)),
        ],
    )?;
    Ok(record_batch)
}
