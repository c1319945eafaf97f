use anyhow::Result;
use tantivy::{doc, Index};

use wsic_core::types::Topic;

use crate::schema::{build_schema, register_tokenizer};

/// Writes published topics into a fresh tantivy index directory.
pub struct TopicIndexer {
    index: Index,
    topic_id_field: tantivy::schema::Field,
    slug_field: tantivy::schema::Field,
    title_field: tantivy::schema::Field,
    description_field: tantivy::schema::Field,
    difficulty_field: tantivy::schema::Field,
    view_count_field: tantivy::schema::Field,
    like_count_field: tantivy::schema::Field,
    share_count_field: tantivy::schema::Field,
}

impl TopicIndexer {
    /// Create (or recreate) the index at `index_dir`. Any previous index in
    /// that directory is replaced.
    pub fn create(index_dir: std::path::PathBuf) -> Result<Self> {
        let schema = build_schema();
        if index_dir.exists() {
            std::fs::remove_dir_all(&index_dir)?;
        }
        std::fs::create_dir_all(&index_dir)?;
        let index = Index::create_in_dir(&index_dir, schema.clone())?;
        register_tokenizer(&index);
        Ok(Self {
            topic_id_field: schema.get_field("topic_id")?,
            slug_field: schema.get_field("slug")?,
            title_field: schema.get_field("title")?,
            description_field: schema.get_field("description")?,
            difficulty_field: schema.get_field("difficulty")?,
            view_count_field: schema.get_field("view_count")?,
            like_count_field: schema.get_field("like_count")?,
            share_count_field: schema.get_field("share_count")?,
            index,
        })
    }

    /// Index every published topic in `topics`; unpublished entries are
    /// skipped so they can never surface in search. Returns the number of
    /// topics indexed.
    pub fn index_topics(&self, topics: &[Topic]) -> Result<usize> {
        let mut index_writer = self.index.writer(50_000_000)?;
        let mut indexed = 0usize;
        for topic in topics {
            if !topic.is_published {
                tracing::debug!(topic_id = %topic.id, "skipping unpublished topic");
                continue;
            }
            let doc = doc!(
                self.topic_id_field => topic.id.clone(),
                self.slug_field => topic.slug.clone(),
                self.title_field => topic.title.clone(),
                self.description_field => topic.description.clone(),
                self.difficulty_field => topic.difficulty.as_str(),
                self.view_count_field => topic.view_count,
                self.like_count_field => topic.like_count,
                self.share_count_field => topic.share_count,
            );
            index_writer.add_document(doc)?;
            indexed += 1;
        }
        index_writer.commit()?;
        Ok(indexed)
    }
}
