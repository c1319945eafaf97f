use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema};

/// Fixed embedding dimensionality for the topic-embeddings table.
pub const EMBEDDING_DIM: i32 = 768;

pub fn build_topics_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("topic_id", DataType::Utf8, false),
        Field::new("slug", DataType::Utf8, false),
        Field::new("title", DataType::Utf8, false),
        Field::new("description", DataType::Utf8, false),
        Field::new("difficulty", DataType::Utf8, false),
        Field::new("content_type", DataType::Utf8, false),
        Field::new("is_published", DataType::Boolean, false),
        Field::new("view_count", DataType::UInt64, false),
        Field::new("like_count", DataType::UInt64, false),
        Field::new("share_count", DataType::UInt64, false),
        Field::new(
            "vector",
            DataType::FixedSizeList(
                Arc::new(Field::new("item", DataType::Float32, true)),
                EMBEDDING_DIM,
            ),
            true,
        ),
    ]))
}
