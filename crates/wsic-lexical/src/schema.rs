use tantivy::schema::{
    IndexRecordOption, Schema, TextFieldIndexing, TextOptions, STORED, STRING,
};
use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, TextAnalyzer};
use tantivy::Index;

pub const TOKENIZER_NAME: &str = "topic_text";

pub fn build_schema() -> Schema {
    let mut schema_builder = Schema::builder();
    let _topic_id = schema_builder.add_text_field("topic_id", STRING | STORED);
    let _slug = schema_builder.add_text_field("slug", STRING | STORED);

    let text_indexing = TextFieldIndexing::default()
        .set_tokenizer(TOKENIZER_NAME)
        .set_index_option(IndexRecordOption::WithFreqsAndPositions);
    let text_options = TextOptions::default()
        .set_indexing_options(text_indexing)
        .set_stored();
    let _title = schema_builder.add_text_field("title", text_options.clone());
    let _description = schema_builder.add_text_field("description", text_options);

    let _difficulty = schema_builder.add_text_field("difficulty", STRING | STORED);
    let _view_count = schema_builder.add_u64_field("view_count", STORED);
    let _like_count = schema_builder.add_u64_field("like_count", STORED);
    let _share_count = schema_builder.add_u64_field("share_count", STORED);
    schema_builder.build()
}

/// Lowercasing analyzer without stop words: topic titles are short and may
/// consist entirely of words a stop list would drop ("What", "Is", "It").
pub fn register_tokenizer(index: &Index) {
    let tokenizer = TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .build();
    index.tokenizers().register(TOKENIZER_NAME, tokenizer);
}
