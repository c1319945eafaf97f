use std::str::FromStr;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::{IndexRecordOption, Value};
use tantivy::{Index, TantivyDocument, Term};

use wsic_core::traits::LexicalSearch;
use wsic_core::types::{Difficulty, SearchResult};

use crate::schema::register_tokenizer;

/// Read-side handle over a previously built topic index.
///
/// Results are membership-only: `score` is always `None`, matching the
/// engine's treatment of lexical hits as an unscored set.
pub struct TopicSearcher {
    index: Index,
    topic_id_field: tantivy::schema::Field,
    title_field: tantivy::schema::Field,
    description_field: tantivy::schema::Field,
    difficulty_field: tantivy::schema::Field,
    view_count_field: tantivy::schema::Field,
    like_count_field: tantivy::schema::Field,
    share_count_field: tantivy::schema::Field,
}

impl TopicSearcher {
    pub fn open(index_dir: std::path::PathBuf) -> Result<Self> {
        let index = Index::open_in_dir(&index_dir)?;
        register_tokenizer(&index);
        let schema = index.schema();
        Ok(Self {
            topic_id_field: schema.get_field("topic_id")?,
            title_field: schema.get_field("title")?,
            description_field: schema.get_field("description")?,
            difficulty_field: schema.get_field("difficulty")?,
            view_count_field: schema.get_field("view_count")?,
            like_count_field: schema.get_field("like_count")?,
            share_count_field: schema.get_field("share_count")?,
            index,
        })
    }

    pub fn search_topics(
        &self,
        term: &str,
        difficulty: Option<Difficulty>,
        limit: usize,
    ) -> Result<Vec<SearchResult>> {
        let reader = self.index.reader()?;
        let searcher = reader.searcher();
        let query_parser =
            QueryParser::for_index(&self.index, vec![self.title_field, self.description_field]);
        let parsed = query_parser.parse_query(term)?;

        let query: Box<dyn Query> = match difficulty {
            Some(d) => {
                let difficulty_term = TermQuery::new(
                    Term::from_field_text(self.difficulty_field, d.as_str()),
                    IndexRecordOption::Basic,
                );
                Box::new(BooleanQuery::new(vec![
                    (Occur::Must, parsed),
                    (Occur::Must, Box::new(difficulty_term)),
                ]))
            }
            None => parsed,
        };

        let top_docs = searcher.search(&query, &TopDocs::with_limit(limit))?;
        let mut results = Vec::with_capacity(top_docs.len());
        for (_score, addr) in top_docs {
            let doc: TantivyDocument = searcher.doc(addr)?;
            results.push(self.to_result(&doc)?);
        }
        tracing::debug!(term, hits = results.len(), "lexical search");
        Ok(results)
    }

    fn to_result(&self, doc: &TantivyDocument) -> Result<SearchResult> {
        let text = |field: tantivy::schema::Field, name: &str| -> Result<String> {
            doc.get_first(field)
                .and_then(|v| v.as_str())
                .map(ToString::to_string)
                .ok_or_else(|| anyhow!("stored field '{}' missing", name))
        };
        let count = |field: tantivy::schema::Field| -> u64 {
            doc.get_first(field).and_then(|v| v.as_u64()).unwrap_or(0)
        };
        Ok(SearchResult {
            topic_id: text(self.topic_id_field, "topic_id")?,
            title: text(self.title_field, "title")?,
            description: text(self.description_field, "description")?,
            difficulty: Difficulty::from_str(&text(self.difficulty_field, "difficulty")?)?,
            view_count: count(self.view_count_field),
            like_count: count(self.like_count_field),
            share_count: count(self.share_count_field),
            score: None,
        })
    }
}

#[async_trait]
impl LexicalSearch for TopicSearcher {
    async fn search(
        &self,
        term: &str,
        difficulty: Option<Difficulty>,
        limit: usize,
    ) -> Result<Vec<SearchResult>> {
        self.search_topics(term, difficulty, limit)
    }
}
