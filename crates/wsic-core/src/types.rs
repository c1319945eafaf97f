//! Domain types shared by the lexical index, the vector index, and the
//! reconciliation engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub type TopicId = String;

/// Topic difficulty level. Fixed set; not extensible at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(crate::error::Error::InvalidArgument(format!(
                "unknown difficulty '{}'",
                other
            ))),
        }
    }
}

/// A learning topic as stored in the external catalog. The search core
/// reads topics; it never creates, mutates, or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub share_count: u64,
    #[serde(default)]
    pub is_published: bool,
}

/// One candidate produced by either search path.
///
/// Lexical results carry no score (membership only); vector results carry a
/// similarity score in [0, 1], higher is more similar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub topic_id: TopicId,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub view_count: u64,
    pub like_count: u64,
    pub share_count: u64,
    pub score: Option<f32>,
}

impl SearchResult {
    pub fn from_topic(topic: &Topic, score: Option<f32>) -> Self {
        Self {
            topic_id: topic.id.clone(),
            title: topic.title.clone(),
            description: topic.description.clone(),
            difficulty: topic.difficulty,
            view_count: topic.view_count,
            like_count: topic.like_count,
            share_count: topic.share_count,
            score,
        }
    }
}

/// The engine's primary output: two ordered tiers, disjoint by topic id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconciliationOutcome {
    pub found: Vec<SearchResult>,
    pub related: Vec<SearchResult>,
}

impl ReconciliationOutcome {
    /// The generation ("brew") affordance is shown exactly when nothing
    /// qualified for the found tier.
    pub fn offer_generation(&self) -> bool {
        self.found.is_empty()
    }
}

/// Closed filter specification applied to vector-index queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VectorFilter {
    DifficultyEquals(Difficulty),
    ContentTypeEquals(String),
    PublishedOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// An accepted content-generation request. Lifecycle transitions beyond
/// `Pending` belong to the external generation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub id: String,
    pub query: String,
    pub difficulty: Difficulty,
    pub user_id: String,
    pub status: RequestStatus,
}

/// Wire shape of the message handed to the job queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationJob {
    pub topic: String,
    pub difficulty: Difficulty,
    pub user_id: String,
    pub publish_immediately: bool,
    pub max_retries: u32,
    pub retry_backoff_secs: u64,
}
