use wsic_core::types::{Difficulty, Topic, VectorFilter};
use wsic_embed::HashingProvider;
use wsic_vector::TopicVectorIndex;

fn topic(id: &str, title: &str, difficulty: Difficulty, published: bool) -> Topic {
    Topic {
        id: id.to_string(),
        slug: title.to_lowercase().replace(' ', "-"),
        title: title.to_string(),
        description: format!("An overview of {}", title),
        difficulty,
        view_count: 0,
        like_count: 0,
        share_count: 0,
        is_published: published,
    }
}

async fn seeded_index(dir: &std::path::Path, topics: Vec<Topic>) -> TopicVectorIndex {
    let provider = HashingProvider::new(768);
    let embeddings: Vec<Vec<f32>> = topics
        .iter()
        .map(|t| provider.embed_sync(&format!("{} {}", t.title, t.description)))
        .collect();
    let index = TopicVectorIndex::connect(dir, "topic_embeddings")
        .await
        .expect("connect");
    index
        .add(&topics, "research_brief", &embeddings)
        .await
        .expect("add rows");
    index
}

#[tokio::test]
async fn empty_database_yields_empty_results() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let index = TopicVectorIndex::connect(tmp.path(), "topic_embeddings")
        .await
        .expect("connect");
    let provider = HashingProvider::new(768);
    let results = index
        .search_vectors(&provider.embed_sync("anything"), 10, &[])
        .await
        .expect("search");
    assert!(results.is_empty());
}

#[tokio::test]
async fn published_filter_excludes_drafts() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let index = seeded_index(
        tmp.path(),
        vec![
            topic("t1", "Quantum Physics", Difficulty::Beginner, true),
            topic("t2", "Quantum Computing", Difficulty::Beginner, false),
        ],
    )
    .await;

    let provider = HashingProvider::new(768);
    let results = index
        .search_vectors(
            &provider.embed_sync("Quantum Physics"),
            10,
            &[VectorFilter::PublishedOnly],
        )
        .await
        .expect("search");
    assert!(!results.is_empty());
    assert!(
        results.iter().all(|r| r.topic_id != "t2"),
        "draft topic must not surface"
    );
}

#[tokio::test]
async fn difficulty_filter_applies_at_the_index() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let index = seeded_index(
        tmp.path(),
        vec![
            topic("t1", "Quantum Physics", Difficulty::Beginner, true),
            topic("t2", "Quantum Field Theory", Difficulty::Advanced, true),
        ],
    )
    .await;

    let provider = HashingProvider::new(768);
    let results = index
        .search_vectors(
            &provider.embed_sync("quantum"),
            10,
            &[
                VectorFilter::PublishedOnly,
                VectorFilter::DifficultyEquals(Difficulty::Advanced),
            ],
        )
        .await
        .expect("search");
    assert!(results.iter().all(|r| r.difficulty == Difficulty::Advanced));
}

#[tokio::test]
async fn scores_are_bounded_and_results_carry_metadata() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let index = seeded_index(
        tmp.path(),
        vec![topic("t1", "Quantum Physics", Difficulty::Beginner, true)],
    )
    .await;

    let provider = HashingProvider::new(768);
    let results = index
        .search_vectors(&provider.embed_sync("Quantum Physics"), 10, &[])
        .await
        .expect("search");
    assert_eq!(results.len(), 1);
    let hit = &results[0];
    let score = hit.score.expect("vector hits are scored");
    assert!((0.0..=1.0).contains(&score), "score out of range: {score}");
    assert_eq!(hit.title, "Quantum Physics");
    // Identical text embeds to an identical vector, so distance is ~0.
    assert!(score > 0.9, "self-similarity should be near 1, got {score}");
}
