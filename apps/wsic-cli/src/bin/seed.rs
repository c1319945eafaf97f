use std::env;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};

use wsic_core::catalog;
use wsic_core::config::{expand_path, Config};
use wsic_lexical::TopicIndexer;
use wsic_vector::TopicVectorIndex;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::load()?;

    let catalog_path = env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| {
        let p: String = config
            .get("data.catalog_path")
            .unwrap_or_else(|_| "./data/topics.json".to_string());
        PathBuf::from(p)
    });
    let topics = if catalog_path.is_dir() {
        catalog::load_topic_dir(&catalog_path)?
    } else {
        catalog::load_topics(&catalog_path)?
    };
    println!("Loaded {} topics from {}", topics.len(), catalog_path.display());

    let lexical_dir = expand_path(
        config
            .get::<String>("data.lexical_index_dir")
            .unwrap_or_else(|_| "./data/indexes/lexical".to_string()),
    );
    let indexer = TopicIndexer::create(lexical_dir.clone())?;
    let indexed = indexer.index_topics(&topics)?;
    println!(
        "Indexed {} published topics into {}",
        indexed,
        lexical_dir.display()
    );

    let vector_dir = expand_path(
        config
            .get::<String>("data.vector_db_dir")
            .unwrap_or_else(|_| "./data/indexes/lancedb".to_string()),
    );
    let vector_index = TopicVectorIndex::connect(&vector_dir, "topic_embeddings").await?;
    let provider = wsic_embed::default_provider()?;

    let published: Vec<_> = topics.into_iter().filter(|t| t.is_published).collect();
    let pb = ProgressBar::new(published.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40}] {pos}/{len} topics")?
            .progress_chars("#>-"),
    );
    let mut embedded_topics = Vec::new();
    let mut embeddings = Vec::new();
    for topic in published {
        let text = format!("{}\n{}", topic.title, topic.description);
        match provider.embed(&text).await {
            Some(vector) => {
                embedded_topics.push(topic);
                embeddings.push(vector);
            }
            None => tracing::warn!(topic_id = %topic.id, "embedding unavailable; topic skipped"),
        }
        pb.inc(1);
    }
    pb.finish();
    vector_index
        .add(&embedded_topics, "research_brief", &embeddings)
        .await?;
    println!(
        "Embedded {} topics into {}",
        embedded_topics.len(),
        vector_dir.display()
    );
    Ok(())
}
