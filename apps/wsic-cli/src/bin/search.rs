use std::env;
use std::str::FromStr;
use std::sync::Arc;

use wsic_core::config::{expand_path, Config};
use wsic_core::types::{Difficulty, SearchResult};
use wsic_engine::{SearchOrchestrator, SearchReply};
use wsic_lexical::TopicSearcher;
use wsic_vector::TopicVectorIndex;

fn print_tier(label: &str, results: &[SearchResult]) {
    println!("{} ({}):", label, results.len());
    for r in results {
        match r.score {
            Some(score) => println!("  [{:.2}] {} ({})", score, r.title, r.difficulty),
            None => println!("  [lex ] {} ({})", r.title, r.difficulty),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::load()?;

    let mut args = env::args().skip(1);
    let query = args.next().unwrap_or_else(|| {
        eprintln!("Usage: wsic-search \"<query>\" [beginner|intermediate|advanced]");
        std::process::exit(1);
    });
    let difficulty = match args.next() {
        Some(raw) => Difficulty::from_str(&raw)?,
        None => Difficulty::Beginner,
    };

    let lexical_dir = expand_path(
        config
            .get::<String>("data.lexical_index_dir")
            .unwrap_or_else(|_| "./data/indexes/lexical".to_string()),
    );
    let vector_dir = expand_path(
        config
            .get::<String>("data.vector_db_dir")
            .unwrap_or_else(|_| "./data/indexes/lancedb".to_string()),
    );

    let lexical = Arc::new(TopicSearcher::open(lexical_dir)?);
    let vector = Arc::new(TopicVectorIndex::connect(&vector_dir, "topic_embeddings").await?);
    let embedder = wsic_embed::default_provider()?;
    let orchestrator =
        SearchOrchestrator::new(lexical, embedder, vector, config.search_tuning());

    match orchestrator.search(&query, difficulty).await? {
        SearchReply::Fresh(response) => {
            print_tier("Found", &response.outcome.found);
            print_tier("Related", &response.outcome.related);
            if response.offer_generation {
                println!(
                    "No direct match. Brew a new '{}' module at {} level?",
                    query, difficulty
                );
            }
        }
        SearchReply::Superseded => {
            // Single-shot CLI searches can't be superseded; nothing to show.
        }
    }
    Ok(())
}
