use std::env;
use std::str::FromStr;
use std::sync::Arc;

use wsic_core::config::Config;
use wsic_core::types::Difficulty;
use wsic_engine::{GenerationTrigger, MemoryQueue};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::load()?;

    let mut args = env::args().skip(1);
    let (Some(query), Some(raw_difficulty), Some(user_id)) =
        (args.next(), args.next(), args.next())
    else {
        eprintln!("Usage: wsic-brew \"<query>\" <difficulty> <user-id>");
        std::process::exit(1);
    };
    let difficulty = Difficulty::from_str(&raw_difficulty)?;

    let queue = Arc::new(MemoryQueue::new());
    let trigger = GenerationTrigger::new(queue.clone(), config.trigger_tuning());
    let request = trigger
        .request_generation(&query, difficulty, Some(&user_id))
        .await?;

    println!(
        "Accepted generation request {} ({:?}) for '{}' at {} level",
        request.id, request.status, request.query, request.difficulty
    );
    for job in queue.drain() {
        println!(
            "Queued job: topic='{}' user='{}' retries={} backoff={}s",
            job.topic, job.user_id, job.max_retries, job.retry_backoff_secs
        );
    }
    Ok(())
}
