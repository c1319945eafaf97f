//! The generation ("brew") trigger.
//!
//! Accepts an authenticated request to generate content for a query no
//! existing topic satisfied, enqueues exactly one job, and returns the
//! accepted request handle. Acceptance is the trigger's whole contract;
//! processing belongs to the external generation pipeline.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tokio::time::timeout;

use wsic_core::config::TriggerTuning;
use wsic_core::traits::JobQueue;
use wsic_core::types::{Difficulty, GenerationJob, GenerationRequest, RequestStatus};
use wsic_core::{Error, Result};

type RecentKey = (String, Difficulty, String);

pub struct GenerationTrigger {
    queue: Arc<dyn JobQueue>,
    tuning: TriggerTuning,
    recent: Mutex<HashMap<RecentKey, Instant>>,
}

impl GenerationTrigger {
    pub fn new(queue: Arc<dyn JobQueue>, tuning: TriggerTuning) -> Self {
        Self {
            queue,
            tuning,
            recent: Mutex::new(HashMap::new()),
        }
    }

    /// Enqueue one generation job and return the accepted request.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` when no user id is supplied (nothing is enqueued);
    /// `DuplicateRequest` when an identical request was accepted within the
    /// suppression window; `GenerationRequestFailed` when the enqueue call
    /// fails or times out.
    pub async fn request_generation(
        &self,
        query: &str,
        difficulty: Difficulty,
        user_id: Option<&str>,
    ) -> Result<GenerationRequest> {
        let user_id = user_id.ok_or(Error::Unauthenticated)?;
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidArgument("empty query".to_string()));
        }

        let key = (query.to_lowercase(), difficulty, user_id.to_string());
        let window = Duration::from_secs(self.tuning.dedup_window_secs);
        if !window.is_zero() && self.recently_accepted(&key, window) {
            return Err(Error::DuplicateRequest);
        }

        let job = GenerationJob {
            topic: query.to_string(),
            difficulty,
            user_id: user_id.to_string(),
            publish_immediately: false,
            max_retries: self.tuning.max_retries,
            retry_backoff_secs: self.tuning.retry_backoff_secs,
        };
        let accepted = timeout(
            Duration::from_millis(self.tuning.enqueue_timeout_ms),
            self.queue.enqueue(&job),
        )
        .await;
        let message_id = match accepted {
            Ok(Ok(id)) => id,
            Ok(Err(e)) => return Err(Error::GenerationRequestFailed(e)),
            Err(_) => {
                return Err(Error::GenerationRequestFailed(anyhow::anyhow!(
                    "enqueue timed out after {}ms",
                    self.tuning.enqueue_timeout_ms
                )))
            }
        };
        tracing::debug!(query, %difficulty, %message_id, "generation job accepted");

        // Recorded only after a successful enqueue so a failed attempt can be
        // retried immediately.
        if !window.is_zero() {
            if let Ok(mut recent) = self.recent.lock() {
                recent.insert(key, Instant::now());
            }
        }

        Ok(GenerationRequest {
            id: message_id,
            query: query.to_string(),
            difficulty,
            user_id: user_id.to_string(),
            status: RequestStatus::Pending,
        })
    }

    fn recently_accepted(&self, key: &RecentKey, window: Duration) -> bool {
        let Ok(mut recent) = self.recent.lock() else {
            return false;
        };
        recent.retain(|_, accepted_at| accepted_at.elapsed() < window);
        recent.contains_key(key)
    }
}
