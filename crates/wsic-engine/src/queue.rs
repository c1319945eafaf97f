use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use wsic_core::traits::JobQueue;
use wsic_core::types::GenerationJob;

/// In-process queue implementation used by the CLI and tests. The production
/// deployment points the trigger at the external worker queue instead.
#[derive(Default)]
pub struct MemoryQueue {
    next_id: AtomicU64,
    messages: Mutex<Vec<(String, GenerationJob)>>,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take every queued job, oldest first.
    pub fn drain(&self) -> Vec<GenerationJob> {
        self.messages
            .lock()
            .map(|mut m| m.drain(..).map(|(_, job)| job).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl JobQueue for MemoryQueue {
    async fn enqueue(&self, job: &GenerationJob) -> anyhow::Result<String> {
        let id = format!("msg-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.messages
            .lock()
            .map_err(|_| anyhow::anyhow!("queue mutex poisoned"))?
            .push((id.clone(), job.clone()));
        Ok(id)
    }
}
