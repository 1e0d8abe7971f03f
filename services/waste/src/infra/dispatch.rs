use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::domain::repository::ImageRepository;
use crate::domain::types::ClassifyPolicy;
use crate::error::WasteServiceError;
use crate::usecase::classify::ClassificationOutcome;

#[derive(Debug, Clone, Copy)]
pub struct DispatchConfig {
    /// Classification tasks running at once, across all uploads.
    pub max_concurrent: usize,
    pub call_timeout: Duration,
    pub max_attempts: u32,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 4,
            call_timeout: Duration::from_secs(60),
            max_attempts: 2,
        }
    }
}

/// Runs classification tasks in the background with bounded concurrency.
/// Uploads return immediately; each image's work waits for a semaphore
/// permit before it touches the classifier.
#[derive(Clone)]
pub struct ClassificationDispatcher {
    semaphore: Arc<Semaphore>,
    config: DispatchConfig,
}

impl ClassificationDispatcher {
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
            config,
        }
    }

    pub fn policy(&self) -> ClassifyPolicy {
        ClassifyPolicy {
            call_timeout: self.config.call_timeout,
            max_attempts: self.config.max_attempts,
        }
    }

    /// Spawn one image's classification run. `work` is built by the caller
    /// so the dispatcher stays ignorant of repository and classifier types.
    pub fn spawn<F>(&self, image_id: Uuid, work: F) -> JoinHandle<()>
    where
        F: Future<Output = Result<ClassificationOutcome, WasteServiceError>> + Send + 'static,
    {
        let semaphore = self.semaphore.clone();
        tokio::spawn(async move {
            // Closed semaphores never happen here; the dispatcher owns it.
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return;
            };
            match work.await {
                Ok(outcome) => {
                    tracing::info!(
                        image_id = %outcome.image_id,
                        status = %outcome.status,
                        attempts = outcome.attempts,
                        "classification finished"
                    );
                }
                Err(err) => {
                    tracing::error!(image_id = %image_id, %err, "classification task failed");
                }
            }
        })
    }
}

/// Periodically fail `Processing` images whose worker died before reaching
/// a terminal status, so they do not look in-flight forever.
pub fn spawn_reclaim_sweep<R>(
    images: R,
    every: Duration,
    stale_after: chrono::Duration,
) -> JoinHandle<()>
where
    R: ImageRepository + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let cutoff = chrono::Utc::now() - stale_after;
            match images.reclaim_stale(cutoff).await {
                Ok(0) => {}
                Ok(reclaimed) => {
                    tracing::warn!(reclaimed, "failed stale processing images");
                }
                Err(err) => {
                    tracing::error!(%err, "stale image reclaim failed");
                }
            }
        }
    })
}
